#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Everything here is advanced explicitly by the host through
//! [`Animation::tick`]; nothing spawns timers or reads a clock. That keeps the
//! motion deterministic under test and lets a browser host drive it from
//! `requestAnimationFrame`.

pub mod animated_value;
pub mod spring;

use std::time::Duration;

pub use animated_value::{AnimatedValue, AnimationStatus};
pub use spring::{Spring, SpringParams};

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has finished.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the starting state.
    fn reset(&mut self);
}
