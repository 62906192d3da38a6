#![forbid(unsafe_code)]

//! Animatable scalar: a value that springs toward a target on frame ticks.
//!
//! [`AnimatedValue`] is the `start / get / cancel` capability the pager binds
//! its vertical offset to. It owns at most one in-flight [`Spring`]; starting
//! a new animation while one runs redirects the existing motion from the
//! current position instead of queuing.
//!
//! # Invariants
//!
//! 1. `get()` always returns a finite value.
//! 2. After [`AnimationStatus::Settled`] is reported, `get()` equals the
//!    target exactly.
//! 3. `Settled` is reported exactly once per animation; subsequent ticks
//!    report `Idle`.
//! 4. `cancel()` freezes the value where it is and never reports `Settled`.

use std::time::Duration;

use super::Animation;
use super::spring::{Spring, SpringParams};

/// Result of advancing an [`AnimatedValue`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStatus {
    /// Nothing in flight.
    Idle,
    /// Still moving; carries the value after this tick.
    Running(f64),
    /// Reached rest during this tick.
    Settled(f64),
}

/// A scalar driven by spring animations.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    value: f64,
    spring: Option<Spring>,
    /// Incremented on every `start()`; lets observers tell animations apart.
    generation: u64,
}

impl AnimatedValue {
    /// Create a resting value.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value: if value.is_finite() { value } else { 0.0 },
            spring: None,
            generation: 0,
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Target of the in-flight animation, if any.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.spring.as_ref().map(Spring::target)
    }

    /// Whether an animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.spring.is_some()
    }

    /// Generation of the most recently started animation.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Progress of the in-flight animation in `[0.0, 1.0]` (`1.0` when idle).
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.spring.as_ref().map_or(1.0, Animation::value)
    }

    /// Start (or redirect) an animation toward `target`.
    ///
    /// If an animation is already running it keeps its current position and
    /// takes the new target and all of `params` in one step; progress then
    /// restarts from that position.
    pub fn start(&mut self, target: f64, params: SpringParams) -> u64 {
        let target = if target.is_finite() { target } else { 0.0 };
        match self.spring.as_mut() {
            Some(spring) => spring.retarget_with(target, params),
            None => {
                self.spring = Some(Spring::new(self.value, target).with_params(params));
            }
        }
        self.generation += 1;
        self.generation
    }

    /// Jump to `value`, discarding any animation.
    pub fn set(&mut self, value: f64) {
        self.spring = None;
        if value.is_finite() {
            self.value = value;
        }
    }

    /// Stop the in-flight animation at its current value.
    ///
    /// Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.spring.take() {
            Some(mut spring) => {
                spring.halt();
                self.value = spring.position();
                true
            }
            None => false,
        }
    }

    /// Advance the in-flight animation by `dt`.
    pub fn tick(&mut self, dt: Duration) -> AnimationStatus {
        let Some(spring) = self.spring.as_mut() else {
            return AnimationStatus::Idle;
        };
        spring.tick(dt);
        let position = spring.position();
        if position.is_finite() {
            self.value = position;
        }
        if spring.is_complete() {
            self.value = spring.target();
            self.spring = None;
            AnimationStatus::Settled(self.value)
        } else {
            AnimationStatus::Running(self.value)
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn run_to_settle(value: &mut AnimatedValue) -> (usize, f64) {
        for frame in 1..=1000 {
            if let AnimationStatus::Settled(v) = value.tick(MS_16) {
                return (frame, v);
            }
        }
        panic!("animation did not settle: {value:?}");
    }

    #[test]
    fn new_is_idle() {
        let mut value = AnimatedValue::new(0.0);
        assert!(!value.is_animating());
        assert_eq!(value.target(), None);
        assert_eq!(value.tick(MS_16), AnimationStatus::Idle);
        assert_eq!(value.progress(), 1.0);
    }

    #[test]
    fn non_finite_initial_reads_zero() {
        assert_eq!(AnimatedValue::new(f64::NAN).get(), 0.0);
    }

    #[test]
    fn start_then_settle_exactly() {
        let mut value = AnimatedValue::new(0.0);
        value.start(-800.0, SpringParams::PAGE_TRANSITION);
        assert!(value.is_animating());
        assert_eq!(value.target(), Some(-800.0));

        let (_, settled) = run_to_settle(&mut value);
        assert_eq!(settled, -800.0);
        assert_eq!(value.get(), -800.0);
        assert!(!value.is_animating());
        assert_eq!(value.tick(MS_16), AnimationStatus::Idle);
    }

    #[test]
    fn running_reports_intermediate_values() {
        let mut value = AnimatedValue::new(0.0);
        value.start(-800.0, SpringParams::PAGE_TRANSITION);
        match value.tick(MS_16) {
            AnimationStatus::Running(v) => {
                assert!(v < 0.0 && v > -800.0, "value: {v}");
                assert_eq!(v, value.get());
            }
            other => panic!("expected running, got {other:?}"),
        }
    }

    #[test]
    fn start_while_running_retargets_from_current_position() {
        let mut value = AnimatedValue::new(0.0);
        let first = value.start(-800.0, SpringParams::PAGE_TRANSITION);
        for _ in 0..8 {
            value.tick(MS_16);
        }
        let midflight = value.get();
        let second = value.start(-1600.0, SpringParams::PAGE_TRANSITION);

        assert!(second > first);
        assert_eq!(value.get(), midflight);
        assert_eq!(value.target(), Some(-1600.0));
        assert_eq!(value.progress(), 0.0);
        let (_, settled) = run_to_settle(&mut value);
        assert_eq!(settled, -1600.0);
    }

    #[test]
    fn cancel_freezes_and_never_settles() {
        let mut value = AnimatedValue::new(0.0);
        value.start(-800.0, SpringParams::PAGE_TRANSITION);
        for _ in 0..5 {
            value.tick(MS_16);
        }
        let frozen = value.get();
        assert!(value.cancel());
        assert!(!value.is_animating());
        assert_eq!(value.get(), frozen);
        assert_eq!(value.tick(MS_16), AnimationStatus::Idle);
        assert!(!value.cancel());
    }

    #[test]
    fn set_discards_animation() {
        let mut value = AnimatedValue::new(0.0);
        value.start(-800.0, SpringParams::PAGE_TRANSITION);
        value.set(-1600.0);
        assert!(!value.is_animating());
        assert_eq!(value.get(), -1600.0);
    }

    #[test]
    fn page_transition_settles_within_two_seconds() {
        let mut value = AnimatedValue::new(0.0);
        value.start(-800.0, SpringParams::PAGE_TRANSITION);
        let (frames, _) = run_to_settle(&mut value);
        assert!(frames < 125, "settled after {frames} frames");
    }
}
