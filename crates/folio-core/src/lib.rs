// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: wheel input, viewport sources, and spring motion primitives.
//!
//! # Role in Folio
//! `folio-core` is the input and motion layer. It owns the normalized wheel
//! event type, the environment query for the viewport height, and the
//! animatable scalar that the pager drives toward page boundaries.
//!
//! # Primary responsibilities
//! - **WheelEvent**: canonical wheel gesture (signed deltas, delta mode, modifiers).
//! - **ViewportSource**: synchronous read of the display surface height.
//! - **Spring**: damped harmonic oscillator with sub-stepped integration.
//! - **AnimatedValue**: start/get/cancel capability over a spring.
//!
//! # How it fits in the system
//! The runtime (`folio-runtime`) consumes `WheelEvent` values, asks a
//! `ViewportSource` for the page height, and advances an `AnimatedValue` on
//! every frame tick. Nothing here knows about pages.

pub mod animation;
pub mod event;
pub mod logging;
pub mod viewport;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, trace_span, warn};
