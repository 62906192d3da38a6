#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Provides physically-based motion for page transitions. Based on the
//! classical damped spring equation with unit mass:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag. Higher = less oscillation.
//!   - Underdamped (c < 2√k): oscillates past target before settling
//!   - Critically damped (c ≈ 2√k): fastest convergence without overshoot
//!   - Overdamped (c > 2√k): slow convergence, no overshoot
//! - **velocity**: initial velocity in units per second.
//! - **rest_delta** / **rest_speed**: the spring is at rest once both the
//!   distance to target and the speed fall below these.
//!
//! # Integration
//!
//! Semi-implicit Euler, sub-stepped at 4 ms so large frame deltas stay
//! stable.
//!
//! # Invariants
//!
//! 1. `position()` is unclamped; targets may be any finite value (pixel offsets
//!    are typically negative).
//! 2. On reaching rest the position snaps exactly to the target and velocity
//!    becomes zero.
//! 3. A spring at rest does not move until `retarget()`, `impulse()` or
//!    `reset()` is called.
//! 4. Stiffness is at least 0.1 and damping is non-negative.
//!
//! # Failure Modes
//!
//! - Zero damping: oscillates forever; `is_at_rest()` may never become true.
//! - Non-finite velocities passed to the builders or `retarget()` read as zero.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// Spring configuration: physics constants plus rest thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Restoring force strength.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
    /// Initial velocity (units/second) applied when an animation starts.
    pub velocity: f64,
    /// Distance to target below which the spring may rest.
    pub rest_delta: f64,
    /// Speed below which the spring may rest.
    pub rest_speed: f64,
}

impl SpringParams {
    /// Page transition spring: stiffness 100, damping 20, initial velocity 5.
    ///
    /// Critically damped for unit mass, with a small initial kick: the offset
    /// decelerates into the page boundary instead of snapping linearly.
    pub const PAGE_TRANSITION: Self = Self {
        stiffness: 100.0,
        damping: 20.0,
        velocity: 5.0,
        rest_delta: 0.5,
        rest_speed: 2.0,
    };

    /// Critical damping coefficient for this stiffness.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.max(MIN_STIFFNESS).sqrt()
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::PAGE_TRANSITION
    }
}

/// A damped harmonic oscillator producing physically-based motion.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use folio_core::animation::{Animation, Spring, SpringParams};
///
/// let mut spring = Spring::new(0.0, -800.0).with_params(SpringParams::PAGE_TRANSITION);
///
/// // Simulate at 60fps
/// for _ in 0..200 {
///     spring.tick(Duration::from_millis(16));
/// }
///
/// assert_eq!(spring.position(), -800.0);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    initial_velocity: f64,
    stiffness: f64,
    damping: f64,
    rest_delta: f64,
    rest_speed: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`, with zero
    /// initial velocity and [`SpringParams::PAGE_TRANSITION`] physics.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        let params = SpringParams::PAGE_TRANSITION;
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            initial_velocity: 0.0,
            stiffness: params.stiffness,
            damping: params.damping,
            rest_delta: params.rest_delta,
            rest_speed: params.rest_speed,
            at_rest: false,
        }
    }

    /// Apply all parameters, including the initial velocity (builder pattern).
    #[must_use]
    pub fn with_params(self, params: SpringParams) -> Self {
        self.with_stiffness(params.stiffness)
            .with_damping(params.damping)
            .with_velocity(params.velocity)
            .with_rest_delta(params.rest_delta)
            .with_rest_speed(params.rest_speed)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Set the starting velocity (builder pattern).
    #[must_use]
    pub fn with_velocity(mut self, v: f64) -> Self {
        let v = if v.is_finite() { v } else { 0.0 };
        self.velocity = v;
        self.initial_velocity = v;
        self
    }

    /// Set rest distance (builder pattern).
    #[must_use]
    pub fn with_rest_delta(mut self, delta: f64) -> Self {
        self.rest_delta = delta.abs();
        self
    }

    /// Set rest speed (builder pattern).
    #[must_use]
    pub fn with_rest_speed(mut self, speed: f64) -> Self {
        self.rest_speed = speed.abs();
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Stiffness parameter.
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Redirect toward `target` from the current position, replacing the
    /// velocity. Always wakes the spring.
    ///
    /// The current position becomes the new starting point, so progress and
    /// `reset()` are measured from here.
    pub fn retarget(&mut self, target: f64, velocity: f64) {
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self.target = target;
        self.initial = self.position;
        self.initial_velocity = velocity;
        self.velocity = velocity;
        self.at_rest = false;
    }

    /// [`retarget`](Self::retarget), also replacing stiffness, damping and
    /// rest thresholds with `params`.
    pub fn retarget_with(&mut self, target: f64, params: SpringParams) {
        self.stiffness = params.stiffness.max(MIN_STIFFNESS);
        self.damping = params.damping.max(0.0);
        self.rest_delta = params.rest_delta.abs();
        self.rest_speed = params.rest_speed.abs();
        self.retarget(target, params.velocity);
    }

    /// Apply an impulse (add to velocity). Wakes the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    /// Stop in place: the target becomes the current position.
    pub fn halt(&mut self) {
        self.target = self.position;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Perform a single integration step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.rest_delta && self.velocity.abs() < self.rest_speed {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Progress from the initial position toward the target, clamped to
    /// `[0.0, 1.0]`. A zero-distance spring reports `1.0`.
    fn value(&self) -> f32 {
        let span = self.target - self.initial;
        if span.abs() < f64::EPSILON {
            return 1.0;
        }
        (((self.position - self.initial) / span) as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = self.initial_velocity;
        self.at_rest = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
