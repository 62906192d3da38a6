#![forbid(unsafe_code)]

//! Pager configuration as data.
//!
//! Captures the tunable parameters of the pager (wheel tolerance, spring
//! physics, frame-delta cap) as a single [`PagerConfig`] that can be loaded
//! from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # folio.toml
//! wheel_tolerance = 10.0
//!
//! [spring]
//! stiffness = 100.0
//! damping = 20.0
//! velocity = 5.0
//! ```
//!
//! ```rust,ignore
//! let config = PagerConfig::from_toml_file("folio.toml")?;
//! let config = PagerConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `PagerConfig::default()` reproduces the stock page transition: tolerance
//! 10, stiffness 100, damping 20, initial velocity 5. Missing tables or keys
//! fall back to these values.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use folio_core::animation::SpringParams;

/// Default minimum |deltaY| a wheel gesture must exceed to page.
pub const DEFAULT_WHEEL_TOLERANCE: f64 = 10.0;

/// Default cap on a single frame delta, in milliseconds.
pub const DEFAULT_MAX_FRAME_DT_MS: u64 = 100;

/// Top-level pager configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PagerConfig {
    /// Wheel gestures with `|deltaY| <= wheel_tolerance` are ignored.
    pub wheel_tolerance: f64,

    /// Frame deltas longer than this are clamped before integration
    /// (e.g. after a backgrounded tab resumes).
    pub max_frame_dt_ms: u64,

    /// Spring used for every page transition.
    pub spring: SpringConfig,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            wheel_tolerance: DEFAULT_WHEEL_TOLERANCE,
            max_frame_dt_ms: DEFAULT_MAX_FRAME_DT_MS,
            spring: SpringConfig::default(),
        }
    }
}

/// Spring physics for page transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SpringConfig {
    /// Restoring force strength.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
    /// Initial velocity (px/s) applied when a transition starts.
    pub velocity: f64,
    /// Distance (px) below which the offset may settle.
    pub rest_delta: f64,
    /// Speed (px/s) below which the offset may settle.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        let p = SpringParams::PAGE_TRANSITION;
        Self {
            stiffness: p.stiffness,
            damping: p.damping,
            velocity: p.velocity,
            rest_delta: p.rest_delta,
            rest_speed: p.rest_speed,
        }
    }
}

impl From<SpringConfig> for SpringParams {
    fn from(c: SpringConfig) -> Self {
        Self {
            stiffness: c.stiffness,
            damping: c.damping,
            velocity: c.velocity,
            rest_delta: c.rest_delta,
            rest_speed: c.rest_speed,
        }
    }
}

impl PagerConfig {
    /// Spring parameters for the animated offset.
    #[must_use]
    pub fn spring_params(&self) -> SpringParams {
        self.spring.into()
    }

    /// Frame-delta cap as a `Duration`.
    #[must_use]
    pub fn max_frame_dt(&self) -> Duration {
        Duration::from_millis(self.max_frame_dt_ms)
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PagerConfigError> {
        let config: Self = toml::from_str(s).map_err(PagerConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PagerConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PagerConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, PagerConfigError> {
        let config: Self = serde_json::from_str(s).map_err(PagerConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PagerConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PagerConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check every parameter is in range. An empty list means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.wheel_tolerance.is_finite() || self.wheel_tolerance < 0.0 {
            errors.push(format!(
                "wheel_tolerance must be finite and >= 0, got {}",
                self.wheel_tolerance
            ));
        }
        if !self.spring.stiffness.is_finite() || self.spring.stiffness <= 0.0 {
            errors.push(format!(
                "spring.stiffness must be > 0, got {}",
                self.spring.stiffness
            ));
        }
        if !self.spring.damping.is_finite() || self.spring.damping <= 0.0 {
            errors.push(format!(
                "spring.damping must be > 0 (zero never settles), got {}",
                self.spring.damping
            ));
        }
        if !self.spring.velocity.is_finite() {
            errors.push(format!(
                "spring.velocity must be finite, got {}",
                self.spring.velocity
            ));
        }
        if !self.spring.rest_delta.is_finite() || self.spring.rest_delta <= 0.0 {
            errors.push(format!(
                "spring.rest_delta must be > 0, got {}",
                self.spring.rest_delta
            ));
        }
        if !self.spring.rest_speed.is_finite() || self.spring.rest_speed <= 0.0 {
            errors.push(format!(
                "spring.rest_speed must be > 0, got {}",
                self.spring.rest_speed
            ));
        }
        if self.max_frame_dt_ms == 0 {
            errors.push("max_frame_dt_ms must be > 0".into());
        }

        errors
    }

    /// Return `self` if valid, or the collected violations.
    pub fn validated(self) -> Result<Self, PagerConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PagerConfigError::Validation(errors))
        }
    }
}

/// Errors from loading a [`PagerConfig`].
#[derive(Debug)]
pub enum PagerConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PagerConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PagerConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
