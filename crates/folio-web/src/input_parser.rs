#![forbid(unsafe_code)]

//! JSON input parser for host-encoded wheel events.
//!
//! The page script forwards DOM `wheel` events as JSON of the form
//!
//! ```json
//! {"kind":"wheel","dy":120,"dx":0,"mode":0,"mods":0}
//! ```
//!
//! [`parse_wheel_input`] turns that into a [`WheelEvent`]. Other kinds return
//! `Ok(None)` so the host can push every input through one channel.

use folio_core::event::{DeltaMode, Modifiers, WheelEvent};
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// `mode` outside the DOM `deltaMode` range.
    UnknownDeltaMode(u32),
    /// A delta was NaN or infinite.
    NonFiniteDelta(&'static str),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownDeltaMode(mode) => write!(f, "unknown delta mode: {mode}"),
            Self::NonFiniteDelta(field) => write!(f, "non-finite delta: {field}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    dy: Option<f64>,
    #[serde(default)]
    dx: Option<f64>,
    #[serde(default)]
    mode: Option<u32>,
    #[serde(default)]
    mods: Option<i32>,
}

/// Parse one JSON-encoded input.
///
/// Returns `Ok(None)` for kinds other than `"wheel"`, and `Err` for malformed
/// JSON or a wheel input without `dy`.
pub fn parse_wheel_input(json: &str) -> Result<Option<WheelEvent>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "wheel" => parse_wheel(&raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_wheel(raw: &RawInput) -> Result<WheelEvent, InputParseError> {
    let dy = raw.dy.ok_or(InputParseError::MissingField("dy"))?;
    if !dy.is_finite() {
        return Err(InputParseError::NonFiniteDelta("dy"));
    }
    let dx = raw.dx.unwrap_or(0.0);
    if !dx.is_finite() {
        return Err(InputParseError::NonFiniteDelta("dx"));
    }
    let mode = match raw.mode {
        None => DeltaMode::Pixel,
        Some(m) => DeltaMode::from_dom(m).ok_or(InputParseError::UnknownDeltaMode(m))?,
    };

    Ok(WheelEvent::vertical(dy)
        .with_delta_x(dx)
        .with_mode(mode)
        .with_modifiers(parse_modifiers(raw.mods)))
}

fn parse_modifiers(mods: Option<i32>) -> Modifiers {
    let bits = mods.unwrap_or(0).clamp(0, i32::from(u8::MAX)) as u8;
    Modifiers::from_bits_truncate(bits)
}
