#![forbid(unsafe_code)]

//! Canonical wheel input types.
//!
//! The pager only reacts to vertical wheel motion, but the event keeps the
//! full shape a browser or native windowing layer reports so hosts can build
//! it without discarding information.
//!
//! # Design Notes
//!
//! - Positive `delta_y` means the content should move down (scroll toward the
//!   next page), matching DOM `WheelEvent.deltaY`.
//! - Deltas are carried in the host's units; [`DeltaMode`] records which ones.
//!   Tolerance checks compare the raw value.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// Unit of a wheel delta, mirroring DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeltaMode {
    /// Deltas are in pixels (trackpads, most mice in browsers).
    #[default]
    Pixel,
    /// Deltas are in lines.
    Line,
    /// Deltas are in pages.
    Page,
}

impl DeltaMode {
    /// Decode the DOM numeric `deltaMode` (`0`, `1`, `2`).
    #[must_use]
    pub const fn from_dom(mode: u32) -> Option<Self> {
        match mode {
            0 => Some(Self::Pixel),
            1 => Some(Self::Line),
            2 => Some(Self::Page),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during a wheel event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A wheel (scroll) gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Horizontal delta. Carried for completeness; paging is vertical only.
    pub delta_x: f64,

    /// Vertical delta. Positive scrolls toward later pages.
    pub delta_y: f64,

    /// Unit of both deltas.
    pub mode: DeltaMode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// A vertical pixel-mode wheel event.
    #[must_use]
    pub const fn vertical(delta_y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            mode: DeltaMode::Pixel,
            modifiers: Modifiers::NONE,
        }
    }

    /// Set the horizontal delta.
    #[must_use]
    pub const fn with_delta_x(mut self, delta_x: f64) -> Self {
        self.delta_x = delta_x;
        self
    }

    /// Set the delta mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: DeltaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether the vertical magnitude strictly exceeds `tolerance`.
    ///
    /// NaN deltas never exceed anything.
    #[must_use]
    pub fn exceeds(&self, tolerance: f64) -> bool {
        self.delta_y.abs() > tolerance
    }

    /// Paging direction: `+1` for positive `delta_y`, `-1` otherwise.
    #[must_use]
    pub fn direction(&self) -> i64 {
        if self.delta_y > 0.0 { 1 } else { -1 }
    }
}
