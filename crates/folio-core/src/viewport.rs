#![forbid(unsafe_code)]

//! Viewport height sources.
//!
//! The pager reads the height of the display surface once per transition
//! request. There is no resize subscription: a value read before a resize
//! stays in effect until the next transition.

use std::cell::Cell;
use std::rc::Rc;

/// Synchronous query for the current viewport height in pixels.
pub trait ViewportSource {
    /// Current height, or `None` when there is no display surface yet.
    fn height(&self) -> Option<f64>;

    /// Height with unknown, negative or non-finite values read as `0`.
    fn height_or_zero(&self) -> f64 {
        match self.height() {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => 0.0,
        }
    }
}

/// A viewport whose height never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport(pub f64);

impl ViewportSource for FixedViewport {
    fn height(&self) -> Option<f64> {
        Some(self.0)
    }
}

/// A viewport with no display surface (height reads as `0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetachedViewport;

impl ViewportSource for DetachedViewport {
    fn height(&self) -> Option<f64> {
        None
    }
}

/// A host-updated viewport height shared between the host and the pager.
///
/// Cloning yields another handle to the same cell.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    height: Rc<Cell<Option<f64>>>,
}

impl SharedViewport {
    /// Create with an initial height.
    #[must_use]
    pub fn new(height: Option<f64>) -> Self {
        Self {
            height: Rc::new(Cell::new(height)),
        }
    }

    /// Record a new height. Takes effect at the next transition request.
    pub fn set(&self, height: Option<f64>) {
        self.height.set(height);
    }
}

impl ViewportSource for SharedViewport {
    fn height(&self) -> Option<f64> {
        self.height.get()
    }
}

impl<V: ViewportSource + ?Sized> ViewportSource for Box<V> {
    fn height(&self) -> Option<f64> {
        (**self).height()
    }
}
