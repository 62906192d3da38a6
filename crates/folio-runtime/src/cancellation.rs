#![forbid(unsafe_code)]

//! Teardown signal for frame loops scheduled by a mounted pager.
//!
//! A host drives the pager from a frame callback (`requestAnimationFrame` on
//! the web, a timer elsewhere). When the pager is torn down, the callback may
//! already be queued. [`FrameCancellation`] is the control side held by the
//! mount; each scheduled callback holds a [`FrameToken`] and checks it before
//! touching the pager.
//!
//! ```
//! use folio_runtime::cancellation::FrameCancellation;
//!
//! let source = FrameCancellation::new();
//! let token = source.token();
//! assert!(token.is_live());
//!
//! source.cancel();
//! assert!(token.is_cancelled());
//! ```
//!
//! # Invariants
//!
//! 1. Cancellation is one-way; a cancelled source never becomes live again.
//! 2. Every token observes the state of the source it came from, including
//!    tokens minted after cancellation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable view of a [`FrameCancellation`].
#[derive(Clone)]
pub struct FrameToken {
    cancelled: Arc<AtomicBool>,
}

impl FrameToken {
    /// Whether teardown has been requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether the frame loop may keep running.
    #[inline]
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.is_cancelled()
    }
}

impl fmt::Debug for FrameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Control handle that cancels every [`FrameToken`] it has issued.
///
/// Dropping the source does not cancel; the mount calls [`cancel`] from its
/// teardown path.
///
/// [`cancel`]: Self::cancel
pub struct FrameCancellation {
    cancelled: Arc<AtomicBool>,
}

impl FrameCancellation {
    /// Create a live source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mint a token for a scheduled frame callback.
    #[must_use]
    pub fn token(&self) -> FrameToken {
        FrameToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Cancel all tokens. Returns `true` on the first call only.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for FrameCancellation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameCancellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameCancellation")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
