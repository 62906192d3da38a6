#![forbid(unsafe_code)]

//! Page sequence and the clamped current-page store.
//!
//! [`PageIndexStore`] is the single source of truth for which page is
//! active. The only mutation is [`go_to`](PageIndexStore::go_to), which clamps
//! any requested index into `[0, N-1]`; out-of-range requests are a normal
//! case, not an error.
//!
//! # Invariants
//!
//! 1. `0 <= current() < len()` at all times.
//! 2. `current()` only ever takes the clamp of the most recent request.
//! 3. Observers fire exactly once per genuine change and never when the clamp
//!    absorbs a request.

use std::fmt;
use std::sync::Arc;

use crate::reactive::{Observable, Subscription};

/// Errors building a [`Pages`] sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagesError {
    /// At least one page is required.
    Empty,
}

impl fmt::Display for PagesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "a pager needs at least one page"),
        }
    }
}

impl std::error::Error for PagesError {}

/// Ordered, immutable sequence of page identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pages {
    ids: Arc<[String]>,
}

impl Pages {
    /// Build from identifiers in display order.
    pub fn new<I, S>(ids: I) -> Result<Self, PagesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Arc<[String]> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(PagesError::Empty);
        }
        Ok(Self { ids })
    }

    /// Number of pages (`N`, always at least 1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifier at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Position of `id`, if present.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|p| p == id)
    }

    /// Iterate identifiers in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Clamp `requested` into `[0, len-1]`.
    #[must_use]
    pub fn clamp(&self, requested: i64) -> usize {
        let last = self.len() - 1;
        if requested <= 0 {
            0
        } else {
            usize::try_from(requested).map_or(last, |r| r.min(last))
        }
    }
}

/// Outcome of [`PageIndexStore::go_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    /// Index after clamping (the current index once the call returns).
    pub index: usize,
    /// Whether the index actually moved.
    pub changed: bool,
}

/// Holds the current page index and enforces bounds.
#[derive(Debug, Clone)]
pub struct PageIndexStore {
    pages: Pages,
    index: Observable<usize>,
}

impl PageIndexStore {
    /// Create a store positioned on the first page.
    #[must_use]
    pub fn new(pages: Pages) -> Self {
        Self {
            pages,
            index: Observable::new(0),
        }
    }

    /// Clamp `requested` into range and move there if it differs.
    pub fn go_to(&self, requested: i64) -> PageChange {
        let index = self.pages.clamp(requested);
        let changed = self.index.set(index);
        PageChange { index, changed }
    }

    /// Current page index.
    #[inline]
    #[must_use]
    pub fn current(&self) -> usize {
        self.index.get()
    }

    /// Identifier of the current page.
    #[must_use]
    pub fn current_page(&self) -> &str {
        let index = self.current();
        self.pages.get(index).unwrap_or_default()
    }

    /// The page sequence.
    #[must_use]
    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`: a store holds at least one page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of genuine index changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.index.version()
    }

    /// Observe index changes (e.g. to drive a page indicator).
    pub fn subscribe(&self, callback: impl Fn(usize) + 'static) -> Subscription {
        self.index.subscribe(move |index| callback(*index))
    }
}
