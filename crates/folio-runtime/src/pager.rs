#![forbid(unsafe_code)]

//! Wheel-driven, spring-animated page navigation.
//!
//! [`ScrollPager`] owns the vertical offset of the page stack and turns wheel
//! gestures into page transitions. Each page is one viewport tall, so page
//! `k` rests at offset `-k * viewport_height`.
//!
//! # State Machine
//!
//! ```text
//!            request (offset must move)
//!   Idle ─────────────────────────────▶ Transitioning { to }
//!    ▲                                     │   ▲
//!    │ settle / cancel                     │   │ programmatic request
//!    └─────────────────────────────────────┘───┘ (retarget in flight)
//! ```
//!
//! - **Idle**: no spring is running; wheel input is accepted.
//! - **Transitioning**: a spring is in flight. Wheel gestures are dropped
//!   (no queuing, no coalescing); programmatic requests retarget the spring.
//!
//! The phase is tracked explicitly and flipped on start and settle rather than
//! inferred from the offset, so floating-point drift can never leave the pager
//! stuck in either state.
//!
//! # Invariants
//!
//! 1. `current()` is always in `[0, N-1]`.
//! 2. `phase()` is `Transitioning` iff the offset is animating.
//! 3. After a transition settles, `offset()` equals `-current() * h` for the
//!    height `h` read at the last transition request. [`ScrollPager::cancel`]
//!    is the one exception: it returns to `Idle` with the offset frozen
//!    wherever the spring was.
//! 4. A wheel gesture changes `current()` by at most one.
//! 5. A pager only exists with a validated [`PagerConfig`], so every
//!    transition reaches rest in finite time.
//!
//! # Failure Modes
//!
//! - Invalid configuration (zero damping, zero frame cap, non-finite values):
//!   [`ScrollPager::new`] refuses it with [`PagerConfigError::Validation`].
//! - Unknown viewport height: read as `0`. The index still moves but the
//!   offset stays at `0` (nothing visibly scrolls).
//! - Stale height after a resize: used until the next transition request.

use std::fmt;
use std::time::Duration;

use folio_core::animation::{AnimatedValue, AnimationStatus, SpringParams};
use folio_core::event::WheelEvent;
use folio_core::viewport::ViewportSource;
use tracing::{debug, trace};

use crate::config::{PagerConfig, PagerConfigError};
use crate::page_index::{PageChange, PageIndexStore, Pages};
use crate::reactive::Subscription;

/// Whether the offset is resting or mid-animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagerPhase {
    /// Resting on a page boundary.
    #[default]
    Idle,
    /// Animating toward page `to`.
    Transitioning {
        /// Destination page index.
        to: usize,
    },
}

impl PagerPhase {
    /// Whether a transition is in flight.
    #[must_use]
    pub const fn is_transitioning(self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }
}

/// Result of a transition request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRequest {
    /// Clamped index and whether it moved.
    pub change: PageChange,
    /// Offset the spring is heading to (`-index * height`).
    pub target_offset: f64,
    /// Viewport height read for this request.
    pub viewport_height: f64,
    /// Generation of the started/redirected animation, or `None` when the
    /// offset already rested on the target.
    pub animation: Option<u64>,
}

impl TransitionRequest {
    /// Whether an animation was started or redirected.
    #[must_use]
    pub const fn animated(&self) -> bool {
        self.animation.is_some()
    }
}

/// Why a wheel gesture produced no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelIgnoredReason {
    /// `|deltaY|` did not exceed the tolerance.
    BelowTolerance,
    /// A transition was already in flight.
    Transitioning,
}

impl fmt::Display for WheelIgnoredReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowTolerance => f.write_str("below_tolerance"),
            Self::Transitioning => f.write_str("transitioning"),
        }
    }
}

/// What a wheel gesture did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDisposition {
    /// The gesture asked for a transition.
    Requested(TransitionRequest),
    /// The gesture was dropped.
    Ignored(WheelIgnoredReason),
}

/// Host-facing result of [`ScrollPager::handle_wheel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelOutcome {
    /// The host must suppress native scrolling. Always `true`: the pager owns
    /// every wheel gesture on its container.
    pub prevent_default: bool,
    /// What happened to the gesture.
    pub disposition: WheelDisposition,
}

impl WheelOutcome {
    fn ignored(reason: WheelIgnoredReason) -> Self {
        Self {
            prevent_default: true,
            disposition: WheelDisposition::Ignored(reason),
        }
    }

    /// The transition request, if the gesture produced one.
    #[must_use]
    pub fn request(&self) -> Option<&TransitionRequest> {
        match &self.disposition {
            WheelDisposition::Requested(req) => Some(req),
            WheelDisposition::Ignored(_) => None,
        }
    }
}

/// Emitted by [`ScrollPager::tick`] when a transition comes to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settled {
    /// Page the offset rests on.
    pub index: usize,
    /// Resting offset.
    pub offset: f64,
}

/// Scroll-paginated navigation controller.
pub struct ScrollPager<V> {
    store: PageIndexStore,
    offset: AnimatedValue,
    phase: PagerPhase,
    config: PagerConfig,
    spring: SpringParams,
    viewport: V,
    last_height: f64,
}

impl<V: fmt::Debug> fmt::Debug for ScrollPager<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollPager")
            .field("current", &self.store.current())
            .field("pages", &self.store.len())
            .field("offset", &self.offset.get())
            .field("phase", &self.phase)
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl<V: ViewportSource> ScrollPager<V> {
    /// Create a pager on page 0 with the offset at 0.
    ///
    /// Fails with [`PagerConfigError::Validation`] if `config` has any
    /// out-of-range parameter.
    pub fn new(pages: Pages, viewport: V, config: PagerConfig) -> Result<Self, PagerConfigError> {
        let config = config.validated()?;
        let spring = config.spring_params();
        Ok(Self {
            store: PageIndexStore::new(pages),
            offset: AnimatedValue::new(0.0),
            phase: PagerPhase::Idle,
            config,
            spring,
            viewport,
            last_height: 0.0,
        })
    }

    /// Move to `target` (clamped) and animate the offset there.
    ///
    /// Accepted in any phase: during a transition it redirects the spring
    /// from wherever it is. Never blocks; the offset moves on [`tick`].
    ///
    /// [`tick`]: Self::tick
    pub fn request_transition(&mut self, target: i64) -> TransitionRequest {
        let height = self.viewport.height_or_zero();
        self.last_height = height;
        let change = self.store.go_to(target);
        // `+ 0.0` turns page 0's `-0.0` into `0.0`.
        let target_offset = -(change.index as f64 * height) + 0.0;

        let animation = if self.offset.is_animating() || self.offset.get() != target_offset {
            let generation = self.offset.start(target_offset, self.spring);
            self.phase = PagerPhase::Transitioning { to: change.index };
            Some(generation)
        } else {
            None
        };

        debug!(
            requested = target,
            index = change.index,
            changed = change.changed,
            target_offset,
            viewport_height = height,
            animated = animation.is_some(),
            "page transition requested"
        );

        TransitionRequest {
            change,
            target_offset,
            viewport_height: height,
            animation,
        }
    }

    /// Advance one page (the "scroll down" affordance).
    pub fn next_page(&mut self) -> TransitionRequest {
        self.request_transition(self.current() as i64 + 1)
    }

    /// Go back one page.
    pub fn previous_page(&mut self) -> TransitionRequest {
        self.request_transition(self.current() as i64 - 1)
    }

    /// Handle a wheel gesture on the pager's container.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> WheelOutcome {
        if !event.exceeds(self.config.wheel_tolerance) {
            trace!(delta_y = event.delta_y, "wheel below tolerance");
            return WheelOutcome::ignored(WheelIgnoredReason::BelowTolerance);
        }

        let direction = event.direction();

        if self.phase.is_transitioning() {
            trace!(
                delta_y = event.delta_y,
                offset = self.offset.get(),
                "wheel dropped mid-transition"
            );
            return WheelOutcome::ignored(WheelIgnoredReason::Transitioning);
        }

        let request = self.request_transition(self.current() as i64 + direction);
        WheelOutcome {
            prevent_default: true,
            disposition: WheelDisposition::Requested(request),
        }
    }

    /// Advance the offset animation by one frame.
    ///
    /// `dt` is capped at the configured maximum frame delta. Returns
    /// `Some` on the frame the transition settles.
    pub fn tick(&mut self, dt: Duration) -> Option<Settled> {
        let dt = dt.min(self.config.max_frame_dt());
        match self.offset.tick(dt) {
            AnimationStatus::Settled(offset) => {
                self.phase = PagerPhase::Idle;
                let settled = Settled {
                    index: self.store.current(),
                    offset,
                };
                debug!(index = settled.index, offset, "page transition settled");
                Some(settled)
            }
            AnimationStatus::Running(_) | AnimationStatus::Idle => None,
        }
    }

    /// Stop any in-flight animation where it is. Returns `true` if one was
    /// running.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.offset.cancel();
        self.phase = PagerPhase::Idle;
        if cancelled {
            debug!(offset = self.offset.get(), "page transition cancelled");
        }
        cancelled
    }

    /// Live vertical offset for the render layer.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    /// Offset the in-flight animation is heading to.
    #[must_use]
    pub fn target_offset(&self) -> Option<f64> {
        self.offset.target()
    }

    /// Progress of the in-flight transition in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.offset.progress()
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    /// Whether the offset is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    /// Current page index.
    #[must_use]
    pub fn current(&self) -> usize {
        self.store.current()
    }

    /// Identifier of the current page.
    #[must_use]
    pub fn current_page(&self) -> &str {
        self.store.current_page()
    }

    /// The page index store.
    #[must_use]
    pub fn store(&self) -> &PageIndexStore {
        &self.store
    }

    /// Observe page index changes.
    pub fn subscribe(&self, callback: impl Fn(usize) + 'static) -> Subscription {
        self.store.subscribe(callback)
    }

    /// Viewport height read at the last transition request.
    #[must_use]
    pub fn last_viewport_height(&self) -> f64 {
        self.last_height
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// The viewport source.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }
}
