#![forbid(unsafe_code)]

//! Deterministic frame-stepped driver for a [`ScrollPager`].
//!
//! Replays a script of wheel gestures, programmatic requests and frame
//! advances at a fixed frame step, recording the offset, index and phase after
//! every frame. Scenario and property tests assert against the trace; the web
//! runner has its own host-driven clock and does not use it.
//!
//! ```
//! use folio_core::viewport::FixedViewport;
//! use folio_runtime::config::PagerConfig;
//! use folio_runtime::page_index::Pages;
//! use folio_runtime::pager::ScrollPager;
//! use folio_runtime::simulator::{PagerSimulator, ScriptStep};
//!
//! let pages = Pages::new(["header", "about", "projects"]).unwrap();
//! let pager = ScrollPager::new(pages, FixedViewport(800.0), PagerConfig::default()).unwrap();
//! let mut sim = PagerSimulator::new(pager);
//! sim.run(&[ScriptStep::Wheel(120.0), ScriptStep::Settle]);
//! assert_eq!(sim.pager().offset(), -800.0);
//! ```

use std::time::Duration;

use folio_core::event::WheelEvent;
use folio_core::viewport::ViewportSource;

use crate::pager::{PagerPhase, ScrollPager, Settled, WheelOutcome};

/// Default frame step (one 60 Hz frame, rounded).
pub const DEFAULT_FRAME_STEP: Duration = Duration::from_millis(16);

/// Frames [`ScriptStep::Settle`] runs before giving up.
pub const SETTLE_FRAME_LIMIT: u32 = 1_000;

/// One instruction in a simulator script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    /// Deliver a vertical wheel gesture with this `deltaY`.
    Wheel(f64),
    /// Call `request_transition` with this target.
    Request(i64),
    /// Advance this many frames.
    Frames(u32),
    /// Advance frames until the pager is idle (bounded).
    Settle,
}

/// Pager state after one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    /// 1-based frame number.
    pub frame: u64,
    /// Offset after the frame.
    pub offset: f64,
    /// Page index after the frame.
    pub index: usize,
    /// Phase after the frame.
    pub phase: PagerPhase,
    /// Whether the transition settled on this frame.
    pub settled: bool,
}

/// Frame-stepped pager driver.
#[derive(Debug)]
pub struct PagerSimulator<V> {
    pager: ScrollPager<V>,
    frame_step: Duration,
    frame: u64,
    trace: Vec<FrameRecord>,
    wheel_outcomes: Vec<WheelOutcome>,
}

impl<V: ViewportSource> PagerSimulator<V> {
    /// Drive `pager` at [`DEFAULT_FRAME_STEP`].
    #[must_use]
    pub fn new(pager: ScrollPager<V>) -> Self {
        Self {
            pager,
            frame_step: DEFAULT_FRAME_STEP,
            frame: 0,
            trace: Vec::new(),
            wheel_outcomes: Vec::new(),
        }
    }

    /// Use a different frame step.
    #[must_use]
    pub fn with_frame_step(mut self, step: Duration) -> Self {
        self.frame_step = step;
        self
    }

    /// Run a script in order.
    pub fn run(&mut self, script: &[ScriptStep]) {
        for step in script {
            self.step(*step);
        }
    }

    /// Execute one script step.
    pub fn step(&mut self, step: ScriptStep) {
        match step {
            ScriptStep::Wheel(dy) => {
                self.wheel(dy);
            }
            ScriptStep::Request(target) => {
                self.pager.request_transition(target);
            }
            ScriptStep::Frames(n) => {
                for _ in 0..n {
                    self.advance_frame();
                }
            }
            ScriptStep::Settle => {
                self.settle();
            }
        }
    }

    /// Deliver a vertical wheel gesture.
    pub fn wheel(&mut self, dy: f64) -> WheelOutcome {
        let outcome = self.pager.handle_wheel(&WheelEvent::vertical(dy));
        self.wheel_outcomes.push(outcome);
        outcome
    }

    /// Advance one frame and record it.
    pub fn advance_frame(&mut self) -> Option<Settled> {
        let settled = self.pager.tick(self.frame_step);
        self.frame += 1;
        self.trace.push(FrameRecord {
            frame: self.frame,
            offset: self.pager.offset(),
            index: self.pager.current(),
            phase: self.pager.phase(),
            settled: settled.is_some(),
        });
        settled
    }

    /// Advance until idle. Returns the settle event, or `None` if the pager
    /// was already idle or did not settle within [`SETTLE_FRAME_LIMIT`].
    pub fn settle(&mut self) -> Option<Settled> {
        for _ in 0..SETTLE_FRAME_LIMIT {
            if !self.pager.phase().is_transitioning() {
                return None;
            }
            if let Some(settled) = self.advance_frame() {
                return Some(settled);
            }
        }
        None
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Recorded frames.
    #[must_use]
    pub fn trace(&self) -> &[FrameRecord] {
        &self.trace
    }

    /// Outcomes of every wheel gesture delivered, in order.
    #[must_use]
    pub fn wheel_outcomes(&self) -> &[WheelOutcome] {
        &self.wheel_outcomes
    }

    /// Drain the recorded frames.
    pub fn take_trace(&mut self) -> Vec<FrameRecord> {
        std::mem::take(&mut self.trace)
    }

    /// The driven pager.
    #[must_use]
    pub fn pager(&self) -> &ScrollPager<V> {
        &self.pager
    }

    /// Mutable access to the driven pager.
    pub fn pager_mut(&mut self) -> &mut ScrollPager<V> {
        &mut self.pager
    }

    /// Stop driving and hand back the pager.
    #[must_use]
    pub fn into_pager(self) -> ScrollPager<V> {
        self.pager
    }
}
