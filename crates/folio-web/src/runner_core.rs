#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping a mounted [`ScrollPager`].
//!
//! This module holds the logic shared between the wasm-bindgen exports and
//! native tests. No JS/WASM types here: the host pushes wheel input, the
//! viewport height and frame time, and reads the offset back.
//!
//! Log lines are plain `key=value` strings drained with
//! [`take_logs`](RunnerCore::take_logs), so the page script can forward them to
//! the console without a tracing subscriber in the browser.

use core::fmt;
use core::time::Duration;

use folio_core::event::WheelEvent;
use folio_core::viewport::SharedViewport;
use folio_runtime::{
    FrameToken, HeadlessHost, MountError, PagerConfig, PagerConfigError, PagerMount, PagerPhase,
    Pages, PagesError, ScrollPager, WheelDisposition, WheelOutcome,
};

/// Errors creating a [`RunnerCore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// The section list was empty.
    Pages(PagesError),
    /// The configuration failed validation; carries the violations.
    Config(Vec<String>),
    /// The pager could not be mounted.
    Mount(MountError),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pages(e) => write!(f, "invalid sections: {e}"),
            Self::Config(errors) => write!(f, "invalid config: {}", errors.join("; ")),
            Self::Mount(e) => write!(f, "mount failed: {e}"),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pages(e) => Some(e),
            Self::Config(_) => None,
            Self::Mount(e) => Some(e),
        }
    }
}

impl From<PagesError> for RunnerError {
    fn from(e: PagesError) -> Self {
        Self::Pages(e)
    }
}

impl From<PagerConfigError> for RunnerError {
    fn from(e: PagerConfigError) -> Self {
        match e {
            PagerConfigError::Validation(errors) => Self::Config(errors),
            other => Self::Config(vec![other.to_string()]),
        }
    }
}

impl From<MountError> for RunnerError {
    fn from(e: MountError) -> Self {
        Self::Mount(e)
    }
}

/// Host-driven pager runner.
pub struct RunnerCore {
    mount: PagerMount<HeadlessHost, SharedViewport>,
    viewport: SharedViewport,
    /// Held on behalf of the host's frame loop; cancelled by teardown.
    frames: FrameToken,
    elapsed: Duration,
    settles: u64,
    logs: Vec<String>,
}

impl RunnerCore {
    /// Mount a pager over `sections` with the default configuration.
    pub fn new<I, S>(sections: I) -> Result<Self, RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(sections, PagerConfig::default())
    }

    /// Mount a pager over `sections` with `config`.
    pub fn with_config<I, S>(sections: I, config: PagerConfig) -> Result<Self, RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = Pages::new(sections)?;
        let viewport = SharedViewport::new(None);
        let pager = ScrollPager::new(pages, viewport.clone(), config)?;
        let mount = PagerMount::attach(HeadlessHost::new(), pager)?;
        let frames = mount.frame_token();
        let mut core = Self {
            mount,
            viewport,
            frames,
            elapsed: Duration::ZERO,
            settles: 0,
            logs: Vec::new(),
        };
        core.log(format!(
            "pager_mount sections={} section={}",
            core.mount.pager().store().len(),
            core.current_section()
        ));
        Ok(core)
    }

    /// Record the display height. Non-finite or non-positive values mark the
    /// height as unknown.
    pub fn set_viewport_height(&mut self, height: f64) {
        let height = (height.is_finite() && height > 0.0).then_some(height);
        self.viewport.set(height);
    }

    /// Deliver a vertical wheel gesture. Returns whether the host should call
    /// `preventDefault`; `false` once unmounted.
    pub fn wheel(&mut self, dy: f64) -> bool {
        self.dispatch_wheel(&WheelEvent::vertical(dy))
    }

    /// Parse a JSON-encoded input and deliver it if it is a wheel event.
    ///
    /// Returns `false` for malformed JSON, non-wheel kinds and after
    /// unmount.
    #[cfg(feature = "input-parser")]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match crate::input_parser::parse_wheel_input(json) {
            Ok(Some(event)) => self.dispatch_wheel(&event),
            Ok(None) => false,
            Err(err) => {
                self.log(format!("pager_input error=\"{err}\""));
                false
            }
        }
    }

    fn dispatch_wheel(&mut self, event: &WheelEvent) -> bool {
        let Some(outcome) = self.mount.handle_wheel(event) else {
            return false;
        };
        self.log_wheel(event, &outcome);
        outcome.prevent_default
    }

    /// Advance the frame clock by `dt_ms` milliseconds.
    ///
    /// A frame already queued when the pager was unmounted is dropped.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        if self.frames.is_cancelled() {
            return;
        }
        // Hosts can hand us NaN or negative deltas after a tab switch.
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let max_secs = Duration::MAX.as_secs_f64();
        let secs = (dt_ms / 1000.0).min(max_secs);
        let dt = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        self.elapsed = self.elapsed.saturating_add(dt);

        if let Some(settled) = self.mount.tick(dt) {
            self.settles += 1;
            self.log(format!(
                "pager_settle index={} offset={}",
                settled.index, settled.offset
            ));
        }
    }

    /// Navigate to `index` (clamped). Returns the resulting index.
    pub fn request_page(&mut self, index: i64) -> usize {
        if self.mount.is_torn_down() {
            return self.current_index();
        }
        let req = self.mount.pager_mut().request_transition(index);
        self.log(format!(
            "pager_request target={index} index={} changed={} animated={}",
            req.change.index,
            req.change.changed,
            req.animated()
        ));
        req.change.index
    }

    /// The "scroll down" affordance: advance one page.
    pub fn next_page(&mut self) -> usize {
        let next = self.current_index() as i64 + 1;
        self.request_page(next)
    }

    /// Live vertical offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.pager().offset()
    }

    /// Current page index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.pager().current()
    }

    /// Identifier of the current section.
    #[must_use]
    pub fn current_section(&self) -> String {
        self.pager().current_page().to_owned()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pager().is_animating()
    }

    /// Whether the host should schedule another frame: a transition is in
    /// flight and the pager has not been unmounted.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.frames.is_live() && self.is_animating()
    }

    /// Whether the pager is still mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.mount.is_torn_down()
    }

    /// Tear the pager down. Returns `true` the first time.
    pub fn unmount(&mut self) -> bool {
        let torn = self.mount.teardown();
        if torn {
            self.log(format!(
                "pager_unmount index={} offset={}",
                self.current_index(),
                self.offset()
            ));
        }
        torn
    }

    /// Drain accumulated log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    /// State summary as a JSON object string.
    #[must_use]
    pub fn snapshot_json(&self) -> String {
        let pager = self.pager();
        let (phase, to) = match pager.phase() {
            PagerPhase::Idle => ("idle", None),
            PagerPhase::Transitioning { to } => ("transitioning", Some(to)),
        };
        serde_json::json!({
            "index": pager.current(),
            "section": pager.current_page(),
            "sections": pager.store().pages().iter().collect::<Vec<_>>(),
            "offset": pager.offset(),
            "phase": phase,
            "transition_to": to,
            "viewport_height": pager.last_viewport_height(),
            "elapsed_ms": self.elapsed.as_secs_f64() * 1000.0,
            "settles": self.settles,
            "mounted": self.is_mounted(),
            "frame_loop_live": self.frames.is_live(),
        })
        .to_string()
    }

    fn pager(&self) -> &ScrollPager<SharedViewport> {
        self.mount.pager()
    }

    fn log(&mut self, line: String) {
        self.logs.push(line);
    }

    fn log_wheel(&mut self, event: &WheelEvent, outcome: &WheelOutcome) {
        let line = match &outcome.disposition {
            WheelDisposition::Requested(req) => format!(
                "pager_wheel dy={} outcome=requested index={} changed={} target={}",
                event.delta_y, req.change.index, req.change.changed, req.target_offset
            ),
            WheelDisposition::Ignored(reason) => format!(
                "pager_wheel dy={} outcome=ignored reason={reason}",
                event.delta_y
            ),
        };
        self.log(line);
    }
}
