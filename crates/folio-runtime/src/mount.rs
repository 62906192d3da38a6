#![forbid(unsafe_code)]

//! Mount lifecycle: binding a [`ScrollPager`] to a host container.
//!
//! [`PagerMount`] is a scoped acquisition. Attaching registers exactly one
//! non-passive wheel listener with the host; teardown cancels the in-flight
//! animation, fires the frame cancellation token and removes the listener in
//! one step. Teardown also runs on `Drop`.
//!
//! # Invariants
//!
//! 1. At most one listener is registered per mount.
//! 2. After teardown no wheel event or frame tick reaches the pager.
//! 3. The listener is removed exactly once, however many times teardown runs.
//!
//! # Failure Modes
//!
//! - Host refuses the listener: [`MountError::Listener`]; nothing is left
//!   registered and the pager is dropped with the failed mount.
//! - Re-attach after teardown: [`MountError::TornDown`].

use std::fmt;
use std::time::Duration;

use folio_core::event::WheelEvent;
use folio_core::viewport::ViewportSource;
use tracing::{debug, info_span};

use crate::cancellation::{FrameCancellation, FrameToken};
use crate::pager::{ScrollPager, Settled, WheelOutcome};

/// Handle for a registered wheel listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Registration options passed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Passive listeners cannot suppress native scrolling, so the pager
    /// always asks for `false`.
    pub passive: bool,
}

impl ListenerOptions {
    /// Options the pager registers with.
    pub const NON_PASSIVE: Self = Self { passive: false };
}

/// The container a pager is mounted on.
pub trait WheelListenerHost {
    /// Registration failure reported by the host.
    type Error: fmt::Display;

    /// Register a wheel listener on the container.
    fn add_wheel_listener(&mut self, options: ListenerOptions) -> Result<ListenerId, Self::Error>;

    /// Remove a listener previously returned by
    /// [`add_wheel_listener`](Self::add_wheel_listener).
    fn remove_wheel_listener(&mut self, id: ListenerId);
}

/// Errors from mounting a pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// The host refused to register the wheel listener.
    Listener(String),
    /// The mount was already torn down.
    TornDown,
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listener(reason) => write!(f, "failed to register wheel listener: {reason}"),
            Self::TornDown => write!(f, "pager mount already torn down"),
        }
    }
}

impl std::error::Error for MountError {}

/// A pager bound to its host container.
pub struct PagerMount<H: WheelListenerHost, V: ViewportSource> {
    host: H,
    pager: ScrollPager<V>,
    listener: Option<ListenerId>,
    frames: FrameCancellation,
    torn_down: bool,
}

impl<H: WheelListenerHost, V: ViewportSource> PagerMount<H, V> {
    /// Mount `pager` on `host`, registering its wheel listener.
    pub fn attach(host: H, pager: ScrollPager<V>) -> Result<Self, MountError> {
        let mut mount = Self {
            host,
            pager,
            listener: None,
            frames: FrameCancellation::new(),
            torn_down: false,
        };
        mount.listen()?;
        Ok(mount)
    }

    /// Ensure the wheel listener is registered. Idempotent: returns the
    /// existing id when already attached.
    pub fn listen(&mut self) -> Result<ListenerId, MountError> {
        if self.torn_down {
            return Err(MountError::TornDown);
        }
        if let Some(id) = self.listener {
            return Ok(id);
        }

        let _span = info_span!("pager.mount", pages = self.pager.store().len()).entered();
        let id = self
            .host
            .add_wheel_listener(ListenerOptions::NON_PASSIVE)
            .map_err(|e| MountError::Listener(e.to_string()))?;
        self.listener = Some(id);
        debug!(listener = id.0, "wheel listener attached");
        Ok(id)
    }

    /// Forward a wheel event from the host. `None` once torn down.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> Option<WheelOutcome> {
        if self.torn_down {
            return None;
        }
        Some(self.pager.handle_wheel(event))
    }

    /// Forward a frame tick from the host. Ignored once torn down.
    pub fn tick(&mut self, dt: Duration) -> Option<Settled> {
        if self.torn_down {
            return None;
        }
        self.pager.tick(dt)
    }

    /// Token for a scheduled frame callback.
    #[must_use]
    pub fn frame_token(&self) -> FrameToken {
        self.frames.token()
    }

    /// Cancel the animation, fire the frame token and remove the listener.
    ///
    /// Returns `true` on the call that actually tore down.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let _span = info_span!("pager.teardown", index = self.pager.current()).entered();
        self.torn_down = true;
        let cancelled = self.pager.cancel();
        self.frames.cancel();
        if let Some(id) = self.listener.take() {
            self.host.remove_wheel_listener(id);
            debug!(listener = id.0, animation_cancelled = cancelled, "wheel listener removed");
        }
        true
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Registered listener, if attached.
    #[must_use]
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    /// The mounted pager.
    #[must_use]
    pub fn pager(&self) -> &ScrollPager<V> {
        &self.pager
    }

    /// Mutable access for programmatic navigation.
    pub fn pager_mut(&mut self) -> &mut ScrollPager<V> {
        &mut self.pager
    }

    /// The host container.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: WheelListenerHost, V: ViewportSource> Drop for PagerMount<H, V> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H, V> fmt::Debug for PagerMount<H, V>
where
    H: WheelListenerHost + fmt::Debug,
    V: ViewportSource + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerMount")
            .field("host", &self.host)
            .field("pager", &self.pager)
            .field("listener", &self.listener)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

/// In-memory host that hands out sequential listener ids.
///
/// Used by headless runners and tests. Registration and removal counts are
/// kept so lifecycle bugs show up as mismatched totals.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    next_id: u64,
    active: Vec<ListenerId>,
    added: u32,
    removed: u32,
    refuse: Option<String>,
}

impl HeadlessHost {
    /// Host that accepts every registration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that refuses every registration with `reason`.
    #[must_use]
    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            refuse: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Listeners currently registered.
    #[must_use]
    pub fn active(&self) -> &[ListenerId] {
        &self.active
    }

    /// Total registrations accepted.
    #[must_use]
    pub fn added(&self) -> u32 {
        self.added
    }

    /// Total removals.
    #[must_use]
    pub fn removed(&self) -> u32 {
        self.removed
    }
}

impl WheelListenerHost for HeadlessHost {
    type Error = String;

    fn add_wheel_listener(&mut self, options: ListenerOptions) -> Result<ListenerId, String> {
        if let Some(reason) = &self.refuse {
            return Err(reason.clone());
        }
        if options.passive {
            return Err("passive wheel listeners cannot prevent scrolling".into());
        }
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.active.push(id);
        self.added += 1;
        Ok(id)
    }

    fn remove_wheel_listener(&mut self, id: ListenerId) {
        if let Some(pos) = self.active.iter().position(|&a| a == id) {
            self.active.remove(pos);
            self.removed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PagerConfig;
    use crate::page_index::Pages;
    use folio_core::viewport::FixedViewport;
    use std::cell::RefCell;
    use std::rc::Rc;

    const MS_16: Duration = Duration::from_millis(16);

    fn pager() -> ScrollPager<FixedViewport> {
        ScrollPager::new(
            Pages::new(["header", "about", "projects"]).expect("pages"),
            FixedViewport(800.0),
            PagerConfig::default(),
        )
        .expect("default config")
    }

    /// Host whose counters outlive the mount, for observing `Drop`.
    #[derive(Default, Clone)]
    struct SharedHost(Rc<RefCell<HeadlessHost>>);

    impl WheelListenerHost for SharedHost {
        type Error = String;

        fn add_wheel_listener(&mut self, options: ListenerOptions) -> Result<ListenerId, String> {
            self.0.borrow_mut().add_wheel_listener(options)
        }

        fn remove_wheel_listener(&mut self, id: ListenerId) {
            self.0.borrow_mut().remove_wheel_listener(id);
        }
    }

    #[test]
    fn attach_registers_one_listener() {
        let mut mount = PagerMount::attach(HeadlessHost::new(), pager()).expect("mount");
        let id = mount.listener().expect("listener");
        assert_eq!(mount.listen(), Ok(id));
        assert_eq!(mount.host().added(), 1);
        assert_eq!(mount.host().active(), &[id]);
    }

    #[test]
    fn refused_listener_is_reported() {
        let err = PagerMount::attach(HeadlessHost::refusing("no container"), pager()).unwrap_err();
        assert_eq!(err, MountError::Listener("no container".into()));
        assert_eq!(
            err.to_string(),
            "failed to register wheel listener: no container"
        );
    }

    #[test]
    fn teardown_stops_animation_and_detaches() {
        let mut mount = PagerMount::attach(HeadlessHost::new(), pager()).expect("mount");
        let token = mount.frame_token();
        mount.handle_wheel(&WheelEvent::vertical(120.0));
        mount.tick(MS_16);
        assert!(mount.pager().is_animating());

        assert!(mount.teardown());
        assert!(!mount.pager().is_animating());
        assert!(token.is_cancelled());
        assert!(mount.host().active().is_empty());
        assert_eq!(mount.host().removed(), 1);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut mount = PagerMount::attach(HeadlessHost::new(), pager()).expect("mount");
        assert!(mount.teardown());
        assert!(!mount.teardown());
        assert_eq!(mount.host().removed(), 1);
        assert_eq!(mount.listen(), Err(MountError::TornDown));
    }

    #[test]
    fn events_after_teardown_are_ignored() {
        let mut mount = PagerMount::attach(HeadlessHost::new(), pager()).expect("mount");
        mount.handle_wheel(&WheelEvent::vertical(120.0));
        mount.teardown();
        let frozen = mount.pager().offset();
        assert_eq!(mount.tick(MS_16), None);
        assert_eq!(mount.handle_wheel(&WheelEvent::vertical(120.0)), None);
        assert_eq!(mount.pager().offset(), frozen);
        assert_eq!(mount.pager().current(), 1);
    }

    #[test]
    fn drop_tears_down() {
        let host = SharedHost::default();
        let counters = Rc::clone(&host.0);
        let mount = PagerMount::attach(host, pager()).expect("mount");
        let token = mount.frame_token();
        assert_eq!(counters.borrow().active().len(), 1);
        drop(mount);
        assert!(token.is_cancelled());
        assert!(counters.borrow().active().is_empty());
        assert_eq!(counters.borrow().removed(), 1);
    }

    #[test]
    fn headless_host_rejects_passive() {
        let mut host = HeadlessHost::new();
        assert!(host.add_wheel_listener(ListenerOptions { passive: true }).is_err());
        assert_eq!(host.added(), 0);
    }
}
