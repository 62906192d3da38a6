#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! Scroll-paginated navigation: a stack of full-viewport pages where each
//! wheel gesture moves exactly one page, animated by a spring.
//!
//! # Key Components
//!
//! - [`PageIndexStore`] - Clamped current-page index with change observers
//! - [`ScrollPager`] - Wheel gesture interpreter and spring-driven offset
//! - [`PagerMount`] - Listener registration and teardown against a host
//! - [`PagerConfig`] - Tolerance, spring and frame-cap parameters
//! - [`PagerSimulator`] - Deterministic frame-stepped driver
//!
//! # Role in Folio
//! `folio-runtime` sits between input (`folio-core` wheel events and viewport
//! sources) and the render layer, which reads [`ScrollPager::offset`] every
//! frame. The web crate wraps it for the browser.

pub mod cancellation;
pub mod config;
pub mod mount;
pub mod page_index;
pub mod pager;
pub mod reactive;
pub mod simulator;

pub use cancellation::{FrameCancellation, FrameToken};
pub use config::{PagerConfig, PagerConfigError, SpringConfig};
pub use mount::{HeadlessHost, ListenerId, MountError, PagerMount, WheelListenerHost};
pub use page_index::{PageChange, PageIndexStore, Pages, PagesError};
pub use pager::{
    PagerPhase, ScrollPager, Settled, TransitionRequest, WheelDisposition, WheelIgnoredReason,
    WheelOutcome,
};
pub use reactive::{Observable, Subscription};
pub use simulator::{FrameRecord, PagerSimulator, ScriptStep};
