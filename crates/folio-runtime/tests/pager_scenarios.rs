//! End-to-end pager scenarios driven through the simulator.
//!
//! Run:
//!   cargo test -p folio-runtime --test pager_scenarios

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::viewport::{FixedViewport, SharedViewport};
use folio_runtime::{
    HeadlessHost, PageChange, PagerConfig, PagerMount, PagerPhase, PagerSimulator, Pages,
    ScriptStep, ScrollPager, WheelDisposition, WheelIgnoredReason,
};

fn three_pages() -> Pages {
    Pages::new(["header", "about", "projects"]).expect("pages")
}

fn simulator(height: f64) -> PagerSimulator<FixedViewport> {
    PagerSimulator::new(ScrollPager::new(
        three_pages(),
        FixedViewport(height),
        PagerConfig::default(),
    )
    .expect("default config"))
}

#[test]
fn wheel_down_drop_midflight_then_return_home() {
    let mut sim = simulator(800.0);

    let first = sim.wheel(120.0);
    let req = first.request().expect("first gesture transitions");
    assert_eq!(req.change, PageChange { index: 1, changed: true });
    assert_eq!(req.target_offset, -800.0);

    sim.step(ScriptStep::Frames(8));
    let mid = sim.pager().offset();
    assert!(mid < 0.0 && mid > -800.0, "mid-flight offset {mid}");

    let second = sim.wheel(120.0);
    assert_eq!(
        second.disposition,
        WheelDisposition::Ignored(WheelIgnoredReason::Transitioning)
    );
    assert!(second.prevent_default);
    assert_eq!(sim.pager().current(), 1);

    let settled = sim.settle().expect("settles");
    assert_eq!(settled.index, 1);
    assert_eq!(settled.offset, -800.0);

    let back = sim.wheel(-50.0);
    let req = back.request().expect("upward gesture transitions");
    assert_eq!(req.change, PageChange { index: 0, changed: true });
    assert_eq!(req.target_offset, 0.0);
    assert_eq!(sim.settle().expect("settles").offset, 0.0);
}

#[test]
fn last_page_absorbs_further_scrolling() {
    let mut sim = simulator(800.0);
    sim.run(&[ScriptStep::Request(2), ScriptStep::Settle]);
    assert_eq!(sim.pager().current(), 2);

    let outcome = sim.wheel(500.0);
    let req = outcome.request().expect("request");
    assert_eq!(req.change, PageChange { index: 2, changed: false });
    assert!(!req.animated());
    assert_eq!(sim.pager().phase(), PagerPhase::Idle);
    assert_eq!(sim.pager().offset(), -1600.0);
}

#[test]
fn settle_takes_about_a_second() {
    let mut sim = simulator(800.0);
    sim.run(&[ScriptStep::Wheel(120.0), ScriptStep::Settle]);
    let frames = sim.frame();
    assert!((40..=120).contains(&frames), "settled after {frames} frames");
}

#[test]
fn scroll_down_affordance_retargets_a_wheel_transition() {
    let mut sim = simulator(800.0);
    sim.run(&[ScriptStep::Wheel(120.0), ScriptStep::Frames(10)]);
    let current = sim.pager().current() as i64;
    sim.step(ScriptStep::Request(current + 1));
    assert_eq!(sim.pager().phase(), PagerPhase::Transitioning { to: 2 });
    let settled = sim.settle().expect("settles");
    assert_eq!(settled.index, 2);
    assert_eq!(settled.offset, -1600.0);
}

#[test]
fn observers_see_each_page_once() {
    let mut sim = simulator(600.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = sim.pager().subscribe(move |i| sink.borrow_mut().push(i));

    sim.run(&[
        ScriptStep::Wheel(80.0),
        ScriptStep::Wheel(80.0),
        ScriptStep::Settle,
        ScriptStep::Wheel(80.0),
        ScriptStep::Settle,
        ScriptStep::Wheel(80.0),
        ScriptStep::Settle,
        ScriptStep::Wheel(-80.0),
        ScriptStep::Settle,
    ]);

    assert_eq!(*seen.borrow(), vec![1, 2, 1]);
}

#[test]
fn resize_applies_on_next_transition() {
    let viewport = SharedViewport::new(Some(800.0));
    let mut pager = ScrollPager::new(three_pages(), viewport.clone(), PagerConfig::default())
        .expect("default config");
    pager.request_transition(1);
    for _ in 0..200 {
        pager.tick(Duration::from_millis(16));
    }
    assert_eq!(pager.offset(), -800.0);

    viewport.set(Some(500.0));
    assert_eq!(pager.offset(), -800.0);

    let req = pager.request_transition(1);
    assert!(!req.change.changed);
    assert_eq!(req.target_offset, -500.0);
    assert!(req.animated());
    for _ in 0..200 {
        pager.tick(Duration::from_millis(16));
    }
    assert_eq!(pager.offset(), -500.0);
}

#[test]
fn detached_viewport_recovers_once_height_known() {
    let viewport = SharedViewport::new(None);
    let mut pager = ScrollPager::new(three_pages(), viewport.clone(), PagerConfig::default())
        .expect("default config");
    let req = pager.next_page();
    assert_eq!(req.change.index, 1);
    assert_eq!(req.target_offset, 0.0);
    assert_eq!(pager.phase(), PagerPhase::Idle);

    viewport.set(Some(700.0));
    let req = pager.next_page();
    assert_eq!(req.change.index, 2);
    assert_eq!(req.target_offset, -1400.0);
    assert!(req.animated());
}

#[test]
fn mounted_pager_unmounts_cleanly_mid_transition() {
    let pager = ScrollPager::new(three_pages(), FixedViewport(800.0), PagerConfig::default())
        .expect("default config");
    let mut mount = PagerMount::attach(HeadlessHost::new(), pager).expect("mount");
    let token = mount.frame_token();

    mount.pager_mut().next_page();
    for _ in 0..5 {
        mount.tick(Duration::from_millis(16));
    }
    assert!(token.is_live());

    mount.teardown();
    assert!(token.is_cancelled());
    assert_eq!(mount.pager().phase(), PagerPhase::Idle);
    assert_eq!(mount.host().added(), 1);
    assert_eq!(mount.host().removed(), 1);
}
