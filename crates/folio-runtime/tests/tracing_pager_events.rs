#![forbid(unsafe_code)]

//! Structured log contract for the pager.
//!
//! Accepted transitions and settles log at DEBUG, filtered and dropped
//! gestures at TRACE, and mount/teardown run inside INFO spans.
//!
//! Run:
//!   cargo test -p folio-runtime --test tracing_pager_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use folio_core::event::WheelEvent;
use folio_core::viewport::FixedViewport;
use folio_runtime::{HeadlessHost, PagerConfig, PagerMount, Pages, ScrollPager};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    level: tracing::Level,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
    parent_span_name: Option<String>,
}

struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn find(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message == message)
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span| span.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
            parent_span_name,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> CaptureHandle {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        spans: Arc::clone(&spans),
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans, events }
}

fn pager() -> ScrollPager<FixedViewport> {
    ScrollPager::new(
        Pages::new(["header", "about", "projects"]).expect("pages"),
        FixedViewport(800.0),
        PagerConfig::default(),
    )
    .expect("default config")
}

#[test]
fn accepted_transition_logs_at_debug_with_fields() {
    let handle = with_captured(|| {
        let mut p = pager();
        p.handle_wheel(&WheelEvent::vertical(120.0));
    });

    let requested = handle.find("page transition requested");
    assert_eq!(requested.len(), 1);
    let event = &requested[0];
    assert_eq!(event.level, tracing::Level::DEBUG);
    assert_eq!(event.fields["index"], "1");
    assert_eq!(event.fields["changed"], "true");
    assert_eq!(event.fields["target_offset"], "-800");
    assert_eq!(event.fields["animated"], "true");
}

#[test]
fn filtered_and_dropped_gestures_log_at_trace() {
    let handle = with_captured(|| {
        let mut p = pager();
        p.handle_wheel(&WheelEvent::vertical(4.0));
        p.handle_wheel(&WheelEvent::vertical(120.0));
        p.handle_wheel(&WheelEvent::vertical(120.0));
    });

    let below = handle.find("wheel below tolerance");
    assert_eq!(below.len(), 1);
    assert_eq!(below[0].level, tracing::Level::TRACE);

    let dropped = handle.find("wheel dropped mid-transition");
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].level, tracing::Level::TRACE);
}

#[test]
fn settle_logs_once() {
    let handle = with_captured(|| {
        let mut p = pager();
        p.request_transition(2);
        for _ in 0..200 {
            p.tick(Duration::from_millis(16));
        }
    });

    let settled = handle.find("page transition settled");
    assert_eq!(settled.len(), 1);
    assert_eq!(settled[0].fields["index"], "2");
    assert_eq!(settled[0].fields["offset"], "-1600");
}

#[test]
fn mount_and_teardown_run_in_info_spans() {
    let handle = with_captured(|| {
        let mut mount = PagerMount::attach(HeadlessHost::new(), pager()).expect("mount");
        mount.handle_wheel(&WheelEvent::vertical(120.0));
        drop(mount);
    });

    let spans = handle.spans();
    let mount = spans.iter().find(|s| s.name == "pager.mount").expect("mount span");
    assert_eq!(mount.level, tracing::Level::INFO);
    let teardown = spans
        .iter()
        .find(|s| s.name == "pager.teardown")
        .expect("teardown span");
    assert_eq!(teardown.level, tracing::Level::INFO);

    let attached = handle.find("wheel listener attached");
    assert_eq!(attached[0].parent_span_name.as_deref(), Some("pager.mount"));

    let removed = handle.find("wheel listener removed");
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].parent_span_name.as_deref(), Some("pager.teardown"));
    assert_eq!(removed[0].fields["animation_cancelled"], "true");
}

#[test]
fn observer_notification_is_spanned() {
    let handle = with_captured(|| {
        let p = pager();
        let _sub = p.subscribe(|_| {});
        p.store().go_to(1);
    });

    assert!(handle.spans().iter().any(|s| s.name == "observable.notify"));
}
