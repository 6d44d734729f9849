//! In-memory capture of log events for tests
//!
//! `init_test_capture` installs a layer that records every event's fields as
//! strings. Assertions look events up by `op`, `event` and `run_id`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use swcache_core_types::schema::{FIELD_EVENT, FIELD_OP, FIELD_RUN_ID};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Recorded value of a field, formatted as a string
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn run_id(&self) -> Option<&str> {
        self.field(FIELD_RUN_ID)
    }

    /// True if this is the `event` boundary of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

// `&str` values are kept unquoted; everything else goes through Debug
struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    sink: Sink,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        lock(&self.sink).push(CapturedEvent {
            level: *event.metadata().level(),
            fields,
        });
    }
}

// A panicking test must not hide events from the others
fn lock(sink: &Sink) -> MutexGuard<'_, Vec<CapturedEvent>> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    sink: Sink,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.sink).clone()
    }

    /// Events of one operation, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.op() == Some(op))
    }

    /// Events tagged with one orchestration run id
    pub fn events_for_run(&self, run_id: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.run_id() == Some(run_id))
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        lock(&self.sink).iter().filter(|e| predicate(e)).count()
    }

    /// # Panics
    ///
    /// Panics if no `event` boundary was captured for `op`
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = lock(&self.sink);
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {op}/{event} event among {} captured",
            events.len()
        );
    }

    pub fn clear(&self) {
        lock(&self.sink).clear();
    }

    fn filtered(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        lock(&self.sink).iter().filter(|e| keep(e)).cloned().collect()
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle
///
/// Later calls return the same handle. The buffer is shared by every test in
/// the binary, so filter by a unique op name or run id.
///
/// ```
/// use swcache_core::logging_facility::test_capture::init_test_capture;
/// use swcache_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let sink = Sink::default();
            let layer = CaptureLayer { sink: sink.clone() };
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { sink }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(pairs: &[(&str, &str)]) -> CapturedEvent {
        CapturedEvent {
            level: Level::INFO,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_boundary_accessors_read_schema_fields() {
        let event = captured(&[
            ("op", "rename_artifacts"),
            ("event", "end"),
            ("run_id", "0190-abc"),
        ]);

        assert!(event.is("rename_artifacts", "end"));
        assert!(!event.is("rename_artifacts", "start"));
        assert_eq!(event.run_id(), Some("0190-abc"));
        assert_eq!(event.field("uri"), None);
    }

    #[test]
    fn test_recorder_keeps_strings_unquoted() {
        let capture = init_test_capture();

        tracing::info!(op = "recorder_unit_op", uri = "app.js", entry_count = 2usize, ok = true);

        let events = capture.events_for_op("recorder_unit_op");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("uri"), Some("app.js"));
        assert_eq!(events[0].field("entry_count"), Some("2"));
        assert_eq!(events[0].field("ok"), Some("true"));
    }
}
