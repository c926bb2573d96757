//! Analytics — a fire-and-forget sink the funnel reports events into.
//!
//! A failed or absent sink can never affect a state transition: the trait is
//! infallible by construction and nothing downstream inspects a response.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Value, json};
use uuid::Uuid;

use crate::funnel::phase::FunnelPhase;

/// Fire-and-forget analytics sink.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &str, params: Value);
}

/// Discards every event.
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn track(&self, _event: &str, _params: Value) {}
}

/// Emits events to the tracing subscriber.
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn track(&self, event: &str, params: Value) {
        tracing::info!(target: "analytics", event, %params, "analytics event");
    }
}

/// Records events for assertions in tests.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().expect("recording sink poisoned").clone()
    }

    /// How many times an event name was tracked.
    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|(name, _)| name == event).count()
    }
}

impl AnalyticsSink for RecordingSink {
    fn track(&self, event: &str, params: Value) {
        self.events
            .lock()
            .expect("recording sink poisoned")
            .push((event.to_string(), params));
    }
}

/// The funnel's view of analytics: a sink plus a per-session id stamped on
/// every event.
#[derive(Clone)]
pub struct Analytics {
    sink: Arc<dyn AnalyticsSink>,
    session_id: Uuid,
}

impl Analytics {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            sink,
            session_id: Uuid::new_v4(),
        }
    }

    /// An analytics handle that drops everything.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopSink))
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn send(&self, event: &str, mut params: Value) {
        if let Some(map) = params.as_object_mut() {
            map.insert("session_id".to_string(), json!(self.session_id.to_string()));
        }
        self.sink.track(event, params);
    }

    pub fn page_view(&self, page: &str) {
        self.send("page_view", json!({ "page": page }));
    }

    pub fn chat_started(&self) {
        self.send("chat_started", json!({ "page": "chat" }));
    }

    pub fn question_answered(&self, question_id: u8, question: &str, answer: &str) {
        self.send(
            "question_answered",
            json!({
                "question_id": question_id,
                "question_text": question,
                "answer": answer,
                "page": "chat",
            }),
        );
    }

    pub fn chat_completed(&self) {
        self.send("chat_completed", json!({ "page": "chat" }));
    }

    pub fn chat_cta_click(&self) {
        self.send(
            "cta_click",
            json!({ "button_location": "chat_complete", "page": "chat" }),
        );
    }

    pub fn revelation_viewed(&self, name: &str, number: u8) {
        self.send(
            "revelation_viewed",
            json!({
                "revelation_name": name,
                "revelation_number": number,
                "page": "result",
            }),
        );
    }

    pub fn video_started(&self) {
        self.send("video_started", json!({ "page": "result" }));
    }

    pub fn video_button_unlocked(&self, unlock_time_seconds: u64) {
        self.send(
            "video_button_unlocked",
            json!({ "unlock_time_seconds": unlock_time_seconds, "page": "result" }),
        );
    }

    pub fn phase_progression(&self, from: FunnelPhase, to: FunnelPhase, button: &str) {
        self.send(
            "phase_progression_clicked",
            json!({
                "phase_from": from.to_string(),
                "phase_to": to.to_string(),
                "button_name": button,
                "page": "result",
            }),
        );
    }

    pub fn offer_revealed(&self) {
        self.send("offer_revealed", json!({ "page": "result" }));
    }

    pub fn cta_buy_clicked(&self, position: &str) {
        self.send(
            "cta_buy_clicked",
            json!({ "button_position": position, "page": "result" }),
        );
    }

    pub fn spots_updated(&self, spots_left: u32) {
        self.send(
            "spots_updated",
            json!({ "spots_left": spots_left, "page": "result" }),
        );
    }
}

/// Process-wide tracking bootstrap guard.
///
/// Replaces an ambient "tracking loaded" flag: the host initializes it once
/// at startup, injects it where needed, and tears it down on shutdown.
/// Double initialization is a logged no-op.
#[derive(Default)]
pub struct TrackingInit {
    initialized: AtomicBool,
}

impl TrackingInit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark tracking initialized. Returns `false` if it already was.
    pub fn init(&self) -> bool {
        let fresh = self
            .initialized
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if !fresh {
            tracing::warn!("Tracking already initialized, ignoring repeat init");
        }
        fresh
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Tear down, allowing a later re-init (used between test sessions).
    pub fn teardown(&self) {
        self.initialized.store(false, Ordering::SeqCst);
    }
}
