//! Diagnostic event stream: one event per device segment touched by a volume
//! operation, delivered to an installable process-wide sink.

use std::sync::{Arc, OnceLock};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IoDirection {
    Read,
    Write,
}

/// One segment-level transfer as observed by the volume loop.
#[derive(Clone, Debug)]
pub struct SegmentEvent {
    pub direction: IoDirection,
    pub device_index: usize,
    pub block_index: u64,
    pub payload: Vec<u8>,
}

pub trait EventSink: Send + Sync + 'static {
    fn record_segment(&self, event: SegmentEvent);
}

static EVENT_SINK: OnceLock<Arc<dyn EventSink>> = OnceLock::new();

/// Install the process-wide sink. Returns false if one is already installed.
pub fn install_event_sink(sink: Arc<dyn EventSink>) -> bool {
    EVENT_SINK.set(sink).is_ok()
}

pub fn is_enabled() -> bool {
    EVENT_SINK.get().is_some()
}

pub fn record_segment(event: SegmentEvent) {
    if let Some(sink) = EVENT_SINK.get() {
        sink.record_segment(event);
    }
}
