//! Rolling Logger
//!
//! Keeps the most recent log lines in a fixed-size circular buffer and echoes
//! each line to a sink (browser console on wasm32, stderr elsewhere).
//! Exposed as a `tracing_subscriber::Layer`.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// A single captured log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Shared circular buffer of recent log entries
#[derive(Clone, Debug)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    /// Capacity is clamped to at least one entry
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        // A panic while holding the lock cannot leave the deque half-written
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an entry, evicting the oldest one when full
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Oldest-first copy of the buffered entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// All entries as text, one line each, oldest first
    pub fn render(&self) -> String {
        self.lock().iter().map(|entry| format!("{}\n", entry)).collect()
    }
}

/// Tracing layer writing into a [`LogBuffer`]
pub struct RollingLayer {
    buffer: LogBuffer,
    echo: bool,
}

impl RollingLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer, echo: true }
    }

    /// Disable forwarding to the console/stderr sink
    pub fn without_echo(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.finish(),
        };

        if self.echo {
            sink::emit(&entry);
        }
        self.buffer.push(entry);
    }
}

/// Collects the `message` field plus `key=value` pairs for the rest
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

mod sink {
    use super::LogEntry;

    #[cfg(target_arch = "wasm32")]
    pub fn emit(entry: &LogEntry) {
        use tracing::Level;
        use wasm_bindgen::JsValue;

        let line = JsValue::from_str(&entry.to_string());
        match entry.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn emit(entry: &LogEntry) {
        eprintln!("{}", entry);
    }
}

/// Install the global subscriber and return the shared buffer.
///
/// With `echo` off, lines only go to the buffer. Calling this more than once
/// keeps the first subscriber; the returned buffer is then detached from it.
pub fn init(level: Level, capacity: usize, echo: bool) -> LogBuffer {
    let buffer = LogBuffer::new(capacity);
    let layer = RollingLayer::new(buffer.clone());
    let layer = if echo { layer } else { layer.without_echo() };
    let installed = tracing_subscriber::registry()
        .with(layer)
        .with(LevelFilter::from_level(level))
        .try_init();
    if installed.is_err() {
        tracing::debug!("rolling logger already installed");
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(2);
        buffer.push(entry("a"));
        buffer.push(entry("b"));
        buffer.push(entry("c"));

        let messages: Vec<_> = buffer.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert_eq!(buffer.capacity(), 2);
    }

    #[test]
    fn test_render_and_clear() {
        let buffer = LogBuffer::new(4);
        buffer.push(entry("first"));
        buffer.push(entry("second"));

        let text = buffer.render();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().next().unwrap().ends_with("test: first"));

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.render(), "");
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let buffer = LogBuffer::new(0);
        buffer.push(entry("only"));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = LogBuffer::new(8);
        let subscriber = tracing_subscriber::registry()
            .with(RollingLayer::new(buffer.clone()).without_echo());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(count = 3, "flavors loaded");
            tracing::warn!("careful");
        });

        let entries = buffer.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "flavors loaded count=3");
        assert_eq!(entries[1].level, Level::WARN);
        assert_eq!(entries[1].message, "careful");
    }

    #[test]
    fn test_display_contains_level_and_target() {
        let line = entry("hello").to_string();
        assert!(line.contains("INFO"));
        assert!(line.contains("test: hello"));
    }
}
