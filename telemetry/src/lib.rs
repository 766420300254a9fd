#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Structured JSON logging and in-memory decision trails for the Sensa simulators.

use std::{
    collections::VecDeque,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Log severity level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Debug information.
    Debug,
    /// Informational events.
    Info,
    /// Warning indicator.
    Warn,
    /// Error indicator.
    Error,
}

/// Structured log record emitted by a simulator subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Timestamp in ISO8601.
    pub timestamp: DateTime<Utc>,
    /// Subsystem emitting the log (e.g. `biometric`, `connectivity`).
    pub subsystem: String,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
    /// Arbitrary JSON payload for metrics/fields.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl LogRecord {
    /// Creates a record with the provided info.
    #[must_use]
    pub fn new(subsystem: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            subsystem: subsystem.into(),
            level,
            message: message.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Attaches metadata fields from a JSON object.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        if let Some(obj) = metadata.as_object() {
            self.metadata = obj.clone();
        }
        self
    }
}

/// Thread-safe JSONL logger with append-only semantics.
#[derive(Debug)]
pub struct JsonLogger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl JsonLogger {
    /// Creates or opens a logger at the desired path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    /// Writes a log record as a JSON line.
    pub fn log(&self, record: &LogRecord) -> Result<()> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Returns the underlying file path (useful for tests).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Event captured on a decision trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailEvent {
    /// Unique identifier.
    pub id: Uuid,
    /// Subsystem producing the event.
    pub source: String,
    /// Event kind (e.g. `auth.decision`, `connectivity.report`).
    pub kind: String,
    /// Timestamp in ISO8601.
    pub timestamp: DateTime<Utc>,
    /// Arbitrary JSON payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl TrailEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        kind: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            kind: kind.into(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Bounded in-memory trail of recent decision events.
///
/// Runtimes push one event per pipeline run; stress and scenario reports
/// read the trail back instead of re-deriving counts.
#[derive(Debug, Clone)]
pub struct DecisionTrail {
    capacity: usize,
    events: Arc<Mutex<VecDeque<TrailEvent>>>,
}

impl DecisionTrail {
    /// Creates a trail retaining at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Records an event, evicting the oldest when the trail is full.
    pub fn record(&self, event: TrailEvent) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Snapshot of retained events, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TrailEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True when no events are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

/// Builder for [`TelemetryHandle`].
pub struct TelemetryHandleBuilder {
    subsystem: String,
    log_path: Option<PathBuf>,
    trail: Option<DecisionTrail>,
}

impl TelemetryHandleBuilder {
    /// Creates a builder scoped to a subsystem label.
    #[must_use]
    pub fn new(subsystem: impl Into<String>) -> Self {
        Self {
            subsystem: subsystem.into(),
            log_path: None,
            trail: None,
        }
    }

    /// Sets the JSONL log path.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Attaches a decision trail.
    #[must_use]
    pub fn trail(mut self, trail: DecisionTrail) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Builds the handle.
    pub fn build(self) -> Result<TelemetryHandle> {
        let logger = self.log_path.map(JsonLogger::new).transpose()?;
        Ok(TelemetryHandle {
            inner: Arc::new(HandleInner {
                subsystem: self.subsystem,
                logger,
                trail: self.trail,
            }),
        })
    }
}

/// Telemetry handle shared across the components of one simulator.
///
/// Both sinks are optional; a handle with neither is a no-op.
#[derive(Clone)]
pub struct TelemetryHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    subsystem: String,
    logger: Option<JsonLogger>,
    trail: Option<DecisionTrail>,
}

impl std::fmt::Debug for TelemetryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryHandle")
            .field("subsystem", &self.inner.subsystem)
            .finish()
    }
}

impl TelemetryHandle {
    /// Returns a builder.
    #[must_use]
    pub fn builder(subsystem: impl Into<String>) -> TelemetryHandleBuilder {
        TelemetryHandleBuilder::new(subsystem)
    }

    /// Logs a structured record when a logger is attached.
    pub fn log(&self, level: LogLevel, message: &str, metadata: serde_json::Value) -> Result<()> {
        if let Some(logger) = &self.inner.logger {
            logger.log(
                &LogRecord::new(&self.inner.subsystem, level, message).with_metadata(metadata),
            )?;
        }
        Ok(())
    }

    /// Records a decision event when a trail is attached.
    pub fn event(&self, kind: &str, payload: serde_json::Value) {
        if let Some(trail) = &self.inner.trail {
            trail.record(TrailEvent::new(&self.inner.subsystem, kind, payload));
        }
    }
}
