// crates/edge-deploy-core/src/audit.rs
// ============================================================================
// Module: Audit Logging
// Description: JSON-lines audit sinks for pipeline tool runs.
// Purpose: Emit structured, redacted run records without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each tool run records structured events through an [`AuditSink`]. Events
//! are any [`Serialize`] payload rendered as a single JSON line. The sink is
//! selected by [`AUDIT_ENV`]: unset or `stderr` logs to stderr, `off`/`none`
//! disables logging, and any other value is treated as a file path opened in
//! append mode.
//!
//! Audit failures never fail a run. Events must not carry secrets.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::env::EnvError;
use crate::env::EnvSource;
use crate::env::read_trimmed;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the audit target.
pub const AUDIT_ENV: &str = "EDGE_DEPLOY_AUDIT";
/// Values of [`AUDIT_ENV`] that disable audit logging.
const DISABLED_LITERALS: [&str; 2] = ["off", "none"];

// ============================================================================
// SECTION: Target Selection
// ============================================================================

/// Where audit records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditTarget {
    /// JSON lines on stderr.
    Stderr,
    /// Audit logging disabled.
    Disabled,
    /// JSON lines appended to a file.
    File(PathBuf),
}

impl AuditTarget {
    /// Parses an audit target from its raw configuration value.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Stderr,
            Some(value) if value.eq_ignore_ascii_case("stderr") => Self::Stderr,
            Some(value) if DISABLED_LITERALS.iter().any(|lit| value.eq_ignore_ascii_case(lit)) => {
                Self::Disabled
            }
            Some(value) => Self::File(PathBuf::from(value)),
        }
    }

    /// Resolves the audit target from [`AUDIT_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] when the variable is not valid UTF-8.
    pub fn from_env<S: EnvSource + ?Sized>(source: &S) -> Result<Self, EnvError> {
        let raw = read_trimmed(source, AUDIT_ENV)?;
        Ok(Self::parse(raw.as_deref()))
    }

    /// Opens a sink for this target.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when a file target cannot be opened.
    pub fn open(&self) -> io::Result<Arc<dyn AuditSink>> {
        Ok(match self {
            Self::Stderr => Arc::new(StderrAuditSink),
            Self::Disabled => Arc::new(NoopAuditSink),
            Self::File(path) => Arc::new(FileAuditSink::new(path)?),
        })
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Destination for serialized audit records.
pub trait AuditSink: Send + Sync {
    /// Writes one serialized JSON record.
    fn write_record(&self, record: &str);
}

/// Serializes `event` and writes it to `sink` as a single JSON line.
///
/// Serialization failures are dropped.
pub fn record_event<E: Serialize>(sink: &dyn AuditSink, event: &E) {
    if let Ok(payload) = serde_json::to_string(event) {
        sink.write_record(&payload);
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
#[must_use]
pub fn timestamp_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn write_record(&self, record: &str) {
        let _ = writeln!(io::stderr(), "{record}");
    }
}

/// Audit sink that discards records.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn write_record(&self, _record: &str) {}
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn write_record(&self, record: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{record}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps records in memory, for tests and embedding.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Captured records in emission order.
    records: Mutex<Vec<String>>,
}

impl MemoryAuditSink {
    /// Creates an empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<String> {
        self.records.lock().map(|records| records.clone()).unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn write_record(&self, record: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.to_string());
        }
    }
}
