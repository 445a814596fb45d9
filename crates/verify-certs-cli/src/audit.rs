// verify-certs-cli/src/audit.rs
// ============================================================================
// Module: Verification Audit Logging
// Description: Structured audit events for verification passes.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines the audit event payload and sinks for verification
//! logging. It is intentionally lightweight so deployments can route events
//! to their preferred logging pipeline without redesign. Submitted codes are
//! redacted unless the operator explicitly opts in.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Verification audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Principal that submitted the code.
    pub principal: String,
    /// Handler that produced the hit, when one did.
    pub handler: Option<String>,
    /// Outcome classification label.
    pub outcome: &'static str,
    /// Whether identifying detail was disclosed to the viewer.
    pub disclosed_detail: bool,
    /// Submitted code (explicit opt-in only).
    pub code: Option<String>,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Inputs required to construct a verification audit event.
pub struct VerificationAuditEventParams {
    /// Principal that submitted the code.
    pub principal: String,
    /// Handler that produced the hit, when one did.
    pub handler: Option<String>,
    /// Outcome classification label.
    pub outcome: &'static str,
    /// Whether identifying detail was disclosed to the viewer.
    pub disclosed_detail: bool,
    /// Submitted code (explicit opt-in only).
    pub code: Option<String>,
}

impl VerificationAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: VerificationAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let redaction = if params.code.is_some() { "none" } else { "code_redacted" };
        Self {
            event: "certificate_verification",
            timestamp_ms,
            principal: params.principal,
            handler: params.handler,
            outcome: params.outcome,
            disclosed_detail: params.disclosed_detail,
            code: params.code,
            redaction,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for verification events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &VerificationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &VerificationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
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
    fn record(&self, event: &VerificationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
