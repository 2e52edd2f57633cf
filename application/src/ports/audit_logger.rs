//! Port for structured audit-event logging.
//!
//! Defines the [`AuditEventLogger`] trait for recording audit lifecycle
//! events (stage completions, judge fallbacks, final scores) to a structured
//! log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures machine-readable
//! records (JSONL). Payloads never contain email content.

use serde_json::Value;

/// A structured audit event.
pub struct AuditEvent {
    /// Event type identifier (e.g., "audit_started", "judge_fallback").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging audit events.
///
/// The `log` method is synchronous and non-fallible; logging failures are
/// ignored.
pub trait AuditEventLogger: Send + Sync {
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAuditLogger;

impl AuditEventLogger for NoAuditLogger {
    fn log(&self, _event: AuditEvent) {}
}
