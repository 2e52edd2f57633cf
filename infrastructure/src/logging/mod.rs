//! Logging infrastructure: structured audit-event logging.
//!
//! Provides [`JsonlAuditLogger`], a JSONL file writer that implements
//! the [`AuditEventLogger`](audit_application::AuditEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlAuditLogger;
