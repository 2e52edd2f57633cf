//! Application layer for email-audit
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AuditBehavior;
pub use ports::{
    audit_logger::{AuditEvent, AuditEventLogger, NoAuditLogger},
    model_client::{ModelClient, ModelOutput, ProviderError, ProviderErrorKind},
    model_client_factory::{ClientError, ModelClientFactory},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_audit::{AuditOrchestrator, AuditRoles, RunAuditError};
pub use use_cases::run_batch::{AuditDocument, BatchItem, RunBatchUseCase};
