//! Progress notification port
//!
//! Defines the interface for reporting progress while audits run.

use audit_domain::AuditStage;

/// Callback for progress updates during an audit
///
/// `label` identifies the audited document so concurrent audits can be told
/// apart. Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, label: &str, stage: AuditStage);

    /// Called when a stage ends
    fn on_stage_complete(&self, label: &str, stage: AuditStage, success: bool);

    /// Called once per document when its audit ends
    fn on_audit_complete(&self, _label: &str, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _label: &str, _stage: AuditStage) {}
    fn on_stage_complete(&self, _label: &str, _stage: AuditStage, _success: bool) {}
}
