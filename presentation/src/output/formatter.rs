//! Output formatter trait

use audit_application::BatchItem;
use audit_domain::AuditOutcome;

/// Trait for formatting audit outcomes
pub trait OutputFormatter {
    /// Every criterion with analysis, plus the summaries
    fn format(&self, label: &str, outcome: &AuditOutcome) -> String;

    /// Overall score and failing criteria only
    fn format_summary(&self, label: &str, outcome: &AuditOutcome) -> String;

    /// The whole batch as one JSON document
    fn format_json(&self, items: &[BatchItem]) -> String;
}
