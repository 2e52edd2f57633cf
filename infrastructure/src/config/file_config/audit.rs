//! `[audit]`, `[judge]`, `[output]` and `[logging]` sections

use audit_application::AuditBehavior;
use audit_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Audit run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Criteria JSON file
    pub criteria_path: PathBuf,
    /// Characters of thread text sent to the models
    pub max_input_chars: usize,
    /// Parallel audits when several files are given
    pub concurrency: usize,
}

impl Default for FileAuditConfig {
    fn default() -> Self {
        Self {
            criteria_path: PathBuf::from("config/audit_criteria.json"),
            max_input_chars: AuditBehavior::DEFAULT_MAX_INPUT_CHARS,
            concurrency: AuditBehavior::DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgeConfig {
    pub enabled: bool,
}

impl Default for FileJudgeConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Default for `--output`
    pub format: OutputFormat,
}

/// Log file locations (both optional)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log, rolled daily
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// JSONL audit-event log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_events: Option<PathBuf>,
}
