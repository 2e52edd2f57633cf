//! Application-level configuration.
//!
//! Controls how the audit use cases behave, independent of which
//! providers back the model roles.

/// Audit behavior configuration.
#[derive(Debug, Clone)]
pub struct AuditBehavior {
    /// Characters of raw thread text sent to the Structure stage and the judge.
    pub max_input_chars: usize,
    /// Whether the Judge stage runs at all.
    pub judge_enabled: bool,
    /// Audits run in parallel by the batch use case.
    pub concurrency: usize,
}

impl AuditBehavior {
    pub const DEFAULT_MAX_INPUT_CHARS: usize = 20_000;
    pub const DEFAULT_CONCURRENCY: usize = 4;

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }

    pub fn with_judge(mut self, enabled: bool) -> Self {
        self.judge_enabled = enabled;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

impl Default for AuditBehavior {
    fn default() -> Self {
        Self {
            max_input_chars: Self::DEFAULT_MAX_INPUT_CHARS,
            judge_enabled: true,
            concurrency: Self::DEFAULT_CONCURRENCY,
        }
    }
}
