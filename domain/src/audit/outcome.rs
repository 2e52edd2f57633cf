//! What a finished audit returns

use super::conversation::ConversationThread;
use super::report::{AuditReport, StepResult};
use super::summary::AuditSummaries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStage {
    Structure,
    Score,
    Judge,
    Aggregate,
}

impl AuditStage {
    pub const ALL: [AuditStage; 4] = [
        AuditStage::Structure,
        AuditStage::Score,
        AuditStage::Judge,
        AuditStage::Aggregate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStage::Structure => "structure",
            AuditStage::Score => "score",
            AuditStage::Judge => "judge",
            AuditStage::Aggregate => "aggregate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AuditStage::Structure => "Structuring conversation",
            AuditStage::Score => "Scoring criteria",
            AuditStage::Judge => "Judge review",
            AuditStage::Aggregate => "Aggregating results",
        }
    }
}

impl fmt::Display for AuditStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the judge's revision was adopted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JudgeVerdict {
    Refined,
    Fallback { reason: String },
}

impl JudgeVerdict {
    pub fn is_refined(&self) -> bool {
        matches!(self, JudgeVerdict::Refined)
    }
}

/// Result of the Judge stage: the validated revision, or the score-stage
/// report kept unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum JudgedReport {
    Refined(AuditReport),
    Fallback { report: AuditReport, reason: String },
}

impl JudgedReport {
    pub fn into_parts(self) -> (AuditReport, JudgeVerdict) {
        match self {
            JudgedReport::Refined(report) => (report, JudgeVerdict::Refined),
            JudgedReport::Fallback { report, reason } => {
                (report, JudgeVerdict::Fallback { reason })
            }
        }
    }
}

/// A [`StepResult`] with its criterion's metadata attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStep {
    #[serde(flatten)]
    pub result: StepResult,
    pub is_critical: bool,
    pub category: String,
    pub weight: f64,
}

impl ScoredStep {
    pub fn step_id(&self) -> &str {
        &self.result.step_id
    }

    pub fn title(&self) -> &str {
        &self.result.title
    }

    pub fn score(&self) -> f64 {
        self.result.score
    }

    pub fn passed(&self) -> bool {
        self.result.passed
    }

    pub fn analysis(&self) -> &str {
        &self.result.analysis
    }
}

/// Everything one audit produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditOutcome {
    pub conversation: ConversationThread,
    pub steps: Vec<ScoredStep>,
    pub overall_score: f64,
    pub judge: JudgeVerdict,
    pub summaries: AuditSummaries,
}

impl AuditOutcome {
    /// The merged report without criterion metadata.
    pub fn report(&self) -> AuditReport {
        AuditReport::new(self.steps.iter().map(|s| s.result.clone()).collect())
    }

    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.passed()).count()
    }

    pub fn failed_critical(&self) -> impl Iterator<Item = &ScoredStep> {
        self.steps.iter().filter(|s| s.is_critical && !s.passed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str) -> StepResult {
        StepResult {
            step_id: id.to_string(),
            title: id.to_string(),
            passed: true,
            score: 1.0,
            analysis: String::new(),
            reasoning: String::new(),
            improvements: None,
        }
    }

    #[test]
    fn test_judged_report_into_parts() {
        let report = AuditReport::new(vec![step("a")]);

        let (kept, verdict) = JudgedReport::Fallback {
            report: report.clone(),
            reason: "invalid".to_string(),
        }
        .into_parts();
        assert_eq!(kept, report);
        assert_eq!(
            verdict,
            JudgeVerdict::Fallback {
                reason: "invalid".to_string()
            }
        );

        let (_, verdict) = JudgedReport::Refined(report).into_parts();
        assert!(verdict.is_refined());
    }

    #[test]
    fn test_verdict_serializes_with_status_tag() {
        let json = serde_json::to_value(JudgeVerdict::Fallback {
            reason: "judge disabled".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "fallback");
        assert_eq!(json["reason"], "judge disabled");
    }

    #[test]
    fn test_scored_step_flattens_result() {
        let scored = ScoredStep {
            result: step("cross_sell"),
            is_critical: false,
            category: "communication".to_string(),
            weight: 3.0,
        };
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["step_id"], "cross_sell");
        assert_eq!(json["weight"], 3.0);
    }
}
