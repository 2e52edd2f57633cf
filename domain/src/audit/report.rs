//! Per-criterion results as returned by the scoring and judge models

use crate::schema::{Field, FieldType, Schema, StructuredOutput};
use serde::{Deserialize, Serialize};

/// Verdict for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Criterion id this result belongs to
    pub step_id: String,
    pub title: String,
    pub passed: bool,
    /// Fraction in `[0.0, 1.0]` once merged
    pub score: f64,
    pub analysis: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvements: Option<String>,
}

impl StepResult {
    pub fn schema() -> Schema {
        Schema::new("StepResult")
            .field(
                Field::required("step_id", FieldType::String)
                    .describe("Id of the criterion being evaluated"),
            )
            .field(Field::required("title", FieldType::String))
            .field(Field::required("passed", FieldType::Boolean))
            .field(
                Field::required("score", FieldType::Number)
                    .describe("Score between 0.0 and 1.0"),
            )
            .field(
                Field::required("analysis", FieldType::String)
                    .describe("Detailed analysis of the criterion"),
            )
            .field(
                Field::required("reasoning", FieldType::String)
                    .describe("Reasoning behind the score"),
            )
            .field(
                Field::optional("improvements", FieldType::String)
                    .describe("Suggested improvements if the step did not pass"),
            )
    }
}

/// Ordered results, one per criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub results: Vec<StepResult>,
}

impl AuditReport {
    pub fn new(results: Vec<StepResult>) -> Self {
        Self { results }
    }

    pub fn get(&self, step_id: &str) -> Option<&StepResult> {
        self.results.iter().find(|r| r.step_id == step_id)
    }

    /// Same shape as [`AuditReport::schema`], named for the judge's revision.
    pub fn refined_schema() -> Schema {
        Schema::new("RefinedAuditReport")
            .describe("Revised audit results after reviewing the initial report")
            .field(Self::results_field())
    }

    fn results_field() -> Field {
        Field::required(
            "results",
            FieldType::array_of(FieldType::Object(StepResult::schema())),
        )
        .describe("One result per audit criterion")
    }
}

impl StructuredOutput for AuditReport {
    fn schema() -> Schema {
        Schema::new("AuditReport")
            .describe("Audit results for every criterion")
            .field(Self::results_field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_payload_validates_and_deserializes() {
        let payload = json!({
            "results": [{
                "step_id": "communication",
                "title": "Communication",
                "passed": true,
                "score": 1,
                "analysis": "Clear and polite",
                "reasoning": "No issues"
            }]
        });

        AuditReport::schema().validate(&payload).unwrap();
        let report: AuditReport = serde_json::from_value(payload).unwrap();
        assert_eq!(report.results[0].score, 1.0);
        assert!(report.results[0].improvements.is_none());
    }

    #[test]
    fn test_string_score_is_rejected_with_path() {
        let payload = json!({
            "results": [
                {"step_id": "a", "title": "A", "passed": true, "score": 0.5,
                 "analysis": "", "reasoning": ""},
                {"step_id": "b", "title": "B", "passed": true, "score": "high",
                 "analysis": "", "reasoning": ""}
            ]
        });

        let violation = AuditReport::schema().validate(&payload).unwrap_err();
        assert_eq!(violation.path, "results[1].score");
    }

    #[test]
    fn test_refined_schema_has_same_shape() {
        let score = AuditReport::schema().to_json_schema();
        let refined = AuditReport::refined_schema().to_json_schema();
        assert_eq!(score["properties"], refined["properties"]);
        assert_eq!(score["required"], refined["required"]);
    }
}
