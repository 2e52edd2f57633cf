//! Merging model results with criteria and computing the overall score

use super::criterion::AuditCriterion;
use super::outcome::ScoredStep;
use super::report::{AuditReport, StepResult};
use std::collections::HashMap;

/// Minimum score for a step to pass.
pub const PASS_THRESHOLD: f64 = 0.7;

/// Analysis text of a criterion the model did not answer.
pub const MISSING_RESULT_ANALYSIS: &str = "No result returned for this criterion";

pub fn passes(score: f64) -> bool {
    score >= PASS_THRESHOLD
}

/// Clamp into `[0, 1]`; non-finite scores become 0.
pub fn normalize_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Align a model report with the configured criteria.
///
/// Output follows criteria order. Rows for unknown ids are dropped,
/// duplicates keep the first row, unanswered criteria become failed steps.
pub fn merge_report(report: &AuditReport, criteria: &[AuditCriterion]) -> Vec<ScoredStep> {
    let mut by_id: HashMap<&str, &StepResult> = HashMap::new();
    for result in &report.results {
        if !criteria.iter().any(|c| c.id == result.step_id) {
            continue;
        }
        by_id.entry(result.step_id.as_str()).or_insert(result);
    }

    criteria
        .iter()
        .map(|criterion| {
            let mut result = match by_id.get(criterion.id.as_str()) {
                Some(result) => (*result).clone(),
                None => missing_result(criterion),
            };
            result.score = normalize_score(result.score);
            result.passed = passes(result.score);

            ScoredStep {
                result,
                is_critical: criterion.is_critical,
                category: criterion.category.clone(),
                weight: criterion.weight,
            }
        })
        .collect()
}

/// Ids in `report` that match no configured criterion.
pub fn unknown_step_ids<'a>(report: &'a AuditReport, criteria: &[AuditCriterion]) -> Vec<&'a str> {
    report
        .results
        .iter()
        .filter(|r| !criteria.iter().any(|c| c.id == r.step_id))
        .map(|r| r.step_id.as_str())
        .collect()
}

fn missing_result(criterion: &AuditCriterion) -> StepResult {
    StepResult {
        step_id: criterion.id.clone(),
        title: criterion.title.clone(),
        passed: false,
        score: 0.0,
        analysis: MISSING_RESULT_ANALYSIS.to_string(),
        reasoning: String::new(),
        improvements: None,
    }
}

/// Weighted average `Σ(score × weight) / Σ weight`; 0 when there is no weight.
pub fn overall_score(steps: &[ScoredStep]) -> f64 {
    let total_weight: f64 = steps.iter().map(|s| s.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    steps.iter().map(|s| s.score() * s.weight).sum::<f64>() / total_weight
}
