//! Text summaries derived from scored steps

use super::conversation::ConversationThread;
use super::outcome::ScoredStep;
use serde::{Deserialize, Serialize};

const PNR: &str = "PNR";
const COMMUNICATION: &str = "communication";
const POLICY_AND_SERVICE: &str = "policy and service";

/// Report-level summaries, one string each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummaries {
    pub context: String,
    pub participants: String,
    pub tone: String,
    pub security: String,
    pub effectiveness: String,
    pub recommendations: String,
    pub reasoning: String,
}

impl AuditSummaries {
    pub fn from_steps(steps: &[ScoredStep], conversation: &ConversationThread) -> Self {
        Self {
            context: context(steps),
            participants: participants(conversation),
            tone: tone(steps),
            security: security(steps),
            effectiveness: effectiveness(steps),
            recommendations: recommendations(steps),
            reasoning: reasoning(steps),
        }
    }
}

fn in_category(step: &ScoredStep, category: &str) -> bool {
    step.category.eq_ignore_ascii_case(category)
}

fn title_and_analysis(step: &ScoredStep) -> String {
    format!("{}: {}", step.title(), step.analysis())
}

fn join_or(parts: Vec<String>, fallback: &str) -> String {
    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(" | ")
    }
}

pub fn context(steps: &[ScoredStep]) -> String {
    let parts = steps
        .iter()
        .filter(|s| in_category(s, PNR))
        .map(title_and_analysis)
        .collect();
    join_or(parts, "No specific context found")
}

pub fn participants(conversation: &ConversationThread) -> String {
    let participants = conversation.participants();
    if participants.is_empty() {
        "No participants found".to_string()
    } else {
        participants.join(", ")
    }
}

pub fn tone(steps: &[ScoredStep]) -> String {
    let parts = steps
        .iter()
        .filter(|s| in_category(s, COMMUNICATION))
        .map(title_and_analysis)
        .collect();
    join_or(parts, "No tone analysis available")
}

pub fn security(steps: &[ScoredStep]) -> String {
    let parts = steps
        .iter()
        .filter(|s| {
            let analysis = s.analysis().to_lowercase();
            analysis.contains("sensitive") || analysis.contains("security")
        })
        .map(title_and_analysis)
        .collect();
    join_or(parts, "No security concerns found")
}

pub fn effectiveness(steps: &[ScoredStep]) -> String {
    let parts = steps
        .iter()
        .filter(|s| in_category(s, COMMUNICATION) || in_category(s, POLICY_AND_SERVICE))
        .map(title_and_analysis)
        .collect();
    join_or(parts, "No effectiveness assessment available")
}

pub fn recommendations(steps: &[ScoredStep]) -> String {
    let parts = steps
        .iter()
        .filter(|s| !s.passed())
        .map(|s| {
            let label = if s.is_critical { "Critical" } else { "Improvement" };
            format!("{}: {} - {}", label, s.title(), s.analysis())
        })
        .collect();
    join_or(parts, "No specific recommendations")
}

/// Per-category breakdown, categories in first-appearance order.
pub fn reasoning(steps: &[ScoredStep]) -> String {
    let mut categories: Vec<&str> = Vec::new();
    for step in steps {
        if !categories.iter().any(|c| c.eq_ignore_ascii_case(&step.category)) {
            categories.push(&step.category);
        }
    }

    let mut lines = Vec::new();
    for category in categories {
        lines.push(format!("\n{} Analysis:", category.to_uppercase()));
        for step in steps.iter().filter(|s| in_category(s, category)) {
            lines.push(format!("\n{}:", step.title()));
            lines.push(format!("Score: {}", step.score()));
            lines.push(format!("Analysis: {}", step.analysis()));
            if !step.passed() {
                let improvements = step
                    .result
                    .improvements
                    .as_deref()
                    .unwrap_or("None specified");
                lines.push(format!("Areas for Improvement: {}", improvements));
            }
        }
    }
    lines.join("\n")
}
