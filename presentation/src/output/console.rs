//! Console output formatter for audit outcomes

use crate::output::formatter::OutputFormatter;
use audit_application::{BatchItem, RunAuditError};
use audit_domain::{AuditOutcome, JudgeVerdict, OutputFormat, PASS_THRESHOLD, ScoredStep};
use colored::{ColoredString, Colorize};
use serde_json::json;

/// Formats audit outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a whole batch in the requested format.
    pub fn render(items: &[BatchItem], format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            return Self::format_json(items);
        }

        items
            .iter()
            .map(|item| match (&item.result, format) {
                (Ok(outcome), OutputFormat::Summary) => {
                    Self::format_summary(&item.label, outcome)
                }
                (Ok(outcome), _) => Self::format(&item.label, outcome),
                (Err(error), _) => Self::format_failure(&item.label, error),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the complete outcome
    pub fn format(label: &str, outcome: &AuditOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Email Audit: {}", label)));
        output.push('\n');
        output.push_str(&Self::score_line(outcome));
        output.push_str(&Self::judge_line(&outcome.judge));
        output.push_str(&format!(
            "{} {}\n",
            "Messages:".cyan().bold(),
            outcome.conversation.messages().len()
        ));

        output.push_str(&Self::section_header("Criteria"));
        if outcome.steps.is_empty() {
            output.push_str("\nNo criteria configured.\n");
        }
        for step in &outcome.steps {
            output.push_str(&format!("\n{}\n", Self::step_line(step)));
            output.push_str(&Self::indent(step.analysis(), "    "));
            output.push('\n');
            if !step.result.reasoning.is_empty() {
                output.push_str(&format!(
                    "    {} {}\n",
                    "Reasoning:".dimmed(),
                    step.result.reasoning
                ));
            }
            if let Some(improvements) = &step.result.improvements {
                output.push_str(&format!(
                    "    {} {}\n",
                    "Improvements:".yellow(),
                    improvements
                ));
            }
        }

        let summaries = &outcome.summaries;
        output.push_str(&Self::section_header("Summary"));
        for (title, text) in [
            ("Context", &summaries.context),
            ("Participants", &summaries.participants),
            ("Tone", &summaries.tone),
            ("Security", &summaries.security),
            ("Effectiveness", &summaries.effectiveness),
            ("Recommendations", &summaries.recommendations),
        ] {
            output.push_str(&format!("\n{}\n{}\n", title.cyan().bold(), text));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format overall score and failing criteria only
    pub fn format_summary(label: &str, outcome: &AuditOutcome) -> String {
        let mut output = format!("{} {}\n", "==".cyan().bold(), label.bold());
        output.push_str(&Self::score_line(outcome));
        output.push_str(&Self::judge_line(&outcome.judge));

        let failed: Vec<&ScoredStep> = outcome.steps.iter().filter(|s| !s.passed()).collect();
        if failed.is_empty() {
            output.push_str(&format!("{}\n", "All criteria passed".green()));
        } else {
            for step in failed {
                output.push_str(&format!("  {}\n", Self::step_line(step)));
            }
        }
        output
    }

    /// Format as JSON
    pub fn format_json(items: &[BatchItem]) -> String {
        let records: Vec<_> = items
            .iter()
            .map(|item| match &item.result {
                Ok(outcome) => json!({
                    "file": item.label,
                    "status": "ok",
                    "outcome": outcome,
                }),
                Err(error) => json!({
                    "file": item.label,
                    "status": "failed",
                    "stage": error.stage(),
                    "error": error.to_string(),
                }),
            })
            .collect();
        serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format an audit that stopped with an error
    pub fn format_failure(label: &str, error: &RunAuditError) -> String {
        format!(
            "{} {}\n  {} {}\n",
            "FAILED".red().bold(),
            label.bold(),
            format!("[{}]", error.stage().display_name()).red(),
            error
        )
    }

    fn score_line(outcome: &AuditOutcome) -> String {
        let percent = format!("{:.1}%", outcome.overall_score * 100.0);
        let percent = if outcome.overall_score >= PASS_THRESHOLD {
            percent.green().bold()
        } else {
            percent.red().bold()
        };

        let mut line = format!(
            "{} {} ({}/{} criteria passed)\n",
            "Overall:".cyan().bold(),
            percent,
            outcome.passed_count(),
            outcome.steps.len()
        );

        let critical: Vec<&str> = outcome.failed_critical().map(|s| s.title()).collect();
        if !critical.is_empty() {
            line.push_str(&format!(
                "{} {}\n",
                "Failed critical:".red().bold(),
                critical.join(", ")
            ));
        }
        line
    }

    fn judge_line(verdict: &JudgeVerdict) -> String {
        match verdict {
            JudgeVerdict::Refined => format!("{} refined\n", "Judge:".cyan().bold()),
            JudgeVerdict::Fallback { reason } => format!(
                "{} {} ({})\n",
                "Judge:".cyan().bold(),
                "kept initial scores".yellow(),
                reason
            ),
        }
    }

    fn step_line(step: &ScoredStep) -> String {
        let badge: ColoredString = if step.passed() {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        let critical = if step.is_critical {
            format!(" {}", "critical".red())
        } else {
            String::new()
        };
        format!(
            "[{}] {} ({}) score {:.2}, weight {}{}",
            badge,
            step.title().bold(),
            step.step_id(),
            step.score(),
            step.weight,
            critical
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, label: &str, outcome: &AuditOutcome) -> String {
        Self::format(label, outcome)
    }

    fn format_summary(&self, label: &str, outcome: &AuditOutcome) -> String {
        Self::format_summary(label, outcome)
    }

    fn format_json(&self, items: &[BatchItem]) -> String {
        Self::format_json(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_domain::{
        AuditStage, AuditSummaries, ConversationMessage, ConversationThread, StepResult,
    };

    fn scored(id: &str, title: &str, score: f64, weight: f64, critical: bool) -> ScoredStep {
        ScoredStep {
            result: StepResult {
                step_id: id.to_string(),
                title: title.to_string(),
                passed: score >= PASS_THRESHOLD,
                score,
                analysis: format!("{} analysis", title),
                reasoning: format!("{} reasoning", title),
                improvements: (score < PASS_THRESHOLD).then(|| "Offer a limo".to_string()),
            },
            is_critical: critical,
            category: "PNR".to_string(),
            weight,
        }
    }

    fn outcome() -> AuditOutcome {
        let conversation = ConversationThread {
            email_conversations: vec![ConversationMessage {
                sender: "agent@travel.example".to_string(),
                timestamp: "2025-05-05 10:00".to_string(),
                recipient: "sam@example.com".to_string(),
                cc: Vec::new(),
                subject: "Quote".to_string(),
                body: "Here is your quote".to_string(),
            }],
        };
        let steps = vec![
            scored("logical_itinerary", "Logical Itinerary", 1.0, 3.0, false),
            scored("limo_offering", "Limo Offering", 0.5, 5.4, true),
        ];
        let summaries = AuditSummaries::from_steps(&steps, &conversation);
        AuditOutcome {
            conversation,
            steps,
            overall_score: 5.7 / 8.4,
            judge: JudgeVerdict::Fallback {
                reason: "judge disabled".to_string(),
            },
            summaries,
        }
    }

    fn items() -> Vec<BatchItem> {
        vec![
            BatchItem {
                label: "a.html".to_string(),
                result: Ok(outcome()),
            },
            BatchItem {
                label: "b.html".to_string(),
                result: Err(RunAuditError::Structuring {
                    reason: "no messages".to_string(),
                }),
            },
        ]
    }

    #[test]
    fn test_format_full() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format("a.html", &outcome());

        assert!(output.contains("Email Audit: a.html"));
        assert!(output.contains("Overall: 67.9% (1/2 criteria passed)"));
        assert!(output.contains("Failed critical: Limo Offering"));
        assert!(output.contains("Judge: kept initial scores (judge disabled)"));
        assert!(output.contains("[FAIL] Limo Offering (limo_offering) score 0.50, weight 5.4 critical"));
        assert!(output.contains("    Limo Offering analysis"));
        assert!(output.contains("Improvements: Offer a limo"));
        assert!(output.contains("agent@travel.example, sam@example.com"));
    }

    #[test]
    fn test_format_summary_lists_failures_only() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_summary("a.html", &outcome());

        assert!(output.contains("Limo Offering"));
        assert!(!output.contains("Logical Itinerary"));
        assert!(!output.contains("analysis"));
    }

    #[test]
    fn test_format_json() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&items())).unwrap();

        assert_eq!(value[0]["file"], "a.html");
        assert_eq!(value[0]["status"], "ok");
        assert_eq!(value[0]["outcome"]["steps"][1]["step_id"], "limo_offering");
        assert_eq!(value[0]["outcome"]["steps"][1]["weight"], 5.4);
        assert_eq!(value[0]["outcome"]["judge"]["status"], "fallback");
        assert_eq!(value[1]["status"], "failed");
        assert_eq!(value[1]["stage"], serde_json::json!(AuditStage::Structure));
        assert_eq!(value[1]["error"], "Structuring failed: no messages");
    }

    #[test]
    fn test_render_includes_failures() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::render(&items(), OutputFormat::Summary);

        assert!(output.contains("== a.html"));
        assert!(output.contains("FAILED b.html"));
        assert!(output.contains("Structuring failed: no messages"));
    }

    #[test]
    fn test_empty_criteria() {
        colored::control::set_override(false);
        let mut outcome = outcome();
        outcome.steps.clear();
        outcome.overall_score = 0.0;

        let output = ConsoleFormatter::format("empty.html", &outcome);
        assert!(output.contains("No criteria configured."));
        assert!(output.contains("(0/0 criteria passed)"));
    }
}
