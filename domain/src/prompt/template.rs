//! Prompt templates for the audit stages

use crate::audit::conversation::ConversationThread;
use crate::audit::criterion::AuditCriterion;
use crate::audit::report::AuditReport;
use serde::Serialize;

/// Templates for generating prompts at each stage
pub struct AuditPromptTemplate;

impl AuditPromptTemplate {
    /// Structure stage: turn flattened thread text into chronological messages.
    ///
    /// `excerpt` is expected to be capped already.
    pub fn structuring(excerpt: &str, max_chars: usize) -> String {
        format!(
            r#"Based on the raw text extracted from an email thread, your task is to parse it into a chronological list of email messages. Pay close attention to headers like "From:", "Sent:", "To:", "Cc:", and "Subject:". The messages are typically in reverse chronological order in the text; please return them in chronological order (oldest first).

Raw Text Content (first {} characters):
---
{}
---

Please return the data as a JSON object conforming to the required schema."#,
            max_chars, excerpt
        )
    }

    /// Score stage: every criterion evaluated in one consolidated prompt.
    pub fn scoring(conversation: &ConversationThread, criteria: &[AuditCriterion]) -> String {
        let mut prompt = format!(
            r#"Analyze the following email conversation based on a comprehensive set of audit criteria.

Conversation History (chronological order):
{}

Please evaluate the conversation against each of the following audit steps and provide a structured JSON response that conforms to the required format.

Audit Criteria:
"#,
            to_pretty_json(conversation.messages())
        );

        push_criteria(&mut prompt, criteria);

        prompt.push_str(
            r#"
For each step, provide:
1. The 'step_id' exactly as given above.
2. A boolean 'passed' field (true if score is >= 0.7).
3. A float 'score' from 0.0 to 1.0.
4. A detailed 'analysis' of what happened.
5. The 'reasoning' for your score.
6. Concrete 'improvements' if applicable.
"#,
        );

        prompt
    }

    /// Judge stage: second opinion on the initial report.
    pub fn judge(excerpt: &str, criteria: &[AuditCriterion], report: &AuditReport) -> String {
        let mut prompt = format!(
            r#"You are a senior quality auditor reviewing an automated audit of a customer-service email thread.
An initial audit produced the report below. Your task is to give a second opinion and correct scores that are wrong in context. Typical mistakes to fix:
- a requirement penalized although it did not apply to this conversation (for example, no transit involved, or the customer declined a service)
- a step passed although the thread shows the requirement was missed
- analysis that contradicts the conversation

Raw Email Thread:
---
{}
---

Audit Criteria:
"#,
            excerpt
        );

        push_criteria(&mut prompt, criteria);

        prompt.push_str(&format!(
            r#"
Initial Audit Report:
{}

Return the complete revised report with exactly one result per criterion, keeping each 'step_id' unchanged. Keep results you agree with as they are."#,
            to_pretty_json(report)
        ));

        prompt
    }
}

fn push_criteria(prompt: &mut String, criteria: &[AuditCriterion]) {
    for criterion in criteria {
        prompt.push_str(&format!(
            "\n- Step ID: {}\n  - Title: {}\n  - Purpose: {}\n  - Prompt: {}\n",
            criterion.id, criterion.title, criterion.purpose, criterion.prompt
        ));
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
