//! Run Batch use case
//!
//! Audits several documents with bounded concurrency. One failed audit
//! never aborts the batch.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::run_audit::{AuditOrchestrator, RunAuditError};
use audit_domain::AuditOutcome;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::info;

/// A flattened thread to audit.
#[derive(Debug, Clone)]
pub struct AuditDocument {
    /// Display name, usually the source file path
    pub label: String,
    pub text: String,
}

impl AuditDocument {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Outcome for one document of a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub label: String,
    pub result: Result<AuditOutcome, RunAuditError>,
}

/// Use case for auditing many documents
pub struct RunBatchUseCase {
    orchestrator: Arc<AuditOrchestrator>,
    concurrency: usize,
}

impl RunBatchUseCase {
    pub fn new(orchestrator: Arc<AuditOrchestrator>) -> Self {
        let concurrency = orchestrator.behavior().concurrency;
        Self {
            orchestrator,
            concurrency,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, documents: Vec<AuditDocument>) -> Vec<BatchItem> {
        self.execute_with_progress(documents, &NoProgress).await
    }

    /// Audit every document; results come back in input order.
    pub async fn execute_with_progress(
        &self,
        documents: Vec<AuditDocument>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<BatchItem> {
        let concurrency = self.concurrency.max(1);
        info!(
            "Auditing {} documents ({} at a time)",
            documents.len(),
            concurrency
        );

        let orchestrator = &self.orchestrator;
        let mut items: Vec<(usize, BatchItem)> = stream::iter(documents.into_iter().enumerate())
            .map(|(index, document)| async move {
                let result = orchestrator
                    .audit_with_progress(&document.text, &document.label, progress)
                    .await;
                (
                    index,
                    BatchItem {
                        label: document.label,
                        result,
                    },
                )
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        items.sort_by_key(|(index, _)| *index);
        items.into_iter().map(|(_, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditBehavior;
    use crate::ports::model_client::ModelOutput;
    use crate::use_cases::run_audit::AuditRoles;
    use crate::use_cases::run_audit::test_support::ScriptedClient;
    use audit_domain::AuditStage;
    use serde_json::json;
    use std::sync::Mutex;

    fn thread_output() -> ModelOutput {
        ModelOutput::Structured(json!({
            "email_conversations": [{
                "sender": "a@example.com",
                "timestamp": "2024-03-01",
                "recipient": "b@example.com",
                "subject": "Hi",
                "body": "Hello"
            }]
        }))
    }

    fn orchestrator(primary: ScriptedClient) -> Arc<AuditOrchestrator> {
        let roles = AuditRoles {
            primary: Arc::new(primary),
            reasoning: Arc::new(ScriptedClient::new("reasoning")),
            detail: Arc::new(ScriptedClient::new("detail")),
            judge: Arc::new(ScriptedClient::new("judge")),
        };
        Arc::new(
            AuditOrchestrator::new(roles, Vec::new())
                .with_behavior(AuditBehavior::default().with_concurrency(1)),
        )
    }

    #[derive(Default)]
    struct RecordingProgress {
        completed: Mutex<Vec<(String, bool)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, _label: &str, _stage: AuditStage) {}
        fn on_stage_complete(&self, _label: &str, _stage: AuditStage, _success: bool) {}
        fn on_audit_complete(&self, label: &str, success: bool) {
            self.completed
                .lock()
                .unwrap()
                .push((label.to_string(), success));
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        // Second document gets no scripted response and fails structuring.
        let use_case = RunBatchUseCase::new(orchestrator(
            ScriptedClient::new("primary")
                .respond(thread_output())
                .respond(ModelOutput::Empty)
                .respond(thread_output()),
        ));

        let items = use_case
            .execute(vec![
                AuditDocument::new("one.html", "first"),
                AuditDocument::new("two.html", "second"),
                AuditDocument::new("three.html", "third"),
            ])
            .await;

        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["one.html", "two.html", "three.html"]);
        assert!(items[0].result.is_ok());
        assert!(matches!(
            items[1].result,
            Err(RunAuditError::Structuring { .. })
        ));
        assert!(items[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_progress_reports_each_document() {
        let progress = RecordingProgress::default();
        let use_case = RunBatchUseCase::new(orchestrator(
            ScriptedClient::new("primary")
                .respond(thread_output())
                .respond(thread_output()),
        ))
        .with_concurrency(2);

        let items = use_case
            .execute_with_progress(
                vec![
                    AuditDocument::new("a.txt", "a"),
                    AuditDocument::new("b.txt", "b"),
                ],
                &progress,
            )
            .await;

        assert_eq!(items.len(), 2);
        let mut completed = progress.completed.lock().unwrap().clone();
        completed.sort();
        assert_eq!(
            completed,
            vec![("a.txt".to_string(), true), ("b.txt".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let use_case = RunBatchUseCase::new(orchestrator(ScriptedClient::new("primary")));
        assert!(use_case.execute(Vec::new()).await.is_empty());
    }
}
