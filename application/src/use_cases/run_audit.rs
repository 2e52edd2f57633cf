//! Run Audit use case
//!
//! Drives one conversation through Structure → Score → Judge → Aggregate.
//! Stages run strictly in order. A failure in Structure or Score aborts the
//! audit; the Judge stage never does, and falls back to the score-stage
//! report instead.

use crate::config::AuditBehavior;
use crate::ports::audit_logger::{AuditEvent, AuditEventLogger, NoAuditLogger};
use crate::ports::model_client::{ModelClient, ProviderError};
use crate::ports::model_client_factory::{ClientError, ModelClientFactory};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{TypedOutput, invoke_structured};
use audit_domain::audit::scoring::unknown_step_ids;
use audit_domain::core::string::take_chars;
use audit_domain::{
    AuditCriterion, AuditOutcome, AuditPromptTemplate, AuditReport, AuditStage, AuditSummaries,
    ConversationThread, JudgedReport, ModelRole, RoleBindings, StructuredOutput, merge_report,
    overall_score,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reason recorded when the judge stage is switched off.
pub const JUDGE_DISABLED: &str = "judge disabled";

/// Reason recorded when there is nothing to score.
pub const NO_CRITERIA: &str = "no criteria configured";

/// Errors that abort an audit
#[derive(Error, Debug)]
pub enum RunAuditError {
    #[error("Structuring failed: {reason}")]
    Structuring { reason: String },

    #[error("Scoring failed: {reason}")]
    Scoring { reason: String },

    #[error("{stage} stage failed: {source}")]
    Provider {
        stage: AuditStage,
        source: ProviderError,
    },
}

impl RunAuditError {
    /// Stage the audit stopped in.
    pub fn stage(&self) -> AuditStage {
        match self {
            RunAuditError::Structuring { .. } => AuditStage::Structure,
            RunAuditError::Scoring { .. } => AuditStage::Score,
            RunAuditError::Provider { stage, .. } => *stage,
        }
    }
}

/// One client per model role.
#[derive(Clone)]
pub struct AuditRoles {
    pub primary: Arc<dyn ModelClient>,
    pub reasoning: Arc<dyn ModelClient>,
    pub detail: Arc<dyn ModelClient>,
    pub judge: Arc<dyn ModelClient>,
}

impl AuditRoles {
    /// Build every role's client. Fails on the first role that cannot be built.
    pub fn from_factory(
        factory: &dyn ModelClientFactory,
        bindings: &RoleBindings,
    ) -> Result<Self, ClientError> {
        let build = |role: ModelRole| factory.create_for_role(role, bindings.get(role));
        Ok(Self {
            primary: build(ModelRole::Primary)?,
            reasoning: build(ModelRole::Reasoning)?,
            detail: build(ModelRole::Detail)?,
            judge: build(ModelRole::Judge)?,
        })
    }
}

/// Audits conversations against a fixed set of criteria.
pub struct AuditOrchestrator {
    roles: AuditRoles,
    criteria: Arc<[AuditCriterion]>,
    behavior: AuditBehavior,
    logger: Arc<dyn AuditEventLogger>,
}

impl AuditOrchestrator {
    pub fn new(roles: AuditRoles, criteria: impl Into<Arc<[AuditCriterion]>>) -> Self {
        Self {
            roles,
            criteria: criteria.into(),
            behavior: AuditBehavior::default(),
            logger: Arc::new(NoAuditLogger),
        }
    }

    pub fn with_behavior(mut self, behavior: AuditBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn AuditEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn roles(&self) -> &AuditRoles {
        &self.roles
    }

    pub fn criteria(&self) -> &[AuditCriterion] {
        &self.criteria
    }

    pub fn behavior(&self) -> &AuditBehavior {
        &self.behavior
    }

    /// Audit one flattened thread with default (no-op) progress
    pub async fn audit(&self, raw_text: &str) -> Result<AuditOutcome, RunAuditError> {
        self.audit_with_progress(raw_text, "", &NoProgress).await
    }

    /// Audit one flattened thread with progress callbacks
    pub async fn audit_with_progress(
        &self,
        raw_text: &str,
        label: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<AuditOutcome, RunAuditError> {
        let excerpt = take_chars(raw_text, self.behavior.max_input_chars);
        info!(
            "Starting audit of '{}' against {} criteria",
            label,
            self.criteria.len()
        );
        self.logger.log(AuditEvent::new(
            "audit_started",
            json!({
                "label": label,
                "input_chars": excerpt.chars().count(),
                "criteria": self.criteria.len(),
            }),
        ));

        let result = self.run_stages(excerpt, label, progress).await;

        match &result {
            Ok(outcome) => self.logger.log(AuditEvent::new(
                "audit_completed",
                json!({
                    "label": label,
                    "overall_score": outcome.overall_score,
                    "steps": outcome.steps.len(),
                    "passed": outcome.passed_count(),
                    "judge": outcome.judge,
                }),
            )),
            Err(e) => {
                warn!("Audit of '{}' failed in {} stage: {}", label, e.stage(), e);
                self.logger.log(AuditEvent::new(
                    "audit_failed",
                    json!({
                        "label": label,
                        "stage": e.stage(),
                        "error": e.to_string(),
                    }),
                ));
            }
        }
        progress.on_audit_complete(label, result.is_ok());

        result
    }

    async fn run_stages(
        &self,
        excerpt: &str,
        label: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<AuditOutcome, RunAuditError> {
        // Stage 1: Structure
        let conversation = self.stage_structure(excerpt, label, progress).await?;

        // Stages 2 + 3: Score, Judge (nothing to do without criteria)
        let judged = if self.criteria.is_empty() {
            debug!("No criteria configured, skipping score and judge stages");
            JudgedReport::Fallback {
                report: AuditReport::default(),
                reason: NO_CRITERIA.to_string(),
            }
        } else {
            let report = self.stage_score(&conversation, label, progress).await?;
            self.stage_judge(excerpt, report, label, progress).await
        };

        // Stage 4: Aggregate
        Ok(self.stage_aggregate(conversation, judged, label, progress))
    }

    /// Stage 1: parse the flattened thread into chronological messages
    async fn stage_structure(
        &self,
        excerpt: &str,
        label: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConversationThread, RunAuditError> {
        info!("Stage 1: Structuring conversation");
        progress.on_stage_start(label, AuditStage::Structure);

        let prompt = AuditPromptTemplate::structuring(excerpt, self.behavior.max_input_chars);
        let result = invoke_structured::<ConversationThread>(
            self.roles.primary.as_ref(),
            &prompt,
            &ConversationThread::schema(),
        )
        .await;

        let stage_result = match result {
            Ok(TypedOutput::Valid(conversation)) => {
                info!("Structured {} messages", conversation.messages().len());
                Ok(conversation)
            }
            Ok(TypedOutput::Invalid(reason)) => Err(RunAuditError::Structuring { reason }),
            Err(source) => Err(RunAuditError::Provider {
                stage: AuditStage::Structure,
                source,
            }),
        };

        self.finish_stage(AuditStage::Structure, label, progress, stage_result.is_ok());
        stage_result
    }

    /// Stage 2: score every criterion in one consolidated call
    async fn stage_score(
        &self,
        conversation: &ConversationThread,
        label: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<AuditReport, RunAuditError> {
        info!("Stage 2: Scoring {} criteria", self.criteria.len());
        progress.on_stage_start(label, AuditStage::Score);

        let prompt = AuditPromptTemplate::scoring(conversation, &self.criteria);
        let result = invoke_structured::<AuditReport>(
            self.roles.reasoning.as_ref(),
            &prompt,
            &AuditReport::schema(),
        )
        .await;

        let stage_result = match result {
            Ok(TypedOutput::Valid(report)) => Ok(report),
            Ok(TypedOutput::Invalid(reason)) => Err(RunAuditError::Scoring { reason }),
            Err(source) => Err(RunAuditError::Provider {
                stage: AuditStage::Score,
                source,
            }),
        };

        self.finish_stage(AuditStage::Score, label, progress, stage_result.is_ok());
        stage_result
    }

    /// Stage 3: second opinion; a failed call or invalid output keeps the
    /// score report as is
    async fn stage_judge(
        &self,
        excerpt: &str,
        report: AuditReport,
        label: &str,
        progress: &dyn ProgressNotifier,
    ) -> JudgedReport {
        if !self.behavior.judge_enabled {
            debug!("Judge stage disabled");
            return JudgedReport::Fallback {
                report,
                reason: JUDGE_DISABLED.to_string(),
            };
        }

        info!("Stage 3: Judge review");
        progress.on_stage_start(label, AuditStage::Judge);

        let prompt = AuditPromptTemplate::judge(excerpt, &self.criteria, &report);
        let result = invoke_structured::<AuditReport>(
            self.roles.judge.as_ref(),
            &prompt,
            &AuditReport::refined_schema(),
        )
        .await;

        let judged = match result {
            Ok(TypedOutput::Valid(refined)) => JudgedReport::Refined(refined),
            Ok(TypedOutput::Invalid(reason)) => {
                warn!(
                    model = self.roles.judge.model_name(),
                    "Judge output invalid, keeping score-stage report: {}", reason
                );
                self.logger.log(AuditEvent::new(
                    "judge_fallback",
                    json!({ "label": label, "reason": reason }),
                ));
                JudgedReport::Fallback { report, reason }
            }
            Err(source) => {
                warn!(
                    model = self.roles.judge.model_name(),
                    kind = source.kind().as_str(),
                    "Judge call failed, keeping score-stage report: {}", source
                );
                let reason = source.to_string();
                self.logger.log(AuditEvent::new(
                    "judge_fallback",
                    json!({
                        "label": label,
                        "reason": reason,
                        "kind": source.kind().as_str(),
                    }),
                ));
                JudgedReport::Fallback { report, reason }
            }
        };

        self.finish_stage(AuditStage::Judge, label, progress, true);
        judged
    }

    /// Stage 4: attach criterion metadata, score and summarize
    fn stage_aggregate(
        &self,
        conversation: ConversationThread,
        judged: JudgedReport,
        label: &str,
        progress: &dyn ProgressNotifier,
    ) -> AuditOutcome {
        progress.on_stage_start(label, AuditStage::Aggregate);
        let (report, judge) = judged.into_parts();

        for step_id in unknown_step_ids(&report, &self.criteria) {
            debug!("Dropping result for unknown criterion '{}'", step_id);
        }

        let steps = merge_report(&report, &self.criteria);
        let overall_score = overall_score(&steps);
        let summaries = AuditSummaries::from_steps(&steps, &conversation);
        info!("Overall score: {:.3}", overall_score);

        self.finish_stage(AuditStage::Aggregate, label, progress, true);
        AuditOutcome {
            conversation,
            steps,
            overall_score,
            judge,
            summaries,
        }
    }

    fn finish_stage(
        &self,
        stage: AuditStage,
        label: &str,
        progress: &dyn ProgressNotifier,
        success: bool,
    ) {
        progress.on_stage_complete(label, stage, success);
        self.logger.log(AuditEvent::new(
            "stage_completed",
            json!({ "label": label, "stage": stage, "success": success }),
        ));
    }
}
