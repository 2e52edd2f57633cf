//! Domain layer for email-audit
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Structured extraction
//!
//! LLM providers generate free text. An audit needs machine-checkable
//! objects. The bridge is a [`Schema`] value that is rendered into the
//! request (as JSON Schema) and used to validate the response:
//!
//! - **Steering**: forced `structured_output` tool call, or a JSON-only system prompt
//! - **Extraction**: strip fences, parse, validate; on failure keep the raw text
//!
//! ## Audit
//!
//! A conversation is audited against [`AuditCriterion`]s in four stages
//! ([`AuditStage`]): Structure, Score, Judge, Aggregate. The Judge stage
//! may revise the report or fall back to it ([`JudgeVerdict`]).

pub mod audit;
pub mod config;
pub mod core;
pub mod extraction;
pub mod prompt;
pub mod providers;
pub mod schema;

// Re-export commonly used types
pub use audit::{
    conversation::{ConversationMessage, ConversationThread},
    criterion::{AuditCriterion, ModelRole},
    outcome::{AuditOutcome, AuditStage, JudgeVerdict, JudgedReport, ScoredStep},
    report::{AuditReport, StepResult},
    scoring::{PASS_THRESHOLD, merge_report, overall_score, passes},
    summary::AuditSummaries,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, RoleBinding, RoleBindings, Severity};
pub use core::error::DomainError;
pub use extraction::{Extraction, MalformedResponse, extract_structured, strip_code_fences};
pub use prompt::AuditPromptTemplate;
pub use providers::{ProviderConfig, ProviderKind, ProviderSettings};
pub use schema::{Field, FieldType, Schema, SchemaViolation, StructuredOutput};
