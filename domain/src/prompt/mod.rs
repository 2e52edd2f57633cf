//! Prompt domain
//!
//! Templates for the prompts sent at each stage of an audit.

mod template;

pub use template::AuditPromptTemplate;
