//! Infrastructure layer for email-audit
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP provider clients, configuration file
//! loading, criteria loading, thread input and the JSONL audit log.

pub mod config;
pub mod criteria;
pub mod input;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use criteria::CriteriaLoader;
pub use input::{InputError, html_to_text, load_thread};
pub use logging::JsonlAuditLogger;
pub use providers::{
    AnthropicClient, CredentialResolver, OpenAiCompatibleClient, ProviderClientFactory,
};
