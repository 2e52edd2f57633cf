//! Configuration file loading for email-audit
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Role environment variables (`<ROLE>_LLM_PROVIDER`, `_MODEL`, `_TEMPERATURE`)
//! 2. `EMAIL_AUDIT_<SECTION>__<KEY>` environment variables
//! 3. `--config <path>` specified file
//! 4. Project root: `./email-audit.toml` or `./.email-audit.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/email-audit/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAuditConfig, FileConfig, FileJudgeConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, FileProvidersConfig, FileRoleConfig, FileRolesConfig,
};
pub use loader::ConfigLoader;
