//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversions resolve them against built-in defaults into domain and
//! application types.

mod audit;
mod providers;
mod roles;

pub use audit::{FileAuditConfig, FileJudgeConfig, FileLoggingConfig, FileOutputConfig};
pub use providers::{FileProviderConfig, FileProvidersConfig};
pub use roles::{FileRoleConfig, FileRolesConfig};

use audit_application::AuditBehavior;
use audit_domain::{ConfigIssue, ConfigIssueCode, ProviderConfig, RoleBindings};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider + model + temperature per role
    pub roles: FileRolesConfig,
    /// Provider connection settings
    pub providers: FileProvidersConfig,
    pub audit: FileAuditConfig,
    pub judge: FileJudgeConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
    /// Issues found while applying role environment overrides
    #[serde(skip)]
    pub env_issues: Vec<ConfigIssue>,
}

impl FileConfig {
    pub fn role_bindings(&self) -> RoleBindings {
        self.roles.to_role_bindings()
    }

    pub fn provider_config(&self) -> ProviderConfig {
        self.providers.to_provider_config()
    }

    pub fn audit_behavior(&self) -> AuditBehavior {
        AuditBehavior::default()
            .with_max_input_chars(self.audit.max_input_chars)
            .with_concurrency(self.audit.concurrency)
            .with_judge(self.judge.enabled)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Issues are warnings; none of them stops the program.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.env_issues.clone();
        issues.extend(self.role_bindings().validate());

        for (field, value) in [
            ("audit.max_input_chars", self.audit.max_input_chars),
            ("audit.concurrency", self.audit.concurrency),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroValue {
                        field: field.to_string(),
                    },
                    format!("{}: must be greater than zero", field),
                ));
            }
        }

        issues
    }
}
