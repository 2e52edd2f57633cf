//! Effective settings for one run: file configuration with CLI overrides.

use audit_application::AuditBehavior;
use audit_domain::{OutputFormat, ProviderConfig, RoleBindings};
use audit_infrastructure::FileConfig;
use audit_presentation::Cli;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub roles: RoleBindings,
    pub providers: ProviderConfig,
    pub behavior: AuditBehavior,
    pub criteria_path: PathBuf,
    pub output: OutputFormat,
    pub log_file: Option<PathBuf>,
    pub audit_log: Option<PathBuf>,
}

impl AppConfig {
    /// Built once at startup; command-line flags win over configuration.
    pub fn from_sources(cli: &Cli, file: &FileConfig) -> Self {
        let mut behavior = file.audit_behavior();
        if cli.no_judge {
            behavior = behavior.with_judge(false);
        }
        if let Some(concurrency) = cli.concurrency {
            behavior = behavior.with_concurrency(concurrency);
        }

        Self {
            roles: file.role_bindings(),
            providers: file.provider_config(),
            behavior,
            criteria_path: cli
                .criteria
                .clone()
                .unwrap_or_else(|| file.audit.criteria_path.clone()),
            output: cli.output.map(Into::into).unwrap_or(file.output.format),
            log_file: cli.log_file.clone().or_else(|| file.logging.file.clone()),
            audit_log: cli
                .audit_log
                .clone()
                .or_else(|| file.logging.audit_events.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn file_config() -> FileConfig {
        toml::from_str(
            r#"
[audit]
criteria_path = "team/criteria.json"
concurrency = 6

[output]
format = "summary"

[logging]
audit_events = "logs/events.jsonl"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_file_values_apply_without_flags() {
        let cli = Cli::parse_from(["email-audit", "a.html"]);
        let config = AppConfig::from_sources(&cli, &file_config());

        assert_eq!(config.criteria_path, PathBuf::from("team/criteria.json"));
        assert_eq!(config.behavior.concurrency, 6);
        assert!(config.behavior.judge_enabled);
        assert_eq!(config.output, OutputFormat::Summary);
        assert_eq!(config.audit_log, Some(PathBuf::from("logs/events.jsonl")));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_flags_override_file_values() {
        let cli = Cli::parse_from([
            "email-audit",
            "--criteria",
            "mine.json",
            "-j",
            "2",
            "--no-judge",
            "-o",
            "json",
            "--audit-log",
            "run.jsonl",
            "--log-file",
            "diag.log",
            "a.html",
        ]);
        let config = AppConfig::from_sources(&cli, &file_config());

        assert_eq!(config.criteria_path, PathBuf::from("mine.json"));
        assert_eq!(config.behavior.concurrency, 2);
        assert!(!config.behavior.judge_enabled);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.audit_log, Some(PathBuf::from("run.jsonl")));
        assert_eq!(config.log_file, Some(PathBuf::from("diag.log")));
    }
}
