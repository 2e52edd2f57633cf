//! CLI command definitions

use audit_domain::OutputFormat as ReportFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for audit results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every criterion with analysis, plus the summaries
    Full,
    /// Overall score and failing criteria only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => ReportFormat::Full,
            OutputFormat::Summary => ReportFormat::Summary,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// CLI arguments for email-audit
#[derive(Parser, Debug)]
#[command(name = "email-audit")]
#[command(author, version, about = "Audit customer-service email threads against a weighted checklist")]
#[command(long_about = r#"
email-audit scores exported email threads against a checklist of criteria.

Each thread goes through four stages:
1. Structure: a model turns the raw thread text into individual messages
2. Score: a model rates every criterion from 0.0 to 1.0
3. Judge: a second model reviews the scores and may refine them
4. Aggregate: weighted overall score and summaries

Configuration files are loaded from (in priority order):
1. --config <path>            Explicit config file
2. ./email-audit.toml         Project-level config
3. ~/.config/email-audit/config.toml   Global config

Example:
  email-audit thread.html
  email-audit -o summary -j 8 exports/*.html
  email-audit --criteria config/audit_criteria.json -o json thread.html
"#)]
pub struct Cli {
    /// Thread files to audit (.html/.htm are flattened to text)
    #[arg(required_unless_present = "show_config", value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Criteria JSON file (overrides config)
    #[arg(long, value_name = "PATH")]
    pub criteria: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment still applies)
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format (default: config `output.format`, else full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Skip the judge stage
    #[arg(long)]
    pub no_judge: bool,

    /// Number of threads audited in parallel
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Rolling diagnostic log file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// JSONL audit-event log
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default tracing filter for the verbosity count.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "email-audit",
            "--criteria",
            "c.json",
            "-o",
            "json",
            "--no-judge",
            "-j",
            "8",
            "-vv",
            "-q",
            "a.html",
            "b.txt",
        ])
        .unwrap();

        assert_eq!(cli.files, vec![PathBuf::from("a.html"), PathBuf::from("b.txt")]);
        assert_eq!(cli.criteria, Some(PathBuf::from("c.json")));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.no_judge);
        assert_eq!(cli.concurrency, Some(8));
        assert_eq!(cli.log_filter(), "debug");
        assert!(cli.quiet);
    }

    #[test]
    fn test_files_required_unless_show_config() {
        assert!(Cli::try_parse_from(["email-audit"]).is_err());

        let cli = Cli::try_parse_from(["email-audit", "--show-config"]).unwrap();
        assert!(cli.files.is_empty());
        assert_eq!(cli.output, None);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_output_format_maps_to_report_format() {
        assert_eq!(ReportFormat::from(OutputFormat::Summary), ReportFormat::Summary);
        assert_eq!(ReportFormat::from(OutputFormat::Full), ReportFormat::Full);
    }
}
