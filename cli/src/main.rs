//! CLI entrypoint for email-audit
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod app_config;

use anyhow::{Context, Result, anyhow};
use app_config::AppConfig;
use audit_application::{
    AuditDocument, AuditOrchestrator, AuditRoles, NoProgress, ProgressNotifier, RunBatchUseCase,
};
use audit_infrastructure::{
    ConfigLoader, CredentialResolver, CriteriaLoader, JsonlAuditLogger, ProviderClientFactory,
    load_thread,
};
use audit_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the stderr subscriber, plus a daily-rolling file when requested.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(cli: &Cli, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = if cli.verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()))
    } else {
        EnvFilter::new(cli.log_filter())
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let prefix = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| "email-audit.log".into());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, prefix));
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn load_documents(cli: &Cli) -> (Vec<AuditDocument>, usize) {
    let mut documents = Vec::new();
    let mut unreadable = 0;

    for path in &cli.files {
        match load_thread(path) {
            Ok(text) => documents.push(AuditDocument::new(path.display().to_string(), text)),
            Err(e) => {
                error!("{}", e);
                unreadable += 1;
            }
        }
    }

    (documents, unreadable)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let config = AppConfig::from_sources(&cli, &file_config);
    let _log_guard = init_tracing(&cli, config.log_file.as_deref());

    info!("Starting email-audit");
    for issue in file_config.validate() {
        warn!("Config: {}", issue.message);
    }

    let criteria = CriteriaLoader::load(&config.criteria_path);
    info!(
        "{} criteria from {}",
        criteria.len(),
        config.criteria_path.display()
    );

    // === Dependency Injection ===
    let factory =
        ProviderClientFactory::new(config.providers.clone(), CredentialResolver::from_env());
    let roles = AuditRoles::from_factory(&factory, &config.roles)
        .context("Failed to create model clients")?;

    let mut orchestrator =
        AuditOrchestrator::new(roles, criteria).with_behavior(config.behavior.clone());
    if let Some(path) = &config.audit_log {
        match JsonlAuditLogger::new(path) {
            Some(logger) => orchestrator = orchestrator.with_logger(Arc::new(logger)),
            None => warn!("Audit-event log disabled: cannot open {}", path.display()),
        }
    }

    let (documents, unreadable) = load_documents(&cli);
    let use_case = RunBatchUseCase::new(Arc::new(orchestrator));

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let items = use_case
        .execute_with_progress(documents, progress.as_ref())
        .await;
    drop(progress);

    let failed = unreadable + items.iter().filter(|item| item.result.is_err()).count();
    println!("{}", ConsoleFormatter::render(&items, config.output));

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("{} of {} files failed", failed, cli.files.len());
        Ok(ExitCode::FAILURE)
    }
}
