//! Progress reporting for audit execution

use audit_application::ports::progress::ProgressNotifier;
use audit_domain::AuditStage;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per audited document
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_for(&self, label: &str) -> Option<ProgressBar> {
        let mut bars = self.bars.lock().ok()?;
        let bar = bars.entry(label.to_string()).or_insert_with(|| {
            let pb = self
                .multi
                .add(ProgressBar::new(AuditStage::ALL.len() as u64));
            pb.set_style(Self::spinner_style());
            pb.set_prefix(label.to_string());
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        });
        Some(bar.clone())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, label: &str, stage: AuditStage) {
        if let Some(pb) = self.bar_for(label) {
            pb.set_message(format!("{}...", stage.display_name()));
        }
    }

    fn on_stage_complete(&self, label: &str, stage: AuditStage, success: bool) {
        if let Some(pb) = self.bar_for(label) {
            if success {
                pb.inc(1);
            } else {
                pb.set_message(format!("{} {}", "x".red(), stage.display_name()));
            }
        }
    }

    fn on_audit_complete(&self, label: &str, success: bool) {
        let Some(pb) = self.bars.lock().ok().and_then(|mut bars| bars.remove(label)) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{}", "done".green()));
        } else {
            pb.abandon_with_message(format!("{}", "failed".red()));
        }
    }
}

/// Simple line-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, label: &str, stage: AuditStage) {
        eprintln!("{} {}: {}", "->".cyan(), label.bold(), stage.display_name());
    }

    fn on_stage_complete(&self, label: &str, stage: AuditStage, success: bool) {
        if !success {
            eprintln!("  {} {}: {} failed", "x".red(), label, stage.display_name());
        }
    }

    fn on_audit_complete(&self, label: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_reporter_tracks_bars_per_label() {
        let reporter = ProgressReporter::new();
        reporter.multi.set_draw_target(ProgressDrawTarget::hidden());

        reporter.on_stage_start("a.html", AuditStage::Structure);
        reporter.on_stage_complete("a.html", AuditStage::Structure, true);
        reporter.on_stage_start("b.html", AuditStage::Structure);

        {
            let bars = reporter.bars.lock().unwrap();
            assert_eq!(bars.len(), 2);
            assert_eq!(bars["a.html"].position(), 1);
            assert_eq!(bars["b.html"].position(), 0);
        }

        reporter.on_audit_complete("a.html", true);
        reporter.on_audit_complete("b.html", false);
        assert!(reporter.bars.lock().unwrap().is_empty());
    }
}
