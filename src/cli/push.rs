//! Push command.
//!
//! Loads the secret file and dispatches every secret to every target,
//! one target at a time, reporting progress as each target finishes.

use tracing::debug;

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::orchestrator::Orchestrator;
use crate::core::outcome::{DispatchOutcome, RunReport};
use crate::core::secrets::SecretSet;
use crate::error::{Error, Result};

/// Dispatch secrets to all configured targets.
pub fn execute(settings: Settings) -> Result<()> {
    let config = settings.build()?;
    let secrets = SecretSet::load(&config.secrets_path)?;
    debug!(
        secrets = secrets.len(),
        targets = config.targets.len(),
        api_url = %config.api_url,
        "push starting"
    );

    // Single-threaded: secrets of one target are written concurrently on
    // this runtime, targets strictly in sequence.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = rt.block_on(async {
        let orchestrator = Orchestrator::from_config(&config)?;
        let report = orchestrator
            .run_with_progress(&secrets, &config.targets, print_outcome)
            .await;
        Ok::<RunReport, Error>(report)
    })?;

    print_summary(&report, secrets.len());
    report.into_result()
}

fn label(target: &str) -> String {
    if target.is_empty() {
        "(empty target)".to_string()
    } else {
        output::name(target)
    }
}

fn print_outcome(outcome: &DispatchOutcome) {
    let target = label(outcome.target());

    if let Some(e) = outcome.abort_error() {
        output::error(&format!("{}: {}", target, e));
        return;
    }

    if outcome.is_success() {
        output::success(&format!("{} secrets dispatched", target));
    } else {
        output::error(&format!(
            "{}: {} of {} secrets failed",
            target,
            outcome.failed(),
            outcome.results().len()
        ));
    }

    for result in outcome.results() {
        match result.error() {
            None => output::item(true, result.name()),
            Some(e) => output::item(false, &format!("{}: {}", result.name(), e)),
        }
    }
}

fn print_summary(report: &RunReport, secret_count: usize) {
    let total = report.outcomes().len();
    let failed = report.failed_targets();

    if failed == 0 {
        output::dimmed(&format!(
            "{} secrets dispatched to {} targets",
            secret_count, total
        ));
    } else {
        output::warn(&format!("{} of {} targets failed", failed, total));
        output::hint("successful writes are kept; rerun to retry the failed targets");
    }
}
