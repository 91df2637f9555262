//! Run orchestration.
//!
//! Targets are processed strictly one after another: each target's
//! dispatch is awaited in full before the next begins, so in-flight
//! requests never exceed one target's secret count and every failure is
//! attributable to a single target. A failing target never stops the
//! targets after it.

use tracing::{debug, info, warn};

use crate::core::api::{GitHubClient, SecretsApi};
use crate::core::config::Config;
use crate::core::dispatch::Dispatcher;
use crate::core::outcome::{DispatchOutcome, RunReport};
use crate::core::secrets::SecretSet;
use crate::core::target::Target;
use crate::core::types::TargetLabel;
use crate::error::Result;

/// Drives a run across a target list.
pub struct Orchestrator<A: SecretsApi> {
    api: A,
}

impl Orchestrator<GitHubClient> {
    /// Build an orchestrator talking to GitHub with the settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the API client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GitHubClient::new(&config.api_url, config.token.clone(), config.timeout)?
            .with_visibility(config.visibility);
        debug!(
            api_url = %client.base_url(),
            visibility = %config.visibility,
            timeout_secs = config.timeout.as_secs(),
            "api client ready"
        );
        Ok(Self::new(client))
    }
}

impl<A: SecretsApi> Orchestrator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Dispatch `secrets` to every target in order.
    pub async fn run(&self, secrets: &SecretSet, targets: &[TargetLabel]) -> RunReport {
        self.run_with_progress(secrets, targets, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_outcome` as each target finishes.
    pub async fn run_with_progress<F>(
        &self,
        secrets: &SecretSet,
        targets: &[TargetLabel],
        mut on_outcome: F,
    ) -> RunReport
    where
        F: FnMut(&DispatchOutcome),
    {
        debug!(targets = targets.len(), secrets = secrets.len(), "starting run");

        let dispatcher = Dispatcher::new(&self.api);
        let mut report = RunReport::new();

        for raw in targets {
            let outcome = match Target::resolve(raw) {
                Ok(target) => {
                    info!(target = %target, scope = %target.scope_path(), "dispatching target");
                    dispatcher.dispatch(&target, secrets).await
                }
                Err(e) => {
                    warn!(target = %raw, error = %e, "invalid target");
                    DispatchOutcome::aborted(raw.trim(), e)
                }
            };
            on_outcome(&outcome);
            report.push(outcome);
        }

        info!(
            targets = report.outcomes().len(),
            failed = report.failed_targets(),
            "run complete"
        );
        report
    }
}
