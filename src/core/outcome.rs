//! Dispatch results.
//!
//! Every attempted target yields one [`DispatchOutcome`]; a run collects
//! them into a [`RunReport`]. Nothing is discarded: each failure stays
//! attached to its target and, for writes, its secret name.

use crate::core::types::{SecretName, TargetLabel};
use crate::error::{Error, Result};

/// Result of writing one secret to one scope.
#[derive(Debug)]
pub struct SecretResult {
    name: SecretName,
    result: Result<()>,
}

impl SecretResult {
    pub fn new(name: impl Into<SecretName>, result: Result<()>) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }
}

/// How far a target's dispatch got.
#[derive(Debug)]
enum Status {
    /// The key was fetched and every secret was attempted.
    Completed(Vec<SecretResult>),
    /// Nothing was written: the target did not resolve or its key fetch failed.
    Aborted(Error),
}

/// Outcome of dispatching the secret set to one target.
#[derive(Debug)]
pub struct DispatchOutcome {
    target: TargetLabel,
    status: Status,
}

impl DispatchOutcome {
    /// Every secret was attempted; `results` holds one entry per secret.
    pub fn completed(target: impl Into<TargetLabel>, results: Vec<SecretResult>) -> Self {
        Self {
            target: target.into(),
            status: Status::Completed(results),
        }
    }

    /// The target failed before any write was issued.
    pub fn aborted(target: impl Into<TargetLabel>, error: Error) -> Self {
        Self {
            target: target.into(),
            status: Status::Aborted(error),
        }
    }

    /// The target as written in the target list.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Success iff the target was reached and every secret succeeded.
    pub fn is_success(&self) -> bool {
        match &self.status {
            Status::Completed(results) => results.iter().all(SecretResult::is_success),
            Status::Aborted(_) => false,
        }
    }

    /// Per-secret results, in secret set order. Empty when aborted.
    pub fn results(&self) -> &[SecretResult] {
        match &self.status {
            Status::Completed(results) => results,
            Status::Aborted(_) => &[],
        }
    }

    /// The error that stopped this target before any write, if any.
    pub fn abort_error(&self) -> Option<&Error> {
        match &self.status {
            Status::Completed(_) => None,
            Status::Aborted(e) => Some(e),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.results().iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results().iter().filter(|r| !r.is_success()).count()
    }

    /// First failure of this target: the abort error, or the first failed
    /// secret in set order together with its name.
    pub fn first_failure(&self) -> Option<(Option<&str>, &Error)> {
        match &self.status {
            Status::Aborted(e) => Some((None, e)),
            Status::Completed(results) => results
                .iter()
                .find_map(|r| r.error().map(|e| (Some(r.name()), e))),
        }
    }

    fn into_first_failure(self) -> Option<Error> {
        let target = self.target;
        match self.status {
            Status::Aborted(e) => Some(e.attributed(target, None)),
            Status::Completed(results) => results.into_iter().find_map(|r| match r.result {
                Ok(()) => None,
                Err(e) => Some(e.attributed(target.clone(), Some(&r.name))),
            }),
        }
    }
}

/// Outcomes of a whole run, in target list order.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<DispatchOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: DispatchOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[DispatchOutcome] {
        &self.outcomes
    }

    /// Success iff every target succeeded.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(DispatchOutcome::is_success)
    }

    pub fn failed_targets(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    /// The first failure in run order.
    pub fn first_failure(&self) -> Option<(&str, Option<&str>, &Error)> {
        self.outcomes.iter().find_map(|o| {
            o.first_failure()
                .map(|(secret, err)| (o.target(), secret, err))
        })
    }

    /// `Ok` if the run succeeded, otherwise the first failure attributed
    /// to its target (and secret).
    pub fn into_result(self) -> Result<()> {
        match self
            .outcomes
            .into_iter()
            .find_map(DispatchOutcome::into_first_failure)
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
