//! Per-target dispatch.
//!
//! The scope key is fetched once, then every secret is sealed and written
//! concurrently. All writes run to completion: one failing secret never
//! cancels its siblings, and results are collected in secret set order
//! whatever order the writes finish in.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::core::api::SecretsApi;
use crate::core::encrypted::EncryptedSecret;
use crate::core::key::PublicKey;
use crate::core::outcome::{DispatchOutcome, SecretResult};
use crate::core::secrets::{SecretEntry, SecretSet};
use crate::core::target::Target;
use crate::error::Result;

/// Seals and submits a secret set to one scope at a time.
pub struct Dispatcher<'a, A: SecretsApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: SecretsApi + ?Sized> Dispatcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Dispatch every secret in `secrets` to `target`.
    ///
    /// A failed key fetch aborts the target with no writes issued. An empty
    /// set still fetches the key and completes with zero writes.
    pub async fn dispatch(&self, target: &Target, secrets: &SecretSet) -> DispatchOutcome {
        let label = target.to_string();

        let key = match self.api.public_key(target).await {
            Ok(key) => key,
            Err(e) => {
                warn!(target = %target, error = %e, "public key fetch failed");
                return DispatchOutcome::aborted(label, e);
            }
        };
        debug!(
            target = %target,
            key_id = key.key_id(),
            secrets = secrets.len(),
            "dispatching secrets"
        );

        let submissions = secrets
            .iter()
            .map(|entry| self.submit(target, &key, entry));
        let results = join_all(submissions).await;

        let outcome = DispatchOutcome::completed(label, results);
        info!(
            target = %target,
            succeeded = outcome.succeeded(),
            failed = outcome.failed(),
            "target dispatched"
        );
        outcome
    }

    async fn submit(&self, target: &Target, key: &PublicKey, entry: &SecretEntry) -> SecretResult {
        let result = self.seal_and_put(target, key, entry).await;
        if let Err(e) = &result {
            warn!(target = %target, secret = entry.name(), error = %e, "secret write failed");
        }
        SecretResult::new(entry.name(), result)
    }

    async fn seal_and_put(&self, target: &Target, key: &PublicKey, entry: &SecretEntry) -> Result<()> {
        let sealed = EncryptedSecret::seal(entry.name(), entry.value(), key)?;
        self.api.put_secret(target, &sealed).await
    }
}
