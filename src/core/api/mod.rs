//! Remote secrets API.
//!
//! Typed request/response contracts for the two endpoints the pipeline
//! uses, and the [`SecretsApi`] seam the dispatcher talks to.
//!
//! - `GET  <scope>/actions/secrets/public-key`
//! - `PUT  <scope>/actions/secrets/{secret_name}`

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::encrypted::EncryptedSecret;
use crate::core::key::PublicKey;
use crate::core::target::Target;
use crate::error::{ConfigError, Error, Result};

mod github;

pub use github::GitHubClient;

/// Operations the dispatcher needs from the remote.
///
/// Implementations share one client and one credential across all
/// concurrent calls, so they take `&self` only.
#[async_trait]
pub trait SecretsApi: Send + Sync {
    /// Fetch the active public key of a scope.
    ///
    /// # Errors
    ///
    /// `NotFound` if the scope is missing or hidden from the credential,
    /// `Auth` if the credential is rejected, `Network` on transport failure,
    /// `Cipher` if the returned key material is malformed.
    async fn public_key(&self, target: &Target) -> Result<PublicKey>;

    /// Create or update one secret in a scope.
    async fn put_secret(&self, target: &Target, secret: &EncryptedSecret) -> Result<()>;
}

#[async_trait]
impl<T: SecretsApi + ?Sized> SecretsApi for &T {
    async fn public_key(&self, target: &Target) -> Result<PublicKey> {
        (**self).public_key(target).await
    }

    async fn put_secret(&self, target: &Target, secret: &EncryptedSecret) -> Result<()> {
        (**self).put_secret(target, secret).await
    }
}

/// Body of the public key endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    pub key_id: String,
    /// Base64 of the 32-byte key.
    pub key: String,
}

/// Body of the secret write endpoint.
#[derive(Debug, Serialize)]
pub struct PutSecretRequest<'a> {
    pub secret_name: &'a str,
    pub encrypted_value: &'a str,
    pub key_id: &'a str,
    #[serde(flatten)]
    pub scope: ScopeFields<'a>,
}

/// Scope-specific fields carried by a write.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScopeFields<'a> {
    Org {
        org: &'a str,
        visibility: Visibility,
    },
    Repo {
        owner: &'a str,
        repo: &'a str,
    },
}

impl<'a> ScopeFields<'a> {
    pub fn for_target(target: &'a Target, visibility: Visibility) -> Self {
        match target {
            Target::Org { org } => ScopeFields::Org { org, visibility },
            Target::Repo { owner, repo } => ScopeFields::Repo { owner, repo },
        }
    }
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub message: String,
}

/// Which repositories in an organization may read an org secret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    All,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::All => f.write_str("all"),
            Visibility::Private => f.write_str("private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Visibility::All),
            "private" => Ok(Visibility::Private),
            other => Err(ConfigError::InvalidValue {
                field: "visibility",
                reason: format!("unsupported value '{}'. Supported: all, private", other),
            }
            .into()),
        }
    }
}
