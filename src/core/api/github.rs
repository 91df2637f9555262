//! GitHub REST implementation of [`SecretsApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use tracing::{debug, info};
use url::Url;

use super::{ErrorResponse, PublicKeyResponse, PutSecretRequest, ScopeFields, SecretsApi, Visibility};
use crate::core::constants;
use crate::core::encrypted::EncryptedSecret;
use crate::core::key::PublicKey;
use crate::core::secret::SecretString;
use crate::core::target::Target;
use crate::error::{Error, NetworkError, Result};

/// Client for the GitHub Actions secrets endpoints.
///
/// One instance is shared read-only by every concurrent request of a run.
pub struct GitHubClient {
    base_url: Url,
    http: reqwest::Client,
    token: SecretString,
    visibility: Visibility,
}

impl GitHubClient {
    /// Create a client for `base_url` (e.g. `https://api.github.com`).
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` for an unusable base URL and
    /// `NetworkError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: SecretString, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(base_url.to_string()).into());
        }

        let http = reqwest::Client::builder()
            .user_agent(constants::user_agent())
            .timeout(timeout)
            .build()
            .map_err(NetworkError::Transport)?;

        Ok(Self {
            base_url,
            http,
            token,
            visibility: Visibility::default(),
        })
    }

    /// Set the visibility sent with organization writes.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<scope>/actions/secrets/<tail>`, each segment percent-encoded.
    fn secrets_url(&self, target: &Target, tail: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NetworkError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(target.scope_segments())
            .extend(constants::SECRETS_SEGMENTS)
            .push(tail);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token.expose()))
            .header(ACCEPT, constants::ACCEPT)
            .header(constants::API_VERSION_HEADER, constants::API_VERSION)
    }
}

#[async_trait]
impl SecretsApi for GitHubClient {
    async fn public_key(&self, target: &Target) -> Result<PublicKey> {
        let url = self.secrets_url(target, constants::PUBLIC_KEY_SEGMENT)?;
        debug!(target = %target, url = %url, "fetching public key");

        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(NetworkError::Transport)?;
        let response = check_status(response, target).await?;

        let body: PublicKeyResponse = response
            .json()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))?;

        debug!(target = %target, key_id = %body.key_id, "fetched public key");
        PublicKey::from_base64(body.key_id, &body.key)
    }

    async fn put_secret(&self, target: &Target, secret: &EncryptedSecret) -> Result<()> {
        let url = self.secrets_url(target, secret.name())?;
        debug!(
            target = %target,
            secret = secret.name(),
            key_id = secret.key_id(),
            url = %url,
            "writing secret"
        );

        let encrypted_value = secret.encoded_value();
        let body = PutSecretRequest {
            secret_name: secret.name(),
            encrypted_value: &encrypted_value,
            key_id: secret.key_id(),
            scope: ScopeFields::for_target(target, self.visibility),
        };

        let response = self
            .request(reqwest::Method::PUT, url)
            .json(&body)
            .send()
            .await
            .map_err(NetworkError::Transport)?;
        let response = check_status(response, target).await?;

        match response.status() {
            StatusCode::CREATED => info!(target = %target, secret = secret.name(), "secret created"),
            _ => info!(target = %target, secret = secret.name(), "secret updated"),
        }
        Ok(())
    }
}

/// Map a response status onto the error taxonomy.
async fn check_status(response: Response, target: &Target) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response).await;
    debug!(target = %target, status = status.as_u16(), message = %message, "request failed");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Auth {
            scope: target.scope_path(),
            message,
        }),
        StatusCode::NOT_FOUND => Err(Error::NotFound {
            scope: target.scope_path(),
        }),
        status => Err(NetworkError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        }
        .into()),
    }
}

/// The `message` field of an error body, or the raw body, or the reason phrase.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_str::<ErrorResponse>(&text) {
        return body.message;
    }
    if !text.trim().is_empty() {
        return text.trim().to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
