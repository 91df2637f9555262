//! Fake GitHub secrets API backed by wiremock.
//!
//! Each scope gets its own freshly generated key pair so tests can open
//! what was written and check it was sealed for the right scope.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use secret_dispatch::core::cipher::{self, Identity};
use secret_dispatch::core::secret::SecretString;
use secret_dispatch::core::GitHubClient;

use super::TOKEN;

/// One recorded secret write.
#[derive(Debug, Clone)]
pub struct RecordedWrite {
    pub path: String,
    pub body: Value,
}

impl RecordedWrite {
    /// Decrypt the submitted `encrypted_value` with the scope's identity.
    pub fn open(&self, identity: &Identity) -> Vec<u8> {
        let encoded = self.body["encrypted_value"]
            .as_str()
            .expect("encrypted_value missing");
        let sealed = STANDARD.decode(encoded).expect("encrypted_value not base64");
        cipher::open(&sealed, identity).expect("value not sealed for this identity")
    }
}

/// A wiremock server speaking the two secrets endpoints.
pub struct FakeGitHub {
    pub server: MockServer,
}

impl FakeGitHub {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A client pointed at this server.
    pub fn client(&self) -> GitHubClient {
        self.client_with_timeout(Duration::from_secs(5))
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> GitHubClient {
        GitHubClient::new(&self.uri(), SecretString::from(TOKEN.to_string()), timeout)
            .expect("failed to build client")
    }

    /// Serve a fresh public key for `scope` (e.g. `orgs/my-org`).
    pub async fn scope(&self, scope: &str, key_id: &str) -> Identity {
        let identity = Identity::generate(&mut OsRng);
        let key = STANDARD.encode(identity.public_key().as_bytes());

        Mock::given(method("GET"))
            .and(path(format!("/{}/actions/secrets/public-key", scope)))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key_id": key_id,
                "key": key,
            })))
            .mount(&self.server)
            .await;

        identity
    }

    /// Answer the public key request for `scope` with `status`.
    pub async fn key_status(&self, scope: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/actions/secrets/public-key", scope)))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": message })),
            )
            .mount(&self.server)
            .await;
    }

    /// Accept every secret write under `scope` with `201 Created`.
    pub async fn accept_writes(&self, scope: &str) {
        Mock::given(method("PUT"))
            .and(path_regex(format!("^/{}/actions/secrets/[^/]+$", scope)))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(201))
            .mount(&self.server)
            .await;
    }

    /// Answer writes of one secret with `status`. Mount before `accept_writes`.
    pub async fn write_status(&self, scope: &str, secret: &str, status: u16) {
        Mock::given(method("PUT"))
            .and(path(format!("/{}/actions/secrets/{}", scope, secret)))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": "write rejected" })),
            )
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Delay writes of one secret. Mount before `accept_writes`.
    pub async fn slow_write(&self, scope: &str, secret: &str, delay: Duration) {
        Mock::given(method("PUT"))
            .and(path(format!("/{}/actions/secrets/{}", scope, secret)))
            .respond_with(ResponseTemplate::new(201).set_delay(delay))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Every request received so far, as `METHOD /path`.
    pub async fn calls(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }

    /// Every secret write received so far.
    pub async fn writes(&self) -> Vec<RecordedWrite> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == "PUT")
            .map(|r| RecordedWrite {
                path: r.url.path().to_string(),
                body: serde_json::from_slice(&r.body).expect("write body not JSON"),
            })
            .collect()
    }
}
