//! Error types.
//!
//! One top-level [`Error`] wraps the domain errors raised along the
//! dispatch pipeline. [`Error::kind`] collapses any of them into the
//! small taxonomy callers branch on.

use thiserror::Error;

/// Top-level error for every fallible operation in the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The credential was rejected by the remote.
    #[error("authentication failed for {scope}: {message}")]
    Auth { scope: String, message: String },

    /// The scope does not exist or the credential cannot see it.
    #[error("not found or not accessible: {scope}")]
    NotFound { scope: String },

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A failure attributed to one target and, when applicable, one secret.
    #[error("{target}{}: {source}", secret_label(.secret))]
    Dispatch {
        target: String,
        secret: Option<String>,
        #[source]
        source: Box<Error>,
    },
}

fn secret_label(secret: &Option<String>) -> String {
    match secret {
        Some(name) => format!(" [{}]", name),
        None => String::new(),
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Encryption,
    Network,
    Config,
    Io,
}

impl Error {
    /// Taxonomy kind of this error; `Dispatch` reports its cause's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Auth { .. } => ErrorKind::Auth,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Cipher(_) => ErrorKind::Encryption,
            Error::Network(_) => ErrorKind::Network,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::Dispatch { source, .. } => source.kind(),
        }
    }

    /// Wrap this error with the target (and secret) it belongs to.
    pub fn attributed(self, target: impl Into<String>, secret: Option<&str>) -> Self {
        Error::Dispatch {
            target: target.into(),
            secret: secret.map(str::to_string),
            source: Box::new(self),
        }
    }
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("target is empty")]
    EmptyTarget,

    #[error("malformed target '{0}': expected org or owner/repo")]
    MalformedTarget(String),

    #[error("secret name is empty")]
    EmptySecretName,

    #[error("duplicate secret name: {0}")]
    DuplicateSecret(String),

    #[error("secret {0} must be a string value")]
    NonStringValue(String),

    #[error("no secrets to dispatch")]
    EmptySecretSet,

    #[error("no targets given")]
    EmptyTargetList,
}

/// Sealing and key material errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("public key must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("public key is not valid base64: {0}")]
    InvalidKeyEncoding(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Transport and protocol errors talking to the remote API.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Configuration and input file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {field}")]
    MissingField { field: &'static str },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
