//! Run configuration.
//!
//! Settings arrive from three layers, highest priority first: command-line
//! flags, environment variables (both resolved by clap), and an optional
//! TOML file. [`Settings`] is one partially filled layer; merging the layers
//! and calling [`Settings::build`] yields the validated [`Config`] a run is
//! started with.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::core::api::Visibility;
use crate::core::constants;
use crate::core::secret::SecretString;
use crate::core::target::parse_targets;
use crate::core::types::TargetLabel;
use crate::error::{ConfigError, Result, ValidationError};

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential sent with every request.
    pub token: SecretString,
    /// JSON file holding the secrets.
    pub secrets_path: PathBuf,
    /// Raw targets, trimmed, in the order given.
    pub targets: Vec<TargetLabel>,
    /// API base URL.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Visibility of organization secrets.
    pub visibility: Visibility,
}

/// Target list as written in a config file: `"a, b/c"` or `["a", "b/c"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TargetsSetting {
    Csv(String),
    List(Vec<String>),
}

impl TargetsSetting {
    fn labels(&self) -> Vec<TargetLabel> {
        match self {
            TargetsSetting::Csv(raw) => parse_targets(raw),
            TargetsSetting::List(items) => items.iter().map(|t| t.trim().to_string()).collect(),
        }
    }
}

/// One configuration layer. Unset fields fall through to lower layers.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Never read from files.
    #[serde(skip)]
    pub token: Option<SecretString>,
    #[serde(alias = "json-path", alias = "json_path")]
    pub secrets_path: Option<PathBuf>,
    pub targets: Option<TargetsSetting>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub visibility: Option<String>,
}

impl Settings {
    /// Read a settings layer from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        Ok(settings)
    }

    /// Fill unset fields of `self` from `lower`.
    pub fn or(self, lower: Settings) -> Settings {
        Settings {
            token: self.token.or(lower.token),
            secrets_path: self.secrets_path.or(lower.secrets_path),
            targets: self.targets.or(lower.targets),
            api_url: self.api_url.or(lower.api_url),
            timeout_secs: self.timeout_secs.or(lower.timeout_secs),
            visibility: self.visibility.or(lower.visibility),
        }
    }

    /// Apply defaults and validate into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for missing or invalid settings and
    /// `ValidationError::EmptyTargetList` when no target is given.
    pub fn build(self) -> Result<Config> {
        let token = self
            .token
            .filter(|t| !t.expose().trim().is_empty())
            .ok_or(ConfigError::MissingField { field: "token" })?;

        let secrets_path = self
            .secrets_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingField {
                field: "json-path",
            })?;

        let targets = self
            .targets
            .map(|t| t.labels())
            .ok_or(ConfigError::MissingField { field: "targets" })?;

        let config = Config {
            token,
            secrets_path,
            targets,
            api_url: self
                .api_url
                .unwrap_or_else(|| constants::DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(
                self.timeout_secs
                    .unwrap_or(constants::DEFAULT_TIMEOUT_SECS),
            ),
            visibility: match self.visibility {
                Some(v) => v.parse()?,
                None => Visibility::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Check values that parsing alone does not catch.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTargetList` if every target is blank,
    /// or `ConfigError::InvalidValue` for a bad URL or zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.targets.iter().all(|t| t.is_empty()) {
            return Err(ValidationError::EmptyTargetList.into());
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "timeout",
                reason: "must be at least 1 second".to_string(),
            }
            .into());
        }

        let url = Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "api-url",
            reason: format!("{}: {}", self.api_url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api-url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }

        Ok(())
    }
}
