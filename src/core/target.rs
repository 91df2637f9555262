//! Target resolution.
//!
//! A raw target string names either an organization (`my-org`) or a
//! repository (`owner/repo`). Identifiers are not checked beyond being
//! non-empty; the remote rejects anything malformed.

use std::fmt;
use std::str::FromStr;

use crate::core::types::TargetLabel;
use crate::error::{Error, Result, ValidationError};

/// A resolved dispatch scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Organization-level secrets.
    Org { org: String },
    /// Repository-level secrets.
    Repo { owner: String, repo: String },
}

impl Target {
    /// Classify a raw target string.
    ///
    /// The input is trimmed. Without a `/` it is an organization; with one,
    /// the first two `/`-separated segments are owner and repository.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTarget` if the trimmed input is empty
    /// and `ValidationError::MalformedTarget` if the owner or repository
    /// segment is missing.
    pub fn resolve(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::EmptyTarget.into());
        }

        match raw.split_once('/') {
            None => Ok(Target::Org {
                org: raw.to_string(),
            }),
            Some((owner, rest)) => {
                let repo = rest.split('/').next().unwrap_or_default();
                if owner.is_empty() || repo.is_empty() {
                    return Err(ValidationError::MalformedTarget(raw.to_string()).into());
                }
                Ok(Target::Repo {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
        }
    }

    /// URL path segments of this scope, e.g. `["orgs", "my-org"]`.
    pub fn scope_segments(&self) -> Vec<&str> {
        match self {
            Target::Org { org } => vec!["orgs", org.as_str()],
            Target::Repo { owner, repo } => vec!["repos", owner.as_str(), repo.as_str()],
        }
    }

    /// Scope path prefix, e.g. `orgs/my-org` or `repos/owner/repo`.
    pub fn scope_path(&self) -> String {
        self.scope_segments().join("/")
    }

    pub fn is_org(&self) -> bool {
        matches!(self, Target::Org { .. })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Org { org } => write!(f, "{}", org),
            Target::Repo { owner, repo } => write!(f, "{}/{}", owner, repo),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Target::resolve(s)
    }
}

/// Split a comma-separated target list into trimmed labels.
///
/// Empty entries are kept so they surface as per-target validation
/// failures instead of being silently dropped.
pub fn parse_targets(raw: &str) -> Vec<TargetLabel> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}
