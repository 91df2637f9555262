//! Constants used throughout secret-dispatch.
//!
//! Centralizes API paths, header values, and environment variable names.

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested from the GitHub API.
pub const ACCEPT: &str = "application/vnd.github+json";

/// Header carrying the pinned REST API version.
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Pinned REST API version.
pub const API_VERSION: &str = "2022-11-28";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path segments shared by every secrets endpoint.
pub const SECRETS_SEGMENTS: &[&str] = &["actions", "secrets"];

/// Final path segment of the public key endpoint.
pub const PUBLIC_KEY_SEGMENT: &str = "public-key";

/// Key of the wrapping object in a secrets file (`{"secret": {...}}`).
pub const SECRETS_FILE_KEY: &str = "secret";

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "SECRET_DISPATCH_LOG";

/// Set to `true` by GitHub Actions runners.
pub const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";

/// User-Agent sent with every request.
pub fn user_agent() -> String {
    format!("secret-dispatch/{}", env!("CARGO_PKG_VERSION"))
}
