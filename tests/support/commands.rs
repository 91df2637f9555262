//! Command helper methods for Test.

use super::{Test, SECRETS_FILE, TOKEN};
use assert_cmd::Command;
use std::process::Output;

/// Variables that would leak settings from the host into a run.
const HOST_VARS: &[&str] = &[
    "INPUT_TOKEN",
    "INPUT_JSON-PATH",
    "INPUT_TARGETS",
    "GITHUB_TOKEN",
    "GITHUB_API_URL",
    "GITHUB_ACTIONS",
    "SECRET_DISPATCH_CONFIG",
    "SECRET_DISPATCH_LOG",
];

impl Test {
    /// A secret-dispatch command isolated from the host environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("secret-dispatch").expect("failed to find secret-dispatch binary");
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// `check` with the standard token and secrets file.
    pub fn check(&self, targets: &str) -> Output {
        self.cmd()
            .args(["check", "--token", TOKEN, "--json-path", SECRETS_FILE])
            .args(["--targets", targets])
            .output()
            .expect("failed to run secret-dispatch check")
    }

    /// `push` against `api_url` with the standard token and secrets file.
    ///
    /// Runs on a blocking thread so an async mock server keeps serving.
    pub async fn push(&self, api_url: &str, targets: &str) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["push", "--token", TOKEN, "--json-path", SECRETS_FILE])
            .args(["--targets", targets, "--api-url", api_url]);
        tokio::task::spawn_blocking(move || cmd.output().expect("failed to run secret-dispatch push"))
            .await
            .expect("push task panicked")
    }
}
