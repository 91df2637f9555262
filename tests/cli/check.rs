//! Tests for the `check` command.

use crate::support::*;

#[test]
fn test_check_lists_secrets_and_scopes() {
    let t = Test::with_secrets(STANDARD_SECRETS);

    let output = t.check("my-org, owner/repo1");
    assert_success(&output);

    assert_stdout_contains(&output, "3 secrets in secrets.json");
    assert_stdout_contains(&output, "DATABASE_URL");
    assert_stdout_contains(&output, "API_KEY");
    assert_stdout_contains(&output, "my-org → orgs/my-org");
    assert_stdout_contains(&output, "owner/repo1 → repos/owner/repo1");
}

#[test]
fn test_check_never_prints_values() {
    let t = Test::with_secrets(STANDARD_SECRETS);

    let output = t.check("my-org");
    assert_success(&output);
    assert_output_excludes(&output, "sk-test-12345");
    assert_output_excludes(&output, "super-secret-jwt-token");
}

#[test]
fn test_check_accepts_flat_file() {
    let t = Test::with_secrets(FLAT_SECRETS);

    let output = t.check("my-org");
    assert_success(&output);
    assert_stdout_contains(&output, "REDIS_URL");
}

#[test]
fn test_check_reports_empty_target() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t.check("my-org,,owner/repo1");
    assert_failure(&output);

    assert_stdout_contains(&output, "my-org → orgs/my-org");
    assert_stdout_contains(&output, "owner/repo1 → repos/owner/repo1");
    assert_stderr_contains(&output, "target is empty");
}

#[test]
fn test_check_reads_action_inputs_from_env() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t
        .cmd()
        .arg("check")
        .env("INPUT_TOKEN", TOKEN)
        .env("INPUT_JSON-PATH", SECRETS_FILE)
        .env("INPUT_TARGETS", "my-org")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "orgs/my-org");
}

#[test]
fn test_check_falls_back_to_github_token() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t
        .cmd()
        .args(["check", "--json-path", SECRETS_FILE, "--targets", "my-org"])
        .env("GITHUB_TOKEN", TOKEN)
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_check_reads_config_file() {
    let t = Test::with_secrets(SINGLE_SECRET);
    t.write_file(
        "dispatch.toml",
        r#"
json-path = "secrets.json"
targets = ["my-org", "owner/repo1"]
visibility = "private"
"#,
    );

    let output = t
        .cmd()
        .args(["--config", "dispatch.toml", "check", "--token", TOKEN])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "repos/owner/repo1");
}

#[test]
fn test_flags_override_config_file() {
    let t = Test::with_secrets(SINGLE_SECRET);
    t.write_file(
        "dispatch.toml",
        r#"
json-path = "secrets.json"
targets = "from-file"
"#,
    );

    let output = t
        .cmd()
        .args(["--config", "dispatch.toml", "check", "--token", TOKEN])
        .args(["--targets", "from-flag"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "orgs/from-flag");
    assert_output_excludes(&output, "from-file");
}

#[test]
fn test_check_reports_missing_repo_segment() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t.check("owner/,my-org");
    assert_failure(&output);

    assert_stdout_contains(&output, "my-org → orgs/my-org");
    assert_stderr_contains(&output, "malformed target 'owner/'");
    assert_output_excludes(&output, "repos/owner");
}
