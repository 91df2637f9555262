//! Tests for error reporting and global flags.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "push");
    assert_stdout_contains(&output, "check");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "secret-dispatch");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "secret-dispatch");
}

#[test]
fn test_missing_token_is_reported() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t
        .cmd()
        .args(["check", "--json-path", SECRETS_FILE, "--targets", "my-org"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required setting: token");
    assert_stdout_contains(&output, "INPUT_");
}

#[test]
fn test_missing_secrets_file_is_reported() {
    let t = Test::new();

    let output = t.check("my-org");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read");
    assert_stderr_contains(&output, SECRETS_FILE);
}

#[test]
fn test_non_string_value_is_rejected() {
    let t = Test::with_secrets(r#"{"secret": {"PORT": 8080}}"#);

    let output = t.check("my-org");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret PORT must be a string value");
}

#[test]
fn test_repeated_secret_name_is_rejected() {
    let t = Test::with_secrets(r#"{"secret": {"API_KEY": "first", "API_KEY": "second"}}"#);

    let output = t.check("my-org");
    assert_failure(&output);
    assert_stderr_contains(&output, "duplicate secret name: API_KEY");
    assert_output_excludes(&output, "1 secrets in");
}

#[test]
fn test_empty_secret_file_is_rejected() {
    let t = Test::with_secrets(r#"{"secret": {}}"#);

    let output = t.check("my-org");
    assert_failure(&output);
    assert_stderr_contains(&output, "no secrets to dispatch");
}

#[test]
fn test_blank_target_list_is_rejected() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t.check(" , ");
    assert_failure(&output);
    assert_stderr_contains(&output, "no targets given");
}

#[test]
fn test_unsupported_visibility_is_rejected() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t
        .cmd()
        .args(["check", "--token", TOKEN, "--json-path", SECRETS_FILE])
        .args(["--targets", "my-org", "--visibility", "selected"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid visibility");
}

#[test]
fn test_workflow_annotation_in_actions() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t
        .cmd()
        .args(["check", "--token", TOKEN, "--json-path", SECRETS_FILE])
        .args(["--targets", "my-org,"])
        .env("GITHUB_ACTIONS", "true")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stdout_contains(&output, "::error::");
}

#[test]
fn test_no_workflow_annotation_outside_actions() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t.check("my-org,");
    assert_failure(&output);
    assert_output_excludes(&output, "::error::");
}

#[test]
fn test_verbose_flag_logs_to_stderr() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t
        .cmd()
        .args(["--verbose", "check", "--token", TOKEN])
        .args(["--json-path", SECRETS_FILE, "--targets", "my-org"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_json_log_format_accepted() {
    let t = Test::with_secrets(SINGLE_SECRET);

    let output = t
        .cmd()
        .args(["--log-format", "json", "check", "--token", TOKEN])
        .args(["--json-path", SECRETS_FILE, "--targets", "my-org"])
        .output()
        .unwrap();
    assert_success(&output);
}
