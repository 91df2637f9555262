//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors, failed scopes
//! - Yellow: warnings
//! - Cyan: targets, scope paths, secret names, hints
//! - Dimmed: secondary info
//!
//! Inside GitHub Actions, failures are also emitted as `::error::`
//! workflow commands so they surface as run annotations.

use console::style;

use crate::core::constants;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// True when running on a GitHub Actions runner.
pub fn in_github_actions() -> bool {
    std::env::var(constants::GITHUB_ACTIONS_ENV).is_ok_and(|v| v == "true")
}

/// Print a success message with checkmark.
///
/// Example: `✓ my-org: 2 secrets dispatched`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr.
///
/// Example: `✗ my-org: not found or not accessible: orgs/my-org`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message.
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message.
///
/// Example: `→ check that the token can write secrets`
pub fn hint(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        println!("→ {}", msg);
    }
}

/// Print an indented detail line for a target.
///
/// Example: `    ✓ API_KEY`
pub fn item(ok: bool, msg: &str) {
    let mark = if ok { "✓" } else { "✗" };
    if colors_enabled() {
        let mark = if ok {
            style(mark).green()
        } else {
            style(mark).red()
        };
        println!("    {} {}", mark, msg);
    } else {
        println!("    {} {}", mark, msg);
    }
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Format a target, scope path, or secret name for inline use.
pub fn name(n: &str) -> String {
    if colors_enabled() {
        style(n).cyan().to_string()
    } else {
        n.to_string()
    }
}

/// Emit a GitHub Actions error annotation when running in Actions.
pub fn workflow_error(msg: &str) {
    if in_github_actions() {
        println!("::error::{}", escape_workflow_data(msg));
    }
}

/// Escape text for a workflow command's data section.
fn escape_workflow_data(msg: &str) -> String {
    msg.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
