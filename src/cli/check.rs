//! Check command.
//!
//! Validates configuration, the secret file, and every target, and prints
//! the scope each target resolves to. Makes no network calls.

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::secrets::SecretSet;
use crate::core::target::Target;
use crate::error::{Error, Result};

/// Validate inputs without dispatching.
pub fn execute(settings: Settings) -> Result<()> {
    let config = settings.build()?;
    let secrets = SecretSet::load(&config.secrets_path)?;

    output::success(&format!(
        "{} secrets in {}",
        secrets.len(),
        config.secrets_path.display()
    ));
    for name in secrets.names() {
        output::item(true, name);
    }

    let mut first_error: Option<Error> = None;
    for raw in &config.targets {
        match Target::resolve(raw) {
            Ok(target) => output::success(&format!(
                "{} → {}",
                output::name(raw),
                output::name(&target.scope_path())
            )),
            Err(e) => {
                output::error(&format!("'{}': {}", raw, e));
                if first_error.is_none() {
                    first_error = Some(e.attributed(raw.as_str(), None));
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
