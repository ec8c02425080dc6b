//! Projects the active profile onto the host's configuration surface.
//!
//! Two implementations of [`Activator`], chosen once at startup:
//! - [`EnvVarActivator`]: persistent user environment variables (Windows).
//! - [`SettingsFileActivator`]: the `env` map of `~/.claude/settings.json`.

mod env_vars;
mod error;
mod settings_file;

pub use env_vars::EnvVarActivator;
pub use error::ActivationError;
pub use settings_file::SettingsFileActivator;

use crate::config::{ActivationMode, AppConfig};
use crate::store::Profile;

/// Writes a profile's base URL and token somewhere downstream tools read them.
///
/// Implementations are stateless; applying the same profile twice yields
/// the same end state.
pub trait Activator: Send + Sync {
    fn apply(&self, profile: &Profile) -> Result<(), ActivationError>;

    /// Where `apply` writes, for user-facing confirmations.
    fn describe(&self) -> String;
}

/// Names of the two variables owned by this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvKeys {
    pub token: String,
    pub base_url: String,
}

impl Default for EnvKeys {
    fn default() -> Self {
        Self {
            token: "ANTHROPIC_AUTH_TOKEN".to_string(),
            base_url: "ANTHROPIC_BASE_URL".to_string(),
        }
    }
}

/// Build the activator for this host.
///
/// `ActivationMode::Auto` picks environment variables on Windows and the
/// settings file everywhere else.
pub fn from_config(config: &AppConfig) -> Result<Box<dyn Activator>, ActivationError> {
    let keys = config.env_keys();
    let use_env = match config.activation {
        ActivationMode::Auto => cfg!(windows),
        ActivationMode::Env => true,
        ActivationMode::Settings => false,
    };

    if use_env {
        tracing::debug!(program = %config.setx_program, "Using environment variable activation");
        return Ok(Box::new(EnvVarActivator::new(&config.setx_program, keys)));
    }

    let path = match config.settings_path() {
        Some(path) => path,
        None => SettingsFileActivator::default_path()?,
    };
    tracing::debug!(path = %path.display(), "Using settings file activation");
    Ok(Box::new(SettingsFileActivator::new(path, keys)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn explicit_settings_mode_uses_configured_path() {
        let config = AppConfig {
            activation: ActivationMode::Settings,
            settings_path: Some(PathBuf::from("/tmp/ccswitch-test/settings.json")),
            ..AppConfig::default()
        };
        let activator = from_config(&config).unwrap();
        assert!(activator
            .describe()
            .contains("/tmp/ccswitch-test/settings.json"));
    }

    #[test]
    fn explicit_env_mode_names_both_variables() {
        let config = AppConfig {
            activation: ActivationMode::Env,
            ..AppConfig::default()
        };
        let description = from_config(&config).unwrap().describe();
        assert!(description.contains("ANTHROPIC_AUTH_TOKEN"));
        assert!(description.contains("ANTHROPIC_BASE_URL"));
    }
}
