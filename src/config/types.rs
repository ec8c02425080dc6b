use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::activation::EnvKeys;
use crate::fsutil::expand_tilde;

/// Which configuration surface receives the active profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Environment variables on Windows, settings file elsewhere.
    #[default]
    Auto,
    /// Persistent environment variables via `setx`.
    Env,
    /// The `env` map of a JSON settings file.
    Settings,
}

/// Application configuration, read from `config.toml`.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Profile collection file (default `~/.claude-code-config-switcher/configs.json`).
    pub profiles_path: Option<PathBuf>,
    /// Settings document (default `~/.claude/settings.json`).
    pub settings_path: Option<PathBuf>,
    pub activation: ActivationMode,
    /// Variable receiving the token.
    pub token_var: String,
    /// Variable receiving the base URL.
    pub base_url_var: String,
    /// Program used to persist environment variables.
    pub setx_program: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let keys = EnvKeys::default();
        Self {
            profiles_path: None,
            settings_path: None,
            activation: ActivationMode::Auto,
            token_var: keys.token,
            base_url_var: keys.base_url,
            setx_program: "setx".to_string(),
        }
    }
}

impl AppConfig {
    /// Configured profiles path with `~/` expanded.
    pub fn profiles_path(&self) -> Option<PathBuf> {
        self.profiles_path.as_deref().map(expand_tilde)
    }

    /// Configured settings path with `~/` expanded.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings_path.as_deref().map(expand_tilde)
    }

    pub fn env_keys(&self) -> EnvKeys {
        EnvKeys {
            token: self.token_var.clone(),
            base_url: self.base_url_var.clone(),
        }
    }
}
