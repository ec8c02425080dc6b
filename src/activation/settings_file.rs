use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{ActivationError, Activator, EnvKeys};
use crate::fsutil;
use crate::store::Profile;

/// Merges the profile into the `env` map of a JSON settings document.
///
/// Only the two owned keys are written. Every other key, inside `env` or at
/// the top level, is preserved. Unreadable or malformed content is replaced
/// with an empty document rather than reported.
pub struct SettingsFileActivator {
    path: PathBuf,
    keys: EnvKeys,
}

impl SettingsFileActivator {
    pub fn new(path: impl Into<PathBuf>, keys: EnvKeys) -> Self {
        Self {
            path: path.into(),
            keys,
        }
    }

    /// `~/.claude/settings.json`.
    pub fn default_path() -> Result<PathBuf, ActivationError> {
        let home = dirs::home_dir().ok_or(ActivationError::HomeDirUnavailable)?;
        Ok(home.join(".claude").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Settings file unreadable, starting from an empty document"
                );
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(doc)) => doc,
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Settings file is not a JSON object, starting from an empty document"
                );
                Map::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Settings file is malformed, starting from an empty document"
                );
                Map::new()
            }
        }
    }
}

impl Activator for SettingsFileActivator {
    fn apply(&self, profile: &Profile) -> Result<(), ActivationError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ActivationError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut doc = self.read_document();
        let env = doc
            .entry("env")
            .or_insert_with(|| Value::Object(Map::new()));
        if !env.is_object() {
            *env = Value::Object(Map::new());
        }
        if let Value::Object(env) = env {
            env.insert(
                self.keys.token.clone(),
                Value::String(profile.token.expose().to_string()),
            );
            env.insert(
                self.keys.base_url.clone(),
                Value::String(profile.base_url.clone()),
            );
        }

        let content = serde_json::to_string_pretty(&Value::Object(doc))
            .map_err(ActivationError::Serialize)?;
        fsutil::write_atomic(&self.path, content.as_bytes()).map_err(|source| {
            ActivationError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::info!(
            path = %self.path.display(),
            profile = %profile.name,
            "Settings file updated"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Settings written to {}", self.path.display())
    }
}
