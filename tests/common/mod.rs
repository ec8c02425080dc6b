//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use ccswitch::activation::{ActivationError, Activator};
use ccswitch::store::{Profile, ProfileStore};
use parking_lot::Mutex;
use tempfile::TempDir;

/// Activator that records every profile it is asked to apply.
///
/// `fail` makes the next calls return an `EnvVar` error instead.
#[derive(Clone, Default)]
pub struct RecordingActivator {
    pub applied: Arc<Mutex<Vec<Profile>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl RecordingActivator {
    pub fn applied(&self) -> Vec<Profile> {
        self.applied.lock().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

impl Activator for RecordingActivator {
    fn apply(&self, profile: &Profile) -> Result<(), ActivationError> {
        if *self.fail.lock() {
            return Err(ActivationError::EnvVar {
                var: "ANTHROPIC_AUTH_TOKEN".to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        self.applied.lock().push(profile.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "recording activator".to_string()
    }
}

/// Store in a fresh temp dir backed by a recording activator.
pub fn temp_store() -> (TempDir, ProfileStore, RecordingActivator) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let activator = RecordingActivator::default();
    let store = ProfileStore::open(profiles_path(&dir), Box::new(activator.clone()))
        .expect("Failed to open store");
    (dir, store, activator)
}

pub fn profiles_path(dir: &TempDir) -> PathBuf {
    dir.path().join("configs.json")
}

/// Reopen the store at `path` to observe what was persisted.
pub fn reload(path: &Path) -> Vec<Profile> {
    ProfileStore::open(path, Box::new(RecordingActivator::default()))
        .expect("Failed to reopen store")
        .profiles()
        .to_vec()
}

/// Count profiles with the active flag set.
pub fn active_count(profiles: &[Profile]) -> usize {
    profiles.iter().filter(|p| p.is_active).count()
}

/// Write a config.toml pointing both data files into `dir`.
pub fn temp_config(dir: &TempDir) -> PathBuf {
    let config_path = dir.path().join("config.toml");
    let content = format!(
        r#"profiles_path = "{}"
settings_path = "{}"
activation = "settings"
"#,
        toml_path(&dir.path().join("configs.json")),
        toml_path(&dir.path().join("claude").join("settings.json")),
    );
    std::fs::write(&config_path, content).expect("Failed to write config");
    config_path
}

pub fn settings_path(dir: &TempDir) -> PathBuf {
    dir.path().join("claude").join("settings.json")
}

pub fn read_settings(dir: &TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(settings_path(dir)).expect("settings missing");
    serde_json::from_str(&content).expect("settings not JSON")
}

/// `ccswitch --config <config>` ready for a subcommand.
pub fn ccswitch(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ccswitch"));
    cmd.arg("--config").arg(config);
    cmd.env_remove("CCSWITCH_LOG");
    cmd
}

fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}
