//! File-backed profile collection.
//!
//! Invariants:
//! - At most one profile has `is_active` set after any successful switch.
//! - Every successful mutation has been written to disk before it returns.
//! - A mutation that fails validation or persistence leaves memory and disk
//!   as they were.
//! - The active profile cannot be deleted.

mod error;
mod profile;
mod selector;

pub use error::ProfileError;
pub use profile::{Profile, SecretToken};
pub use selector::ProfileSelector;

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::activation::{ActivationError, Activator};
use crate::fsutil;

/// Ordered profile list persisted as a JSON array.
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
    activator: Box<dyn Activator>,
}

impl ProfileStore {
    /// Default location: `~/.claude-code-config-switcher/configs.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(".claude-code-config-switcher")
                .join("configs.json")
        })
    }

    /// Open the store at `path`, creating its directory if needed.
    ///
    /// A missing file yields an empty collection. Any other read or parse
    /// failure is returned.
    pub fn open(
        path: impl Into<PathBuf>,
        activator: Box<dyn Activator>,
    ) -> Result<Self, ProfileError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fsutil::create_private_dir(parent).map_err(|source| ProfileError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let profiles = load_profiles(&path)?;
        tracing::debug!(
            path = %path.display(),
            count = profiles.len(),
            "Profiles loaded"
        );

        Ok(Self {
            path,
            profiles,
            activator,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, index: usize) -> Option<&Profile> {
        self.profiles.get(index)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Human-readable description of where activation writes.
    pub fn activation_target(&self) -> String {
        self.activator.describe()
    }

    /// First profile with the active flag set.
    pub fn active(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.is_active)
    }

    /// Map a selector to a position in the current collection.
    pub fn resolve(&self, selector: &ProfileSelector) -> Result<usize, ProfileError> {
        match selector {
            ProfileSelector::Index(index) => usize::try_from(*index)
                .ok()
                .filter(|&i| i < self.profiles.len())
                .ok_or(ProfileError::InvalidIndex {
                    index: *index,
                    len: self.profiles.len(),
                }),
            ProfileSelector::Id(id) => self
                .profiles
                .iter()
                .position(|p| p.id == *id)
                .ok_or_else(|| ProfileError::NotFound(selector.to_string())),
            ProfileSelector::Name(name) => self
                .profiles
                .iter()
                .position(|p| &p.name == name)
                .ok_or_else(|| ProfileError::NotFound(selector.to_string())),
        }
    }

    /// Append a new inactive profile and return its id.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Uuid, ProfileError> {
        let profile = Profile::new(name, base_url, token);
        let id = profile.id;

        let snapshot = self.profiles.clone();
        self.profiles.push(profile);
        self.commit(snapshot)?;

        tracing::info!(profile_id = %id, "Profile added");
        Ok(id)
    }

    /// Overwrite a profile's fields.
    ///
    /// If the profile is active, the new values are applied right away.
    pub fn edit(
        &mut self,
        index: usize,
        name: impl Into<String>,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<(), ProfileError> {
        self.check_index(index)?;

        let snapshot = self.profiles.clone();
        let profile = &mut self.profiles[index];
        profile.name = name.into();
        profile.base_url = base_url.into();
        profile.token = SecretToken::new(token);
        self.commit(snapshot)?;

        let profile = &self.profiles[index];
        tracing::info!(profile = %profile.name, active = profile.is_active, "Profile edited");
        if profile.is_active {
            self.activator.apply(profile)?;
            tracing::info!(profile = %profile.name, "Active profile re-applied");
        }
        Ok(())
    }

    /// Make the profile at `index` the only active one and apply it.
    ///
    /// The flag is persisted before activation runs, so a failed activation
    /// can be retried with [`ProfileStore::reapply`].
    pub fn switch(&mut self, index: usize) -> Result<(), ProfileError> {
        self.check_index(index)?;

        let previous = self.active().map(|p| p.name.clone());
        let snapshot = self.profiles.clone();
        for profile in &mut self.profiles {
            profile.is_active = false;
        }
        self.profiles[index].is_active = true;
        self.commit(snapshot)?;

        let profile = &self.profiles[index];
        self.activator.apply(profile)?;

        tracing::info!(
            old_profile = previous.as_deref().unwrap_or("none"),
            new_profile = %profile.name,
            "Profile switched"
        );
        Ok(())
    }

    /// Remove the profile at `index`; later indices shift down by one.
    ///
    /// Refuses to remove the active profile.
    pub fn delete(&mut self, index: usize) -> Result<Profile, ProfileError> {
        self.check_index(index)?;
        if self.profiles[index].is_active {
            return Err(ProfileError::ActiveProfile {
                name: self.profiles[index].name.clone(),
            });
        }

        let snapshot = self.profiles.clone();
        let removed = self.profiles.remove(index);
        self.commit(snapshot)?;

        tracing::info!(profile = %removed.name, "Profile deleted");
        Ok(removed)
    }

    /// Apply the active profile again, e.g. after a failed activation.
    pub fn reapply(&self) -> Result<&Profile, ProfileError> {
        let profile = self.active().ok_or(ActivationError::MissingProfile)?;
        self.activator.apply(profile)?;
        tracing::info!(profile = %profile.name, "Active profile re-applied");
        Ok(profile)
    }

    fn check_index(&self, index: usize) -> Result<(), ProfileError> {
        if index < self.profiles.len() {
            return Ok(());
        }
        Err(ProfileError::InvalidIndex {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len: self.profiles.len(),
        })
    }

    /// Persist, restoring `snapshot` in memory if the write fails.
    fn commit(&mut self, snapshot: Vec<Profile>) -> Result<(), ProfileError> {
        if let Err(e) = self.save() {
            self.profiles = snapshot;
            return Err(e);
        }
        Ok(())
    }

    fn save(&self) -> Result<(), ProfileError> {
        let content =
            serde_json::to_string_pretty(&self.profiles).map_err(ProfileError::Serialize)?;

        let _lock = fsutil::lock_exclusive(&self.path).map_err(|source| ProfileError::Lock {
            path: self.path.clone(),
            source,
        })?;
        fsutil::write_atomic(&self.path, content.as_bytes()).map_err(|source| {
            ProfileError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::debug!(
            path = %self.path.display(),
            count = self.profiles.len(),
            "Profiles saved"
        );
        Ok(())
    }
}

fn load_profiles(path: &Path) -> Result<Vec<Profile>, ProfileError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ProfileError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
