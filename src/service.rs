//! Shared handle to the profile store.
//!
//! Every operation holds the store lock for its whole
//! resolve-mutate-persist-apply sequence, so concurrent callers cannot lose
//! updates or act on an index that shifted underneath them. Operations that
//! may block on system calls run on tokio's blocking pool and are awaited.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::store::{Profile, ProfileError, ProfileSelector, ProfileStore};

/// Field changes for [`ProfileService::edit`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub token: Option<String>,
}

/// Thread-safe owner of a [`ProfileStore`].
#[derive(Clone)]
pub struct ProfileService {
    inner: Arc<Mutex<ProfileStore>>,
}

impl ProfileService {
    pub fn new(store: ProfileStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Copy of the current collection.
    pub fn profiles(&self) -> Vec<Profile> {
        self.inner.lock().profiles().to_vec()
    }

    pub fn active(&self) -> Option<Profile> {
        self.inner.lock().active().cloned()
    }

    /// Copy of the selected profile.
    pub fn get(&self, selector: &ProfileSelector) -> Result<Profile, ProfileError> {
        let store = self.inner.lock();
        let index = store.resolve(selector)?;
        Ok(store.profiles()[index].clone())
    }

    pub fn activation_target(&self) -> String {
        self.inner.lock().activation_target()
    }

    /// Append a profile; returns its index and id.
    pub fn add(
        &self,
        name: impl Into<String>,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<(usize, Uuid), ProfileError> {
        let mut store = self.inner.lock();
        let id = store.add(name, base_url, token)?;
        Ok((store.len() - 1, id))
    }

    /// Remove the selected profile and return it.
    pub fn delete(&self, selector: &ProfileSelector) -> Result<Profile, ProfileError> {
        let mut store = self.inner.lock();
        let index = store.resolve(selector)?;
        store.delete(index)
    }

    /// Activate the selected profile; returns it as now stored.
    pub async fn switch(&self, selector: ProfileSelector) -> Result<Profile, ProfileError> {
        self.run_blocking(move |store| {
            let index = store.resolve(&selector)?;
            store.switch(index)?;
            Ok(store.profiles()[index].clone())
        })
        .await
    }

    /// Edit the selected profile, re-applying it if it is active.
    pub async fn edit(
        &self,
        selector: ProfileSelector,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfileError> {
        self.run_blocking(move |store| {
            let index = store.resolve(&selector)?;
            let current = &store.profiles()[index];
            let name = update.name.unwrap_or_else(|| current.name.clone());
            let base_url = update.base_url.unwrap_or_else(|| current.base_url.clone());
            let token = update
                .token
                .unwrap_or_else(|| current.token.expose().to_string());
            store.edit(index, name, base_url, token)?;
            Ok(store.profiles()[index].clone())
        })
        .await
    }

    /// Apply the active profile again.
    pub async fn reapply(&self) -> Result<Profile, ProfileError> {
        self.run_blocking(|store| store.reapply().cloned()).await
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T, ProfileError>
    where
        F: FnOnce(&mut ProfileStore) -> Result<T, ProfileError> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut store = inner.lock();
            f(&mut store)
        })
        .await
        .map_err(|e| ProfileError::Worker(e.to_string()))?
    }
}
