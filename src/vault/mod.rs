//! The vault: persisted manifest of every installed module version.
//!
//! The in-memory model is plain data with lookup helpers; [`VaultStore`]
//! owns reading and writing it.

mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ModuleError;
use crate::module::{ModuleIdentifier, StoreIdentifier};

pub use store::VaultStore;

/// Per-version record: where the metadata came from and where the client finds it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub remote: String,
    pub local: String,
}

/// All known versions of one module plus the enabled one (empty = none).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionSet {
    #[serde(default)]
    pub enabled: String,
    #[serde(default)]
    pub versions: BTreeMap<String, VersionRecord>,
}

impl VersionSet {
    pub fn is_enabled(&self, version: &str) -> bool {
        !self.enabled.is_empty() && self.enabled == version
    }
}

/// Manifest root: author -> name -> versions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Vault {
    pub modules: BTreeMap<String, BTreeMap<String, VersionSet>>,
}

impl Vault {
    pub fn versions(&self, id: &ModuleIdentifier) -> Option<&VersionSet> {
        self.modules.get(&id.author)?.get(&id.name)
    }

    pub fn versions_mut(&mut self, id: &ModuleIdentifier) -> Option<&mut VersionSet> {
        self.modules.get_mut(&id.author)?.get_mut(&id.name)
    }

    /// Same as [`Vault::versions`] but unknown modules are a vault error.
    pub fn require_versions_mut(
        &mut self,
        id: &ModuleIdentifier,
    ) -> Result<&mut VersionSet, ModuleError> {
        self.versions_mut(id)
            .ok_or_else(|| ModuleError::Vault(format!("No module with identifier {}", id)))
    }

    /// Record of the currently enabled version, if any.
    pub fn enabled_record(&self, id: &ModuleIdentifier) -> Option<&VersionRecord> {
        let set = self.versions(id)?;
        if set.enabled.is_empty() {
            return None;
        }
        set.versions.get(&set.enabled)
    }

    pub fn record(&self, id: &StoreIdentifier) -> Option<&VersionRecord> {
        self.versions(&id.module)?.versions.get(&id.version)
    }

    /// Replace the record of a version of an already known module.
    pub fn set_record(
        &mut self,
        id: &StoreIdentifier,
        record: VersionRecord,
    ) -> Result<(), ModuleError> {
        if id.version.is_empty() {
            return Err(ModuleError::Vault(format!(
                "Cannot record an empty version for {}",
                id.module
            )));
        }
        self.require_versions_mut(&id.module)?
            .versions
            .insert(id.version.clone(), record);
        Ok(())
    }

    /// Record a version, creating the author and module entries when absent.
    /// The enabled version is left untouched.
    pub fn insert_record(
        &mut self,
        id: &StoreIdentifier,
        record: VersionRecord,
    ) -> Result<(), ModuleError> {
        if id.version.is_empty() {
            return Err(ModuleError::Vault(format!(
                "Cannot record an empty version for {}",
                id.module
            )));
        }
        self.modules
            .entry(id.module.author.clone())
            .or_default()
            .entry(id.module.name.clone())
            .or_default()
            .versions
            .insert(id.version.clone(), record);
        Ok(())
    }

    /// Drop a module whose last version is gone, and its author if now empty.
    pub fn prune_module(&mut self, id: &ModuleIdentifier) {
        let Some(names) = self.modules.get_mut(&id.author) else {
            return;
        };
        if names.get(&id.name).is_some_and(|set| set.versions.is_empty()) {
            names.remove(&id.name);
        }
        if names.is_empty() {
            self.modules.remove(&id.author);
        }
    }
}
