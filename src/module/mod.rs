//! Identifier and path model for modules.
//!
//! A module is named by `author/name`; one installed version of it by
//! `author/name/version`. Both map onto fixed locations under the
//! configuration root:
//!
//! ```text
//! <root>/modules/<author>/<name>            symlink, present iff enabled
//! <root>/store/<author>/<name>/<version>/   extracted module files
//! <root>/modules/vault.json                 manifest
//! ```

mod identifier;
mod metadata;

use std::path::{Path, PathBuf};

pub use identifier::{ModuleIdentifier, StoreIdentifier};
pub use metadata::{Entries, Metadata};

/// Directory layout derived from the configuration root.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    modules_root: PathBuf,
    store_root: PathBuf,
    vault_path: PathBuf,
}

impl Paths {
    pub fn new(config_root: impl Into<PathBuf>) -> Self {
        let config_root = config_root.into();
        let modules_root = config_root.join("modules");
        Self {
            vault_path: modules_root.join("vault.json"),
            store_root: config_root.join("store"),
            modules_root,
        }
    }

    pub fn modules_root(&self) -> &Path {
        &self.modules_root
    }

    pub fn store_root(&self) -> &Path {
        &self.store_root
    }

    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    pub fn module_path(&self, id: &ModuleIdentifier) -> PathBuf {
        id.module_path(&self.modules_root)
    }

    pub fn store_path(&self, id: &StoreIdentifier) -> PathBuf {
        id.store_path(&self.store_root)
    }
}

/// Metadata pointer recorded for an installed version, as seen by the client.
pub fn local_metadata_pointer(id: &ModuleIdentifier) -> String {
    format!("/modules/{}/{}/metadata.json", id.author, id.name)
}
