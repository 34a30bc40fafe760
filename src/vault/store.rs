use log::debug;
use std::path::PathBuf;

use super::Vault;
use crate::error::ModuleError;
use crate::runtime::Runtime;

/// Mode applied to the manifest file.
const VAULT_FILE_MODE: u32 = 0o600;

/// JSON-file-backed persistence of the [`Vault`].
///
/// There is no locking: two concurrent load-mutate-save cycles race and the
/// later writer's snapshot wins.
pub struct VaultStore<'a, R: Runtime> {
    runtime: &'a R,
    vault_path: PathBuf,
}

impl<'a, R: Runtime> VaultStore<'a, R> {
    pub fn new(runtime: &'a R, vault_path: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            vault_path: vault_path.into(),
        }
    }

    /// Read and parse the manifest.
    ///
    /// A missing file is an error here; use [`VaultStore::load_or_default`]
    /// where absence means "nothing installed yet".
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<Vault, ModuleError> {
        let content = self
            .runtime
            .read_to_string(&self.vault_path)
            .map_err(ModuleError::vault)?;
        serde_json::from_str(&content).map_err(|e| {
            ModuleError::Vault(format!("Failed to parse {:?}: {}", self.vault_path, e))
        })
    }

    /// Like [`VaultStore::load`], but a manifest that does not exist yet yields an empty vault.
    pub fn load_or_default(&self) -> Result<Vault, ModuleError> {
        if !self.runtime.exists(&self.vault_path) {
            debug!("No vault at {:?}, starting empty", self.vault_path);
            return Ok(Vault::default());
        }
        self.load()
    }

    /// Serialize and replace the manifest.
    ///
    /// The new content is written next to the manifest and renamed over it.
    #[tracing::instrument(skip(self, vault))]
    pub fn save(&self, vault: &Vault) -> Result<(), ModuleError> {
        let content = serde_json::to_string_pretty(vault)
            .map_err(|e| ModuleError::Vault(format!("Failed to serialize vault: {}", e)))?;

        if let Some(parent) = self.vault_path.parent()
            && !self.runtime.exists(parent)
        {
            self.runtime
                .create_dir_all(parent)
                .map_err(ModuleError::vault)?;
        }

        let staged = self.staged_path();
        self.runtime
            .write(&staged, content.as_bytes())
            .map_err(ModuleError::vault)?;
        self.runtime
            .set_permissions(&staged, VAULT_FILE_MODE)
            .map_err(ModuleError::vault)?;
        self.runtime
            .rename(&staged, &self.vault_path)
            .map_err(ModuleError::vault)?;

        debug!("Saved vault to {:?}", self.vault_path);
        Ok(())
    }

    /// Load, apply `mutate`, and persist only if it succeeded.
    ///
    /// When loading or the mutation fails, the manifest on disk is not touched.
    pub fn mutate<T, F>(&self, mutate: F) -> Result<T, ModuleError>
    where
        F: FnOnce(&mut Vault) -> Result<T, ModuleError>,
    {
        let mut vault = self.load_or_default()?;
        let result = mutate(&mut vault)?;
        self.save(&vault)?;
        Ok(result)
    }

    fn staged_path(&self) -> PathBuf {
        let mut name = self
            .vault_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "vault.json".into());
        name.push(".tmp");
        self.vault_path.with_file_name(name)
    }
}
