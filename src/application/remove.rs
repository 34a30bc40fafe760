use log::{debug, info};

use super::ModuleManager;
use crate::error::ModuleError;
use crate::github::ListBranches;
use crate::module::StoreIdentifier;
use crate::runtime::Runtime;

impl<R: Runtime, G: ListBranches> ModuleManager<R, G> {
    /// Remove one installed version.
    ///
    /// When it is the enabled version, the module is disabled first. The
    /// store directory is deleted only after the vault was saved; if saving
    /// fails, the files stay where they are.
    #[tracing::instrument(skip(self))]
    pub fn remove(&self, id: &StoreIdentifier) -> Result<(), ModuleError> {
        let module_path = self.paths.module_path(&id.module);
        let link = self.link();

        self.vault().mutate(|vault| {
            let set = vault.require_versions_mut(&id.module)?;
            if !set.versions.contains_key(&id.version) {
                return Err(ModuleError::Vault(format!(
                    "Version '{}' of {} is not installed",
                    id.version, id.module
                )));
            }

            if set.is_enabled(&id.version) {
                debug!("{} is enabled, disabling before removal", id);
                link.destroy(&module_path)?;
                set.enabled.clear();
            }
            set.versions.remove(&id.version);
            vault.prune_module(&id.module);
            Ok(())
        })?;

        let store_path = self.paths.store_path(id);
        if self.runtime.is_dir(&store_path) {
            self.runtime
                .remove_dir_all(&store_path)
                .map_err(ModuleError::filesystem)?;
        } else {
            debug!("Store directory {:?} is already gone", store_path);
        }

        info!("Removed {}", id);
        Ok(())
    }
}
