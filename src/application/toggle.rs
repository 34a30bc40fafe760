use log::{debug, info};

use super::ModuleManager;
use crate::error::ModuleError;
use crate::github::ListBranches;
use crate::module::StoreIdentifier;
use crate::runtime::Runtime;

impl<R: Runtime, G: ListBranches> ModuleManager<R, G> {
    pub fn enable(&self, id: &StoreIdentifier) -> Result<(), ModuleError> {
        self.toggle(id, true)
    }

    pub fn disable(&self, id: &StoreIdentifier) -> Result<(), ModuleError> {
        self.toggle(id, false)
    }

    /// Enable or disable one version of a module.
    ///
    /// Enabling points the module path at the version's store directory,
    /// replacing whichever version was enabled before. Disabling a version
    /// that is not the enabled one changes nothing. The symlink is updated
    /// inside the vault mutation, so a symlink failure leaves the manifest
    /// as it was.
    #[tracing::instrument(skip(self))]
    pub fn toggle(&self, id: &StoreIdentifier, enable: bool) -> Result<(), ModuleError> {
        let module_path = self.paths.module_path(&id.module);
        let store_path = self.paths.store_path(id);
        let link = self.link();

        self.vault().mutate(|vault| {
            let set = vault.require_versions_mut(&id.module)?;

            if enable {
                if !set.versions.contains_key(&id.version) {
                    return Err(ModuleError::Vault(format!(
                        "Version '{}' of {} is not installed",
                        id.version, id.module
                    )));
                }
                link.point(&module_path, &store_path)?;
                set.enabled = id.version.clone();
                info!("Enabled {}", id);
            } else if set.is_enabled(&id.version) {
                link.destroy(&module_path)?;
                set.enabled.clear();
                info!("Disabled {}", id);
            } else {
                debug!("{} is not the enabled version, nothing to disable", id);
            }
            Ok(())
        })
    }
}
