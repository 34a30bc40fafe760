use log::{debug, info};

use super::ModuleManager;
use crate::error::ModuleError;
use crate::github::ListBranches;
use crate::install::ArchiveInstaller;
use crate::module::{Metadata, StoreIdentifier, local_metadata_pointer};
use crate::runtime::Runtime;
use crate::vault::VersionRecord;

impl<R: Runtime, G: ListBranches> ModuleManager<R, G> {
    /// Install the module version described by the metadata document at
    /// `metadata_url`.
    ///
    /// The version is recorded in the vault only once its files are in the
    /// store. The enabled version is never changed.
    #[tracing::instrument(skip(self))]
    pub async fn install(&self, metadata_url: &str) -> Result<StoreIdentifier, ModuleError> {
        debug!("Fetching metadata from {}", metadata_url);
        let content = self.http.get_text(metadata_url).await?;
        let metadata = Metadata::parse(&content)?;
        let id = metadata.store_identifier()?;
        info!("Installing {}", id);

        let store_path = self.paths.store_path(&id);
        ArchiveInstaller::new(&self.runtime, &self.resolver, &self.http, &self.downloads)
            .install(metadata_url, &id, &store_path)
            .await?;

        let record = VersionRecord {
            remote: metadata_url.to_string(),
            local: local_metadata_pointer(&id.module),
        };
        self.vault().mutate(|vault| vault.insert_record(&id, record))?;

        info!("Installed {} into {:?}", id, store_path);
        Ok(id)
    }
}
