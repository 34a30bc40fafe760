//! Archive installer: materializes one module version in the store.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::archive::TarGzExtractor;
use crate::download::download_file;
use crate::error::ModuleError;
use crate::github::{GithubResolver, ListBranches};
use crate::http::HttpClient;
use crate::module::StoreIdentifier;
use crate::runtime::Runtime;

pub struct ArchiveInstaller<'a, R: Runtime, G: ListBranches> {
    runtime: &'a R,
    resolver: &'a GithubResolver<G>,
    http: &'a HttpClient,
    /// Sequence distinguishing downloads that share a temporary directory.
    downloads: &'a AtomicU64,
    extractor: TarGzExtractor,
}

impl<'a, R: Runtime, G: ListBranches> ArchiveInstaller<'a, R, G> {
    pub fn new(
        runtime: &'a R,
        resolver: &'a GithubResolver<G>,
        http: &'a HttpClient,
        downloads: &'a AtomicU64,
    ) -> Self {
        Self {
            runtime,
            resolver,
            http,
            downloads,
            extractor: TarGzExtractor,
        }
    }

    /// Resolve the archive behind `metadata_url`, download it and extract the
    /// module's sub-path into `store_path`.
    ///
    /// Resolver errors are returned unchanged. Files written before an
    /// extraction failure stay on disk.
    #[tracing::instrument(skip(self, store_path))]
    pub async fn install(
        &self,
        metadata_url: &str,
        id: &StoreIdentifier,
        store_path: &Path,
    ) -> Result<usize, ModuleError> {
        let github_path = self.resolver.resolve(metadata_url).await?;
        let archive_url = self.resolver.archive_url(&github_path);
        debug!(
            "Installing {} from {} (sub-path '{}')",
            id, archive_url, github_path.path
        );

        let archive_path = self.archive_path(id);
        let result = self
            .download_and_extract(&archive_url, &archive_path, Path::new(&github_path.path), store_path)
            .await;

        if self.runtime.exists(&archive_path)
            && let Err(e) = self.runtime.remove_file(&archive_path)
        {
            warn!("Failed to remove downloaded archive {:?}: {}", archive_path, e);
        }

        result
    }

    async fn download_and_extract(
        &self,
        archive_url: &str,
        archive_path: &Path,
        sub_path: &Path,
        store_path: &Path,
    ) -> Result<usize, ModuleError> {
        download_file(self.runtime, archive_url, archive_path, self.http).await?;
        self.extractor
            .extract(self.runtime, archive_path, sub_path, store_path)
    }

    /// Fresh temporary location for a downloaded archive.
    fn archive_path(&self, id: &StoreIdentifier) -> PathBuf {
        let seq = self.downloads.fetch_add(1, Ordering::Relaxed);
        self.runtime.temp_dir().join(format!(
            "bespoke-{}-{}-{}-{}-{}.tar.gz",
            id.module.author,
            id.module.name,
            id.version,
            std::process::id(),
            seq
        ))
    }
}
