//! Module lifecycle: install, remove and enable/disable.
//!
//! These operations keep three sources of truth consistent: the vault
//! manifest, the store directories and the module-path symlinks. The
//! ordering rules are:
//!
//! - Install records a version only after its files are extracted.
//! - Remove destroys the symlink inside the vault mutation and deletes the
//!   store directory only after the vault was saved.
//! - Toggle changes `enabled` and the symlink in the same mutation, so a
//!   symlink failure leaves the manifest untouched.

mod install;
mod link;
mod remove;
mod toggle;

pub use link::ModuleLink;

use std::sync::atomic::AtomicU64;

use crate::github::{GithubResolver, ListBranches};
use crate::http::HttpClient;
use crate::module::Paths;
use crate::runtime::Runtime;
use crate::vault::VaultStore;

/// Entry point for the caller-facing module operations.
pub struct ModuleManager<R: Runtime, G: ListBranches> {
    runtime: R,
    resolver: GithubResolver<G>,
    http: HttpClient,
    paths: Paths,
    downloads: AtomicU64,
}

impl<R: Runtime, G: ListBranches> ModuleManager<R, G> {
    pub fn new(runtime: R, resolver: GithubResolver<G>, http: HttpClient, paths: Paths) -> Self {
        Self {
            runtime,
            resolver,
            http,
            paths,
            downloads: AtomicU64::new(0),
        }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    fn vault(&self) -> VaultStore<'_, R> {
        VaultStore::new(&self.runtime, self.paths.vault_path())
    }

    fn link(&self) -> ModuleLink<'_, R> {
        ModuleLink::new(&self.runtime)
    }
}
