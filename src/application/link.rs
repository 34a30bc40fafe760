use log::debug;
use std::path::Path;

use crate::error::ModuleError;
use crate::runtime::{Runtime, normalize_path};

/// Manages the module-path symlink that marks a version as enabled.
pub struct ModuleLink<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> ModuleLink<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    /// Point `link` at `target`, replacing a symlink aimed elsewhere.
    ///
    /// Anything at `link` that is not a symlink is left alone and reported.
    #[tracing::instrument(skip(self))]
    pub fn point(&self, link: &Path, target: &Path) -> Result<(), ModuleError> {
        if self.runtime.is_symlink(link) {
            match self.runtime.read_link(link) {
                Ok(existing) if normalize_path(&existing) == normalize_path(target) => {
                    debug!("{:?} already points to {:?}", link, target);
                    return Ok(());
                }
                Ok(existing) => {
                    debug!("{:?} points to {:?}, repointing to {:?}", link, existing, target);
                }
                Err(e) => {
                    debug!("{:?} is unreadable ({}), recreating", link, e);
                }
            }
            self.runtime
                .remove_symlink(link)
                .map_err(ModuleError::filesystem)?;
        } else if self.runtime.exists(link) {
            return Err(ModuleError::Filesystem(format!(
                "{:?} exists but is not a symlink",
                link
            )));
        }

        if let Some(parent) = link.parent() {
            self.runtime
                .create_dir_all(parent)
                .map_err(ModuleError::filesystem)?;
        }
        self.runtime
            .symlink(target, link)
            .map_err(ModuleError::filesystem)
    }

    /// Remove the symlink at `link`; nothing to do when it is already gone.
    #[tracing::instrument(skip(self))]
    pub fn destroy(&self, link: &Path) -> Result<(), ModuleError> {
        if self.runtime.is_symlink(link) {
            return self
                .runtime
                .remove_symlink(link)
                .map_err(ModuleError::filesystem);
        }
        if self.runtime.exists(link) {
            return Err(ModuleError::Filesystem(format!(
                "{:?} exists but is not a symlink",
                link
            )));
        }
        debug!("{:?} does not exist, nothing to remove", link);
        Ok(())
    }
}
