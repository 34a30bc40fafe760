//! Symlink operations (create, read, remove).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn symlink_impl(&self, original: &Path, link: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(original, link)
                .with_context(|| format!("Failed to create symlink {:?} -> {:?}", link, original))?;
        }
        #[cfg(windows)]
        {
            // Module links always point at version directories.
            std::os::windows::fs::symlink_dir(original, link).with_context(|| {
                format!("Failed to create directory symlink {:?} -> {:?}", link, original)
            })?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_link_impl(&self, path: &Path) -> Result<PathBuf> {
        fs::read_link(path).with_context(|| format!("Failed to read symlink {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_symlink_impl(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_symlink_impl(&self, path: &Path) -> Result<()> {
        #[cfg(unix)]
        {
            fs::remove_file(path).with_context(|| format!("Failed to remove symlink {:?}", path))?;
        }
        #[cfg(windows)]
        {
            // Directory symlinks need remove_dir; fall back to remove_file for file symlinks.
            fs::remove_dir(path)
                .or_else(|_| fs::remove_file(path))
                .with_context(|| format!("Failed to remove symlink {:?}", path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_directory_symlink_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let version_dir = dir.path().join("store/acme/widgets/1.0.0");
        runtime.create_dir_all(&version_dir).unwrap();
        runtime.write(&version_dir.join("index.js"), b"1").unwrap();

        let modules_dir = dir.path().join("modules/acme");
        runtime.create_dir_all(&modules_dir).unwrap();
        let link = modules_dir.join("widgets");

        runtime.symlink(&version_dir, &link).unwrap();
        assert!(runtime.is_symlink(&link));
        assert!(!runtime.is_symlink(&version_dir));
        assert_eq!(runtime.read_link(&link).unwrap(), version_dir);

        // Contents are reachable through the link
        assert_eq!(runtime.read_to_string(&link.join("index.js")).unwrap(), "1");

        runtime.remove_symlink(&link).unwrap();
        assert!(!runtime.exists(&link));
        assert!(!runtime.is_symlink(&link));
        // Target is untouched
        assert!(runtime.is_dir(&version_dir));
    }

    #[test]
    fn test_is_symlink_for_dangling_link() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let link = dir.path().join("widgets");

        runtime
            .symlink(&dir.path().join("missing"), &link)
            .unwrap();

        assert!(runtime.is_symlink(&link));
        assert!(!runtime.exists(&link));
    }

    #[test]
    fn test_read_link_on_regular_file_fails() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        runtime.write(&file, b"x").unwrap();

        assert!(runtime.read_link(&file).is_err());
    }
}
