//! File system operations (read, write, directory, permissions).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).with_context(|| format!("Failed to rename {:?} to {:?}", from, to))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("Failed to create directory {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_file_impl(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        let file =
            fs::File::create(path).with_context(|| format!("Failed to create file {:?}", path))?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn open_impl(&self, path: &Path) -> Result<Box<dyn std::io::Read + Send>> {
        let file = fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {:?} and its contents", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_permissions_impl(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions)
                .with_context(|| format!("Failed to set permissions on {:?}", path))?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::io::{Read, Write};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_write_then_replace_by_rename() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let target = dir.path().join("vault.json");
        let staged = dir.path().join("vault.json.tmp");

        runtime.write(&target, b"{}").unwrap();
        runtime.write(&staged, br#"{"acme":{}}"#).unwrap();
        runtime.rename(&staged, &target).unwrap();

        assert!(!runtime.exists(&staged));
        assert_eq!(runtime.read_to_string(&target).unwrap(), r#"{"acme":{}}"#);

        runtime.remove_file(&target).unwrap();
        assert!(!runtime.exists(&target));
    }

    #[test]
    fn test_real_runtime_store_tree() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let version_dir = dir.path().join("store/acme/widgets/1.0.0");

        runtime.create_dir_all(&version_dir).unwrap();
        assert!(runtime.is_dir(&version_dir));

        {
            let mut writer = runtime.create_file(&version_dir.join("index.js")).unwrap();
            writer.write_all(b"export default 1;").unwrap();
        }
        {
            let mut reader = runtime.open(&version_dir.join("index.js")).unwrap();
            let mut content = String::new();
            reader.read_to_string(&mut content).unwrap();
            assert_eq!(content, "export default 1;");
        }

        runtime.remove_dir_all(&version_dir).unwrap();
        assert!(!runtime.exists(&version_dir));
        assert!(runtime.is_dir(&dir.path().join("store/acme/widgets")));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runtime_set_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file = dir.path().join("vault.json");
        runtime.write(&file, b"{}").unwrap();

        runtime.set_permissions(&file, 0o600).unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_real_runtime_errors_carry_path() {
        let runtime = RealRuntime;

        let err = runtime
            .read_to_string(std::path::Path::new("/nonexistent/bespoke/vault.json"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("vault.json"));

        assert!(
            runtime
                .remove_dir_all(std::path::Path::new("/nonexistent/bespoke/store"))
                .is_err()
        );
    }
}
