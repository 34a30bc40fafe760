use flate2::read::GzDecoder;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tar::{Archive, EntryType};

use crate::error::ModuleError;
use crate::runtime::{Runtime, is_path_under};

/// Extractor for GitHub source archives (`.tar.gz`).
///
/// GitHub wraps every archive in a single `<repo>-<ref>/` directory whose
/// name is not known up front. That component is stripped, and only entries
/// under the module's sub-path are kept, re-rooted at the destination.
pub struct TarGzExtractor;

impl TarGzExtractor {
    /// Extract the entries under `sub_path` into `extract_to`.
    ///
    /// Returns the number of files written. Already written files are left in
    /// place when extraction fails partway.
    #[tracing::instrument(skip(self, runtime))]
    pub fn extract<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
        sub_path: &Path,
        extract_to: &Path,
    ) -> Result<usize, ModuleError> {
        debug!("Extracting {:?} into {:?}...", archive_path, extract_to);

        let file = runtime
            .open(archive_path)
            .map_err(ModuleError::extraction)?;
        let mut archive = Archive::new(GzDecoder::new(file));

        runtime
            .create_dir_all(extract_to)
            .map_err(ModuleError::extraction)?;

        let entries = archive
            .entries()
            .map_err(|e| ModuleError::Extraction(format!("Failed to read archive: {}", e)))?;

        let mut files = 0;
        for entry in entries {
            let mut entry = entry.map_err(|e| {
                ModuleError::Extraction(format!("Failed to read archive entry: {}", e))
            })?;
            let entry_path = entry
                .path()
                .map_err(|e| ModuleError::Extraction(format!("Invalid entry path: {}", e)))?
                .into_owned();

            let Some(relative) = relative_to_sub_path(&entry_path, sub_path) else {
                continue;
            };
            let dest = extract_to.join(&relative);
            if relative.has_root() || !is_path_under(&dest, extract_to) {
                return Err(ModuleError::Extraction(format!(
                    "Archive entry {:?} escapes the destination",
                    entry_path
                )));
            }

            match entry.header().entry_type() {
                EntryType::Directory => {
                    runtime
                        .create_dir_all(&dest)
                        .map_err(ModuleError::extraction)?;
                }
                kind if kind.is_file() => {
                    if let Some(parent) = dest.parent() {
                        runtime
                            .create_dir_all(parent)
                            .map_err(ModuleError::extraction)?;
                    }
                    let mut writer = runtime
                        .create_file(&dest)
                        .map_err(ModuleError::extraction)?;
                    std::io::copy(&mut entry, &mut writer).map_err(|e| {
                        ModuleError::Extraction(format!("Failed to extract {:?}: {}", dest, e))
                    })?;
                    drop(writer);

                    #[cfg(unix)]
                    if let Ok(mode) = entry.header().mode()
                        && let Err(e) = runtime.set_permissions(&dest, mode & 0o777)
                    {
                        debug!("Failed to set permissions on {:?}: {}", dest, e);
                    }
                    files += 1;
                }
                kind => {
                    debug!("Skipping {:?} entry {:?}", kind, entry_path);
                }
            }
        }

        if files == 0 {
            return Err(ModuleError::Extraction(format!(
                "Archive contains no files under '{}'",
                sub_path.display()
            )));
        }

        info!("Extracted {} file(s) into {:?}", files, extract_to);
        Ok(files)
    }
}

/// Strip the archive root directory, then `sub_path`; `None` when the entry
/// lies outside `sub_path`.
fn relative_to_sub_path(entry_path: &Path, sub_path: &Path) -> Option<PathBuf> {
    let mut components = entry_path.components();
    components.next()?;
    components
        .as_path()
        .strip_prefix(sub_path)
        .ok()
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use anyhow::Result;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::fs::{self, File};
    use tar::{Builder, Header};
    use tempfile::tempdir;

    /// Build a GitHub-style archive: a pax global header, then the entries as given.
    fn create_test_archive(path: &Path, files: &[(&str, &str)]) -> Result<()> {
        let file = File::create(path)?;
        let enc = GzEncoder::new(file, Compression::default());
        let mut tar = Builder::new(enc);

        let comment = b"52 comment=0123456789abcdef0123456789abcdef01234567\n";
        let mut pax = Header::new_ustar();
        pax.set_path("pax_global_header")?;
        pax.set_entry_type(EntryType::XGlobalHeader);
        pax.set_size(comment.len() as u64);
        pax.set_cksum();
        tar.append(&pax, &comment[..])?;

        for (name, content) in files {
            let mut header = Header::new_gnu();
            if name.ends_with('/') {
                header.set_entry_type(EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                header.set_path(name)?;
                header.set_cksum();
                tar.append(&header, std::io::empty())?;
            } else {
                header.set_path(name)?;
                header.set_size(content.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                tar.append(&header, content.as_bytes())?;
            }
        }

        tar.into_inner()?.finish()?;
        Ok(())
    }

    #[test]
    fn test_extract_module_sub_path() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("widgets.tar.gz");
        let store = dir.path().join("store/acme/widgets/1.0.0");

        create_test_archive(
            &archive_path,
            &[
                ("widgets-main/", ""),
                ("widgets-main/README.md", "readme"),
                ("widgets-main/modules/", ""),
                ("widgets-main/modules/foo/", ""),
                ("widgets-main/modules/foo/metadata.json", "{}"),
                ("widgets-main/modules/foo/dist/index.js", "js"),
                ("widgets-main/modules/foobar/other.js", "other"),
                ("widgets-main/modules/bar/metadata.json", "bar"),
            ],
        )?;

        let files =
            TarGzExtractor.extract(&RealRuntime, &archive_path, Path::new("modules/foo"), &store)?;

        assert_eq!(files, 2);
        assert_eq!(fs::read_to_string(store.join("metadata.json"))?, "{}");
        assert_eq!(fs::read_to_string(store.join("dist/index.js"))?, "js");
        assert!(!store.join("README.md").exists());
        assert!(!store.join("other.js").exists());
        assert!(!store.join("pax_global_header").exists());
        Ok(())
    }

    #[test]
    fn test_extract_repository_root_module() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("widgets.tar.gz");
        let store = dir.path().join("out");

        create_test_archive(
            &archive_path,
            &[
                ("widgets-v1.0.0/metadata.json", "{}"),
                ("widgets-v1.0.0/src/a.js", "a"),
            ],
        )?;

        TarGzExtractor.extract(&RealRuntime, &archive_path, Path::new(""), &store)?;

        assert_eq!(fs::read_to_string(store.join("metadata.json"))?, "{}");
        assert_eq!(fs::read_to_string(store.join("src/a.js"))?, "a");
        Ok(())
    }

    #[test]
    fn test_extract_nothing_under_sub_path_fails() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("widgets.tar.gz");

        create_test_archive(&archive_path, &[("widgets-main/other/metadata.json", "{}")])?;

        let result = TarGzExtractor.extract(
            &RealRuntime,
            &archive_path,
            Path::new("modules/foo"),
            &dir.path().join("out"),
        );

        assert!(matches!(result, Err(ModuleError::Extraction(_))));
        Ok(())
    }

    #[test]
    fn test_extract_corrupt_archive_fails() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("widgets.tar.gz");
        fs::write(&archive_path, b"<html>not an archive</html>")?;

        let result = TarGzExtractor.extract(
            &RealRuntime,
            &archive_path,
            Path::new(""),
            &dir.path().join("out"),
        );

        assert!(matches!(result, Err(ModuleError::Extraction(_))));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_applies_file_mode() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let archive_path = dir.path().join("widgets.tar.gz");
        let store = dir.path().join("out");
        create_test_archive(&archive_path, &[("widgets-main/run.sh", "#!/bin/sh")])?;

        TarGzExtractor.extract(&RealRuntime, &archive_path, Path::new(""), &store)?;

        let mode = fs::metadata(store.join("run.sh"))?.permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        Ok(())
    }

    #[test]
    fn test_relative_to_sub_path() {
        assert_eq!(
            relative_to_sub_path(Path::new("root/modules/foo/a.js"), Path::new("modules/foo")),
            Some(PathBuf::from("a.js"))
        );
        assert_eq!(
            relative_to_sub_path(Path::new("root/modules/foobar/a.js"), Path::new("modules/foo")),
            None
        );
        assert_eq!(
            relative_to_sub_path(Path::new("root/a.js"), Path::new("")),
            Some(PathBuf::from("a.js"))
        );
        assert_eq!(
            relative_to_sub_path(Path::new("pax_global_header"), Path::new("modules")),
            None
        );
    }
}
