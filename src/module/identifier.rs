use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ModuleError;

/// Identifies a module across all of its versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleIdentifier {
    pub author: String,
    pub name: String,
}

impl ModuleIdentifier {
    /// Builds an identifier from already separated segments, validating each one.
    pub fn new(author: impl Into<String>, name: impl Into<String>) -> Result<Self, ModuleError> {
        let author = author.into();
        let name = name.into();
        validate_segment("author", &author)?;
        validate_segment("name", &name)?;
        Ok(Self { author, name })
    }

    /// Where the module symlink lives when a version is enabled.
    ///
    /// Returns: `<modules_root>/<author>/<name>`
    pub fn module_path(&self, modules_root: &Path) -> PathBuf {
        modules_root.join(&self.author).join(&self.name)
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.name)
    }
}

impl FromStr for ModuleIdentifier {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(ModuleError::Parse(format!(
                "Invalid module identifier '{}'. Expected 'author/name'.",
                s
            )));
        }
        ModuleIdentifier::new(parts[0], parts[1])
    }
}

/// Identifies one installed version of a module.
///
/// An empty `version` means "no version selected".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreIdentifier {
    pub module: ModuleIdentifier,
    pub version: String,
}

impl StoreIdentifier {
    pub fn new(module: ModuleIdentifier, version: impl Into<String>) -> Result<Self, ModuleError> {
        let version = version.into();
        if !version.is_empty() {
            validate_segment("version", &version)?;
        }
        Ok(Self { module, version })
    }

    /// Directory holding this version's extracted files.
    ///
    /// Returns: `<store_root>/<author>/<name>/<version>`
    pub fn store_path(&self, store_root: &Path) -> PathBuf {
        store_root
            .join(&self.module.author)
            .join(&self.module.name)
            .join(&self.version)
    }
}

impl fmt::Display for StoreIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module, self.version)
    }
}

impl FromStr for StoreIdentifier {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module_part, version) = s.rsplit_once('/').ok_or_else(|| {
            ModuleError::Parse(format!(
                "Invalid store identifier '{}'. Expected 'author/name/version'.",
                s
            ))
        })?;
        let module = module_part.parse::<ModuleIdentifier>().map_err(|_| {
            ModuleError::Parse(format!(
                "Invalid store identifier '{}'. Expected 'author/name/version'.",
                s
            ))
        })?;
        StoreIdentifier::new(module, version)
    }
}

/// Rejects segments that cannot be used as a single path component.
fn validate_segment(kind: &str, segment: &str) -> Result<(), ModuleError> {
    if segment.is_empty() {
        return Err(ModuleError::Parse(format!("Module {} cannot be empty", kind)));
    }
    if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(ModuleError::Parse(format!(
            "Module {} '{}' is not a valid path segment",
            kind, segment
        )));
    }
    Ok(())
}
