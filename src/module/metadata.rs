use serde::{Deserialize, Serialize};

use super::{ModuleIdentifier, StoreIdentifier};
use crate::error::ModuleError;

/// Module metadata document published next to a module's sources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub entries: Entries,
    /// Stored verbatim; never resolved.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub spotify_versions: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Entries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixin: Option<String>,
}

impl Metadata {
    pub fn parse(content: &str) -> Result<Self, ModuleError> {
        serde_json::from_str(content)
            .map_err(|e| ModuleError::Metadata(format!("Malformed metadata document: {}", e)))
    }

    /// The author used for identification. Only the first listed author counts.
    pub fn author(&self) -> Result<&str, ModuleError> {
        self.authors
            .first()
            .map(String::as_str)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ModuleError::Metadata("Metadata lists no authors".to_string()))
    }

    pub fn module_identifier(&self) -> Result<ModuleIdentifier, ModuleError> {
        let author = self.author()?;
        if self.name.is_empty() {
            return Err(ModuleError::Metadata("Metadata has an empty name".to_string()));
        }
        ModuleIdentifier::new(author, self.name.as_str())
            .map_err(|e| ModuleError::Metadata(e.to_string()))
    }

    pub fn store_identifier(&self) -> Result<StoreIdentifier, ModuleError> {
        let module = self.module_identifier()?;
        if self.version.is_empty() {
            return Err(ModuleError::Metadata(format!(
                "Metadata for {} has an empty version",
                module
            )));
        }
        StoreIdentifier::new(module, self.version.as_str())
            .map_err(|e| ModuleError::Metadata(e.to_string()))
    }
}
