//! Error taxonomy for module operations.
//!
//! Every public operation fails with exactly one [`ModuleError`] kind, so
//! callers (the CLI and the protocol dispatcher) can report failures without
//! inspecting message text.

/// Errors produced by module management operations.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// Malformed identifier or URL text.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Remote metadata is malformed or lacks required fields.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Transport or HTTP failure (metadata fetch, branch listing, archive download).
    #[error("Network error: {0}")]
    Network(String),

    /// Archive format or I/O failure while unpacking.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Manifest unreadable/unwritable, or a mutation targeting an unknown module/version.
    #[error("Vault error: {0}")]
    Vault(String),

    /// Symlink or directory operation failure outside extraction.
    #[error("Filesystem error: {0}")]
    Filesystem(String),
}

impl ModuleError {
    /// Folds an `anyhow` error chain from the runtime layer into a filesystem error.
    pub fn filesystem(err: anyhow::Error) -> Self {
        ModuleError::Filesystem(format!("{:#}", err))
    }

    pub fn vault(err: anyhow::Error) -> Self {
        ModuleError::Vault(format!("{:#}", err))
    }

    pub fn extraction(err: anyhow::Error) -> Self {
        ModuleError::Extraction(format!("{:#}", err))
    }
}

pub type Result<T, E = ModuleError> = std::result::Result<T, E>;
