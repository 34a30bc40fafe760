pub mod application;
pub mod archive;
pub mod commands;
pub mod download;
pub mod error;
pub mod github;
pub mod http;
pub mod install;
pub mod module;
pub mod runtime;
pub mod vault;

pub use error::ModuleError;
