//! Command entry points shared by the CLI and the protocol handler.
//!
//! Each command builds a [`Config`] from the command-line overrides, turns it
//! into a [`ModuleManager`] and runs exactly one module operation.

use anyhow::Result;
use log::debug;

use crate::{
    application::ModuleManager,
    github::ListBranches,
    module::StoreIdentifier,
    runtime::Runtime,
};

pub mod config;
mod paths;
mod protocol;

pub use config::{Config, ConfigOptions};
pub use paths::{config_root, default_config_root};
pub use protocol::ProtocolRequest;

/// Install a module from its metadata URL.
#[tracing::instrument(skip(runtime, options))]
pub async fn install<R: Runtime>(runtime: R, metadata_url: &str, options: ConfigOptions) -> Result<()> {
    let manager = Config::new(runtime, options)?.into_manager();
    run_install(&manager, metadata_url).await
}

/// Remove an installed version, given as `author/name/version`.
#[tracing::instrument(skip(runtime, options))]
pub fn remove<R: Runtime>(runtime: R, identifier: &str, options: ConfigOptions) -> Result<()> {
    let id = identifier.parse::<StoreIdentifier>()?;
    let manager = Config::new(runtime, options)?.into_manager();
    run_remove(&manager, &id)
}

#[tracing::instrument(skip(runtime, options))]
pub fn enable<R: Runtime>(runtime: R, identifier: &str, options: ConfigOptions) -> Result<()> {
    let id = identifier.parse::<StoreIdentifier>()?;
    let manager = Config::new(runtime, options)?.into_manager();
    run_toggle(&manager, &id, true)
}

#[tracing::instrument(skip(runtime, options))]
pub fn disable<R: Runtime>(runtime: R, identifier: &str, options: ConfigOptions) -> Result<()> {
    let id = identifier.parse::<StoreIdentifier>()?;
    let manager = Config::new(runtime, options)?.into_manager();
    run_toggle(&manager, &id, false)
}

/// Handle a `bespoke:<action>[:<args>]` URI.
#[tracing::instrument(skip(runtime, options))]
pub async fn protocol<R: Runtime>(runtime: R, uri: &str, options: ConfigOptions) -> Result<()> {
    let request = uri.parse::<ProtocolRequest>()?;
    debug!("Protocol request: {:?}", request);
    let manager = Config::new(runtime, options)?.into_manager();
    dispatch(&manager, request).await
}

pub(crate) async fn dispatch<R: Runtime, G: ListBranches>(
    manager: &ModuleManager<R, G>,
    request: ProtocolRequest,
) -> Result<()> {
    match request {
        ProtocolRequest::Add(metadata_url) => run_install(manager, &metadata_url).await,
        ProtocolRequest::Remove(id) => run_remove(manager, &id),
        ProtocolRequest::Enable(id) => run_toggle(manager, &id, true),
        ProtocolRequest::Disable(id) => run_toggle(manager, &id, false),
    }
}

async fn run_install<R: Runtime, G: ListBranches>(
    manager: &ModuleManager<R, G>,
    metadata_url: &str,
) -> Result<()> {
    println!("Installing module from {}...", metadata_url);
    let id = manager.install(metadata_url).await?;
    println!("Installed {}", id);
    Ok(())
}

fn run_remove<R: Runtime, G: ListBranches>(
    manager: &ModuleManager<R, G>,
    id: &StoreIdentifier,
) -> Result<()> {
    manager.remove(id)?;
    println!("Removed {}", id);
    Ok(())
}

fn run_toggle<R: Runtime, G: ListBranches>(
    manager: &ModuleManager<R, G>,
    id: &StoreIdentifier,
    enable: bool,
) -> Result<()> {
    manager.toggle(id, enable)?;
    println!("{} {}", if enable { "Enabled" } else { "Disabled" }, id);
    Ok(())
}
