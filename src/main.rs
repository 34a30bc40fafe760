use anyhow::Result;
use bespoke::commands::{self, ConfigOptions};
use clap::Parser;
use std::path::PathBuf;

/// bespoke - module manager for client extensions
///
/// Installs module versions published on GitHub, keeps track of them in a
/// local vault and switches the enabled version of each module.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for
/// authentication against the GitHub API.
///
/// Examples:
///   bespoke pkg install https://raw.githubusercontent.com/acme/widgets/v1.0.0/metadata.json
///   bespoke pkg enable acme/widgets/1.0.0
#[derive(Parser, Debug)]
#[command(author, version = env!("BESPOKE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration root (overrides the platform default; also via BESPOKE_CONFIG_DIR)
    #[arg(
        long = "config-dir",
        env = "BESPOKE_CONFIG_DIR",
        value_name = "PATH",
        global = true
    )]
    pub config_dir: Option<PathBuf>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// GitHub web URL serving source archives
    #[arg(long = "github-url", value_name = "URL", global = true, hide = true)]
    pub github_url: Option<String>,

    /// Raw content URL that metadata URLs point at
    #[arg(long = "raw-url", value_name = "URL", global = true, hide = true)]
    pub raw_url: Option<String>,
}

impl Cli {
    fn options(&self) -> ConfigOptions {
        ConfigOptions {
            config_dir: self.config_dir.clone(),
            api_url: self.api_url.clone(),
            github_url: self.github_url.clone(),
            raw_url: self.raw_url.clone(),
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Manage installed modules
    #[command(subcommand)]
    Pkg(PkgCommands),

    /// Handle a bespoke: URI (bespoke:<action>[:<args>])
    Protocol(ProtocolArgs),
}

#[derive(clap::Subcommand, Debug)]
enum PkgCommands {
    /// Install a module from its metadata URL
    Install(InstallArgs),

    /// Remove an installed module version
    Rem(IdentifierArgs),

    /// Enable a module version
    Enable(IdentifierArgs),

    /// Disable a module version
    Disable(IdentifierArgs),
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Raw GitHub URL of the module's metadata.json
    #[arg(value_name = "MURL")]
    pub metadata_url: String,
}

#[derive(clap::Args, Debug)]
pub struct IdentifierArgs {
    /// Module version in the format "author/name/version"
    #[arg(value_name = "ID")]
    pub identifier: String,
}

#[derive(clap::Args, Debug)]
pub struct ProtocolArgs {
    #[arg(value_name = "URI")]
    pub uri: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = bespoke::runtime::RealRuntime;
    let options = cli.options();

    match cli.command {
        Commands::Pkg(PkgCommands::Install(args)) => {
            commands::install(runtime, &args.metadata_url, options).await?
        }
        Commands::Pkg(PkgCommands::Rem(args)) => {
            commands::remove(runtime, &args.identifier, options)?
        }
        Commands::Pkg(PkgCommands::Enable(args)) => {
            commands::enable(runtime, &args.identifier, options)?
        }
        Commands::Pkg(PkgCommands::Disable(args)) => {
            commands::disable(runtime, &args.identifier, options)?
        }
        Commands::Protocol(args) => commands::protocol(runtime, &args.uri, options).await?,
    }
    Ok(())
}
