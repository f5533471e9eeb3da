//! Terraform Provider for FortiOS
//!
//! Drives the resource lifecycle against a FortiGate from the command line,
//! keeping each object's state in a JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fortios_provider::state::{decode_state, encode_state};
use fortios_provider::{FortiosProvider, ProviderConfig, ResourceData};

/// FortiOS provider driver
#[derive(Parser)]
#[command(name = "terraform-provider-fortios")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Provider configuration file
    #[arg(long, global = true, env = "FORTIOS_PROVIDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resource type names
    Resources,

    /// Print a resource schema as JSON
    Schema {
        /// Resource type name
        type_name: String,
    },

    /// Check a state file against a resource schema
    Validate {
        type_name: String,
        #[arg(long)]
        state: PathBuf,
    },

    /// Create the object described by a state file
    Create {
        type_name: String,
        #[arg(long)]
        state: PathBuf,
    },

    /// Refresh a state file from the device
    Read {
        type_name: String,
        #[arg(long)]
        state: PathBuf,
    },

    /// Push a state file to the device
    Update {
        type_name: String,
        #[arg(long)]
        state: PathBuf,
    },

    /// Delete the object in a state file
    Delete {
        type_name: String,
        #[arg(long)]
        state: PathBuf,
    },

    /// Import an existing object into a new state file
    Import {
        type_name: String,
        /// Object mkey
        id: String,
        #[arg(long)]
        state: PathBuf,
    },
}

fn read_state(path: &Path) -> Result<ResourceData> {
    let bytes = if path.exists() {
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        Vec::new()
    };
    decode_state(&bytes).with_context(|| format!("decoding {}", path.display()))
}

fn write_state(path: &Path, state: &ResourceData) -> Result<()> {
    std::fs::write(path, encode_state(state)?).with_context(|| format!("writing {}", path.display()))
}

#[derive(Debug, Clone, Copy)]
enum Lifecycle {
    Create,
    Read,
    Update,
    Delete,
}

/// Run one lifecycle step on the object in `path`.
///
/// The state file is rewritten even when the step fails: a create whose
/// read-back fails has still assigned an identifier on the device.
async fn apply_to_state_file(
    provider: &FortiosProvider,
    step: Lifecycle,
    type_name: &str,
    path: &Path,
) -> Result<()> {
    let mut data = read_state(path)?;
    let result = match step {
        Lifecycle::Create => provider.create(type_name, &mut data).await,
        Lifecycle::Read => provider.read(type_name, &mut data).await,
        Lifecycle::Update => provider.update(type_name, &mut data).await,
        Lifecycle::Delete => provider.delete(type_name, &mut data).await,
    };
    write_state(path, &data)?;
    result
}

async fn configured_provider(config_path: Option<PathBuf>) -> Result<FortiosProvider> {
    let path = config_path.unwrap_or_else(fortios_provider::config::default_path);
    let config = ProviderConfig::load(&path)?.with_env()?;

    let provider = FortiosProvider::new();
    provider.configure(config.into_client_config()).await?;
    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resources => {
            for type_name in FortiosProvider::new().resource_types() {
                println!("{}", type_name);
            }
        }
        Commands::Schema { type_name } => {
            let provider = FortiosProvider::new();
            let schema = provider.schema(&type_name)?;
            println!("{}", serde_json::to_string_pretty(schema)?);
        }
        Commands::Validate { type_name, state } => {
            let data = read_state(&state)?;
            let diagnostics = FortiosProvider::new().validate(&type_name, &data)?;
            for diagnostic in &diagnostics {
                println!("{:?}: {}", diagnostic.severity, diagnostic.summary);
            }
            if diagnostics.iter().any(|d| d.is_error()) {
                std::process::exit(1);
            }
        }
        Commands::Create { type_name, state } => {
            let provider = configured_provider(cli.config).await?;
            apply_to_state_file(&provider, Lifecycle::Create, &type_name, &state).await?;
        }
        Commands::Read { type_name, state } => {
            let provider = configured_provider(cli.config).await?;
            apply_to_state_file(&provider, Lifecycle::Read, &type_name, &state).await?;
        }
        Commands::Update { type_name, state } => {
            let provider = configured_provider(cli.config).await?;
            apply_to_state_file(&provider, Lifecycle::Update, &type_name, &state).await?;
        }
        Commands::Delete { type_name, state } => {
            let provider = configured_provider(cli.config).await?;
            apply_to_state_file(&provider, Lifecycle::Delete, &type_name, &state).await?;
        }
        Commands::Import { type_name, id, state } => {
            let provider = configured_provider(cli.config).await?;
            let data = provider.import(&type_name, &id).await?;
            write_state(&state, &data)?;
        }
    }

    Ok(())
}
