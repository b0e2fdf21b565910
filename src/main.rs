//! ucai-tools - inspect the tool definitions a catalog snapshot produces.
//!
//! Commands:
//! - describe: resolve function names against a catalog snapshot file and print
//!   the OpenAI tool definitions
//! - config-schema: print the JSON schema of the toolkit config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use ucai_toolkit::client::InMemoryFunctionClient;
use ucai_toolkit::types::ObservabilityConfig;
use ucai_toolkit::{ToolkitConfig, UcFunctionToolkit};

#[derive(Debug, Parser)]
#[command(name = "ucai-tools", version, about)]
struct Cli {
    /// Log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn", env = "UCAI_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print tool definitions for the given functions.
    Describe {
        /// Catalog snapshot: JSON array of function descriptors.
        #[arg(long)]
        catalog: PathBuf,

        /// Toolkit config file; its function names are added to NAMES.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Function names (`catalog.schema.function` or `catalog.schema.*`).
        names: Vec<String>,
    },
    /// Print the toolkit config JSON schema.
    ConfigSchema,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    ucai_toolkit::observability::init_tracing(&ObservabilityConfig {
        log_level: cli.log_level,
        json_logs: cli.json_logs,
    });

    match cli.command {
        Command::Describe {
            catalog,
            config,
            names,
        } => {
            let mut toolkit_config = match config {
                Some(path) => ToolkitConfig::from_json_str(&std::fs::read_to_string(path)?)?,
                None => ToolkitConfig::default(),
            };
            toolkit_config.function_names.extend(names);

            let client = InMemoryFunctionClient::from_json_file(&catalog)?;
            tracing::info!("Loaded {} function(s) from {}", client.len(), catalog.display());

            let toolkit = UcFunctionToolkit::new(toolkit_config, Arc::new(client))?;
            println!("{}", serde_json::to_string_pretty(&toolkit.definitions())?);
        }
        Command::ConfigSchema => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ToolkitConfig::json_schema())?
            );
        }
    }

    Ok(())
}
