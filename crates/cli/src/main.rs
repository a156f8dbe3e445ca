mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use valuemap_core::{DatasetCollection, data_path_from_env};

#[derive(Parser)]
#[command(name = "valuemap")]
#[command(about = "Grafana SimpleJSON datasource serving values from a static JSON file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Listen port [env: PORT, default: 3000]
        #[arg(short, long)]
        port: Option<u16>,
        /// Listen address [env: HOST, default: 0.0.0.0]
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Dataset file [env: VALUEMAP_DATA, default: server/data.json]
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Resolve a search target against the dataset file and print the results
    Query {
        /// JSON-encoded query, e.g. '{"data":"hosts","contains":"web"}'
        target: String,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// List the datasets in the dataset file
    Datasets {
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

pub(crate) fn resolve_data_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(data_path_from_env)
}

pub(crate) fn load_datasets(path: &Path) -> Result<DatasetCollection> {
    DatasetCollection::load(path)
        .with_context(|| format!("failed to load datasets from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, data } => commands::serve::run(port, host, data).await,
        Commands::Query { target, data } => commands::query::run(&target, data),
        Commands::Datasets { data } => commands::datasets::run(data),
    }
}
