//! sharecurve CLI - concentration curves of prescription volume
//!
//! Usage:
//!   sharecurve serve [--data <file.csv>] [--port <port>]
//!   sharecurve curve --data <file.csv> [--quarter Q1 ...] [--brand A ...]
//!   sharecurve options --data <file.csv>
//!   sharecurve info --data <file.csv>
//!
//! Examples:
//!   sharecurve serve --data ipsos.csv --port 8050
//!   sharecurve curve --data ipsos.csv --class Statins --brand "Brand A" --brand "Brand B"

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use sharecurve::analysis::derive_options;
use sharecurve::config::{Settings, DEFAULT_CONFIG_FILE};
use sharecurve::data::{Dataset, FilterCriteria};
use sharecurve::pipeline::run_cycle;

#[derive(Parser)]
#[command(name = "sharecurve")]
#[command(about = "Concentration curves of prescription volume across doctors")]
#[command(version)]
struct Cli {
    /// Config file (default: ./sharecurve.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Input CSV, overrides `dataset.path` from the config
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to bind, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides `server.port`
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one cycle and print the response as JSON
    Curve {
        #[command(flatten)]
        filters: FilterArgs,

        /// Brand to draw a separate curve for (repeatable)
        #[arg(short, long = "brand")]
        brands: Vec<String>,
    },

    /// Print the facet options of the whole table as JSON
    Options,

    /// Print dataset size and totals as JSON
    Info,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    quarter: Vec<String>,
    #[arg(long)]
    class: Vec<String>,
    #[arg(long)]
    speciality: Vec<String>,
    #[arg(long)]
    inn: Vec<String>,
    #[arg(long)]
    diagnosis: Vec<String>,
    #[arg(long)]
    atc3: Vec<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            quarter: args.quarter,
            class: args.class,
            speciality: args.speciality,
            inn: args.inn,
            diagnosis: args.diagnosis,
            atc3: args.atc3,
        }
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_dataset(cli_path: Option<PathBuf>, settings: &Settings) -> Result<Dataset> {
    let path = cli_path
        .or_else(|| settings.dataset.path.clone())
        .context("no input table: pass --data or set dataset.path in the config")?;
    let options = settings.dataset.read_options()?;
    Dataset::from_csv(&path, &options)
        .with_context(|| format!("failed to load {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load().with_context(|| format!("failed to read {}", DEFAULT_CONFIG_FILE))?,
    };
    init_logging(&settings);

    let dataset = load_dataset(cli.data, &settings)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let mut server = settings.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            sharecurve::server::serve(Arc::new(dataset), &server).await?;
        }

        Commands::Curve { filters, brands } => {
            let snapshot = run_cycle(&dataset, &filters.into(), &brands);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Commands::Options => {
            let options = derive_options(&dataset.full_view(), &dataset);
            println!("{}", serde_json::to_string_pretty(&options)?);
        }

        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&dataset.info())?);
        }
    }

    Ok(())
}
