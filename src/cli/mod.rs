//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod autocomplete;
pub mod config;
pub mod interactive;
pub mod reverse;
pub mod search;

use crate::config::{Config, GeocoderConfig};
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Address autocomplete and reverse geocoding
#[derive(Parser)]
#[command(name = "geosuggest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log requests and widget events to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for an address
    Search(search::SearchArgs),

    /// Suggest addresses for partial text
    Autocomplete(autocomplete::AutocompleteArgs),

    /// Find the address nearest to a point
    Reverse(reverse::ReverseArgs),

    /// Type and pick addresses line by line
    Interactive(interactive::InteractiveArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Overrides shared by every command that talks to the API
#[derive(Args, Debug, Default, Clone)]
pub struct ApiArgs {
    /// API base URL
    #[arg(long)]
    pub url: Option<String>,

    /// API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Source filter
    #[arg(long)]
    pub sources: Option<String>,

    /// Output format (json, text)
    #[arg(long, short = 'f')]
    pub format: Option<String>,
}

impl ApiArgs {
    /// Apply the overrides on top of the loaded config
    pub fn geocoder_config(&self, config: &Config) -> GeocoderConfig {
        let mut geocoder = config.geocoder.clone();
        if let Some(url) = &self.url {
            geocoder.url = url.clone();
        }
        if let Some(api_key) = &self.api_key {
            geocoder.api_key = api_key.clone();
        }
        if let Some(sources) = &self.sources {
            geocoder.sources = sources.clone();
        }
        geocoder
    }

    pub fn formatter(&self, config: &Config) -> Result<Box<dyn OutputFormatter>> {
        let name = self.format.as_deref().unwrap_or(&config.output.format);
        get_formatter(name).ok_or_else(|| {
            let known: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
            Error::Config(format!(
                "Unknown format: {} (available: {})",
                name,
                known.join(", ")
            ))
        })
    }
}

/// Initialize logging on stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "geosuggest=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Autocomplete(args) => autocomplete::run(args).await,
        Commands::Reverse(args) => reverse::run(args).await,
        Commands::Interactive(args) => interactive::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
