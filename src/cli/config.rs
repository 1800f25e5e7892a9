//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "geocoder.api_key")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    #[arg(allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    let optional = |value: Option<String>| match value {
        Some(v) if !v.is_empty() => format!("\"{}\"", v),
        _ => "\"\" # not set".to_string(),
    };

    println!("[geocoder]");
    println!("url = \"{}\"", config.geocoder.url);
    println!("sources = \"{}\"", config.geocoder.sources);
    if config.geocoder.api_key.is_empty() {
        println!("api_key = \"\" # not configured");
    } else {
        println!("api_key = \"***\" # configured");
    }
    println!("fetch_delay_ms = {}", config.geocoder.fetch_delay_ms);
    println!("center = {}", optional(config.get("geocoder.center")));
    println!("bounds = {}", optional(config.get("geocoder.bounds")));
    println!();

    println!("[output]");
    println!("format = \"{}\"", config.output.format);
}
