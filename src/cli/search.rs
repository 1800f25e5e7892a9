//! Search command handler

use crate::cli::ApiArgs;
use crate::config::Config;
use crate::error::Result;
use crate::geo::pelias::PeliasClient;
use crate::geo::GeocodeBackend;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address text
    pub text: String,

    #[command(flatten)]
    pub api: ApiArgs,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let formatter = args.api.formatter(&config)?;
    let client = PeliasClient::new(&args.api.geocoder_config(&config))?;

    let response = client.search(&args.text).await?;
    print!("{}", formatter.format(&response)?);
    Ok(())
}
