//! Autocomplete command handler
//!
//! Runs one undebounced fetch through the widget, so results are
//! de-duplicated exactly as an interactive session would show them.

use crate::cli::ApiArgs;
use crate::config::Config;
use crate::error::Result;
use crate::geo::pelias::PeliasClient;
use crate::geo::{BoundingBox, GeocodeResponse, Point};
use crate::widget::Geocoder;
use clap::Args;

/// Autocomplete command arguments
#[derive(Args)]
pub struct AutocompleteArgs {
    /// Partial address text
    pub text: String,

    /// Focus point as "lat,lon" (defaults to geocoder.center)
    #[arg(long, allow_hyphen_values = true)]
    pub focus: Option<Point>,

    /// Bounding box as "min_lon,min_lat,max_lon,max_lat" (defaults to geocoder.bounds)
    #[arg(long, allow_hyphen_values = true)]
    pub bounds: Option<BoundingBox>,

    #[command(flatten)]
    pub api: ApiArgs,
}

/// Run the autocomplete command
pub async fn run(args: AutocompleteArgs) -> Result<()> {
    let config = Config::load()?;
    let formatter = args.api.formatter(&config)?;

    let mut geocoder_config = args.api.geocoder_config(&config);
    if args.focus.is_some() {
        geocoder_config.center = args.focus;
    }
    if args.bounds.is_some() {
        geocoder_config.bounds = args.bounds;
    }

    let client = PeliasClient::new(&geocoder_config)?;
    let geocoder = Geocoder::new(client, geocoder_config);

    geocoder.on_change(args.text.as_str());
    geocoder.fetch_suggestions(&args.text).await?;

    let suggestions = GeocodeResponse::from_features(geocoder.state().suggestions);
    print!("{}", formatter.format(&suggestions)?);
    Ok(())
}
