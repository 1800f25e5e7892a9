//! Reverse command handler

use crate::cli::ApiArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::pelias::PeliasClient;
use crate::geo::{GeocodeBackend, Point};
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude (defaults to geocoder.center)
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude (defaults to geocoder.center)
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,

    #[command(flatten)]
    pub api: ApiArgs,
}

impl ReverseArgs {
    fn point(&self) -> Result<Option<Point>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                let point = Point::new(lat, lon);
                point.validate()?;
                Ok(Some(point))
            }
            (None, None) => Ok(None),
            _ => Err(Error::InvalidCoordinates(
                "Both --lat and --lon are required".to_string(),
            )),
        }
    }
}

/// Run the reverse command
pub async fn run(args: ReverseArgs) -> Result<()> {
    let config = Config::load()?;
    let formatter = args.api.formatter(&config)?;
    let geocoder_config = args.api.geocoder_config(&config);

    let point = args.point()?.or(geocoder_config.center);
    if point.is_none() {
        eprintln!("No point given and geocoder.center is not set; asking the API anyway");
    }

    let client = PeliasClient::new(&geocoder_config)?;
    let response = client.reverse(point, geocoder_config.bounds).await?;
    print!("{}", formatter.format(&response)?);
    Ok(())
}
