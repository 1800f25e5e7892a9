//! geosuggest: address autocomplete for Pelias-style geocoders
//!
//! A library and CLI tool that binds a text input to a geocoding API:
//! debounced suggestions while typing, a search when a suggestion is
//! picked, and reverse geocoding of points to addresses.
//!
//! ## Features
//!
//! - `/search`, `/autocomplete` and `/reverse` HTTP wrappers
//! - Headless widget with de-duplicated suggestions and owner hooks
//! - Trailing-edge debouncing of autocomplete requests
//! - TOML configuration + CLI with an interactive mode
//!
//! ## Quick Start
//!
//! ```no_run
//! use geosuggest::config::GeocoderConfig;
//! use geosuggest::geo::pelias::PeliasClient;
//! use geosuggest::geo::Point;
//! use geosuggest::widget::{Geocoder, Hooks};
//!
//! # async fn demo() -> geosuggest::Result<()> {
//! let config = GeocoderConfig {
//!     api_key: "my-key".to_string(),
//!     center: Some(Point::new(40.7128, -74.0060)),
//!     ..GeocoderConfig::default()
//! };
//! let hooks = Hooks::default().on_reverse_selected(|event| {
//!     println!("Found {} result(s)", event.search.features.len());
//! });
//!
//! let geocoder = Geocoder::with_hooks(PeliasClient::new(&config)?, config, hooks);
//! geocoder.reverse_geocode(None).await?;
//! println!("Nearest address: {}", geocoder.state().value);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod widget;

// Re-export commonly used types
pub use config::{Config, GeocoderConfig};
pub use error::{Error, Result};
pub use geo::{BoundingBox, Feature, GeocodeBackend, GeocodeResponse, Point};
pub use widget::{Geocoder, QueryState};
