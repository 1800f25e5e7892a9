//! Geocoding module
//!
//! Value types shared by the HTTP client and the widget, plus the
//! `GeocodeBackend` trait the widget is generic over.

pub mod pelias;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use std::str::FromStr;

/// A geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    /// Create a new point
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate that the point is within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses "lat,lon"
impl FromStr for Point {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = parse_floats(s).map_err(Error::InvalidCoordinates)?;
        match values.as_slice() {
            [lat, lon] => {
                let point = Point::new(*lat, *lon);
                point.validate()?;
                Ok(point)
            }
            _ => Err(Error::InvalidCoordinates(format!(
                "Expected \"lat,lon\", got \"{}\"",
                s
            ))),
        }
    }
}

/// A bounding box, always ordered `[min_lon, min_lat, max_lon, max_lat]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Check both corners are valid points and min <= max on each axis
    pub fn validate(&self) -> Result<()> {
        Point::new(self.min_lat, self.min_lon)
            .validate()
            .and_then(|_| Point::new(self.max_lat, self.max_lon).validate())
            .map_err(|e| Error::InvalidBounds(e.to_string()))?;

        if self.min_lon > self.max_lon || self.min_lat > self.max_lat {
            return Err(Error::InvalidBounds(format!(
                "Minimum corner ({}, {}) exceeds maximum corner ({}, {})",
                self.min_lon, self.min_lat, self.max_lon, self.max_lat
            )));
        }
        Ok(())
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.min_lon, b.min_lat, b.max_lon, b.max_lat]
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// Parses "min_lon,min_lat,max_lon,max_lat"
impl FromStr for BoundingBox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = parse_floats(s).map_err(Error::InvalidBounds)?;
        let array: [f64; 4] = values.try_into().map_err(|_| {
            Error::InvalidBounds(format!(
                "Expected \"min_lon,min_lat,max_lon,max_lat\", got \"{}\"",
                s
            ))
        })?;
        let bounds = BoundingBox::from(array);
        bounds.validate()?;
        Ok(bounds)
    }
}

fn parse_floats(s: &str) -> std::result::Result<Vec<f64>, String> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| format!("Not a number: \"{}\"", part))
        })
        .collect()
}

/// Properties of a feature; everything besides the label is passed through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single geocoding result record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub properties: FeatureProperties,
    /// Everything besides `properties`, geometry included, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    /// Build a feature holding only a label
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            properties: FeatureProperties {
                label: label.into(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.properties.label
    }

    /// Position of a point geometry (GeoJSON order is `[lon, lat]`)
    ///
    /// Any other geometry type, or a missing one, yields `None`.
    pub fn point(&self) -> Option<Point> {
        let geometry = self.extra.get("geometry")?;
        if geometry.get("type")?.as_str()? != "Point" {
            return None;
        }
        match geometry.get("coordinates")?.as_array()?.as_slice() {
            [lon, lat, ..] => Some(Point::new(lat.as_f64()?, lon.as_f64()?)),
            _ => None,
        }
    }
}

/// Parsed body of any of the three endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeocodeResponse {
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self {
            features,
            extra: Map::new(),
        }
    }

    pub fn first_label(&self) -> Option<&str> {
        self.features.first().map(Feature::label)
    }
}

/// Trait for geocoding backends
///
/// The widget only talks to the network through this trait.
pub trait GeocodeBackend: Send + Sync + 'static {
    /// Forward search for a full address text
    fn search(&self, text: &str) -> impl Future<Output = Result<GeocodeResponse>> + Send;

    /// Partial-text suggestions, optionally biased toward `focus` and
    /// restricted to `bounds`
    fn autocomplete(
        &self,
        text: &str,
        focus: Option<Point>,
        bounds: Option<BoundingBox>,
    ) -> impl Future<Output = Result<GeocodeResponse>> + Send;

    /// Nearest address to `point`
    fn reverse(
        &self,
        point: Option<Point>,
        bounds: Option<BoundingBox>,
    ) -> impl Future<Output = Result<GeocodeResponse>> + Send;
}
