//! Pelias-style geocoding backend
//!
//! Three GET wrappers (`/search`, `/autocomplete`, `/reverse`) that build a
//! query string and parse the JSON body. No retry, no timeout, no caching.

use crate::config::GeocoderConfig;
use crate::constants::api::{
    AUTOCOMPLETE_PATH, JSON_MEDIA_TYPE, REVERSE_LAYERS, REVERSE_PATH, REVERSE_SIZE, SEARCH_PATH,
    USER_AGENT,
};
use crate::error::{Error, Result};
use crate::geo::{BoundingBox, GeocodeBackend, GeocodeResponse, Point};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

/// Ordered query parameters
pub type QueryParams = Vec<(&'static str, String)>;

/// HTTP client for a Pelias-compatible API
#[derive(Debug, Clone)]
pub struct PeliasClient {
    client: reqwest::Client,
    base_url: String,
    sources: String,
    api_key: String,
}

impl PeliasClient {
    /// Create a client from the widget configuration
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            sources: config.sources.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parameters for `/search`
    pub fn search_params(&self, text: &str) -> QueryParams {
        vec![
            ("api_key", self.api_key.clone()),
            ("sources", self.sources.clone()),
            ("text", text.to_string()),
        ]
    }

    /// Parameters for `/autocomplete`
    pub fn autocomplete_params(
        &self,
        text: &str,
        focus: Option<Point>,
        bounds: Option<BoundingBox>,
    ) -> QueryParams {
        let mut params = self.search_params(text);
        if let Some(focus) = focus {
            params.push(("focus.point.lat", focus.latitude.to_string()));
            params.push(("focus.point.lon", focus.longitude.to_string()));
        }
        push_bounds(&mut params, bounds);
        params
    }

    /// Parameters for `/reverse`
    pub fn reverse_params(&self, point: Option<Point>, bounds: Option<BoundingBox>) -> QueryParams {
        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("layers", REVERSE_LAYERS.to_string()),
            ("size", REVERSE_SIZE.to_string()),
        ];
        if let Some(point) = point {
            params.push(("point.lat", point.latitude.to_string()));
            params.push(("point.lon", point.longitude.to_string()));
        }
        push_bounds(&mut params, bounds);
        params
    }

    /// Issue a GET against `path` and parse the body
    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> Result<GeocodeResponse> {
        let url = format!("{}{}?{}", self.base_url, path, encode_query(params));
        debug!(endpoint = path, params = params.len(), "geocoding request");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: GeocodeResponse = serde_json::from_slice(&body)?;
        debug!(endpoint = path, features = parsed.features.len(), "geocoding response");
        Ok(parsed)
    }
}

fn push_bounds(params: &mut QueryParams, bounds: Option<BoundingBox>) {
    if let Some(b) = bounds {
        params.push(("boundary.rect.min_lon", b.min_lon.to_string()));
        params.push(("boundary.rect.min_lat", b.min_lat.to_string()));
        params.push(("boundary.rect.max_lon", b.max_lon.to_string()));
        params.push(("boundary.rect.max_lat", b.max_lat.to_string()));
    }
}

/// Percent-encode parameters into a query string, preserving order
pub fn encode_query(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

impl GeocodeBackend for PeliasClient {
    async fn search(&self, text: &str) -> Result<GeocodeResponse> {
        self.get(SEARCH_PATH, &self.search_params(text)).await
    }

    async fn autocomplete(
        &self,
        text: &str,
        focus: Option<Point>,
        bounds: Option<BoundingBox>,
    ) -> Result<GeocodeResponse> {
        self.get(AUTOCOMPLETE_PATH, &self.autocomplete_params(text, focus, bounds))
            .await
    }

    async fn reverse(
        &self,
        point: Option<Point>,
        bounds: Option<BoundingBox>,
    ) -> Result<GeocodeResponse> {
        self.get(REVERSE_PATH, &self.reverse_params(point, bounds)).await
    }
}
