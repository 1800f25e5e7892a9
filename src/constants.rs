//! Centralized constants for the geosuggest crate

/// Geocoding API endpoints and fixed request parameters
pub mod api {
    /// Forward search endpoint, relative to the configured base URL
    pub const SEARCH_PATH: &str = "/search";

    /// Autocomplete endpoint
    pub const AUTOCOMPLETE_PATH: &str = "/autocomplete";

    /// Reverse geocoding endpoint
    pub const REVERSE_PATH: &str = "/reverse";

    /// Layer filter sent with every reverse request
    pub const REVERSE_LAYERS: &str = "address";

    /// Number of results asked for on reverse requests
    pub const REVERSE_SIZE: u32 = 1;

    /// Media type for both Accept and Content-Type
    pub const JSON_MEDIA_TYPE: &str = "application/json";

    pub const USER_AGENT: &str = concat!("geosuggest/", env!("CARGO_PKG_VERSION"));
}
