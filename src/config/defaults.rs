//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default geocoding API base URL
pub const DEFAULT_URL: &str = "https://search.mapzen.com/v1";

/// Default source filter
pub const DEFAULT_SOURCES: &str = "openaddresses";

/// Default autocomplete debounce delay in milliseconds
pub const DEFAULT_FETCH_DELAY_MS: u64 = 150;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geosuggest";
