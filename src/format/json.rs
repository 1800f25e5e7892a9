//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeocodeResponse;

/// JSON formatter - outputs the response body as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Raw API response as JSON"
    }

    fn format(&self, response: &GeocodeResponse) -> Result<String> {
        Ok(serde_json::to_string_pretty(response)?)
    }
}
