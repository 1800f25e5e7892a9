//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeocodeResponse;

/// Text formatter - one numbered line per feature
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Numbered labels with coordinates"
    }

    fn format(&self, response: &GeocodeResponse) -> Result<String> {
        if response.features.is_empty() {
            return Ok("No results\n".to_string());
        }

        let mut output = String::new();
        for (i, feature) in response.features.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}", i + 1, feature.label()));
            if let Some(point) = feature.point() {
                output.push_str(&format!(" ({:.6}, {:.6})", point.latitude, point.longitude));
            }
            output.push('\n');
        }

        Ok(output)
    }
}
