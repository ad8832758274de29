//! Weather record model and display methods

use serde::{Deserialize, Serialize};

/// Base location of the condition icon images
pub const ICON_BASE_URL: &str = "https://www.weatherbit.io/static/img/icons";

/// Resolve a condition icon id to its image reference
#[must_use]
pub fn icon_url(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}.png")
}

/// One city's current-conditions snapshot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherRecord {
    /// City name as reported by the weather service
    pub city_name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: String,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Human-readable description of weather conditions
    pub condition_description: String,
    /// Weather condition icon ID from API
    pub condition_icon_id: String,
    /// Relative humidity in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,
    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_ms: Option<f64>,
    /// Atmospheric pressure in mb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_mb: Option<f64>,
    /// Visibility in kilometers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_km: Option<f64>,
}

impl WeatherRecord {
    /// Create a record with the required fields only
    #[must_use]
    pub fn new(
        city_name: impl Into<String>,
        country_code: impl Into<String>,
        temperature_c: f64,
        condition_description: impl Into<String>,
        condition_icon_id: impl Into<String>,
    ) -> Self {
        Self {
            city_name: city_name.into(),
            country_code: country_code.into(),
            temperature_c,
            condition_description: condition_description.into(),
            condition_icon_id: condition_icon_id.into(),
            humidity_pct: None,
            wind_speed_ms: None,
            pressure_mb: None,
            visibility_km: None,
        }
    }

    /// Image reference for this record's condition icon
    #[must_use]
    pub fn icon_url(&self) -> String {
        icon_url(&self.condition_icon_id)
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_c)
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format_optional(self.humidity_pct, "%")
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format_optional(self.wind_speed_ms, " m/s")
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self) -> String {
        format_optional(self.pressure_mb, " mb")
    }

    /// Format visibility with unit
    #[must_use]
    pub fn format_visibility(&self) -> String {
        format_optional(self.visibility_km, " km")
    }
}

fn format_optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url_template() {
        assert_eq!(
            icon_url("c01d"),
            "https://www.weatherbit.io/static/img/icons/c01d.png"
        );
    }

    #[test]
    fn test_format_methods() {
        let mut record = WeatherRecord::new("Lagos", "NG", 30.0, "Clear sky", "c01d");
        assert_eq!(record.format_temperature(), "30.0°C");
        assert_eq!(record.format_humidity(), "-");

        record.humidity_pct = Some(78.0);
        record.wind_speed_ms = Some(3.5);
        record.pressure_mb = Some(1010.0);
        record.visibility_km = Some(10.0);
        assert_eq!(record.format_humidity(), "78%");
        assert_eq!(record.format_wind(), "3.5 m/s");
        assert_eq!(record.format_pressure(), "1010 mb");
        assert_eq!(record.format_visibility(), "10 km");
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let record = WeatherRecord::new("Tokyo", "JP", 18.0, "Rain", "r01d");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("humidity_pct").is_none());
        assert_eq!(json["condition_icon_id"], "r01d");
    }
}
