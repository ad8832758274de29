//! Error types and handling for the weather dashboard

use thiserror::Error;

/// Main error type for the weather dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The whole batch of city lookups could not complete
    #[error("Failed to fetch weather data: {reason}")]
    FetchBatchFailed { reason: String },

    /// The requested city key is not part of the city registry
    #[error("City not found: {city}")]
    CityNotFound { city: String },

    /// A lookup succeeded but carried no observation for the city
    #[error("No observation returned for {city}, {country_code}")]
    NoObservationForCity { city: String, country_code: String },

    /// The city is registered but has no weather record
    #[error("No weather data found for {city}")]
    DetailDataMissing { city: String },

    /// No load cycle has completed successfully yet
    #[error("Weather data not loaded: {state}")]
    DataNotLoaded { state: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors for a single lookup
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl DashboardError {
    /// Create a new batch failure
    pub fn fetch_batch_failed<S: Into<String>>(reason: S) -> Self {
        Self::FetchBatchFailed {
            reason: reason.into(),
        }
    }

    /// Create a new city-not-found error
    pub fn city_not_found<S: Into<String>>(city: S) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    /// Create a new missing-detail error
    pub fn detail_data_missing<S: Into<String>>(city: S) -> Self {
        Self::DetailDataMissing { city: city.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for the two "nothing to show" outcomes of a detail lookup
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CityNotFound { .. } | Self::DetailDataMissing { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::FetchBatchFailed { .. } => "Failed to fetch weather data.".to_string(),
            DashboardError::CityNotFound { city } => format!("City not found: {city}"),
            DashboardError::NoObservationForCity { city, .. } => {
                format!("No weather data available for {city}.")
            }
            DashboardError::DetailDataMissing { .. } => "No data found.".to_string(),
            DashboardError::DataNotLoaded { .. } => "Loading weather data...".to_string(),
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            DashboardError::Api { .. } => {
                "Unable to connect to the weather service. Please check your internet connection."
                    .to_string()
            }
            DashboardError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let batch_err = DashboardError::fetch_batch_failed("connection reset");
        assert!(matches!(batch_err, DashboardError::FetchBatchFailed { .. }));

        let not_found = DashboardError::city_not_found("Atlantis");
        assert!(matches!(not_found, DashboardError::CityNotFound { .. }));

        let missing = DashboardError::detail_data_missing("Lagos");
        assert!(matches!(missing, DashboardError::DetailDataMissing { .. }));
    }

    #[test]
    fn test_user_messages() {
        let batch_err = DashboardError::fetch_batch_failed("timeout");
        assert_eq!(batch_err.user_message(), "Failed to fetch weather data.");

        let missing = DashboardError::detail_data_missing("Lagos");
        assert_eq!(missing.user_message(), "No data found.");

        let validation_err = DashboardError::validation("bad range");
        assert!(validation_err.user_message().contains("bad range"));
    }

    #[test]
    fn test_not_found_is_not_a_transport_failure() {
        assert!(DashboardError::city_not_found("Atlantis").is_not_found());
        assert!(DashboardError::detail_data_missing("Lagos").is_not_found());
        assert!(!DashboardError::fetch_batch_failed("boom").is_not_found());
        assert!(!DashboardError::api("503").is_not_found());
    }
}
