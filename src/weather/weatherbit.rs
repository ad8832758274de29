//! Weatherbit current-conditions client
//!
//! Queries `{base_url}/current` by city name and country code and
//! normalizes the first observation of the envelope into a `WeatherRecord`.
//!
//! The body decides the outcome, not the status code: any JSON envelope
//! without observations (an error object on a 4xx included) means "no
//! observation", while an empty or non-JSON body fails the lookup.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use super::WeatherSource;
use crate::config::{API_KEY_ENV_FALLBACK, WeatherConfig};
use crate::models::{CityRef, WeatherRecord};
use crate::{DashboardError, Result};

/// Live weather source backed by the Weatherbit API
pub struct WeatherbitClient {
    /// HTTP client
    client: Client,
    /// API base URL without trailing slash
    base_url: String,
    api_key: String,
    /// Transport timeout, none unless configured
    timeout: Option<Duration>,
}

impl WeatherbitClient {
    /// Create a client from weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            DashboardError::config(format!(
                "The live weather source requires an API key. Set weather.api_key or {API_KEY_ENV_FALLBACK}."
            ))
        })?;
        Self::with_base_url(
            &config.base_url,
            api_key,
            config
                .timeout_seconds
                .map(|seconds| Duration::from_secs(seconds.into())),
        )
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("weatherdash/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
        })
    }

    fn current_url(&self, city: &CityRef) -> String {
        format!(
            "{}/current?city={}&country={}&key={}",
            self.base_url,
            urlencoding::encode(&city.name),
            urlencoding::encode(&city.country_code),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl WeatherSource for WeatherbitClient {
    fn name(&self) -> &'static str {
        "weatherbit"
    }

    #[instrument(skip(self, city), fields(city = %city.name, country = %city.country_code))]
    async fn current(&self, city: &CityRef) -> Result<Option<WeatherRecord>> {
        let start_time = Instant::now();

        // The URL carries the API key, keep it out of error messages.
        let response = self
            .client
            .get(self.current_url(city))
            .send()
            .await
            .map_err(|e| DashboardError::api(format!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DashboardError::api(format!(
                "Failed to read response for {}: {}",
                city.name,
                e.without_url()
            ))
        })?;
        let record = parse_current(status, &body).map_err(|e| {
            DashboardError::api(format!("Invalid weather data received for {}: {e}", city.name))
        })?;

        let elapsed = start_time.elapsed();
        debug!("Lookup finished in {:.3}s", elapsed.as_secs_f64());
        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(record)
    }
}

/// Interpret one `/current` response.
///
/// `Err` carries the parse failure; `Ok(None)` is an envelope without
/// observations, whatever the status.
fn parse_current(
    status: StatusCode,
    body: &str,
) -> std::result::Result<Option<WeatherRecord>, String> {
    if body.trim().is_empty() {
        return Err(format!("empty body (status {status})"));
    }
    let envelope: api::CurrentResponse =
        serde_json::from_str(body).map_err(|e| format!("{e} (status {status})"))?;

    if !status.is_success() {
        warn!(
            "Weatherbit returned {}: {}",
            status,
            envelope.error.as_deref().unwrap_or("no error message")
        );
    }
    let record = envelope.into_record();
    if record.is_none() {
        debug!("Weatherbit returned no observation");
    }
    Ok(record)
}

/// Weatherbit response structures
mod api {
    use serde::Deserialize;

    use crate::models::WeatherRecord;

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        #[serde(default)]
        pub data: Option<Vec<Observation>>,
        /// Present on error responses
        #[serde(default)]
        pub error: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Observation {
        pub city_name: String,
        pub country_code: String,
        pub temp: f64,
        pub weather: Condition,
        pub rh: Option<f64>,
        pub wind_spd: Option<f64>,
        pub pres: Option<f64>,
        pub vis: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: String,
        pub icon: String,
    }

    impl CurrentResponse {
        /// First observation of the envelope, if any
        pub fn into_record(self) -> Option<WeatherRecord> {
            self.data
                .and_then(|observations| observations.into_iter().next())
                .map(Observation::into_record)
        }
    }

    impl Observation {
        fn into_record(self) -> WeatherRecord {
            WeatherRecord {
                city_name: self.city_name,
                country_code: self.country_code,
                temperature_c: self.temp,
                condition_description: self.weather.description,
                condition_icon_id: self.weather.icon,
                humidity_pct: self.rh,
                wind_speed_ms: self.wind_spd,
                pressure_mb: self.pres,
                visibility_km: self.vis,
            }
        }
    }

}
