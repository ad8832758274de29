//! Weather fetcher
//!
//! Runs one load cycle: a lookup per registered city, launched together and
//! joined once. Any failed lookup abandons the batch; there is no partial
//! result and no retry.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::config::MissingObservationPolicy;
use crate::models::{CityRef, WeatherRecord};
use crate::registry::CityRegistry;
use crate::weather::WeatherSource;
use crate::{DashboardError, Result};

/// Result of one successful load cycle
#[derive(Debug, Clone, Serialize)]
pub struct LoadedRecords {
    /// One record per city that returned an observation, in registry order
    pub records: Vec<WeatherRecord>,
    /// Cities without an observation (only filled under the warn policy)
    pub missing: Vec<CityRef>,
    /// Backend that served the cycle
    pub source: &'static str,
    /// When the cycle completed
    pub loaded_at: DateTime<Utc>,
}

/// Fetches the full record set from a weather source
#[derive(Clone)]
pub struct WeatherFetcher {
    source: Arc<dyn WeatherSource>,
    policy: MissingObservationPolicy,
}

impl WeatherFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn WeatherSource>, policy: MissingObservationPolicy) -> Self {
        Self { source, policy }
    }

    /// The underlying weather source
    #[must_use]
    pub fn source(&self) -> &dyn WeatherSource {
        self.source.as_ref()
    }

    /// Fetch current weather for every registered city
    #[instrument(skip_all, fields(source = self.source.name(), cities = registry.len()))]
    pub async fn load_all(&self, registry: &CityRegistry) -> Result<LoadedRecords> {
        let start_time = Instant::now();
        info!("Fetching weather for {} cities", registry.len());

        let lookups = registry.cities().iter().map(|city| async move {
            self.source
                .current(city)
                .await
                .map(|observation| (city, observation))
        });

        let results = try_join_all(lookups).await.map_err(|e| {
            error!("Weather batch failed: {}", e);
            DashboardError::fetch_batch_failed(e.to_string())
        })?;

        let mut records = Vec::with_capacity(results.len());
        let mut missing = Vec::new();
        for (city, observation) in results {
            match observation {
                Some(record) => records.push(record),
                None => self.on_missing(city, &mut missing),
            }
        }

        info!(
            "Loaded {} of {} cities in {:.3}s",
            records.len(),
            registry.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(LoadedRecords {
            records,
            missing,
            source: self.source.name(),
            loaded_at: Utc::now(),
        })
    }

    fn on_missing(&self, city: &CityRef, missing: &mut Vec<CityRef>) {
        match self.policy {
            MissingObservationPolicy::Drop => {
                debug!("Dropping {} ({}): no observation", city.name, city.country_code);
            }
            MissingObservationPolicy::Warn => {
                let err = DashboardError::NoObservationForCity {
                    city: city.name.clone(),
                    country_code: city.country_code.clone(),
                };
                warn!("{}", err);
                missing.push(city.clone());
            }
        }
    }
}
