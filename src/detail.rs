//! City detail lookup
//!
//! Resolves the detail view's routing key (a URL-encoded city name) to one
//! weather record. Unknown cities and cities without data are two distinct
//! outcomes, and neither is confused with a transport failure.

use tracing::{debug, instrument};

use crate::models::{CityRef, WeatherRecord};
use crate::registry::CityRegistry;
use crate::weather::WeatherSource;
use crate::{DashboardError, Result};

/// Decode a routing key into the city name it stands for
pub fn decode_city_key(key: &str) -> Result<String> {
    urlencoding::decode(key)
        .map(|name| name.into_owned())
        .map_err(|_| DashboardError::city_not_found(key))
}

/// Registry entry for a routing key (exact, case-sensitive name match)
pub fn resolve_city<'a>(key: &str, registry: &'a CityRegistry) -> Result<&'a CityRef> {
    let name = decode_city_key(key)?;
    registry
        .find_by_name(&name)
        .ok_or_else(|| DashboardError::city_not_found(name))
}

/// Look a city up in an already loaded record set
pub fn find_city_record<'a>(
    key: &str,
    registry: &CityRegistry,
    records: &'a [WeatherRecord],
) -> Result<&'a WeatherRecord> {
    let city = resolve_city(key, registry)?;
    records
        .iter()
        .find(|record| city.is(&record.city_name, &record.country_code))
        .ok_or_else(|| DashboardError::detail_data_missing(&city.name))
}

/// Look a city up with one request to the weather source
#[instrument(skip(registry, source))]
pub async fn fetch_city_record(
    key: &str,
    registry: &CityRegistry,
    source: &dyn WeatherSource,
) -> Result<WeatherRecord> {
    let city = resolve_city(key, registry)?;
    debug!("Fetching detail for {} from {}", city, source.name());
    source
        .current(city)
        .await?
        .ok_or_else(|| DashboardError::detail_data_missing(&city.name))
}
