//! Weather sources
//!
//! One trait, two backends: the live Weatherbit client and a static fixture.
//! The rest of the crate only sees `dyn WeatherSource`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::Result;
use crate::config::{SourceKind, WeatherConfig};
use crate::models::{CityRef, WeatherRecord};

pub mod fixture;
pub mod weatherbit;

pub use fixture::FixtureSource;
pub use weatherbit::WeatherbitClient;

/// A provider of current weather observations
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Short backend name for logs and output
    fn name(&self) -> &'static str;

    /// Current observation for one city.
    ///
    /// `Ok(None)` means the lookup succeeded but carried no observation.
    async fn current(&self, city: &CityRef) -> Result<Option<WeatherRecord>>;
}

/// Build the backend selected by configuration
pub fn from_config(config: &WeatherConfig) -> Result<Arc<dyn WeatherSource>> {
    let source: Arc<dyn WeatherSource> = match config.source {
        SourceKind::Live => Arc::new(WeatherbitClient::new(config)?),
        SourceKind::Fixture => Arc::new(FixtureSource::default()),
    };
    info!("Using {} weather source", source.name());
    Ok(source)
}
