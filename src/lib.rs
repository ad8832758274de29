//! `Weatherdash` - current weather for the world's largest cities
//!
//! This library loads one observation per registered city, filters the set
//! by text, condition, continent and temperature range, and summarizes the
//! visible cities by continent and condition.

pub mod cli;
pub mod config;
pub mod detail;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod registry;
pub mod state;
pub mod telemetry;
pub mod weather;

// Re-export core types for public API
pub use config::{DashboardConfig, MissingObservationPolicy, SourceKind};
pub use engine::{DashboardView, StatValue, Stats};
pub use error::DashboardError;
pub use fetcher::{LoadedRecords, WeatherFetcher};
pub use models::{CityRef, FilterCriteria, TemperatureBounds, WeatherRecord};
pub use registry::CityRegistry;
pub use state::{Dashboard, LoadState};
pub use weather::{FixtureSource, WeatherSource, WeatherbitClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
