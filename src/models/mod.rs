//! Data models for the weather dashboard
//!
//! This module contains the core domain models organized by concern:
//! - City: Registry entries identifying a city and its continent
//! - Weather: One city's current-conditions snapshot
//! - Criteria: Filter criteria and temperature bounds for the list view

pub mod city;
pub mod criteria;
pub mod weather;

// Re-export all public types for convenient access
pub use city::CityRef;
pub use criteria::{ALL, FilterCriteria, TemperatureBounds};
pub use weather::{WeatherRecord, icon_url};
