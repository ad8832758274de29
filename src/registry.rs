//! City registry
//!
//! The fixed catalog of cities that drives the batch of weather lookups and
//! classifies the returned records by continent.

use std::collections::HashMap;

use crate::models::{CityRef, WeatherRecord};

/// Built-in city list: name, country code, continent
const TOP_CITIES: &[(&str, &str, &str)] = &[
    ("Tokyo", "JP", "Asia"),
    ("Delhi", "IN", "Asia"),
    ("Shanghai", "CN", "Asia"),
    ("São Paulo", "BR", "South America"),
    ("Mexico City", "MX", "North America"),
    ("Cairo", "EG", "Africa"),
    ("Mumbai", "IN", "Asia"),
    ("Beijing", "CN", "Asia"),
    ("Dhaka", "BD", "Asia"),
    ("Osaka", "JP", "Asia"),
    ("New York", "US", "North America"),
    ("Karachi", "PK", "Asia"),
    ("Buenos Aires", "AR", "South America"),
    ("Istanbul", "TR", "Europe"),
    ("Kolkata", "IN", "Asia"),
    ("Lagos", "NG", "Africa"),
    ("Manila", "PH", "Asia"),
    ("Rio de Janeiro", "BR", "South America"),
    ("Los Angeles", "US", "North America"),
    ("Moscow", "RU", "Europe"),
    ("Paris", "FR", "Europe"),
    ("London", "GB", "Europe"),
    ("Jakarta", "ID", "Asia"),
    ("Lima", "PE", "South America"),
    ("Bangkok", "TH", "Asia"),
    ("Seoul", "KR", "Asia"),
    ("Nairobi", "KE", "Africa"),
    ("Johannesburg", "ZA", "Africa"),
    ("Toronto", "CA", "North America"),
    ("Berlin", "DE", "Europe"),
    ("Sydney", "AU", "Oceania"),
    ("Melbourne", "AU", "Oceania"),
];

/// Immutable city catalog with a `(name, country_code)` index
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: Vec<CityRef>,
    index: HashMap<(String, String), usize>,
}

impl CityRegistry {
    /// Build a registry from a list of cities.
    ///
    /// When two entries share a name and country code, the first one wins.
    #[must_use]
    pub fn new(cities: Vec<CityRef>) -> Self {
        let mut index = HashMap::with_capacity(cities.len());
        for (position, city) in cities.iter().enumerate() {
            index
                .entry((city.name.clone(), city.country_code.clone()))
                .or_insert(position);
        }
        Self { cities, index }
    }

    /// The built-in list of world cities
    #[must_use]
    pub fn top_cities() -> Self {
        Self::new(
            TOP_CITIES
                .iter()
                .map(|(name, country, continent)| CityRef::new(*name, *country, *continent))
                .collect(),
        )
    }

    /// All registered cities in registration order
    #[must_use]
    pub fn cities(&self) -> &[CityRef] {
        &self.cities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Resolve a city by its identity
    #[must_use]
    pub fn resolve(&self, name: &str, country_code: &str) -> Option<&CityRef> {
        self.index
            .get(&(name.to_string(), country_code.to_string()))
            .and_then(|&i| self.cities.get(i))
    }

    /// Registry entry a record belongs to, joined by name and country code
    #[must_use]
    pub fn city_for(&self, record: &WeatherRecord) -> Option<&CityRef> {
        self.resolve(&record.city_name, &record.country_code)
    }

    /// Continent of a record, `None` for unregistered cities
    #[must_use]
    pub fn continent_of(&self, record: &WeatherRecord) -> Option<&str> {
        self.city_for(record).map(|city| city.continent.as_str())
    }

    /// First city with exactly this name (case-sensitive)
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CityRef> {
        self.cities.iter().find(|city| city.name == name)
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::top_cities()
    }
}
