//! Static weather fixture
//!
//! Hard-coded records for most of the built-in cities. Cities missing from
//! the fixture resolve to "no observation", the same as an empty live
//! response.

use async_trait::async_trait;

use super::WeatherSource;
use crate::Result;
use crate::models::{CityRef, WeatherRecord};

/// city, country, temp, description, icon, humidity, wind, pressure, visibility
type FixtureRow = (&'static str, &'static str, f64, &'static str, &'static str, f64, f64, f64, f64);

const FIXTURE_ROWS: &[FixtureRow] = &[
    ("Tokyo", "JP", 18.0, "Light rain", "r01d", 82.0, 3.1, 1012.0, 8.0),
    ("Delhi", "IN", 33.4, "Haze", "a05d", 41.0, 2.4, 1004.0, 3.0),
    ("Shanghai", "CN", 22.1, "Overcast clouds", "c04d", 70.0, 4.0, 1013.0, 10.0),
    ("São Paulo", "BR", 24.6, "Scattered clouds", "c02d", 65.0, 2.9, 1017.0, 10.0),
    ("Mexico City", "MX", 19.8, "Few clouds", "c02d", 48.0, 2.2, 1022.0, 12.0),
    ("Cairo", "EG", 31.0, "Clear sky", "c01d", 30.0, 4.6, 1011.0, 16.0),
    ("Mumbai", "IN", 30.2, "Haze", "a05d", 74.0, 3.6, 1007.0, 4.0),
    ("Beijing", "CN", 16.5, "Clear sky", "c01d", 35.0, 3.0, 1019.0, 16.0),
    ("Osaka", "JP", 19.3, "Broken clouds", "c03d", 69.0, 2.7, 1013.0, 10.0),
    ("New York", "US", 12.7, "Broken clouds", "c03d", 58.0, 5.1, 1016.0, 16.0),
    ("Buenos Aires", "AR", 15.2, "Light rain", "r01d", 88.0, 6.2, 1009.0, 7.0),
    ("Istanbul", "TR", 17.9, "Few clouds", "c02d", 67.0, 4.8, 1015.0, 10.0),
    ("Kolkata", "IN", 29.1, "Thunderstorm with rain", "t01d", 85.0, 5.5, 1003.0, 5.0),
    ("Lagos", "NG", 30.0, "Clear sky", "c01d", 78.0, 3.3, 1010.0, 10.0),
    ("Manila", "PH", 31.6, "Scattered clouds", "c02d", 72.0, 3.9, 1008.0, 10.0),
    ("Rio de Janeiro", "BR", 26.4, "Clear sky", "c01d", 70.0, 3.0, 1014.0, 16.0),
    ("Los Angeles", "US", 21.3, "Clear sky", "c01d", 52.0, 2.1, 1015.0, 16.0),
    ("Moscow", "RU", 4.2, "Overcast clouds", "c04d", 80.0, 4.4, 1020.0, 10.0),
    ("Paris", "FR", 11.6, "Light rain", "r01d", 84.0, 4.9, 1011.0, 9.0),
    ("London", "GB", 10.4, "Fog", "a05d", 93.0, 2.0, 1012.0, 1.0),
    ("Jakarta", "ID", 32.0, "Thunderstorm with rain", "t01d", 76.0, 2.6, 1008.0, 6.0),
    ("Lima", "PE", 18.9, "Overcast clouds", "c04d", 79.0, 3.4, 1013.0, 10.0),
    ("Bangkok", "TH", 34.1, "Few clouds", "c02d", 60.0, 2.8, 1006.0, 10.0),
    ("Seoul", "KR", 14.3, "Clear sky", "c01d", 46.0, 3.7, 1021.0, 16.0),
    ("Nairobi", "KE", 21.7, "Scattered clouds", "c02d", 55.0, 4.1, 1018.0, 10.0),
    ("Johannesburg", "ZA", 20.5, "Clear sky", "c01d", 32.0, 3.6, 1024.0, 16.0),
    ("Toronto", "CA", 6.8, "Light snow", "s01d", 75.0, 5.7, 1017.0, 5.0),
    ("Berlin", "DE", 9.1, "Broken clouds", "c03d", 71.0, 4.5, 1014.0, 10.0),
    ("Sydney", "AU", 23.2, "Few clouds", "c02d", 63.0, 5.9, 1016.0, 10.0),
    ("Melbourne", "AU", 17.4, "Moderate rain", "r02d", 81.0, 6.8, 1010.0, 8.0),
];

/// Weather source serving a fixed record set without network access
#[derive(Debug, Clone)]
pub struct FixtureSource {
    records: Vec<WeatherRecord>,
}

impl FixtureSource {
    /// Serve the given records
    #[must_use]
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Self { records }
    }

    /// The records this fixture serves
    #[must_use]
    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        let records = FIXTURE_ROWS
            .iter()
            .map(
                |&(city, country, temp, description, icon, humidity, wind, pressure, visibility)| {
                    WeatherRecord {
                        humidity_pct: Some(humidity),
                        wind_speed_ms: Some(wind),
                        pressure_mb: Some(pressure),
                        visibility_km: Some(visibility),
                        ..WeatherRecord::new(city, country, temp, description, icon)
                    }
                },
            )
            .collect();
        Self::new(records)
    }
}

#[async_trait]
impl WeatherSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn current(&self, city: &CityRef) -> Result<Option<WeatherRecord>> {
        Ok(self
            .records
            .iter()
            .find(|record| city.is(&record.city_name, &record.country_code))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CityRegistry;

    #[tokio::test]
    async fn test_fixture_serves_registered_city() {
        let source = FixtureSource::default();
        let tokyo = CityRef::new("Tokyo", "JP", "Asia");
        let record = source.current(&tokyo).await.unwrap().unwrap();
        assert_eq!(record.condition_description, "Light rain");
        assert_eq!(record.humidity_pct, Some(82.0));
    }

    #[tokio::test]
    async fn test_fixture_has_gaps() {
        let source = FixtureSource::default();
        let dhaka = CityRef::new("Dhaka", "BD", "Asia");
        assert!(source.current(&dhaka).await.unwrap().is_none());
    }

    #[test]
    fn test_fixture_cities_are_registered() {
        let registry = CityRegistry::top_cities();
        let source = FixtureSource::default();
        for record in source.records() {
            assert!(
                registry.city_for(record).is_some(),
                "{} is not in the registry",
                record.city_name
            );
        }
        assert!(source.records().len() < registry.len());
    }
}
