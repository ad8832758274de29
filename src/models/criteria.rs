//! Filter criteria for the list view

use serde::{Deserialize, Serialize};

use super::WeatherRecord;

/// Option value that disables the condition or continent filter
pub const ALL: &str = "All";

/// Criteria the list view is filtered by
///
/// Passed by reference into the engine on every evaluation; the engine keeps
/// no state between calls.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the city name; empty matches everything
    pub search_text: String,
    /// Exact condition description, or `"All"`
    pub condition: String,
    /// Continent name, or `"All"`
    pub continent: String,
    /// Inclusive lower temperature bound in Celsius
    pub min_temp: Option<f64>,
    /// Inclusive upper temperature bound in Celsius
    pub max_temp: Option<f64>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            condition: ALL.to_string(),
            continent: ALL.to_string(),
            min_temp: None,
            max_temp: None,
        }
    }
}

impl FilterCriteria {
    /// Fill unset temperature bounds from the loaded data's range.
    ///
    /// Bounds the user already chose are kept. With no data there is nothing
    /// to fill and the criteria come back unchanged.
    #[must_use]
    pub fn with_default_bounds(mut self, bounds: Option<TemperatureBounds>) -> Self {
        if let Some(bounds) = bounds {
            self.min_temp.get_or_insert(bounds.min);
            self.max_temp.get_or_insert(bounds.max);
        }
        self
    }

    /// Whether no condition filter is active
    #[must_use]
    pub fn any_condition(&self) -> bool {
        self.condition == ALL
    }

    /// Whether no continent filter is active
    #[must_use]
    pub fn any_continent(&self) -> bool {
        self.continent == ALL
    }
}

/// Whole-degree temperature range covering a record set
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TemperatureBounds {
    /// Floor of the lowest temperature
    pub min: f64,
    /// Ceiling of the highest temperature
    pub max: f64,
}

impl TemperatureBounds {
    /// Bounds of the given records, `None` when there are none
    #[must_use]
    pub fn from_records(records: &[WeatherRecord]) -> Option<Self> {
        let mut temps = records.iter().map(|r| r.temperature_c);
        let first = temps.next()?;
        let (min, max) = temps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self {
            min: min.floor(),
            max: max.ceil(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let criteria = FilterCriteria::default();
        assert!(criteria.search_text.is_empty());
        assert!(criteria.any_condition());
        assert!(criteria.any_continent());
        assert!(criteria.min_temp.is_none());
        assert!(criteria.max_temp.is_none());
    }

    #[test]
    fn test_bounds_are_whole_degrees() {
        let records = vec![
            WeatherRecord::new("Oslo", "NO", -3.4, "Light snow", "s01d"),
            WeatherRecord::new("Lagos", "NG", 30.2, "Clear sky", "c01d"),
            WeatherRecord::new("Tokyo", "JP", 18.0, "Rain", "r01d"),
        ];
        let bounds = TemperatureBounds::from_records(&records).unwrap();
        assert_eq!(bounds.min, -4.0);
        assert_eq!(bounds.max, 31.0);

        let criteria = FilterCriteria::default().with_default_bounds(Some(bounds));
        assert_eq!(criteria.min_temp, Some(-4.0));
        assert_eq!(criteria.max_temp, Some(31.0));
        assert!(criteria.any_condition());
    }

    #[test]
    fn test_default_bounds_keep_user_choice() {
        let bounds = TemperatureBounds { min: 4.0, max: 35.0 };
        let criteria = FilterCriteria {
            min_temp: Some(20.0),
            ..FilterCriteria::default()
        }
        .with_default_bounds(Some(bounds));
        assert_eq!(criteria.min_temp, Some(20.0));
        assert_eq!(criteria.max_temp, Some(35.0));

        let untouched = FilterCriteria::default().with_default_bounds(None);
        assert_eq!(untouched, FilterCriteria::default());
    }

    #[test]
    fn test_bounds_of_empty_set() {
        assert!(TemperatureBounds::from_records(&[]).is_none());
    }

    #[test]
    fn test_partial_criteria_deserialize_with_defaults() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"continent":"Asia"}"#).unwrap();
        assert_eq!(criteria.continent, "Asia");
        assert_eq!(criteria.condition, ALL);
        assert!(criteria.min_temp.is_none());
    }
}
