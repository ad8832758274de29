//! Filter/aggregate engine
//!
//! Pure functions over an in-memory record set: the visibility predicate,
//! option lists for the selectors, summary statistics and the grouped
//! breakdowns. Nothing here keeps state between calls, so every function is
//! safe to re-run on each criteria change.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::models::{ALL, FilterCriteria, TemperatureBounds, WeatherRecord};
use crate::registry::CityRegistry;

/// Placeholder shown for statistics of an empty set
pub const NO_DATA: &str = "-";

/// Round to one decimal place.
///
/// Works on `value * 10`, so a product that lands exactly on .5 rounds away
/// from zero: `1.15` gives `1.2` and `-1.15` gives `-1.2`, even though the
/// nearest binary value of `1.15` sits just below the tie. Formatters that
/// round the exact binary value would print `1.1` there.
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A statistic that may be undefined for an empty set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Value(f64),
    NoData,
}

impl StatValue {
    fn rounded(value: Option<f64>) -> Self {
        value.map_or(Self::NoData, |v| Self::Value(round_one_decimal(v)))
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NoData => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.1}"),
            Self::NoData => f.write_str(NO_DATA),
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

/// Summary statistics of the visible set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub count: usize,
    pub avg_temp: StatValue,
    pub min_temp: StatValue,
    pub max_temp: StatValue,
}

/// Mean temperature of one continent's visible cities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentAverage {
    pub continent: String,
    pub avg_temp: f64,
    pub count: usize,
}

/// Number of visible cities reporting one condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionCount {
    pub condition: String,
    pub count: usize,
}

/// Everything the list view renders for one criteria evaluation
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub visible: Vec<WeatherRecord>,
    pub stats: Stats,
    pub by_continent: Vec<ContinentAverage>,
    pub by_condition: Vec<ConditionCount>,
    pub conditions: Vec<String>,
    pub continents: Vec<String>,
    pub temperature_bounds: Option<TemperatureBounds>,
}

/// Whether a record passes every active filter
#[must_use]
pub fn matches(record: &WeatherRecord, criteria: &FilterCriteria, registry: &CityRegistry) -> bool {
    let search = criteria.search_text.to_lowercase();
    matches_search(record, &search) && matches_rest(record, criteria, registry)
}

fn matches_search(record: &WeatherRecord, lowercase_search: &str) -> bool {
    lowercase_search.is_empty() || record.city_name.to_lowercase().contains(lowercase_search)
}

fn matches_rest(record: &WeatherRecord, criteria: &FilterCriteria, registry: &CityRegistry) -> bool {
    let temp = record.temperature_c;
    (criteria.any_condition() || record.condition_description == criteria.condition)
        && criteria.min_temp.is_none_or(|min| temp >= min)
        && criteria.max_temp.is_none_or(|max| temp <= max)
        && (criteria.any_continent()
            || registry.continent_of(record) == Some(criteria.continent.as_str()))
}

/// The visible subset, in input order
#[must_use]
pub fn filter_records<'a>(
    records: &'a [WeatherRecord],
    criteria: &FilterCriteria,
    registry: &CityRegistry,
) -> Vec<&'a WeatherRecord> {
    let search = criteria.search_text.to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(record, &search) && matches_rest(record, criteria, registry))
        .collect()
}

/// `"All"` followed by each distinct value, in order of first occurrence
fn with_all<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for value in values {
        if !options.iter().any(|o| o == value) {
            options.push(value.to_string());
        }
    }
    options
}

/// Condition options, taken from the full record set
#[must_use]
pub fn distinct_conditions(records: &[WeatherRecord]) -> Vec<String> {
    with_all(records.iter().map(|r| r.condition_description.as_str()))
}

/// Continent options, taken from the registry
#[must_use]
pub fn distinct_continents(registry: &CityRegistry) -> Vec<String> {
    with_all(registry.cities().iter().map(|c| c.continent.as_str()))
}

/// Count, mean, min and max temperature of the visible set
#[must_use]
pub fn compute_stats(visible: &[&WeatherRecord]) -> Stats {
    let count = visible.len();
    if count == 0 {
        return Stats {
            count,
            avg_temp: StatValue::NoData,
            min_temp: StatValue::NoData,
            max_temp: StatValue::NoData,
        };
    }

    let temps = visible.iter().map(|r| r.temperature_c);
    let sum: f64 = temps.clone().sum();
    let min = temps.clone().fold(f64::INFINITY, f64::min);
    let max = temps.fold(f64::NEG_INFINITY, f64::max);

    Stats {
        count,
        avg_temp: StatValue::rounded(Some(sum / count as f64)),
        min_temp: StatValue::rounded(Some(min)),
        max_temp: StatValue::rounded(Some(max)),
    }
}

/// Mean temperature per continent; unregistered records belong to no group
#[must_use]
pub fn continent_breakdown(
    visible: &[&WeatherRecord],
    registry: &CityRegistry,
) -> Vec<ContinentAverage> {
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    for record in visible {
        let Some(continent) = registry.continent_of(record) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _, _)| *name == continent) {
            Some((_, sum, count)) => {
                *sum += record.temperature_c;
                *count += 1;
            }
            None => groups.push((continent, record.temperature_c, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(continent, sum, count)| ContinentAverage {
            continent: continent.to_string(),
            avg_temp: round_one_decimal(sum / count as f64),
            count,
        })
        .collect()
}

/// Visible record count per condition description
#[must_use]
pub fn condition_distribution(visible: &[&WeatherRecord]) -> Vec<ConditionCount> {
    let mut counts: Vec<ConditionCount> = Vec::new();
    for record in visible {
        match counts
            .iter_mut()
            .find(|c| c.condition == record.condition_description)
        {
            Some(entry) => entry.count += 1,
            None => counts.push(ConditionCount {
                condition: record.condition_description.clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// Evaluate criteria against the full record set
#[must_use]
pub fn evaluate(
    records: &[WeatherRecord],
    criteria: &FilterCriteria,
    registry: &CityRegistry,
) -> DashboardView {
    let visible = filter_records(records, criteria, registry);
    DashboardView {
        criteria: criteria.clone(),
        stats: compute_stats(&visible),
        by_continent: continent_breakdown(&visible, registry),
        by_condition: condition_distribution(&visible),
        conditions: distinct_conditions(records),
        continents: distinct_continents(registry),
        temperature_bounds: TemperatureBounds::from_records(records),
        visible: visible.into_iter().cloned().collect(),
    }
}
