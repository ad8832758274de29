//! City model used by the registry

use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct CityRef {
    /// City name as sent to the weather service
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: String,
    /// Continent used for filtering and grouping
    pub continent: String,
}

impl CityRef {
    /// Create a new city reference
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        country_code: impl Into<String>,
        continent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country_code: country_code.into(),
            continent: continent.into(),
        }
    }

    /// Whether this city has the given name and country code
    #[must_use]
    pub fn is(&self, name: &str, country_code: &str) -> bool {
        self.name == name && self.country_code == country_code
    }

    /// Routing key for the detail view (URL-encoded city name)
    #[must_use]
    pub fn detail_key(&self) -> String {
        urlencoding::encode(&self.name).into_owned()
    }
}

impl fmt::Display for CityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} ({})", self.name, self.country_code, self.continent)
    }
}
