use serde::{Deserialize, Serialize};

/// A selectable destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub state: String,
}

impl Location {
    pub fn new(city: &str, country: &str, state: &str) -> Self {
        Self {
            city: city.trim().to_string(),
            country: country.trim().to_string(),
            state: state.trim().to_string(),
        }
    }
}

/// Enumerated lookup backing the destination selector
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    locations: Vec<Location>,
}

impl LocationCatalog {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    /// City names in catalogue order
    pub fn cities(&self) -> Vec<&str> {
        self.locations.iter().map(|l| l.city.as_str()).collect()
    }

    /// Case-insensitive lookup by city name
    pub fn find_city(&self, city: &str) -> Option<&Location> {
        let wanted = city.trim();
        self.locations
            .iter()
            .find(|l| l.city.eq_ignore_ascii_case(wanted))
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::new(vec![
            Location::new("Pune", "India", "Maharashtra"),
            Location::new("Mumbai", "India", "Maharashtra"),
            Location::new("Ahmednagar", "India", "Kerela"),
            Location::new("Satara", "India", "Kerela"),
            Location::new("Boston", "United States", "Washington"),
            Location::new("New York", "United States", "California"),
            Location::new("Chicago", "United States", "California"),
            Location::new("San Francisco", "United States", "Washington"),
        ])
    }
}
