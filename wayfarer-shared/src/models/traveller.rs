use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::location::Location;

/// Kind of trip being booked
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

/// The form data describing the person and trip being booked.
///
/// Created once with empty defaults and filled in step by step. The only
/// derived field is `return_date_invalid`, which the wizard recomputes on
/// every step transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TravellerRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact: String,
    pub location: Option<Location>,
    pub trip_type: TripType,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date_invalid: bool,
}

impl TravellerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// "First Last", trimmed when either half is empty
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// True only when both dates are set and the return comes first
    pub fn return_precedes_departure(&self) -> bool {
        match (self.departure_date, self.return_date) {
            (Some(departure), Some(ret)) => ret < departure,
            _ => false,
        }
    }

    /// Recompute the derived date flag and return it
    pub fn revalidate_dates(&mut self) -> bool {
        self.return_date_invalid = self.return_precedes_departure();
        self.return_date_invalid
    }

    /// A return date implies a round trip even if the selector says one-way
    pub fn is_round_trip(&self) -> bool {
        self.trip_type == TripType::RoundTrip || self.return_date.is_some()
    }

    pub fn destination_city(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.city.as_str())
    }
}
