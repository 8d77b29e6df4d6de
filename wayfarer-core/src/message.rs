use chrono::NaiveDate;
use wayfarer_shared::TravellerRecord;

use crate::{CoreError, CoreResult};

const SIGNATURE: &str = "Dreamy Destination";

/// "22 June 2020"
pub const DATE_FORMAT: &str = "%d %B %Y";

/// Confirmation text sent to the traveller
pub fn compose(name: &str, destination_city: &str, date: NaiveDate) -> String {
    format!(
        "Hello {name}, We are very happy to inform you that your ticket of {destination_city} \
         is confirmed on {date}.\n Thank You\n Regards\n {SIGNATURE}",
        date = date.format(DATE_FORMAT),
    )
}

/// Compose from a filled-in record: first name, destination city, departure date
pub fn compose_for(record: &TravellerRecord) -> CoreResult<String> {
    let city = record
        .destination_city()
        .ok_or(CoreError::IncompleteRecord("destination"))?;
    let date = record
        .departure_date
        .ok_or(CoreError::IncompleteRecord("departure date"))?;

    Ok(compose(&record.first_name, city, date))
}
