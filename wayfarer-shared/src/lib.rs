pub mod models;
pub mod secret;

pub use models::location::{Location, LocationCatalog};
pub use models::mail::{MailRequest, RelayFailure, RelaySuccess};
pub use models::traveller::{TravellerRecord, TripType};
pub use secret::Secret;
