pub mod location;
pub mod mail;
pub mod traveller;
