// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod cache;
pub mod google_places_client;
pub mod params;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use cache::*;
pub use google_places_client::*;
pub use params::*;
pub use transport::*;
