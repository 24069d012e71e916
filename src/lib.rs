// src/lib.rs
// DOCUMENTATION: Google Places API client library
// PURPOSE: Typed search, details, autocomplete and photo calls with response caching

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::PlacesConfig;
pub use errors::PlacesError;
pub use models::*;
pub use services::{GooglePlacesClient, NoCache, PlacesCache, ResponseCache, ReqwestTransport, Transport};
