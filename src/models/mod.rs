// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod options;
pub mod photo;
pub mod place;
pub mod prediction;
pub mod review;

pub use options::*;
pub use photo::*;
pub use place::*;
pub use prediction::*;
pub use review::*;
