// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Typed results produced from search and details responses

use serde::{Deserialize, Serialize};

use super::{Photo, Review};

/// Place summary from a search result list
/// DOCUMENTATION: Produced by nearby, text and radar search.
/// Every field falls back to its empty value when Google omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacePreview {
    /// Google Place ID
    pub id: String,

    pub name: String,

    /// Price level (0-4: free to very expensive)
    pub price_level: i32,

    /// Rating (0-5)
    pub rating: f32,

    /// Formatted address, or vicinity when only that is returned
    pub address: String,

    /// Coordinates, only set when the result carries a geometry
    pub lat: f64,
    pub lng: f64,

    /// Whether the place is currently open, only set when opening hours are present
    pub open_now: bool,
}

/// Complete place record from a details lookup
/// DOCUMENTATION: Produced by place details, including nested photos and reviews
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Google Place ID
    pub id: String,

    pub name: String,

    /// Formatted address
    pub address: String,

    /// Review summary (premium data, usually empty)
    pub description: String,

    /// Phone number (formatted for local use)
    pub phone: String,

    pub website: String,

    /// Google Maps URL
    pub google_url: String,

    /// Price level (0-4)
    pub price_level: i32,

    /// Rating (0-5)
    pub rating: f32,

    /// Number of user ratings
    pub ratings_count: i32,

    /// Whether the place is currently open
    pub open_now: bool,

    /// Today's hours without the day label, e.g. "9:00 AM – 5:00 PM"
    pub open_now_hours: String,

    /// Regular opening hours, one line per weekday starting Monday
    pub opening_hours: Vec<String>,

    pub address_components: Vec<AddressComponent>,

    pub geometry: Geometry,

    /// Icon URL
    pub icon: String,

    /// Reviews in API order
    pub reviews: Vec<Review>,

    /// Photos in API order
    pub photos: Vec<Photo>,
}

/// Address component (city, district, postal code, etc.)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    /// Long name (e.g., "Zaragoza", "50001")
    pub long_name: String,
    /// Short name (e.g., "Zaragoza", "50001")
    pub short_name: String,
    /// Types of this component (e.g., ["locality", "political"])
    pub types: Vec<String>,
}

/// Geographic location and bounds of a place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: LatLng,
    /// Recommended viewport for displaying the place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// Coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}
