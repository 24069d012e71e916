// src/models/photo.rs

use serde::{Deserialize, Serialize};

/// Place photo with ready-to-use image URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Photo reference, reusable with `GooglePlacesClient::photo_url` for other sizes
    pub id: String,
    /// Original height in pixels
    pub max_height: i32,
    /// Original width in pixels
    pub max_width: i32,
    /// Photo endpoint URL at the configured thumbnail size
    pub thumbnail_url: String,
    /// Photo endpoint URL at the configured big size
    pub big_url: String,
}
