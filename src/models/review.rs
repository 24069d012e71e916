// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Place review from a details lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Google does not identify reviews, so this is usually empty
    pub id: String,
    pub author_name: String,
    pub profile_photo_url: String,
    pub text: String,
    /// Time of review; the Unix epoch when Google omits it
    pub time: DateTime<Utc>,
    /// Rating (1-5)
    pub rating: f32,
    pub aspects: Vec<ReviewAspect>,
    /// IETF language code of the review text
    pub language: String,
}

/// Rated aspect of a review (e.g. "food", "service")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewAspect {
    pub rating: i32,
    #[serde(rename = "type")]
    pub aspect_type: String,
}
