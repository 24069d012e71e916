// src/models/prediction.rs

use serde::{Deserialize, Serialize};

/// Autocomplete prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    /// Human-readable name of the predicted place or query
    pub description: String,
    /// Empty for query predictions that are not a single place
    pub place_id: String,
}
