//! Final report produced once the whole delivery stream has been read.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The aggregate summary of a delivery stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Number of recipes that occur exactly once in the stream.
    pub unique_recipe_count: u64,
    /// Every distinct recipe with its occurrence count, sorted by name.
    pub count_per_recipe: Vec<RecipeCount>,
    pub busiest_code: PostcodeCount,
    pub count_per_postcode_and_time: PostcodeDeliveries,
    /// Recipes matching the filter words, sorted by name.
    pub match_by_name: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCount {
    pub recipe: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostcodeCount {
    pub postcode: String,
    #[serde(rename = "delivery_count")]
    pub count: u64,
}

/// Deliveries to the filter postcode inside the filter window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostcodeDeliveries {
    pub postcode: String,
    /// Opening bound, e.g. `"10AM"`.
    pub from: String,
    /// Closing bound, e.g. `"3PM"`.
    pub to: String,
    pub delivery_count: u64,
}

impl Report {
    /// Compact JSON, as printed by the CLI by default.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
