// Persisted catalog entities, as stored in the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocabulary::{BodyType, FuelType, Transmission};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarImage {
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub state: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

// Free-form key/value block shown on the detail page ("Engine", "Comfort", ...)
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SpecSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<SpecItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpecItem {
    pub key: String,
    pub value: String,
}

// A catalog listing.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub slug: String, // Immutable once created
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub brand: String, // Brand id, resolved from slug at query time
    pub price: i64,
    pub year: i32,
    pub kms_driven: i64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub body_type: BodyType,
    pub color: Option<String>,
    #[serde(default = "default_owners")]
    pub owners: u32,
    pub location: Location,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<CarImage>,
    #[serde(default)]
    pub slider_videos: Vec<String>,
    #[serde(default)]
    pub reel_videos: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SpecSection>,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

fn default_true() -> bool {
    true
}

fn default_owners() -> u32 {
    1
}
