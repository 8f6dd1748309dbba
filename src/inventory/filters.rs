// Request shapes accepted by the two listing entry points.
//
// Both arrive already typed from the HTTP boundary: numbers are numbers and
// repeated query keys are collected into vectors. Semantic repair happens in
// `super::sanitize`.

use serde::{Deserialize, Serialize};

// Filter request for the general listing (`GET /cars`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brand: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fuel_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transmission: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub city: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    // Only honored in the administrative scope
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sold: Option<bool>,
}

// Filter request for the public buy-cars page. Field names follow the
// public page's query string; there is deliberately no sold flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFilters {
    pub page: Option<i64>,
    #[serde(default)]
    pub brand: Vec<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    #[serde(default)]
    pub fuel: Vec<String>,
    #[serde(default)]
    pub transmission: Vec<String>,
    #[serde(default)]
    pub body_type: Vec<String>,
    pub kms_max: Option<i64>,
    pub sort: Option<String>,
}

impl PublicFilters {
    // Maps onto the general shape. Sort and `kmsMax` have no general
    // counterpart and are applied by the public listing itself.
    pub fn to_car_filters(&self) -> CarFilters {
        CarFilters {
            page: self.page,
            brand: self.brand.clone(),
            min_price: self.price_min,
            max_price: self.price_max,
            min_year: self.year_min,
            max_year: self.year_max,
            fuel_type: self.fuel.clone(),
            transmission: self.transmission.clone(),
            body_type: self.body_type.clone(),
            ..CarFilters::default()
        }
    }
}
