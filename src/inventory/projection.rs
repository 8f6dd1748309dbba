// List/grid projection: the light subset of a car sent to listing pages.
// A store adapter fetches exactly these fields, with `images` sliced to one.
// Media arrays, spec-sheet sections and SEO fields stay on the detail page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Car, CarImage, Location};
use crate::vocabulary::{BodyType, FuelType, Transmission};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub year: i32,
    pub kms_driven: i64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub body_type: BodyType,
    pub color: Option<String>,
    pub owners: u32,
    pub location: Location,
    pub is_featured: bool,
    pub is_sold: bool,
    pub brand: String,
    pub created_at: DateTime<Utc>,
    // At most one element
    pub images: Vec<CarImage>,
}

impl From<&Car> for CarSummary {
    fn from(car: &Car) -> Self {
        CarSummary {
            id: car.id.clone(),
            name: car.name.clone(),
            slug: car.slug.clone(),
            price: car.price,
            year: car.year,
            kms_driven: car.kms_driven,
            fuel_type: car.fuel_type,
            transmission: car.transmission,
            body_type: car.body_type,
            color: car.color.clone(),
            owners: car.owners,
            location: car.location.clone(),
            is_featured: car.is_featured,
            is_sold: car.is_sold,
            brand: car.brand.clone(),
            created_at: car.created_at,
            // First stored image, not the one flagged primary
            images: car.images.iter().take(1).cloned().collect(),
        }
    }
}
