// Faceted counts for the filter sidebar.
//
// Always computed against the scope's base predicate, never the user's
// active filters, so that options the user has not picked still show how
// many cars they would add.

use chrono::{Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::StoreError;
use crate::store::{Bounds, BrandRepository, CarRepository, Facet, FacetCount, NumericField};

use super::query::CarQuery;

pub const DEFAULT_PRICE_RANGE: Bounds = Bounds { min: 0, max: 10_000_000 };
pub const DEFAULT_MIN_YEAR: i64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandFacet {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub brands: Vec<BrandFacet>,
    pub fuel_types: Vec<FacetCount>,
    pub body_types: Vec<FacetCount>,
    pub transmissions: Vec<FacetCount>,
    pub price_range: Bounds,
    pub year_range: Bounds,
}

impl FilterStats {
    // Zeroed stats used whenever the aggregation cannot be trusted.
    pub fn fallback() -> Self {
        FilterStats {
            brands: Vec::new(),
            fuel_types: Vec::new(),
            body_types: Vec::new(),
            transmissions: Vec::new(),
            price_range: DEFAULT_PRICE_RANGE,
            year_range: default_year_range(),
        }
    }
}

fn default_year_range() -> Bounds {
    Bounds {
        min: DEFAULT_MIN_YEAR,
        max: i64::from(Utc::now().year()),
    }
}

// Count descending, then value for a stable order
fn sort_by_count(mut buckets: Vec<FacetCount>) -> Vec<FacetCount> {
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    buckets
}

// Runs every facet aggregation concurrently. Never fails: any storage
// error is logged and replaced by `FilterStats::fallback`.
pub async fn collect_filter_stats<C, B>(cars: &C, brands: &B, base: &CarQuery) -> FilterStats
where
    C: CarRepository,
    B: BrandRepository,
{
    match try_collect(cars, brands, base).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!(error = %e, "Filter stats aggregation failed; using defaults");
            FilterStats::fallback()
        }
    }
}

async fn try_collect<C, B>(cars: &C, brands: &B, base: &CarQuery) -> Result<FilterStats, StoreError>
where
    C: CarRepository,
    B: BrandRepository,
{
    let (by_brand, fuel_types, body_types, transmissions, price, year) = futures::try_join!(
        cars.group_count(base, Facet::Brand),
        cars.group_count(base, Facet::FuelType),
        cars.group_count(base, Facet::BodyType),
        cars.group_count(base, Facet::Transmission),
        cars.bounds(base, NumericField::Price),
        cars.bounds(base, NumericField::Year),
    )?;

    // $lookup step: brand ids -> name/slug
    let ids: Vec<String> = by_brand.iter().map(|bucket| bucket.value.clone()).collect();
    let known: HashMap<String, (String, String)> = if ids.is_empty() {
        HashMap::new()
    } else {
        brands
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|brand| (brand.id, (brand.name, brand.slug)))
            .collect()
    };

    let brand_facets = sort_by_count(by_brand)
        .into_iter()
        .map(|bucket| {
            let (name, slug) = known
                .get(&bucket.value)
                .cloned()
                .unwrap_or_else(|| ("Unknown".to_string(), String::new()));
            BrandFacet {
                id: bucket.value,
                name,
                slug,
                count: bucket.count,
            }
        })
        .collect();

    Ok(FilterStats {
        brands: brand_facets,
        fuel_types: sort_by_count(fuel_types),
        body_types: sort_by_count(body_types),
        transmissions: sort_by_count(transmissions),
        price_range: price.unwrap_or(DEFAULT_PRICE_RANGE),
        year_range: year.unwrap_or_else(default_year_range),
    })
}
