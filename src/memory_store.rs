// Read-only in-memory document store backing both repositories.
// Loaded once from a JSON seed file; evaluates the typed predicate directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::error::StoreError;
use crate::inventory::pagination::PageWindow;
use crate::inventory::projection::CarSummary;
use crate::inventory::query::{CarPredicate, CarQuery, ListingScope};
use crate::inventory::sort::SortSpec;
use crate::models::{Brand, Car};
use crate::store::{Bounds, BrandRepository, CarRepository, Facet, FacetCount, NumericField};
use crate::vocabulary::{SortField, SortOrder, Vocabulary};

#[derive(Debug, Deserialize)]
struct Seed {
    #[serde(default)]
    brands: Vec<Brand>,
    #[serde(default)]
    cars: Vec<Car>,
}

#[derive(Debug)]
struct Catalog {
    cars: Vec<Car>,
    brands: Vec<Brand>,
}

// Cheap to clone; clones share the same catalog.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    catalog: Arc<Catalog>,
}

impl InMemoryStore {
    pub fn new(cars: Vec<Car>, brands: Vec<Brand>) -> Self {
        InMemoryStore {
            catalog: Arc::new(Catalog { cars, brands }),
        }
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let store = Self::from_seed_json(&raw)
            .with_context(|| format!("Failed to load seed file {}", path.display()))?;
        Ok(store)
    }

    pub fn from_seed_json(raw: &str) -> Result<Self> {
        let seed: Seed = serde_json::from_str(raw).context("Seed file is not valid catalog JSON")?;
        check_unique(seed.cars.iter().map(|car| car.slug.as_str()), "car slug")?;
        check_unique(seed.brands.iter().map(|brand| brand.slug.as_str()), "brand slug")?;
        Ok(Self::new(seed.cars, seed.brands))
    }

    pub fn car_count(&self) -> usize {
        self.catalog.cars.len()
    }

    pub fn brand_count(&self) -> usize {
        self.catalog.brands.len()
    }

    fn matching<'a>(&'a self, query: &'a CarQuery) -> impl Iterator<Item = &'a Car> + 'a {
        let predicate = match query {
            CarQuery::Match(predicate) => Some(predicate),
            CarQuery::Nothing => None,
        };
        self.catalog
            .cars
            .iter()
            .filter(move |car| predicate.is_some_and(|p| matches(p, car)))
    }
}

fn check_unique<'a>(slugs: impl Iterator<Item = &'a str>, what: &str) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(StoreError::Corrupt(format!("duplicate {} '{}'", what, slug)));
        }
    }
    Ok(())
}

fn matches(predicate: &CarPredicate, car: &Car) -> bool {
    if predicate.visible_only && (!car.is_active || car.is_deleted) {
        return false;
    }
    predicate.brand_ids.as_ref().is_none_or(|ids| ids.contains(&car.brand))
        && predicate.price.contains(car.price)
        && predicate.year.contains(car.year)
        && predicate.kms_driven.contains(car.kms_driven)
        && predicate.fuel_type.as_ref().is_none_or(|f| f.contains(&car.fuel_type))
        && predicate.transmission.as_ref().is_none_or(|t| t.contains(&car.transmission))
        && predicate.body_type.as_ref().is_none_or(|b| b.contains(&car.body_type))
        && predicate.city.as_ref().is_none_or(|c| c.contains(&car.location.city))
        && predicate.is_featured.is_none_or(|featured| car.is_featured == featured)
        && predicate.is_sold.is_none_or(|sold| car.is_sold == sold)
        && predicate.text.as_deref().is_none_or(|text| text_matches(car, text))
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

// Text-index semantics: any search term matching any indexed word
fn text_matches(car: &Car, search: &str) -> bool {
    let indexed: HashSet<String> = tokens(&car.name)
        .chain(tokens(&car.description))
        .chain(car.features.iter().flat_map(|feature| tokens(feature)))
        .collect();
    tokens(search).any(|term| indexed.contains(&term))
}

fn compare(a: &Car, b: &Car, sort: SortSpec) -> Ordering {
    let by_field = match sort.field {
        SortField::Price => a.price.cmp(&b.price),
        SortField::Year => a.year.cmp(&b.year),
        SortField::KmsDriven => a.kms_driven.cmp(&b.kms_driven),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    let by_field = match sort.order {
        SortOrder::Asc => by_field,
        SortOrder::Desc => by_field.reverse(),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

impl CarRepository for InMemoryStore {
    async fn find(
        &self,
        query: &CarQuery,
        sort: SortSpec,
        window: PageWindow,
    ) -> Result<Vec<CarSummary>, StoreError> {
        let mut hits: Vec<&Car> = self.matching(query).collect();
        hits.sort_by(|a, b| compare(a, b, sort));
        Ok(hits
            .into_iter()
            .skip(window.skip() as usize)
            .take(window.limit as usize)
            .map(CarSummary::from)
            .collect())
    }

    async fn count(&self, query: &CarQuery) -> Result<u64, StoreError> {
        Ok(self.matching(query).count() as u64)
    }

    async fn group_count(&self, query: &CarQuery, facet: Facet) -> Result<Vec<FacetCount>, StoreError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for car in self.matching(query) {
            let key = match facet {
                Facet::Brand => car.brand.clone(),
                Facet::FuelType => car.fuel_type.as_str().to_string(),
                Facet::BodyType => car.body_type.as_str().to_string(),
                Facet::Transmission => car.transmission.as_str().to_string(),
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(value, count)| FacetCount { value, count })
            .collect())
    }

    async fn bounds(&self, query: &CarQuery, field: NumericField) -> Result<Option<Bounds>, StoreError> {
        let bounds = self
            .matching(query)
            .map(|car| match field {
                NumericField::Price => car.price,
                NumericField::Year => i64::from(car.year),
            })
            .fold(None, |acc: Option<Bounds>, value| {
                Some(match acc {
                    None => Bounds { min: value, max: value },
                    Some(b) => Bounds {
                        min: b.min.min(value),
                        max: b.max.max(value),
                    },
                })
            });
        Ok(bounds)
    }

    async fn find_by_slug(&self, slug: &str, scope: ListingScope) -> Result<Option<Car>, StoreError> {
        Ok(self
            .catalog
            .cars
            .iter()
            .find(|car| {
                car.slug == slug
                    && (scope.includes_inactive() || (car.is_active && !car.is_deleted))
            })
            .cloned())
    }
}

impl BrandRepository for InMemoryStore {
    async fn find_active_ids_by_slugs(&self, slugs: &[String]) -> Result<Vec<String>, StoreError> {
        Ok(self
            .catalog
            .brands
            .iter()
            .filter(|brand| brand.is_active && !brand.is_deleted && slugs.contains(&brand.slug))
            .map(|brand| brand.id.clone())
            .collect())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Brand>, StoreError> {
        Ok(self
            .catalog
            .brands
            .iter()
            .filter(|brand| ids.contains(&brand.id))
            .cloned()
            .collect())
    }
}
