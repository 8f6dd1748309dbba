// Typed query representation and the builder that produces it.
//
// Filters accumulate into a `CarPredicate` of optional clauses. A filter
// that provably matches nothing (unknown brand, only invalid enum values)
// turns the whole query into `CarQuery::Nothing` and stops the build.
// Conversion to the document store's predicate dialect happens only in
// `CarQuery::to_document`.

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::brand_resolver::resolve_brand_ids;
use super::filters::CarFilters;
use crate::error::StoreError;
use crate::store::BrandRepository;
use crate::vocabulary::{BodyType, FuelType, Transmission, Vocabulary};

// Visibility mode, chosen by each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingScope {
    // Storefront: only active, non-deleted cars; sold flag not client-controlled.
    #[default]
    Public,
    // Back office: inactive and deleted cars included, sold flag honored.
    Admin,
}

impl ListingScope {
    pub fn includes_inactive(&self) -> bool {
        matches!(self, ListingScope::Admin)
    }

    pub fn honors_sold_flag(&self) -> bool {
        matches!(self, ListingScope::Admin)
    }
}

// Inclusive numeric range; each side present only if the caller gave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Range { min: None, max: None }
    }
}

impl<T: PartialOrd + Copy + Serialize> Range<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Range { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    // Tightens the upper bound, keeping whichever is smaller.
    pub fn cap_max(&mut self, cap: T) {
        self.max = match self.max {
            Some(max) if max <= cap => Some(max),
            _ => Some(cap),
        };
    }

    fn to_document(&self) -> Option<Value> {
        if self.is_unbounded() {
            return None;
        }
        let mut doc = Map::new();
        if let Some(min) = self.min {
            doc.insert("$gte".to_string(), json!(min));
        }
        if let Some(max) = self.max {
            doc.insert("$lte".to_string(), json!(max));
        }
        Some(Value::Object(doc))
    }
}

// Equality for one value (index friendly), set membership for several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership<T> {
    Exact(T),
    AnyOf(Vec<T>),
}

impl<T: PartialEq> Membership<T> {
    // `None` for an empty list.
    pub fn from_values(mut values: Vec<T>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Membership::Exact),
            _ => Some(Membership::AnyOf(values)),
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            Membership::Exact(expected) => expected == value,
            Membership::AnyOf(options) => options.contains(value),
        }
    }
}

impl<T: Serialize> Membership<T> {
    fn to_document(&self) -> Value {
        match self {
            Membership::Exact(value) => json!(value),
            Membership::AnyOf(values) => json!({ "$in": values }),
        }
    }
}

// Conjunction of optional clauses over the car collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPredicate {
    // isActive = true AND isDeleted = false
    pub visible_only: bool,
    pub brand_ids: Option<Membership<String>>,
    pub price: Range<i64>,
    pub year: Range<i32>,
    pub kms_driven: Range<i64>,
    pub fuel_type: Option<Membership<FuelType>>,
    pub transmission: Option<Membership<Transmission>>,
    pub body_type: Option<Membership<BodyType>>,
    pub city: Option<Membership<String>>,
    pub is_featured: Option<bool>,
    pub is_sold: Option<bool>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarQuery {
    // Provably empty; stores must return no documents.
    Nothing,
    Match(CarPredicate),
}

impl CarQuery {
    // Base visibility rule for a scope, with no user filters.
    pub fn base(scope: ListingScope) -> Self {
        CarQuery::Match(CarPredicate {
            visible_only: !scope.includes_inactive(),
            ..CarPredicate::default()
        })
    }

    // What the public storefront may ever show: visible and unsold.
    pub fn public_base() -> Self {
        CarQuery::Match(CarPredicate {
            visible_only: true,
            is_sold: Some(false),
            ..CarPredicate::default()
        })
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, CarQuery::Nothing)
    }

    // Serializes to the document store's predicate dialect.
    pub fn to_document(&self) -> Value {
        let predicate = match self {
            CarQuery::Nothing => return json!({ "_id": { "$exists": false } }),
            CarQuery::Match(predicate) => predicate,
        };

        let mut doc = Map::new();
        if predicate.visible_only {
            doc.insert("isActive".into(), json!(true));
            doc.insert("isDeleted".into(), json!(false));
        }
        if let Some(ids) = &predicate.brand_ids {
            doc.insert("brand".into(), ids.to_document());
        }
        if let Some(range) = predicate.price.to_document() {
            doc.insert("price".into(), range);
        }
        if let Some(range) = predicate.year.to_document() {
            doc.insert("year".into(), range);
        }
        if let Some(range) = predicate.kms_driven.to_document() {
            doc.insert("kmsDriven".into(), range);
        }
        if let Some(fuel) = &predicate.fuel_type {
            doc.insert("fuelType".into(), fuel.to_document());
        }
        if let Some(transmission) = &predicate.transmission {
            doc.insert("transmission".into(), transmission.to_document());
        }
        if let Some(body) = &predicate.body_type {
            doc.insert("bodyType".into(), body.to_document());
        }
        if let Some(city) = &predicate.city {
            doc.insert("location.city".into(), city.to_document());
        }
        if let Some(featured) = predicate.is_featured {
            doc.insert("isFeatured".into(), json!(featured));
        }
        if let Some(sold) = predicate.is_sold {
            doc.insert("isSold".into(), json!(sold));
        }
        if let Some(text) = &predicate.text {
            doc.insert("$text".into(), json!({ "$search": text }));
        }
        Value::Object(doc)
    }
}

// Outcome of validating one multi-valued facet
enum Clause<T> {
    Absent,
    Unsatisfiable,
    Values(Membership<T>),
}

fn vocabulary_clause<T: Vocabulary + PartialEq>(raw: &[String]) -> Clause<T> {
    let supplied: Vec<&str> = raw
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect();
    if supplied.is_empty() {
        return Clause::Absent;
    }

    let mut valid: Vec<T> = Vec::new();
    for value in supplied {
        match T::parse(value) {
            Some(parsed) if !valid.contains(&parsed) => valid.push(parsed),
            Some(_) => {}
            None => tracing::debug!(value, "Dropping value outside the registry"),
        }
    }

    match Membership::from_values(valid) {
        Some(membership) => Clause::Values(membership),
        None => Clause::Unsatisfiable,
    }
}

fn city_clause(raw: &[String]) -> Option<Membership<String>> {
    let mut cities: Vec<String> = Vec::new();
    for city in raw.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        if !cities.iter().any(|known| known == city) {
            cities.push(city.to_string());
        }
    }
    Membership::from_values(cities)
}

// Builds the query for already-sanitized filters.
//
// User input never fails the build; it can only narrow the query or make it
// `CarQuery::Nothing`. An `Err` means the brand lookup itself failed.
pub async fn build_query<B: BrandRepository>(
    filters: &CarFilters,
    scope: ListingScope,
    brands: &B,
) -> Result<CarQuery, StoreError> {
    let mut predicate = CarPredicate {
        visible_only: !scope.includes_inactive(),
        ..CarPredicate::default()
    };

    // Brand resolution has to finish before anything else is issued.
    if filters.brand.iter().any(|slug| !slug.trim().is_empty()) {
        let ids = resolve_brand_ids(brands, &filters.brand).await?;
        match Membership::from_values(ids) {
            Some(ids) => predicate.brand_ids = Some(ids),
            None => return Ok(CarQuery::Nothing),
        }
    }

    // Option-based, so a bound of 0 survives
    predicate.price = Range::new(filters.min_price, filters.max_price);
    predicate.year = Range::new(filters.min_year, filters.max_year);

    match vocabulary_clause::<FuelType>(&filters.fuel_type) {
        Clause::Absent => {}
        Clause::Unsatisfiable => return Ok(CarQuery::Nothing),
        Clause::Values(values) => predicate.fuel_type = Some(values),
    }
    match vocabulary_clause::<Transmission>(&filters.transmission) {
        Clause::Absent => {}
        Clause::Unsatisfiable => return Ok(CarQuery::Nothing),
        Clause::Values(values) => predicate.transmission = Some(values),
    }
    match vocabulary_clause::<BodyType>(&filters.body_type) {
        Clause::Absent => {}
        Clause::Unsatisfiable => return Ok(CarQuery::Nothing),
        Clause::Values(values) => predicate.body_type = Some(values),
    }

    predicate.city = city_clause(&filters.city);
    predicate.is_featured = filters.is_featured;

    if scope.honors_sold_flag() {
        predicate.is_sold = filters.is_sold;
    }

    predicate.text = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty())
        .map(str::to_string);

    Ok(CarQuery::Match(predicate))
}
