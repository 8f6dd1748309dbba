// Storage ports consumed by the catalog core.
//
// The core only reads. Every method maps onto one document-store call
// (`find`, `countDocuments`, `aggregate`), so an adapter for a real
// backend can translate the typed arguments with the `to_document`
// helpers on `CarQuery` and `SortSpec`. List fetches return the fields of
// `CarSummary` with `images` sliced to the first element.

use serde::Serialize;
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;
use crate::inventory::pagination::PageWindow;
use crate::inventory::projection::CarSummary;
use crate::inventory::query::{CarQuery, ListingScope};
use crate::inventory::sort::SortSpec;
use crate::models::{Brand, Car};

// String-valued fields the stats sidebar groups on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Brand,
    FuelType,
    BodyType,
    Transmission,
}

impl Facet {
    pub fn field(&self) -> &'static str {
        match self {
            Facet::Brand => "brand",
            Facet::FuelType => "fuelType",
            Facet::BodyType => "bodyType",
            Facet::Transmission => "transmission",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Price,
    Year,
}

impl NumericField {
    pub fn field(&self) -> &'static str {
        match self {
            NumericField::Price => "price",
            NumericField::Year => "year",
        }
    }
}

// One `$group` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

// Read access to the car collection.
#[cfg_attr(test, mockall::automock)]
pub trait CarRepository: Send + Sync {
    // Paginated, sorted fetch returning list projections.
    fn find(
        &self,
        query: &CarQuery,
        sort: SortSpec,
        window: PageWindow,
    ) -> impl Future<Output = Result<Vec<CarSummary>, StoreError>> + Send;

    fn count(&self, query: &CarQuery) -> impl Future<Output = Result<u64, StoreError>> + Send;

    // Documents matching `query` grouped by `facet`, in no particular order.
    fn group_count(
        &self,
        query: &CarQuery,
        facet: Facet,
    ) -> impl Future<Output = Result<Vec<FacetCount>, StoreError>> + Send;

    // Min and max of `field` over the matching set; `None` when nothing matches.
    fn bounds(
        &self,
        query: &CarQuery,
        field: NumericField,
    ) -> impl Future<Output = Result<Option<Bounds>, StoreError>> + Send;

    // Full document for the detail page.
    fn find_by_slug(
        &self,
        slug: &str,
        scope: ListingScope,
    ) -> impl Future<Output = Result<Option<Car>, StoreError>> + Send;
}

// Read access to the brand collection.
#[cfg_attr(test, mockall::automock)]
pub trait BrandRepository: Send + Sync {
    // Ids of active, non-deleted brands whose slug is in `slugs`.
    fn find_active_ids_by_slugs(
        &self,
        slugs: &[String],
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    fn find_by_ids(&self, ids: &[String]) -> impl Future<Output = Result<Vec<Brand>, StoreError>> + Send;
}

// Applies a per-call deadline to every storage call of the wrapped
// repository. An elapsed deadline surfaces as `StoreError::Timeout`.
#[derive(Debug, Clone)]
pub struct Deadline<R> {
    inner: R,
    limit: Duration,
}

impl<R> Deadline<R> {
    pub fn new(inner: R, limit: Duration) -> Self {
        Deadline { inner, limit }
    }
}

async fn within<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}

impl<R: CarRepository> CarRepository for Deadline<R> {
    async fn find(
        &self,
        query: &CarQuery,
        sort: SortSpec,
        window: PageWindow,
    ) -> Result<Vec<CarSummary>, StoreError> {
        within(self.limit, self.inner.find(query, sort, window)).await
    }

    async fn count(&self, query: &CarQuery) -> Result<u64, StoreError> {
        within(self.limit, self.inner.count(query)).await
    }

    async fn group_count(&self, query: &CarQuery, facet: Facet) -> Result<Vec<FacetCount>, StoreError> {
        within(self.limit, self.inner.group_count(query, facet)).await
    }

    async fn bounds(&self, query: &CarQuery, field: NumericField) -> Result<Option<Bounds>, StoreError> {
        within(self.limit, self.inner.bounds(query, field)).await
    }

    async fn find_by_slug(&self, slug: &str, scope: ListingScope) -> Result<Option<Car>, StoreError> {
        within(self.limit, self.inner.find_by_slug(slug, scope)).await
    }
}

impl<R: BrandRepository> BrandRepository for Deadline<R> {
    async fn find_active_ids_by_slugs(&self, slugs: &[String]) -> Result<Vec<String>, StoreError> {
        within(self.limit, self.inner.find_active_ids_by_slugs(slugs)).await
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Brand>, StoreError> {
        within(self.limit, self.inner.find_by_ids(ids)).await
    }
}

// Index documents the car collection needs. Without them every filtered
// list and every stats aggregation is a full collection scan.
pub fn required_indexes() -> Vec<Value> {
    vec![
        json!({ "isActive": 1, "isDeleted": 1, "isSold": 1, "createdAt": -1 }),
        json!({ "isActive": 1, "isDeleted": 1, "brand": 1, "price": 1 }),
        json!({ "isActive": 1, "isDeleted": 1, "fuelType": 1, "year": -1 }),
        json!({ "isActive": 1, "isDeleted": 1, "bodyType": 1, "transmission": 1 }),
        json!({ "isActive": 1, "isDeleted": 1, "location.city": 1 }),
        json!({ "kmsDriven": 1 }),
        json!({ "slug": 1 }),
        json!({ "name": "text", "description": "text", "features": "text" }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn index_plan_covers_text_search_fields() {
        let indexes = required_indexes();
        let text = indexes
            .iter()
            .find(|ix| ix.as_object().unwrap().values().any(|v| v == "text"))
            .expect("text index present");
        for field in ["name", "description", "features"] {
            assert_eq!(text[field], "text");
        }
    }

    #[test]
    fn every_facet_field_is_indexed() {
        let indexes = required_indexes();
        for facet in [Facet::Brand, Facet::FuelType, Facet::BodyType, Facet::Transmission] {
            assert!(
                indexes.iter().any(|ix| ix.get(facet.field()).is_some()),
                "{} not indexed",
                facet.field()
            );
        }
    }

    #[tokio::test]
    async fn deadline_turns_a_stalled_call_into_timeout() {
        let limit = Duration::from_millis(20);
        let cars = Deadline::new(testing::stalled_cars(), limit);
        let err = cars.count(&CarQuery::public_base()).await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(d) if d == limit));
    }

    #[tokio::test]
    async fn deadline_passes_fast_calls_through() {
        let store = Deadline::new(testing::seeded_store(), Duration::from_secs(5));
        assert_eq!(store.count(&CarQuery::public_base()).await.unwrap(), 3);
    }
}
