// Listing orchestrator.
//
// Both entry points always return a well-formed response. Storage or
// brand-lookup failures are logged and answered with an empty page; a stats
// failure only resets the stats.

use chrono::{Datelike, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;

use super::filters::{CarFilters, PublicFilters};
use super::pagination::{GENERAL_PAGE_SIZE, PUBLIC_PAGE_SIZE, PageWindow, PaginationMeta};
use super::projection::CarSummary;
use super::query::{CarQuery, ListingScope, build_query};
use super::sanitize::{Sanitized, sanitize};
use super::sort::SortSpec;
use super::stats::{FilterStats, collect_filter_stats};
use crate::error::StoreError;
use crate::models::Car;
use crate::store::{BrandRepository, CarRepository, Deadline};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredCars {
    pub cars: Vec<CarSummary>,
    pub pagination: PaginationMeta,
    pub applied_filters: CarFilters,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl FilteredCars {
    fn empty(window: PageWindow, applied_filters: CarFilters, warnings: Vec<String>) -> Self {
        FilteredCars {
            cars: Vec::new(),
            pagination: window.meta(0),
            applied_filters,
            warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicListing {
    pub cars: Vec<CarSummary>,
    pub pagination: PaginationMeta,
    pub filters: FilterStats,
}

impl PublicListing {
    fn empty(window: PageWindow) -> Self {
        PublicListing {
            cars: Vec::new(),
            pagination: window.public_meta(0),
            filters: FilterStats::fallback(),
        }
    }
}

// Filter/query engine over a car and a brand repository.
//
// The scope is fixed per instance: a storefront handler builds a
// `ListingScope::Public` service, a back-office caller an
// `ListingScope::Admin` one.
pub struct CarFilterService<C, B> {
    cars: Deadline<C>,
    brands: Deadline<B>,
    scope: ListingScope,
}

impl<C, B> CarFilterService<C, B>
where
    C: CarRepository,
    B: BrandRepository,
{
    pub fn new(cars: C, brands: B, scope: ListingScope, storage_timeout: Duration) -> Self {
        CarFilterService {
            cars: Deadline::new(cars, storage_timeout),
            brands: Deadline::new(brands, storage_timeout),
            scope,
        }
    }

    pub fn scope(&self) -> ListingScope {
        self.scope
    }

    // General filtered listing. Never fails.
    #[instrument(skip(self, filters), fields(scope = ?self.scope))]
    pub async fn get_filtered_cars(&self, filters: CarFilters) -> FilteredCars {
        let Sanitized { mut filters, warnings } = sanitize(filters, Utc::now().year());
        if !warnings.is_empty() {
            tracing::debug!(?warnings, "Repaired filter input");
        }
        // Echo only what was applied
        if !self.scope.honors_sold_flag() {
            filters.is_sold = None;
        }

        let window = PageWindow::new(filters.page, GENERAL_PAGE_SIZE);
        let sort = SortSpec::resolve(filters.sort_by.as_deref(), filters.sort_order.as_deref());

        let query = match build_query(&filters, self.scope, &self.brands).await {
            Ok(query) => query,
            Err(e) => {
                tracing::error!(operation = "build_query", error = %e, "Failed to build car query");
                return FilteredCars::empty(window, filters, warnings);
            }
        };

        match self.fetch_page(&query, sort, window).await {
            Ok((cars, total)) => FilteredCars {
                cars,
                pagination: window.meta(total),
                applied_filters: filters,
                warnings,
            },
            Err(e) => {
                tracing::error!(operation = "fetch_cars", error = %e, "Failed to fetch filtered cars");
                FilteredCars::empty(window, filters, warnings)
            }
        }
    }

    // Public buy-cars listing with sidebar stats. Never fails and never
    // returns a sold or hidden car, whatever the scope of this service.
    #[instrument(skip(self, filters))]
    pub async fn get_public_listing(&self, filters: PublicFilters) -> PublicListing {
        let window = PageWindow::new(filters.page, PUBLIC_PAGE_SIZE);
        let sort = SortSpec::resolve_public(filters.sort.as_deref());

        let Sanitized { filters: general, warnings } =
            sanitize(filters.to_car_filters(), Utc::now().year());
        if !warnings.is_empty() {
            tracing::debug!(?warnings, "Repaired public filter input");
        }

        let query = match build_query(&general, ListingScope::Public, &self.brands).await {
            Ok(query) => restrict_to_storefront(query, filters.kms_max),
            Err(e) => {
                tracing::error!(operation = "build_query", error = %e, "Failed to build public listing query");
                return PublicListing::empty(window);
            }
        };

        let base = CarQuery::public_base();
        let (page, stats) = tokio::join!(
            self.fetch_page(&query, sort, window),
            collect_filter_stats(&self.cars, &self.brands, &base),
        );

        match page {
            Ok((cars, total)) => PublicListing {
                cars,
                pagination: window.public_meta(total),
                filters: stats,
            },
            Err(e) => {
                tracing::error!(operation = "fetch_public_listing", error = %e, "Failed to fetch public listing");
                PublicListing::empty(window)
            }
        }
    }

    // Sidebar stats for this service's scope alone.
    pub async fn get_filter_stats(&self) -> FilterStats {
        collect_filter_stats(&self.cars, &self.brands, &CarQuery::base(self.scope)).await
    }

    // Full document for the detail page, if visible in this scope.
    pub async fn get_car(&self, slug: &str) -> Result<Option<Car>, StoreError> {
        self.cars.find_by_slug(slug, self.scope).await
    }

    // Page fetch and exact count, issued together
    async fn fetch_page(
        &self,
        query: &CarQuery,
        sort: SortSpec,
        window: PageWindow,
    ) -> Result<(Vec<CarSummary>, u64), StoreError> {
        if query.is_nothing() {
            return Ok((Vec::new(), 0));
        }
        tracing::debug!(
            predicate = %query.to_document(),
            sort = %sort.to_document(),
            skip = window.skip(),
            limit = window.limit,
            "Running car query"
        );
        tokio::try_join!(self.cars.find(query, sort, window), self.cars.count(query))
    }
}

// Applied after the build so no upstream mapping can reopen sold or hidden cars
fn restrict_to_storefront(query: CarQuery, kms_max: Option<i64>) -> CarQuery {
    match query {
        CarQuery::Nothing => CarQuery::Nothing,
        CarQuery::Match(mut predicate) => {
            predicate.visible_only = true;
            predicate.is_sold = Some(false);
            if let Some(kms_max) = kms_max {
                predicate.kms_driven.cap_max(kms_max);
            }
            CarQuery::Match(predicate)
        }
    }
}
