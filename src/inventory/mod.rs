// Dynamic inventory filter/query engine.
//
// Request flow: sanitize -> build query (may resolve brand slugs first) ->
// paginated fetch + count, plus faceted stats for the public listing.

pub mod brand_resolver;
pub mod filters;
pub mod pagination;
pub mod projection;
pub mod query;
pub mod sanitize;
pub mod service;
pub mod sort;
pub mod stats;

pub use filters::{CarFilters, PublicFilters};
pub use query::ListingScope;
pub use service::{CarFilterService, FilteredCars, PublicListing};
