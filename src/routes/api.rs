// Handlers for the catalog API endpoints

use axum::{
    extract::{Path, State},
    response::Json,
};
use axum_extra::extract::Query; // Repeated keys collect into Vec (brand=a&brand=b)

use crate::{
    AppState,
    error::{AppError, AppResult},
    inventory::{CarFilters, FilteredCars, PublicFilters, PublicListing, stats::FilterStats},
    models::Car,
};

// GET /api/cars - general filtered listing. Always 200; failures come back as an empty page.
pub async fn list_cars(
    State(app_state): State<AppState>,
    Query(filters): Query<CarFilters>,
) -> Json<FilteredCars> {
    tracing::info!("[HANDLER] /api/cars - Request received: {:?}", filters);
    let result = app_state.catalog.get_filtered_cars(filters).await;
    tracing::info!(
        "[HANDLER] /api/cars - Returning {} of {} cars.",
        result.cars.len(),
        result.pagination.total
    );
    Json(result)
}

// GET /api/buy-cars - public listing with sidebar stats
pub async fn buy_cars(
    State(app_state): State<AppState>,
    Query(filters): Query<PublicFilters>,
) -> Json<PublicListing> {
    tracing::info!("[HANDLER] /api/buy-cars - Request received: {:?}", filters);
    let result = app_state.catalog.get_public_listing(filters).await;
    tracing::info!(
        "[HANDLER] /api/buy-cars - Returning {} of {} cars.",
        result.cars.len(),
        result.pagination.total
    );
    Json(result)
}

// GET /api/filters - sidebar facet counts over the whole visible catalog
pub async fn filter_stats(State(app_state): State<AppState>) -> Json<FilterStats> {
    tracing::info!("[HANDLER] /api/filters - Request received.");
    Json(app_state.catalog.get_filter_stats().await)
}

// GET /api/cars/:slug - detail page document
pub async fn get_car(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Car>> {
    tracing::info!("[HANDLER] /api/cars/:slug - Request received for slug: {}", slug);
    match app_state.catalog.get_car(&slug).await? {
        Some(car) => Ok(Json(car)),
        None => Err(AppError::NotFound(format!("Car '{}'", slug))),
    }
}

pub async fn health() -> &'static str {
    "ok"
}
