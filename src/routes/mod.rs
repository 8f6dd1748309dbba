// Route definitions

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::AppState;

mod api;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/cars", get(api::list_cars))
        .route("/cars/:slug", get(api::get_car))
        .route("/buy-cars", get(api::buy_cars))
        .route("/filters", get(api::filter_stats));

    Router::new()
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::testing;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let settings = Settings {
            server_address: "127.0.0.1:0".into(),
            seed_file: String::new(),
            storage_timeout_ms: 5000,
        };
        create_router(AppState::new(settings, testing::seeded_store()))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn repeated_brand_keys_become_a_multi_value_filter() {
        let (status, body) = get("/api/cars?brand=toyota&brand=honda&sortBy=price&sortOrder=asc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["cars"][0]["price"], 500_000);
        assert_eq!(body["appliedFilters"]["brand"], serde_json::json!(["toyota", "honda"]));
        assert!(body.get("warnings").is_none());
    }

    #[tokio::test]
    async fn unknown_brand_is_an_empty_200() {
        let (status, body) = get("/api/cars?brand=delorean").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cars"], serde_json::json!([]));
        assert_eq!(body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn malformed_number_is_rejected_at_the_boundary() {
        let (status, _) = get("/api/cars?minPrice=cheap").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn buy_cars_returns_listing_and_stats() {
        let (status, body) = get("/api/buy-cars?fuel=Diesel&sort=price_asc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["hasPrevPage"], false);
        assert_eq!(body["cars"][0]["price"], 700_000);
        assert_eq!(body["filters"]["fuelTypes"].as_array().unwrap().len(), 2);
        assert!(body["cars"][0].get("sliderVideos").is_none());
    }

    #[tokio::test]
    async fn filter_stats_route_reports_catalog_facets() {
        let (status, body) = get("/api/filters").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["brands"][0]["slug"], "toyota");
        assert_eq!(body["priceRange"], serde_json::json!({ "min": 500_000, "max": 900_000 }));
    }

    #[tokio::test]
    async fn detail_route_returns_full_document_or_404() {
        let (status, body) = get("/api/cars/toyota-fortuner-2021").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sliderVideos"], serde_json::json!(["slider.mp4"]));

        let (status, _) = get("/api/cars/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
