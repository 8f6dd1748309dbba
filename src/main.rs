use anyhow::{Context, Result};
use axum::{Router, extract::FromRef};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use crate::inventory::{CarFilterService, ListingScope};
use crate::memory_store::InMemoryStore;

// Declare modules
mod config;
mod error;
mod inventory;
mod memory_store;
mod models;
mod routes;
mod store;
mod vocabulary;

#[cfg(test)]
mod testing;

type CatalogService = CarFilterService<InMemoryStore, InMemoryStore>;

// Application state shared by all handlers
#[derive(Clone, FromRef)]
struct AppState {
    settings: Arc<Settings>,
    // Storefront scope: hidden, deleted and (on buy-cars) sold cars never leak
    catalog: Arc<CatalogService>,
}

impl AppState {
    fn new(settings: Settings, store: InMemoryStore) -> Self {
        let catalog = CarFilterService::new(
            store.clone(),
            store,
            ListingScope::Public,
            settings.storage_timeout(),
        );
        AppState {
            settings: Arc::new(settings),
            catalog: Arc::new(catalog),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dealership_catalog=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing dealership catalog server...");

    let settings = match config::Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let store = InMemoryStore::from_seed_file(&settings.seed_file)
        .context("Failed to initialise the catalog store")?;
    tracing::info!(
        cars = store.car_count(),
        brands = store.brand_count(),
        "Catalog loaded from {}",
        settings.seed_file
    );
    for index in store::required_indexes() {
        tracing::debug!(%index, "Car collection index required by the filter engine");
    }

    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    let app_state = AppState::new(settings, store);
    tracing::debug!(
        scope = ?app_state.catalog.scope(),
        timeout_ms = app_state.settings.storage_timeout_ms,
        "Catalog service ready"
    );
    let app: Router = routes::create_router(app_state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
