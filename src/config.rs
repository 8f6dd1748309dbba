// Service configuration, layered: defaults -> config.toml -> APP_* env vars

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    // JSON file with `brands` and `cars` arrays that populates the in-memory store
    pub seed_file: String,
    // Deadline applied to every storage call made while answering a listing request
    pub storage_timeout_ms: u64,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("seed_file", "data/inventory.json")?
            .set_default("storage_timeout_ms", 5000)?
            .add_source(File::with_name("config").required(false))
            // APP_SERVER_ADDRESS, APP_SEED_FILE, APP_STORAGE_TIMEOUT_MS
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}
