use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing::info;

use crate::config::Config;
use crate::controller::AppState;
use crate::repositories::cache_store::{spawn_cleanup_task, Cache, InMemoryCacheStore, SystemClock};
use crate::repositories::places_client::GooglePlacesClient;
use crate::services::restaurant_search::{RestaurantSearchService, SearchSettings};

mod config;
mod controller;
mod error;
mod helpers;
mod models;
mod repositories;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!("Starting area search service in {} environment", config.environment);

    let cache_store = Arc::new(InMemoryCacheStore::new(Arc::new(SystemClock)));
    spawn_cleanup_task(
        cache_store.clone(),
        Duration::from_secs(config.cache_cleanup_interval_secs.max(1)),
    );

    let places_client = Arc::new(GooglePlacesClient::new(&config)?);
    let search_service = Arc::new(RestaurantSearchService::new(
        places_client,
        Cache::new(cache_store),
        SearchSettings::from(&config),
    ));

    controller::serve(AppState { search_service }, &config).await
}
