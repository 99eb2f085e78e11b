use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::services::restaurant_search::RestaurantSearchService;

pub mod health_check;
pub mod restaurant_controller;

#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<RestaurantSearchService>,
}

pub async fn serve(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<()> {
    let origins: Vec<HeaderValue> = config
        .origin_urls
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}, due to: {}", origin, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    let application = router_endpoints(app_state, config)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
                .layer(CompressionLayer::new())
        );

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("API server listening on: {}", address);
    axum::Server::bind(&address)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(health_check::router())
        .nest(
            "/restaurants",
            restaurant_controller::router(app_state, config.max_concurrent_searches),
        )
        .fallback(page_not_found_handler)
}
