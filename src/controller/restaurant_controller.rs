use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower::limit::ConcurrencyLimitLayer;
use tracing::{error, warn};

use crate::controller::AppState;
use crate::error::SearchError;
use crate::models::search::{AreaSearchResult, SearchRequest};
use crate::services::restaurant_search::RestaurantSearchService;

pub fn router(app_state: AppState, max_concurrent_searches: usize) -> Router {
    Router::new()
        .route(
            "/search-area",
            get(search_restaurants_in_area).post(search_restaurants_in_area_json),
        )
        .route_layer(ConcurrencyLimitLayer::new(max_concurrent_searches.max(1)))
        .route_layer(Extension(app_state.search_service))
}

pub async fn search_restaurants_in_area(
    Extension(search_service): Extension<Arc<RestaurantSearchService>>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(request)) => into_search_response(search_service.search_area(request).await),
        Err(rejection) => into_search_response(Err(SearchError::Validation(rejection.body_text()))),
    }
}

pub async fn search_restaurants_in_area_json(
    Extension(search_service): Extension<Arc<RestaurantSearchService>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(request)) => into_search_response(search_service.search_area(request).await),
        Err(rejection) => into_search_response(Err(SearchError::Validation(rejection.body_text()))),
    }
}

fn into_search_response(result: Result<AreaSearchResult, SearchError>) -> Response {
    match result {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            match &e {
                SearchError::Validation(message) => {
                    warn!("Rejected area search request due to: {}", message)
                }
                _ => error!("Error in area search due to: {}", e),
            }
            e.into_response()
        }
    }
}
