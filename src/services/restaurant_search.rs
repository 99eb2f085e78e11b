use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::{stream, StreamExt};
use rand::seq::SliceRandom;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::SearchError;
use crate::models::place_details::PlaceDetails;
use crate::models::restaurant::{EnrichedRestaurant, PhotoSet, PhotoUrls, RawPlace};
use crate::models::search::{AreaSearchResult, GridCell, SearchRequest};
use crate::repositories::cache_store::{Cache, AREA_SEARCH_TTL};
use crate::repositories::places_client::{NearbySearchResponse, PlacesProvider};
use crate::services::grid_search::{calculate_grid_points, BASE_RADIUS_METERS};
use crate::services::place_details::PlaceDetailsService;

const PLACE_TYPE: &str = "restaurant";
const SMALL_PHOTO_WIDTH: u32 = 400;
const LARGE_PHOTO_WIDTH: u32 = 800;

#[derive(Clone, Debug)]
pub struct SearchSettings {
    pub language: String,
    pub cell_concurrency: usize,
    pub detail_concurrency: usize,
    pub search_timeout: Duration,
}

impl From<&Config> for SearchSettings {
    fn from(config: &Config) -> Self {
        Self {
            language: config.places_language.clone(),
            cell_concurrency: config.cell_concurrency.max(1),
            detail_concurrency: config.detail_concurrency.max(1),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
        }
    }
}

pub struct RestaurantSearchService {
    places: Arc<dyn PlacesProvider>,
    cache: Cache,
    details: PlaceDetailsService,
    settings: SearchSettings,
}

impl RestaurantSearchService {
    pub fn new(places: Arc<dyn PlacesProvider>, cache: Cache, settings: SearchSettings) -> Self {
        let details = PlaceDetailsService::new(places.clone(), cache.clone(), settings.language.clone());
        Self {
            places,
            cache,
            details,
            settings,
        }
    }

    /// Searches the disc described by `request`, serving a cached result when
    /// one exists for the same rounded coordinates and radius.
    pub async fn search_area(&self, request: SearchRequest) -> Result<AreaSearchResult, SearchError> {
        request.validate()?;

        info!(
            latitude = request.latitude,
            longitude = request.longitude,
            radius = request.radius,
            "Searching restaurants in area"
        );

        let cache_key = request.fingerprint();
        let search = self.cache.remember(&cache_key, AREA_SEARCH_TTL, || self.collect_area(request));

        match tokio::time::timeout(self.settings.search_timeout, search).await {
            Ok(result) => result,
            Err(_) => {
                warn!(cache_key = %cache_key, "Area search exceeded its deadline, abandoning in-flight calls");
                Err(SearchError::Timeout(self.settings.search_timeout.as_secs()))
            }
        }
    }

    async fn collect_area(&self, request: SearchRequest) -> Result<AreaSearchResult, SearchError> {
        let cells = calculate_grid_points(request.latitude, request.longitude, request.radius);
        info!(count = cells.len(), "Calculated grid points");

        let unique_places = self.collect_unique_places(&cells).await?;

        let mut restaurants: Vec<EnrichedRestaurant> = stream::iter(unique_places)
            .map(|place| self.enrich(place))
            .buffer_unordered(self.settings.detail_concurrency.max(1))
            .collect()
            .await;

        restaurants.shuffle(&mut rand::thread_rng());

        info!(total_restaurants = restaurants.len(), "Area search finished");
        Ok(AreaSearchResult::new(restaurants, cells.len()))
    }

    /// Fans the nearby searches out over the cells and folds their results
    /// into a single list, keeping the first occurrence of every place id.
    ///
    /// A cell whose call fails at transport level contributes nothing. A cell
    /// whose response carries a provider error aborts the whole search.
    async fn collect_unique_places(&self, cells: &[GridCell]) -> Result<Vec<RawPlace>, SearchError> {
        let mut searches = stream::iter(cells.iter().copied())
            .map(|cell| async move { (cell, self.search_cell(cell).await) })
            .buffered(self.settings.cell_concurrency.max(1));

        let mut seen_place_ids = HashSet::new();
        let mut unique_places = Vec::new();

        while let Some((cell, outcome)) = searches.next().await {
            let response = match outcome {
                Ok(response) => response,
                Err(e) => {
                    warn!(lat = cell.lat, lng = cell.lng, "Nearby search failed, skipping cell due to: {:#}", e);
                    continue;
                }
            };

            info!(
                lat = cell.lat,
                lng = cell.lng,
                status = response.status.as_deref().unwrap_or("unknown"),
                results_count = response.results.len(),
                "Nearby search response"
            );

            if let Some(message) = response.error_message {
                error!(
                    lat = cell.lat,
                    lng = cell.lng,
                    status = response.status.as_deref().unwrap_or("unknown"),
                    "Places provider error: {}",
                    message
                );
                return Err(SearchError::Provider(message));
            }

            for place in response.results {
                if seen_place_ids.insert(place.place_id.clone()) {
                    unique_places.push(place);
                }
            }
        }

        Ok(unique_places)
    }

    async fn search_cell(&self, cell: GridCell) -> anyhow::Result<NearbySearchResponse> {
        self.places
            .nearby_search(cell, BASE_RADIUS_METERS as u32, PLACE_TYPE, &self.settings.language)
            .await
    }

    async fn enrich(&self, place: RawPlace) -> EnrichedRestaurant {
        let details = self.details.get_place_details(&place.place_id).await;
        let photos = place.first_photo_reference().map(|reference| {
            vec![PhotoSet {
                urls: PhotoUrls {
                    small: self.places.photo_url(reference, SMALL_PHOTO_WIDTH),
                    large: self.places.photo_url(reference, LARGE_PHOTO_WIDTH),
                },
            }]
        });
        merge_restaurant(place, details, photos)
    }
}

/// Detail values win over cell values, which win over nothing.
fn merge_restaurant(
    place: RawPlace,
    details: Option<PlaceDetails>,
    photos: Option<Vec<PhotoSet>>,
) -> EnrichedRestaurant {
    let details = details.unwrap_or_default();
    let open_now = place.open_now();
    let address = details
        .formatted_address
        .clone()
        .or_else(|| place.vicinity.clone())
        .unwrap_or_default();

    EnrichedRestaurant {
        place_id: place.place_id,
        name: place.name,
        rating: details.rating.or(place.rating),
        user_ratings_total: details
            .user_ratings_total
            .or(place.user_ratings_total)
            .unwrap_or(0),
        address,
        formatted_address: details.formatted_address,
        vicinity: place.vicinity,
        opening_hours: details.weekday_opening_hours,
        open_now,
        photos,
        types: place.types,
        uber_eats_url: details.external_ordering_url,
    }
}
