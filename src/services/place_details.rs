use std::sync::Arc;

use anyhow::anyhow;
use tracing::{info, warn};

use crate::models::place_details::PlaceDetails;
use crate::models::restaurant::Location;
use crate::repositories::cache_store::{Cache, PLACE_DETAILS_TTL};
use crate::repositories::places_client::PlacesProvider;

pub const DETAIL_FIELDS: [&str; 6] = [
    "formatted_address",
    "opening_hours",
    "rating",
    "user_ratings_total",
    "name",
    "geometry",
];
const WEBSITE_FIELD: [&str; 1] = ["website"];

pub const ORDERING_PLATFORM_DOMAIN: &str = "ubereats.com";
const ORDERING_PLATFORM_STORE_URL: &str = "https://www.ubereats.com/tw/store";

/// Looks up and caches per-place enrichment data.
///
/// Only successful lookups are cached. A failed lookup yields `None` and the
/// next search asking for the same place will hit the provider again.
pub struct PlaceDetailsService {
    places: Arc<dyn PlacesProvider>,
    cache: Cache,
    language: String,
}

impl PlaceDetailsService {
    pub fn new(places: Arc<dyn PlacesProvider>, cache: Cache, language: String) -> Self {
        Self {
            places,
            cache,
            language,
        }
    }

    pub async fn get_place_details(&self, place_id: &str) -> Option<PlaceDetails> {
        let cache_key = format!("place_details:{}", place_id);
        self.cache
            .remember(&cache_key, PLACE_DETAILS_TTL, || self.fetch_place_details(place_id))
            .await
            .map_err(|e| {
                warn!(place_id, "Failed to retrieve place details due to: {:#}", e);
            })
            .ok()
    }

    async fn fetch_place_details(&self, place_id: &str) -> anyhow::Result<PlaceDetails> {
        let response = self.places
            .place_details(place_id, &DETAIL_FIELDS, Some(&self.language))
            .await?;

        info!(place_id, status = ?response.status, "Place details response");

        let result = response.result.ok_or_else(|| {
            anyhow!(
                "no result in place details response (status: {}, message: {})",
                response.status.as_deref().unwrap_or("unknown"),
                response.error_message.as_deref().unwrap_or("none"),
            )
        })?;

        let external_ordering_url = match &result.geometry {
            Some(geometry) => {
                let name = result.name.as_deref().unwrap_or_default();
                self.resolve_ordering_url(place_id, name, &geometry.location).await
            }
            None => None,
        };

        Ok(PlaceDetails {
            formatted_address: result.formatted_address,
            weekday_opening_hours: result.opening_hours.and_then(|hours| hours.weekday_text),
            rating: result.rating,
            user_ratings_total: result.user_ratings_total,
            external_ordering_url,
        })
    }

    /// Prefers the place's own website when it already points at the ordering
    /// platform, otherwise builds a store link from name and coordinates.
    async fn resolve_ordering_url(
        &self,
        place_id: &str,
        name: &str,
        location: &Location,
    ) -> Option<String> {
        let response = match self.places.place_details(place_id, &WEBSITE_FIELD, None).await {
            Ok(response) => response,
            Err(e) => {
                warn!(place_id, "Failed to look up website for ordering link due to: {:#}", e);
                return None;
            }
        };

        let website = response
            .result
            .and_then(|result| result.website)
            .unwrap_or_default();

        if website.contains(ORDERING_PLATFORM_DOMAIN) {
            Some(website)
        } else {
            Some(synthesize_ordering_url(name, location))
        }
    }
}

pub fn synthesize_ordering_url(name: &str, location: &Location) -> String {
    format!(
        "{}/{}-{}-{}",
        ORDERING_PLATFORM_STORE_URL,
        urlencoding::encode(name),
        location.lat,
        location.lng
    )
}
