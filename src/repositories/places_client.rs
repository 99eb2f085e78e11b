use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::models::restaurant::{Location, RawPlace};
use crate::models::search::GridCell;

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetailsResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct PlaceDetailsResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Option<Vec<String>>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Geometry {
    pub location: Location,
}

/// Remote places service. Transport and HTTP-status failures come back as
/// `Err`; provider-level errors are reported inside the response body.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby_search(
        &self,
        cell: GridCell,
        radius_meters: u32,
        place_type: &str,
        language: &str,
    ) -> anyhow::Result<NearbySearchResponse>;

    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
        language: Option<&str>,
    ) -> anyhow::Result<PlaceDetailsResponse>;

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String;
}

/// Request URLs carry the API key, so every reqwest error is stripped of its
/// URL before it is wrapped and handed back.
pub struct GooglePlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build places http client")?;

        Ok(Self {
            http,
            base_url: config.places_base_url.trim_end_matches('/').to_string(),
            api_key: config.google_maps_api_key.clone(),
        })
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn nearby_search(
        &self,
        cell: GridCell,
        radius_meters: u32,
        place_type: &str,
        language: &str,
    ) -> anyhow::Result<NearbySearchResponse> {
        let url = format!("{}/nearbysearch/json", self.base_url);
        let location = format!("{},{}", cell.lat, cell.lng);
        let radius = radius_meters.to_string();
        debug!(location = %location, radius_meters, place_type, "Making nearby search request");

        let response = self.http
            .get(&url)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", place_type),
                ("key", self.api_key.as_str()),
                ("language", language),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Nearby search request failed for {}", location))?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Nearby search rejected for {}", location))?;

        response
            .json::<NearbySearchResponse>()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to decode nearby search response for {}", location))
    }

    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
        language: Option<&str>,
    ) -> anyhow::Result<PlaceDetailsResponse> {
        let url = format!("{}/details/json", self.base_url);
        let fields = fields.join(",");
        let mut params = vec![
            ("place_id", place_id),
            ("fields", fields.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(language) = language {
            params.push(("language", language));
        }

        let response = self.http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Place details request failed for {}", place_id))?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Place details rejected for {}", place_id))?;

        response
            .json::<PlaceDetailsResponse>()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to decode place details for {}", place_id))
    }

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!(
            "{}/photo?maxwidth={}&photo_reference={}&key={}",
            self.base_url, max_width, photo_reference, self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn client() -> GooglePlacesClient {
        let config = Config::parse_from([
            "area-search",
            "--google-maps-api-key",
            "test-key",
            "--places-base-url",
            "https://maps.example.com/api/place/",
        ]);
        GooglePlacesClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_api_key() {
        let config = Config::parse_from([
            "area-search",
            "--google-maps-api-key",
            "SECRET-KEY-123",
            "--places-base-url",
            "http://127.0.0.1:1/api/place",
        ]);
        let client = GooglePlacesClient::new(&config).unwrap();

        let nearby = client
            .nearby_search(GridCell { lat: 25.0, lng: 121.0 }, 1000, "restaurant", "zh-TW")
            .await
            .unwrap_err();
        let logged = format!("{:#}", nearby);
        assert!(logged.contains("Nearby search request failed"));
        assert!(!logged.contains("SECRET-KEY-123"), "{}", logged);

        let details = client
            .place_details("abc123", &["website"], None)
            .await
            .unwrap_err();
        let logged = format!("{:#} {:?}", details, details);
        assert!(!logged.contains("SECRET-KEY-123"), "{}", logged);
    }

    #[test]
    fn photo_url_embeds_width_reference_and_key() {
        assert_eq!(
            client().photo_url("ref-1", 400),
            "https://maps.example.com/api/place/photo?maxwidth=400&photo_reference=ref-1&key=test-key"
        );
    }

    #[test]
    fn nearby_payload_tolerates_missing_and_null_fields() {
        let payload: NearbySearchResponse = serde_json::from_str(r#"{
            "status": "OK",
            "results": [
                {
                    "place_id": "abc123",
                    "name": "鼎泰豐",
                    "rating": 4.5,
                    "opening_hours": {"open_now": true},
                    "photos": [{"photo_reference": "p1", "height": 10, "width": 20}, {"photo_reference": "p2"}],
                    "types": ["restaurant", "food"]
                },
                {"place_id": "def456", "name": "Bare", "types": null}
            ]
        }"#).unwrap();

        assert_eq!(payload.status.as_deref(), Some("OK"));
        assert!(payload.error_message.is_none());
        let first = &payload.results[0];
        assert_eq!(first.open_now(), Some(true));
        assert_eq!(first.first_photo_reference(), Some("p1"));
        assert_eq!(first.user_ratings_total, None);
        let second = &payload.results[1];
        assert!(second.types.is_empty());
        assert!(second.photos.is_empty());
        assert_eq!(second.open_now(), None);
    }

    #[test]
    fn details_payload_without_result_decodes() {
        let payload: PlaceDetailsResponse = serde_json::from_str(
            r#"{"status": "NOT_FOUND", "html_attributions": []}"#,
        ).unwrap();
        assert!(payload.result.is_none());
    }
}
