use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::models::restaurant::{Photo, RawPlace};
use crate::models::search::GridCell;
use crate::repositories::cache_store::tests::ManualClock;
use crate::repositories::cache_store::{Cache, InMemoryCacheStore};
use crate::repositories::places_client::{
    NearbySearchResponse, PlaceDetailsResponse, PlaceDetailsResult, PlacesProvider,
};

type NearbyFn = dyn Fn(GridCell) -> anyhow::Result<NearbySearchResponse> + Send + Sync;
type DetailsFn = dyn Fn(&str, &[&str]) -> anyhow::Result<PlaceDetailsResponse> + Send + Sync;

#[derive(Clone, Debug, PartialEq)]
pub struct DetailCall {
    pub place_id: String,
    pub fields: Vec<String>,
    pub language: Option<String>,
}

/// Scripted places provider that records every call it receives.
pub struct FakePlaces {
    nearby: Box<NearbyFn>,
    details: Box<DetailsFn>,
    nearby_delay: Option<Duration>,
    nearby_calls: Mutex<Vec<GridCell>>,
    detail_calls: Mutex<Vec<DetailCall>>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self {
            nearby: Box::new(|_| Ok(NearbySearchResponse::default())),
            details: Box::new(|_, _| Ok(PlaceDetailsResponse::default())),
            nearby_delay: None,
            nearby_calls: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_nearby(
        mut self,
        nearby: impl Fn(GridCell) -> anyhow::Result<NearbySearchResponse> + Send + Sync + 'static,
    ) -> Self {
        self.nearby = Box::new(nearby);
        self
    }

    pub fn with_details(
        mut self,
        details: impl Fn(&str, &[&str]) -> anyhow::Result<PlaceDetailsResponse> + Send + Sync + 'static,
    ) -> Self {
        self.details = Box::new(details);
        self
    }

    pub fn with_nearby_delay(mut self, delay: Duration) -> Self {
        self.nearby_delay = Some(delay);
        self
    }

    pub fn nearby_calls(&self) -> Vec<GridCell> {
        self.nearby_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<DetailCall> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn nearby_search(
        &self,
        cell: GridCell,
        _radius_meters: u32,
        _place_type: &str,
        _language: &str,
    ) -> anyhow::Result<NearbySearchResponse> {
        self.nearby_calls.lock().unwrap().push(cell);
        if let Some(delay) = self.nearby_delay {
            tokio::time::sleep(delay).await;
        }
        (self.nearby)(cell)
    }

    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
        language: Option<&str>,
    ) -> anyhow::Result<PlaceDetailsResponse> {
        self.detail_calls.lock().unwrap().push(DetailCall {
            place_id: place_id.to_string(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
            language: language.map(str::to_string),
        });
        (self.details)(place_id, fields)
    }

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!("https://photos.test/{}?maxwidth={}", photo_reference, max_width)
    }
}

pub fn test_cache() -> (Cache, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let store = Arc::new(InMemoryCacheStore::new(clock.clone()));
    (Cache::new(store), clock)
}

pub fn raw_place(place_id: &str, name: &str) -> RawPlace {
    RawPlace {
        place_id: place_id.to_string(),
        name: name.to_string(),
        rating: Some(4.1),
        user_ratings_total: Some(87),
        vicinity: Some(format!("{} vicinity", name)),
        opening_hours: None,
        photos: vec![
            Photo { photo_reference: format!("{}-photo-1", place_id), height: None, width: None },
            Photo { photo_reference: format!("{}-photo-2", place_id), height: None, width: None },
        ],
        types: vec!["restaurant".to_string(), "food".to_string()],
    }
}

pub fn nearby_ok(results: Vec<RawPlace>) -> anyhow::Result<NearbySearchResponse> {
    Ok(NearbySearchResponse {
        status: Some("OK".to_string()),
        results,
        error_message: None,
    })
}

pub fn details_ok(result: PlaceDetailsResult) -> anyhow::Result<PlaceDetailsResponse> {
    Ok(PlaceDetailsResponse {
        status: Some("OK".to_string()),
        result: Some(result),
        error_message: None,
    })
}
