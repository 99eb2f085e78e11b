use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// A place as returned by a single nearby-search call.
#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RawPlace {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningStatus>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub types: Vec<String>,
}

impl RawPlace {
    pub fn open_now(&self) -> Option<bool> {
        self.opening_hours.as_ref().and_then(|hours| hours.open_now)
    }

    pub fn first_photo_reference(&self) -> Option<&str> {
        self.photos
            .first()
            .map(|photo| photo.photo_reference.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct OpeningStatus {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Photo {
    pub photo_reference: String,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// The unit handed back to callers: one per unique place id per search.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct EnrichedRestaurant {
    pub place_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: u32,
    pub address: String,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub opening_hours: Option<Vec<String>>,
    pub open_now: Option<bool>,
    pub photos: Option<Vec<PhotoSet>>,
    pub types: Vec<String>,
    pub uber_eats_url: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PhotoSet {
    pub urls: PhotoUrls,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PhotoUrls {
    pub small: String,
    pub large: String,
}
