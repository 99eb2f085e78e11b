use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::error::SearchError;
use crate::models::restaurant::EnrichedRestaurant;

pub const MAX_SEARCH_RADIUS_METERS: f64 = 5000.0;

/// Accepts coordinates either as JSON numbers or numeric strings.
#[serde_as]
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchRequest {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub latitude: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub longitude: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub radius: f64,
}

impl SearchRequest {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SearchError::Validation(
                "The latitude must be a number between -90 and 90.".to_string(),
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SearchError::Validation(
                "The longitude must be a number between -180 and 180.".to_string(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SearchError::Validation(
                "The radius must be a positive number.".to_string(),
            ));
        }
        if self.radius > MAX_SEARCH_RADIUS_METERS {
            return Err(SearchError::Validation(format!(
                "The radius must not be greater than {}.",
                MAX_SEARCH_RADIUS_METERS
            )));
        }
        Ok(())
    }

    /// Cache key for the area-search namespace.
    pub fn fingerprint(&self) -> String {
        // `+ 0.0` folds -0.0 into 0.0 so both format the same way
        format!(
            "restaurants:{:.6}:{:.6}:{:.1}",
            self.latitude + 0.0,
            self.longitude + 0.0,
            self.radius + 0.0,
        )
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct GridCell {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AreaSearchResult {
    pub success: bool,
    pub data: Vec<EnrichedRestaurant>,
    pub total: usize,
    pub grid_points_count: usize,
}

impl AreaSearchResult {
    pub fn new(data: Vec<EnrichedRestaurant>, grid_points_count: usize) -> Self {
        Self {
            success: true,
            total: data.len(),
            data,
            grid_points_count,
        }
    }
}
