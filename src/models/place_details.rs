use serde::{Deserialize, Serialize};

/// Enrichment data for a single place, cached independently of any search.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct PlaceDetails {
    pub formatted_address: Option<String>,
    pub weekday_opening_hours: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub external_ordering_url: Option<String>,
}
