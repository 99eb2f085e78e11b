pub mod cache_store;
pub mod places_client;
