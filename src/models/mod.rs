pub mod place_details;
pub mod restaurant;
pub mod search;
