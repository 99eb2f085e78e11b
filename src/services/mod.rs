pub mod grid_search;
pub mod place_details;
pub mod restaurant_search;

#[cfg(test)]
pub(crate) mod test_support;
