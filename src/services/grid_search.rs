use crate::models::search::GridCell;

/// Radius each cell is searched with, in meters.
pub const BASE_RADIUS_METERS: f64 = 1000.0;
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
/// Cells are spaced at 1.5x their radius so neighbours overlap.
const OVERLAP_COEFFICIENT: f64 = 1.5;

/// Covers the disc around (`center_lat`, `center_lng`) with cell centers laid
/// out on a square lattice, keeping only those inside `radius_meters`.
///
/// Cells come back in row-major order (latitude step, then longitude step).
/// Longitude spacing is scaled by the latitude, so this degrades close to the
/// poles.
pub fn calculate_grid_points(center_lat: f64, center_lng: f64, radius_meters: f64) -> Vec<GridCell> {
    let lat_offset = (BASE_RADIUS_METERS / EARTH_RADIUS_METERS).to_degrees();
    let lng_offset = (BASE_RADIUS_METERS / EARTH_RADIUS_METERS / center_lat.to_radians().cos()).to_degrees();

    let grid_count = (radius_meters / BASE_RADIUS_METERS).ceil() as i64;

    let mut cells = Vec::new();
    for i in -grid_count..=grid_count {
        for j in -grid_count..=grid_count {
            let lat = center_lat + i as f64 * lat_offset * OVERLAP_COEFFICIENT;
            let lng = center_lng + j as f64 * lng_offset * OVERLAP_COEFFICIENT;

            if haversine_distance(center_lat, center_lng, lat, lng) <= radius_meters {
                cells.push(GridCell { lat, lng });
            }
        }
    }

    cells
}

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (lat1, lng1) = (lat1.to_radians(), lng1.to_radians());
    let (lat2, lng2) = (lat2.to_radians(), lng2.to_radians());

    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
