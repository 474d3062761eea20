use crate::models::Margins;

/// Earth's radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Latitude band around `lat` for a search range in miles
///
/// Uses `EARTH_RADIUS / range` as the angular half-width. This is a coarse
/// approximation, not a spherical-cap bound; for realistic ranges the band
/// is wide enough to let the distance check do the real filtering.
pub fn latitude_band(lat: f64, range_miles: f64) -> (f64, f64) {
    let degrees = (EARTH_RADIUS_MILES / range_miles).to_degrees();
    (lat - degrees, lat + degrees)
}

/// Longitude band around `lon`, widened by `1 / cos(lat)`
///
/// Same approximation as [`latitude_band`]. The asin argument is clamped to
/// its domain so the band stays ordered instead of going NaN.
pub fn longitude_band(lat: f64, lon: f64, range_miles: f64) -> (f64, f64) {
    let angle = (EARTH_RADIUS_MILES / range_miles).clamp(-1.0, 1.0).asin();
    let degrees = (angle / lat.to_radians().cos()).to_degrees().abs();
    (lon - degrees, lon + degrees)
}

/// Check if a point is within the margins' bounding box
#[inline]
pub fn is_within_margins(lat: f64, lon: f64, margins: &Margins) -> bool {
    lat >= margins.min_lat
        && lat <= margins.max_lat
        && lon >= margins.min_lon
        && lon <= margins.max_lon
}
