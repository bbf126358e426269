//! Great-circle distance between coordinates.

use crate::coords::Coordinates;

/// Mean Earth radius in kilometers (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine distance between two points, in kilometers.
///
/// Accuracy and capture time are ignored; only the lat/long pair matters.
/// Identical points produce exactly 0.0.
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    if a.latitude == b.latitude && a.longitude == b.longitude {
        return 0.0;
    }

    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // Clamp guards against rounding slightly above 1.0 for near-antipodal pairs.
    2.0 * EARTH_RADIUS_KM * h.sqrt().clamp(0.0, 1.0).asin()
}
