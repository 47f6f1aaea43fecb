//! Geodesic helpers for the proximity search.
//!
//! The bounding box is a deliberately loose equirectangular pre-filter:
//! it must never exclude a point that lies inside the true radius. The
//! authoritative filter is the great-circle distance, computed both in
//! SQL (for ranking) and here (for tests and in-memory stores).

/// Mean Earth radius in metres, as used by the spherical distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree of latitude.
const METRES_PER_DEG_LAT: f64 = 111_320.0;

/// Floor applied to `cos(lat)` so longitude spans stay finite near the
/// poles.
const MIN_COS_LAT: f64 = 0.01;

/// Rectangular latitude/longitude window approximating a radius.
///
/// Always a superset of the true circle around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge, degrees.
    pub min_lat: f64,
    /// Northern edge, degrees.
    pub max_lat: f64,
    /// Western edge, degrees.
    pub min_lng: f64,
    /// Eastern edge, degrees.
    pub max_lng: f64,
}

impl BoundingBox {
    /// Compute the window around `(lat, lng)` covering `radius_m` metres.
    pub fn around(lat: f64, lng: f64, radius_m: f64) -> Self {
        let deg_lat = radius_m / METRES_PER_DEG_LAT;
        let cos_lat = lat.to_radians().cos().max(MIN_COS_LAT);
        let deg_lng = radius_m / (METRES_PER_DEG_LAT * cos_lat);
        Self {
            min_lat: lat - deg_lat,
            max_lat: lat + deg_lat,
            min_lng: lng - deg_lng,
            max_lng: lng + deg_lng,
        }
    }

    /// Whether a point falls inside the window (edges inclusive).
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// Great-circle (haversine) distance in metres between two points.
pub fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}
