//! Geospatial primitives.
//!
//! Platform-agnostic building blocks for the route progress engine.
//! All coordinates use WGS84 (lat/lng in degrees). Coordinates are
//! never validated here; out-of-range inputs produce a mathematically
//! defined but meaningless result, which is the caller's problem.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Earth radius in meters (spherical model).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
pub fn distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Total length of a polyline in meters.
pub fn path_length_m(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| distance_m(&w[0], &w[1]))
        .sum()
}

/// Closest point on the closed segment [a, b] to p.
///
/// Latitude and longitude are taken directly as planar y/x, which is
/// accurate enough at commute scale (tens of meters to a few
/// kilometers). The projection parameter is clamped to [0, 1], so the
/// result never lies beyond the segment endpoints. A zero-length
/// segment yields `a`.
pub fn project_onto_segment(p: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
    let dx = b.lng - a.lng;
    let dy = b.lat - a.lat;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        // Degenerate segment, return endpoint
        return *a;
    }

    let t = (((p.lng - a.lng) * dx + (p.lat - a.lat) * dy) / len_sq).clamp(0.0, 1.0);

    GeoPoint {
        lat: a.lat + t * dy,
        lng: a.lng + t * dx,
    }
}
