//! Routing service response decoding.
//!
//! The routing collaborator is an OSRM-compatible HTTP service that
//! answers a route request with GeoJSON LineString geometry plus a
//! distance/duration summary. This module extracts the first route
//! into core types; the HTTP call itself, and any retry or throttling,
//! happen in the app layer.

use serde::Deserialize;

use crate::geo::GeoPoint;
use crate::stats::RouteSummary;

/// A decoded route: polyline plus its summary.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub path: Vec<GeoPoint>,
    pub summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    geometry: Geometry,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

/// Decode the first route of a routing service response body.
///
/// GeoJSON stores coordinates as [lng, lat]; the returned polyline
/// uses lat/lng order. Returns Ok(None) when the service found no
/// route between the requested points.
pub fn decode_route(body: &str) -> Result<Option<RoutePlan>, String> {
    let response: RouteResponse =
        serde_json::from_str(body).map_err(|e| format!("route decode error: {e}"))?;

    let Some(entry) = response.routes.into_iter().next() else {
        return Ok(None);
    };

    let path = entry
        .geometry
        .coordinates
        .iter()
        .map(|&[lng, lat]| GeoPoint::new(lat, lng))
        .collect();

    Ok(Some(RoutePlan {
        path,
        summary: RouteSummary {
            distance_m: entry.distance,
            duration_s: entry.duration,
        },
    }))
}
