//! Nearby terminal lookup.
//!
//! The backend stores the transit terminals; the core only ranks them
//! by distance from the user so the map can surface the closest ones.

use serde::{Deserialize, Serialize};

use crate::geo::{self, GeoPoint};

/// A transit terminal as delivered by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Terminal {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A terminal paired with its distance from the query position.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyTerminal {
    pub terminal: Terminal,
    pub distance_m: f64,
}

/// Terminals within `radius_m` of `position`, closest first.
pub fn nearest_terminals(
    position: &GeoPoint,
    terminals: &[Terminal],
    radius_m: f64,
) -> Vec<NearbyTerminal> {
    let mut found: Vec<NearbyTerminal> = terminals
        .iter()
        .map(|t| NearbyTerminal {
            terminal: t.clone(),
            distance_m: geo::distance_m(position, &t.point()),
        })
        .filter(|n| n.distance_m <= radius_m)
        .collect();

    found.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    found
}
