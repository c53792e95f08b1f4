//! Route progress resolution.
//!
//! Finds the point on a route polyline closest to the user's current
//! position, splits the polyline into traveled and remaining parts
//! around it, and derives a scalar progress ratio. Pure functions with
//! no retained state; the caller re-runs them on every position or
//! route change.

use serde::Serialize;

use crate::geo::{self, GeoPoint};

/// How the scalar progress ratio is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// Ratio of passed vertices to total vertex count. Matches the
    /// mobile app's behavior; jumps unevenly on routes with uneven
    /// segment lengths.
    #[default]
    VertexCount,
    /// Ratio of distance along the polyline to its total length.
    DistanceWeighted,
}

/// Result of resolving a position against a route.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSplit {
    /// Route vertices already passed, ending at the snapped position.
    pub traveled: Vec<GeoPoint>,
    /// Snapped position followed by the route vertices still ahead.
    pub remaining: Vec<GeoPoint>,
    /// Fraction of the route completed, in [0, 1].
    pub ratio: f64,
}

impl ProgressSplit {
    /// Split for a route with no usable position yet: nothing
    /// traveled, the whole route remaining.
    pub fn full_remaining(route: &[GeoPoint]) -> Self {
        Self {
            traveled: Vec::new(),
            remaining: route.to_vec(),
            ratio: 0.0,
        }
    }
}

/// Resolve progress with the default vertex-count ratio.
pub fn resolve_progress(position: &GeoPoint, route: &[GeoPoint]) -> ProgressSplit {
    resolve_progress_with(position, route, ProgressMode::default())
}

/// Resolve the current position against a route.
///
/// Scans every consecutive segment left to right, projecting the
/// position onto each and keeping the closest hit. Strict comparison
/// means the earliest segment wins exact ties, so a position sitting
/// on a shared vertex belongs to the segment that ends there.
///
/// A route with fewer than 2 points has no segments to scan and comes
/// back untouched as fully remaining, with ratio 0.
pub fn resolve_progress_with(
    position: &GeoPoint,
    route: &[GeoPoint],
    mode: ProgressMode,
) -> ProgressSplit {
    if route.len() < 2 {
        return ProgressSplit::full_remaining(route);
    }

    let mut best_index = 0;
    let mut best_point = route[0];
    let mut best_dist = f64::INFINITY;
    let mut best_along = 0.0;
    let mut cumulative = 0.0;

    for (i, seg) in route.windows(2).enumerate() {
        let projected = geo::project_onto_segment(position, &seg[0], &seg[1]);
        let dist = geo::distance_m(position, &projected);

        if dist < best_dist {
            best_index = i;
            best_point = projected;
            best_dist = dist;
            best_along = cumulative + geo::distance_m(&seg[0], &projected);
        }

        cumulative += geo::distance_m(&seg[0], &seg[1]);
    }

    let ratio = match mode {
        ProgressMode::VertexCount => (best_index + 1) as f64 / route.len() as f64,
        ProgressMode::DistanceWeighted => {
            if cumulative > 0.0 {
                (best_along / cumulative).clamp(0.0, 1.0)
            } else {
                0.0
            }
        }
    };

    // Snapped point joins both halves; skip it where it coincides
    // with an adjoining vertex so neither half carries duplicates.
    let mut traveled = route[..=best_index].to_vec();
    if best_point != route[best_index] {
        traveled.push(best_point);
    }

    let mut remaining = Vec::with_capacity(route.len() - best_index);
    remaining.push(best_point);
    if route[best_index + 1] != best_point {
        remaining.extend_from_slice(&route[best_index + 1..]);
    } else {
        remaining.extend_from_slice(&route[best_index + 2..]);
    }

    ProgressSplit {
        traveled,
        remaining,
        ratio,
    }
}

/// Resolve progress from JSON inputs and return the split as a JSON
/// string. Convenience wrapper for JNI.
pub fn resolve_to_json(position_json: &str, route_json: &str) -> Result<String, String> {
    let position: GeoPoint = serde_json::from_str(position_json)
        .map_err(|e| format!("position decode error: {e}"))?;
    let route: Vec<GeoPoint> = serde_json::from_str(route_json)
        .map_err(|e| format!("route decode error: {e}"))?;

    let split = resolve_progress(&position, &route);
    serde_json::to_string(&split).map_err(|e| format!("JSON serialize error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng)
    }

    #[test]
    fn midpoint_of_two_point_route() {
        // ~111 m due north, position halfway along
        let route = vec![pt(14.0, 121.0), pt(14.001, 121.0)];
        let split = resolve_progress(&pt(14.0005, 121.0), &route);

        assert!((split.ratio - 0.5).abs() < 1e-12, "Expected 0.5, got {}", split.ratio);
        assert_eq!(split.traveled.len(), 2);
        assert_eq!(split.remaining.len(), 2);
        assert!((split.traveled[1].lat - 14.0005).abs() < 1e-9);
    }

    #[test]
    fn position_at_route_start() {
        let route = vec![pt(14.0, 121.0), pt(14.001, 121.0), pt(14.002, 121.0)];
        let position = route[0];
        let split = resolve_progress(&position, &route);

        assert_eq!(split.traveled, vec![route[0]]);
        assert_eq!(split.remaining, route);
        assert!((split.ratio - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_route_is_untouched() {
        let route = vec![pt(14.0, 121.0)];
        let split = resolve_progress(&pt(14.5, 121.5), &route);

        assert!(split.traveled.is_empty());
        assert_eq!(split.remaining, route);
        assert_eq!(split.ratio, 0.0);
    }

    #[test]
    fn empty_route_is_untouched() {
        let split = resolve_progress(&pt(14.0, 121.0), &[]);

        assert!(split.traveled.is_empty());
        assert!(split.remaining.is_empty());
        assert_eq!(split.ratio, 0.0);
    }

    #[test]
    fn zero_length_segment_does_not_panic() {
        // Repeated vertex inside the route
        let route = vec![pt(14.0, 121.0), pt(14.0, 121.0), pt(14.001, 121.0)];
        let split = resolve_progress(&pt(14.0005, 121.0), &route);

        assert!(split.ratio > 0.0 && split.ratio <= 1.0);
        assert_eq!(split.traveled.last(), split.remaining.first());
    }

    #[test]
    fn shared_vertex_belongs_to_earlier_segment() {
        // Position exactly on the middle vertex: both segments project
        // to it at distance 0, the scan keeps the first
        let route = vec![pt(14.0, 121.0), pt(14.001, 121.0), pt(14.001, 121.001)];
        let position = route[1];
        let split = resolve_progress(&position, &route);

        assert!((split.ratio - 1.0 / 3.0).abs() < 1e-12,
            "Expected earlier segment to win, got ratio {}", split.ratio);
        assert_eq!(split.traveled, vec![route[0], route[1]]);
        assert_eq!(split.remaining, vec![route[1], route[2]]);
    }

    #[test]
    fn split_reconstructs_route() {
        let route = vec![
            pt(14.0, 121.0),
            pt(14.001, 121.0),
            pt(14.001, 121.002),
            pt(14.003, 121.002),
        ];
        let split = resolve_progress(&pt(14.0012, 121.001), &route);

        // Halves share the snapped point
        assert_eq!(split.traveled.last(), split.remaining.first());

        // Concatenation visits every original vertex in order
        let snapped = *split.traveled.last().unwrap();
        let mut joined: Vec<GeoPoint> = split.traveled.clone();
        joined.extend_from_slice(&split.remaining[1..]);
        let without_snap: Vec<GeoPoint> = joined
            .iter()
            .copied()
            .filter(|p| *p != snapped || route.contains(p))
            .collect();
        assert_eq!(without_snap.len(), route.len());
        for (got, want) in without_snap.iter().zip(route.iter()) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn ratio_near_start_and_end() {
        let route = vec![
            pt(14.0, 121.0),
            pt(14.001, 121.0),
            pt(14.002, 121.0),
            pt(14.003, 121.0),
        ];

        let near_start = resolve_progress(&pt(14.0001, 121.0), &route);
        let near_end = resolve_progress(&pt(14.0029, 121.0), &route);

        assert!((near_start.ratio - 0.25).abs() < 1e-12);
        assert!((near_end.ratio - 0.75).abs() < 1e-12);
        assert!(near_start.ratio < near_end.ratio);
    }

    #[test]
    fn ratio_is_bounded() {
        let route = vec![pt(14.0, 121.0), pt(14.001, 121.001), pt(14.002, 121.0)];

        for &(lat, lng) in &[(13.0, 120.0), (14.001, 121.0), (15.0, 122.0), (14.002, 121.0)] {
            let split = resolve_progress(&pt(lat, lng), &route);
            assert!(split.ratio >= 0.0 && split.ratio <= 1.0,
                "Ratio {} out of bounds for position ({lat}, {lng})", split.ratio);
        }
    }

    #[test]
    fn vertex_count_ignores_segment_lengths() {
        // One long segment then one short one: halfway down the long
        // segment already counts as 1/3 of the route
        let route = vec![pt(14.0, 121.0), pt(14.01, 121.0), pt(14.0101, 121.0)];
        let split = resolve_progress(&pt(14.005, 121.0), &route);

        assert!((split.ratio - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn distance_weighted_follows_segment_lengths() {
        let route = vec![pt(14.0, 121.0), pt(14.01, 121.0), pt(14.0101, 121.0)];
        let split =
            resolve_progress_with(&pt(14.005, 121.0), &route, ProgressMode::DistanceWeighted);

        // Halfway down a segment that is ~99% of the route length
        assert!(split.ratio > 0.45 && split.ratio < 0.55,
            "Expected ~0.5, got {}", split.ratio);
    }

    #[test]
    fn distance_weighted_zero_length_route() {
        let route = vec![pt(14.0, 121.0), pt(14.0, 121.0)];
        let split =
            resolve_progress_with(&pt(14.5, 121.0), &route, ProgressMode::DistanceWeighted);
        assert_eq!(split.ratio, 0.0);
    }

    #[test]
    fn resolve_to_json_round_trips() {
        let position = r#"{"lat": 14.0005, "lng": 121.0}"#;
        let route = r#"[{"lat": 14.0, "lng": 121.0}, {"lat": 14.001, "lng": 121.0}]"#;

        let json = resolve_to_json(position, route).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!((value["ratio"].as_f64().unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(value["traveled"].as_array().unwrap().len(), 2);
        assert_eq!(value["remaining"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn resolve_to_json_rejects_bad_input() {
        assert!(resolve_to_json("not json", "[]").is_err());
        assert!(resolve_to_json(r#"{"lat": 1.0, "lng": 2.0}"#, "{}").is_err());
    }

    #[test]
    fn off_route_position_still_splits() {
        // User well off the polyline: snap to closest segment anyway
        let route = vec![pt(14.0, 121.0), pt(14.0, 121.01), pt(14.01, 121.01)];
        let split = resolve_progress(&pt(14.02, 121.005), &route);

        assert_eq!(split.traveled.last(), split.remaining.first());
        assert!(split.ratio > 0.0 && split.ratio <= 1.0);
    }
}
