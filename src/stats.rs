//! Live remaining-distance and remaining-time statistics.
//!
//! Allocates the route summary proportionally by progress ratio and
//! renders the result the way the trip panel displays it.

use serde::{Deserialize, Serialize};

/// Aggregate route metadata from the routing service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total route length in meters.
    pub distance_m: f64,
    /// Estimated total travel time in seconds.
    pub duration_s: f64,
}

/// Distance and time still ahead of the user.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RemainingStats {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RemainingStats {
    /// Remaining time as display text.
    pub fn duration_text(&self) -> String {
        format_duration(self.duration_s)
    }

    /// Remaining distance as display text.
    pub fn distance_text(&self) -> String {
        format_distance(self.distance_m)
    }
}

/// Derive remaining stats by proportional allocation.
///
/// Assumes uniform progression along the route: each fraction of the
/// route accounts for the same fraction of total distance and time.
/// The ratio is clamped to [0, 1] before use, so the results always
/// stay within the summary totals.
pub fn project_remaining(summary: &RouteSummary, progress_ratio: f64) -> RemainingStats {
    let left = 1.0 - progress_ratio.clamp(0.0, 1.0);

    RemainingStats {
        distance_m: summary.distance_m * left,
        duration_s: summary.duration_s * left,
    }
}

/// Format a duration as whole minutes, switching to hours past 60.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as i64;

    if minutes > 60 {
        format!("{} hr {} min", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} min")
    }
}

/// Format a distance in kilometers to one decimal place.
pub fn format_distance(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}
