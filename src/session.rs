//! Trip session state.
//!
//! Owns the active route plan and the latest accepted position, and
//! recomputes the progress split and remaining stats on every change.
//! The computations live in `progress` and `stats`; this struct is the
//! explicit replacement for the app's centralized store, so the pure
//! functions stay reusable outside any UI framework.

use log::debug;
use serde::Deserialize;

use crate::geo::GeoPoint;
use crate::progress::{self, ProgressMode, ProgressSplit};
use crate::stats::{self, RemainingStats, RouteSummary};

/// A raw sample from the device location source.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PositionSample {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_m: f64,
}

/// Samples with worse accuracy are dropped once a first fix exists.
const ACCURACY_LIMIT_M: f64 = 100.0;

#[derive(Debug, Default)]
pub struct TripSession {
    route: Vec<GeoPoint>,
    summary: Option<RouteSummary>,
    position: Option<GeoPoint>,
    split: Option<ProgressSplit>,
    mode: ProgressMode,
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ProgressMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Install a new planned route, replacing any previous one. The
    /// split is recomputed immediately when a position is known.
    pub fn set_route(&mut self, path: Vec<GeoPoint>, summary: RouteSummary) {
        debug!(
            "route set: {} points, {:.0} m, {:.0} s",
            path.len(),
            summary.distance_m,
            summary.duration_s
        );
        self.route = path;
        self.summary = Some(summary);
        self.split = self
            .position
            .as_ref()
            .map(|p| progress::resolve_progress_with(p, &self.route, self.mode));
    }

    /// Drop the active route and its derived state. The position is
    /// kept; a later route reuses it.
    pub fn clear_route(&mut self) {
        self.route.clear();
        self.summary = None;
        self.split = None;
    }

    /// Feed a location sample. Returns false when the accuracy filter
    /// rejected it; the first fix is always accepted.
    pub fn update_position(&mut self, sample: PositionSample) -> bool {
        if sample.accuracy_m >= ACCURACY_LIMIT_M && self.position.is_some() {
            debug!("position rejected: accuracy {:.0} m", sample.accuracy_m);
            return false;
        }

        let p = GeoPoint::new(sample.lat, sample.lng);
        self.position = Some(p);

        if !self.route.is_empty() {
            self.split = Some(progress::resolve_progress_with(&p, &self.route, self.mode));
        }
        true
    }

    pub fn position(&self) -> Option<&GeoPoint> {
        self.position.as_ref()
    }

    pub fn route(&self) -> &[GeoPoint] {
        &self.route
    }

    /// Current split, or None when no route is active. Until a fix has
    /// been accepted the whole route counts as remaining.
    pub fn split(&self) -> Option<ProgressSplit> {
        if self.route.is_empty() {
            return None;
        }
        Some(match &self.split {
            Some(s) => s.clone(),
            None => ProgressSplit::full_remaining(&self.route),
        })
    }

    /// Remaining distance and time, or None when no summary is active.
    pub fn remaining(&self) -> Option<RemainingStats> {
        let summary = self.summary?;
        let ratio = self.split.as_ref().map_or(0.0, |s| s.ratio);
        Some(stats::project_remaining(&summary, ratio))
    }
}
