//! Planner session state and its reducer.
//!
//! # State machine
//!
//! ```text
//! Idle ──route──▶ RouteComputed ──tap──▶ ClustersEvaluated
//!                      ▲                       │
//!                      └──── no reroute ◀──────┤
//!                                              ▼
//!                                       RerouteApplied ──tap──▶ …
//! ```
//!
//! There is no terminal state.  Every mutation goes through
//! [`SessionState::apply`], which is where late route responses are
//! dropped: a [`SessionEvent::RouteComputed`] is accepted only when it
//! carries the most recently issued [`RequestId`].

use serde::Serialize;
use tracing::warn;

use eco_core::{BoundingBox, GeoPoint, RequestId};
use eco_spatial::GeocodeHit;

// ── Routes and trips ──────────────────────────────────────────────────────────

/// Whether a route was computed freely or around an avoided area.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum RouteKind {
    /// Computed without an avoid area.  Cached for comparison.
    Original,
    /// Recomputed around an incident cluster.
    Adjusted,
}

/// A route selected from a provider response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlannedRoute {
    pub request:    RequestId,
    pub kind:       RouteKind,
    /// Flexible-polyline encoding as returned by the provider.
    pub polyline:   String,
    pub points:     Vec<GeoPoint>,
    pub length_m:   f64,
    pub duration_s: f64,
    /// Estimated with the vehicle selected at computation time.
    pub co2_kg:     f64,
    pub bounds:     Option<BoundingBox>,
}

impl PlannedRoute {
    /// One-line human summary, e.g.
    /// `Distance: 120.00 km | Time: 120 min | CO2: 18.60 kg`.
    pub fn summary_line(&self) -> String {
        format!(
            "Distance: {:.2} km | Time: {:.0} min | CO2: {:.2} kg",
            self.length_m / 1000.0,
            self.duration_s / 60.0,
            self.co2_kg
        )
    }
}

/// Resolved endpoints of the trip being planned.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trip {
    /// Origin text exactly as the user entered it.
    pub origin_query:      String,
    pub destination_query: String,
    pub origin:            GeocodeHit,
    pub destination:       GeocodeHit,
}

// ── Eco ledger ────────────────────────────────────────────────────────────────

/// Gamification counters shown on the eco dashboard.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct EcoLedger {
    pub points:                 u64,
    /// Saving of the last applied reroute; reset by every new route.
    pub trip_co2_saved_kg:      f64,
    /// Sum of every reroute saving this session.
    pub community_co2_saved_kg: f64,
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    RouteComputed,
    ClustersEvaluated,
    RerouteApplied,
}

/// Inputs to the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    TripPlanned(Trip),
    /// A route request was issued; it becomes the only one whose result
    /// will be accepted.
    RouteRequested(RequestId),
    RouteComputed(PlannedRoute),
    IncidentTapped { points: u64 },
    /// Start of a clustering pass.  Advances the cycle counter.
    ClustersEvaluated,
    /// A clustering pass ended without a reroute.
    EvaluationSettled,
    RerouteApplied { co2_saved_kg: f64 },
    /// The cached original route is shown again.
    OriginalRestored,
    DrivingStarted,
    DrivingStopped,
}

/// Everything the planner remembers between handler calls.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SessionState {
    pub phase:          SessionPhase,
    pub trip:           Option<Trip>,
    /// First route computed without an avoid area for the current trip.
    pub original:       Option<PlannedRoute>,
    /// Route currently on screen.
    pub current:        Option<PlannedRoute>,
    pub latest_request: Option<RequestId>,
    pub eco:            EcoLedger,
    pub driving:        bool,
    /// Number of clustering passes run so far.
    pub cycle:          u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `event`.  Returns `false` if the event was rejected.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::TripPlanned(trip) => {
                self.trip     = Some(trip);
                self.original = None;
                self.driving  = false;
            }
            SessionEvent::RouteRequested(id) => {
                self.latest_request = Some(id);
            }
            SessionEvent::RouteComputed(route) => {
                if self.latest_request != Some(route.request) {
                    warn!(
                        "discarding route for {} (latest is {:?})",
                        route.request, self.latest_request
                    );
                    return false;
                }
                if route.kind == RouteKind::Original {
                    self.original = Some(route.clone());
                }
                self.current = Some(route);
                self.eco.trip_co2_saved_kg = 0.0;
                self.phase = SessionPhase::RouteComputed;
            }
            SessionEvent::IncidentTapped { points } => {
                self.eco.points = self.eco.points.saturating_add(points);
            }
            SessionEvent::ClustersEvaluated => {
                self.cycle += 1;
                self.phase = SessionPhase::ClustersEvaluated;
            }
            SessionEvent::EvaluationSettled => {
                self.phase = if self.current.is_some() {
                    SessionPhase::RouteComputed
                } else {
                    SessionPhase::Idle
                };
            }
            SessionEvent::RerouteApplied { co2_saved_kg } => {
                self.eco.trip_co2_saved_kg       = co2_saved_kg;
                self.eco.community_co2_saved_kg += co2_saved_kg;
                self.phase = SessionPhase::RerouteApplied;
            }
            SessionEvent::OriginalRestored => {
                let Some(original) = self.original.clone() else {
                    return false;
                };
                self.current = Some(original);
                self.phase = SessionPhase::RouteComputed;
            }
            SessionEvent::DrivingStarted => {
                if self.trip.is_none() {
                    return false;
                }
                self.driving = true;
            }
            SessionEvent::DrivingStopped => {
                self.driving = false;
            }
        }
        true
    }
}
