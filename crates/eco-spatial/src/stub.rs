//! Deterministic offline providers.
//!
//! Used by the planner's tests and by the demo when no API key is
//! configured.  Both stubs record every query they receive so callers can
//! assert on what the planner asked for.

use std::collections::HashMap;
use std::sync::Mutex;

use eco_core::GeoPoint;

use crate::{CandidateRoute, GeocodeHit, Geocoder, RouteRequest, RoutingProvider, SpatialError, SpatialResult};

// ── StaticGeocoder ────────────────────────────────────────────────────────────

/// Geocoder backed by a fixed name → point table.
///
/// Lookups ignore case and surrounding whitespace.  Unknown names yield an
/// empty hit list.
#[derive(Default)]
pub struct StaticGeocoder {
    places:  HashMap<String, GeocodeHit>,
    queries: Mutex<Vec<String>>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at `point`.
    pub fn with_place(mut self, name: &str, point: GeoPoint) -> Self {
        self.places.insert(
            normalise(name),
            GeocodeHit { point, label: name.trim().to_owned() },
        );
        self
    }

    /// Every query received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, query: &str) -> SpatialResult<Vec<GeocodeHit>> {
        if let Ok(mut q) = self.queries.lock() {
            q.push(query.to_owned());
        }
        Ok(self.places.get(&normalise(query)).cloned().into_iter().collect())
    }
}

fn normalise(name: &str) -> String {
    name.trim().to_lowercase()
}

// ── StaticRouter ──────────────────────────────────────────────────────────────

/// Router returning canned candidate lists.
///
/// `direct` answers requests without an avoid area; `avoiding` answers
/// requests with one (falling back to `direct` when unset).  Lists are
/// truncated to `1 + request.alternatives` entries like a real provider.
#[derive(Default)]
pub struct StaticRouter {
    direct:   Vec<CandidateRoute>,
    avoiding: Option<Vec<CandidateRoute>>,
    failure:  Option<String>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl StaticRouter {
    /// Answer every request with `routes`.
    pub fn new(routes: Vec<CandidateRoute>) -> Self {
        Self { direct: routes, ..Self::default() }
    }

    /// Answer requests carrying an avoid area with `routes` instead.
    pub fn with_avoiding(mut self, routes: Vec<CandidateRoute>) -> Self {
        self.avoiding = Some(routes);
        self
    }

    /// A router whose every call fails with a provider error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self { failure: Some(message.into()), ..Self::default() }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl RoutingProvider for StaticRouter {
    fn routes(&self, request: &RouteRequest) -> SpatialResult<Vec<CandidateRoute>> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(request.clone());
        }
        if let Some(message) = &self.failure {
            return Err(SpatialError::Provider(message.clone()));
        }

        let source = match (&request.avoid, &self.avoiding) {
            (Some(_), Some(avoiding)) => avoiding,
            _ => &self.direct,
        };
        Ok(source
            .iter()
            .take(1 + request.alternatives as usize)
            .cloned()
            .collect())
    }
}
