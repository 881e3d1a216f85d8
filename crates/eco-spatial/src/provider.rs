//! Geocoding and routing provider traits.
//!
//! # Pluggability
//!
//! The planner talks to third-party services only through [`Geocoder`] and
//! [`RoutingProvider`], so hosts can swap HERE for another vendor, and tests
//! can use the deterministic stubs in [`crate::stub`], without touching the
//! planner.
//!
//! # Units
//!
//! Distances are metres and durations seconds, both `f64`, exactly as the
//! routing summary reports them.

use eco_core::{BoundingBox, GeoPoint};

use crate::{polyline, SpatialResult};

// ── Geocoding ─────────────────────────────────────────────────────────────────

/// One forward-geocoding result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeocodeHit {
    pub point: GeoPoint,
    /// Human-readable place name as returned by the provider.
    pub label: String,
}

/// Free-text place name → coordinates.
///
/// Implementations return every hit in provider ranking order; an empty
/// list is a valid answer, not an error.  Network and HTTP failures are
/// [`SpatialError::Provider`](crate::SpatialError::Provider).
pub trait Geocoder: Send + Sync {
    fn geocode(&self, query: &str) -> SpatialResult<Vec<GeocodeHit>>;
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str) -> SpatialResult<Vec<GeocodeHit>> {
        (**self).geocode(query)
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

/// Route ranking the provider should optimise for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoutePreference {
    /// Minimise travel time.
    #[default]
    Fastest,
    /// Minimise distance.  Used for eco reroutes.
    Shortest,
}

impl RoutePreference {
    pub fn from_prefer_shortest(prefer_shortest: bool) -> Self {
        if prefer_shortest { RoutePreference::Shortest } else { RoutePreference::Fastest }
    }
}

/// A car routing query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    pub origin:      GeoPoint,
    pub destination: GeoPoint,
    /// Area the provider is asked to route around.
    pub avoid:       Option<BoundingBox>,
    pub preference:  RoutePreference,
    /// Alternatives requested on top of the primary route.
    pub alternatives: u8,
}

/// Length and duration of one candidate route.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    pub length_m:   f64,
    pub duration_s: f64,
}

/// One route returned by a provider, in provider ranking order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateRoute {
    /// Path in flexible-polyline form.
    pub polyline: String,
    pub summary:  RouteSummary,
}

impl CandidateRoute {
    pub fn new(polyline: impl Into<String>, length_m: f64, duration_s: f64) -> Self {
        Self {
            polyline: polyline.into(),
            summary:  RouteSummary { length_m, duration_s },
        }
    }

    /// Decoded lat/lon path.
    pub fn points(&self) -> SpatialResult<Vec<GeoPoint>> {
        Ok(polyline::decode_points(&self.polyline)?)
    }

    /// `true` if any vertex of the decoded path lies inside `area`.
    pub fn enters(&self, area: &BoundingBox) -> SpatialResult<bool> {
        Ok(path_enters(&self.points()?, area))
    }
}

/// Car router.
///
/// Returns the primary route followed by up to `request.alternatives`
/// alternatives.  An empty list means the provider found nothing; the
/// planner turns that into
/// [`SpatialError::NoRouteFound`](crate::SpatialError::NoRouteFound).
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a host can run the planner on
/// a worker thread.
pub trait RoutingProvider: Send + Sync {
    fn routes(&self, request: &RouteRequest) -> SpatialResult<Vec<CandidateRoute>>;
}

impl<R: RoutingProvider + ?Sized> RoutingProvider for Box<R> {
    fn routes(&self, request: &RouteRequest) -> SpatialResult<Vec<CandidateRoute>> {
        (**self).routes(request)
    }
}

/// `true` if any vertex of `path` lies inside `area`.
///
/// Only vertices are tested; a segment that clips a corner of `area`
/// between two outside vertices does not count.
pub fn path_enters(path: &[GeoPoint], area: &BoundingBox) -> bool {
    path.iter().any(|p| area.contains(*p))
}
