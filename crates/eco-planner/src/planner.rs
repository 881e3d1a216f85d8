//! The `Planner` and its event handlers.

use tracing::{debug, info, warn};

use eco_core::{BoundingBox, GeoPoint, MarkId, RequestId, Timestamp};
use eco_fleet::{VehicleDirectory, VehicleProfile};
use eco_incident::{find_clusters, MarkOrigin, MarkStore, TapTally};
use eco_spatial::{
    CandidateRoute, GeocodeHit, Geocoder, RoutePreference, RouteRequest, RoutingProvider,
    SpatialError,
};

use crate::map::{MapView, MarkerKind, Notice, RouteStyle};
use crate::session::{PlannedRoute, RouteKind, SessionEvent, SessionState, Trip};
use crate::{PlannerConfig, PlannerError, PlannerResult, TripRecord};

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Result of one clustering pass.
#[derive(Debug)]
pub enum RerouteOutcome {
    /// No qualifying cluster among the live marks.
    NoCluster,
    /// Clusters were consumed but no coordinate has been tapped often
    /// enough to justify a reroute.
    NotWarranted { clusters: usize },
    /// An adjusted route differing from the original is now on screen.
    Rerouted { avoided: BoundingBox, co2_saved_kg: f64 },
    /// The provider offered nothing but the original route, which is
    /// shown again.
    KeptOriginal { avoided: BoundingBox },
    /// No trip has been planned, or its original route could not be
    /// computed.
    OriginalUnavailable,
    /// The adjusted route request failed; the rendered route is unchanged.
    Failed(PlannerError),
}

/// A route request that has been issued but not yet answered.
///
/// Hosts that call the routing provider off-thread take a ticket from
/// [`Planner::prepare_route`], run `ticket.request` themselves, and hand
/// the candidates back to [`Planner::finish_route`].  Only the most
/// recently prepared ticket is honoured.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteTicket {
    pub id:      RequestId,
    pub request: RouteRequest,
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Traffic-aware eco route planner.
///
/// Owns the session and drives the geocoder `G`, the router `R`, and the
/// map `M`.  Every handler takes `&mut self` and runs to completion, so a
/// host dispatches UI events to it one at a time.
///
/// Create via [`PlannerBuilder`][crate::PlannerBuilder].
pub struct Planner<G: Geocoder, R: RoutingProvider, M: MapView> {
    pub(crate) config:    PlannerConfig,
    pub(crate) geocoder:  G,
    pub(crate) router:    R,
    pub(crate) map:       M,
    pub(crate) vehicles:  Box<dyn VehicleDirectory + Send + Sync>,
    pub(crate) selected:  Option<String>,
    pub(crate) state:     SessionState,
    pub(crate) marks:     MarkStore,
    pub(crate) tally:     TapTally,
    pub(crate) endpoints: Vec<eco_core::MarkerId>,
    pub(crate) next_request: RequestId,
}

impl<G: Geocoder, R: RoutingProvider, M: MapView> Planner<G, R, M> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn marks(&self) -> &MarkStore {
        &self.marks
    }

    pub fn tally(&self) -> &TapTally {
        &self.tally
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    // ── Vehicles ──────────────────────────────────────────────────────────

    /// The selected vehicle, or the directory's default when none is.
    pub fn vehicle(&self) -> Option<&VehicleProfile> {
        match &self.selected {
            Some(id) => self.vehicles.vehicle(id),
            None     => self.vehicles.default_vehicle(),
        }
    }

    pub fn vehicles(&self) -> &[VehicleProfile] {
        self.vehicles.vehicles()
    }

    /// Use vehicle `id` for every later CO2 estimate.
    pub fn select_vehicle(&mut self, id: &str) -> PlannerResult<()> {
        if self.vehicles.vehicle(id).is_none() {
            return Err(PlannerError::UnknownVehicle(id.to_owned()));
        }
        debug!("selected vehicle {id}");
        self.selected = Some(id.to_owned());
        Ok(())
    }

    /// CO2 in kilograms for a route, using the current vehicle's factor.
    /// Without a vehicle only the idle term is counted.
    pub fn estimate_co2(&self, distance_m: f64, duration_s: f64) -> f64 {
        let factor = self.vehicle().map_or(0.0, |v| v.co2_g_per_km);
        eco_core::estimate_co2_kg(distance_m, duration_s, factor)
    }

    // ── Geocoding and routing ─────────────────────────────────────────────

    /// Forward-geocode `name` to the provider's top hit.
    pub fn resolve_location(&self, name: &str) -> PlannerResult<GeocodeHit> {
        let hits = self.geocoder.geocode(name)?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| SpatialError::NotFound { query: name.to_owned() })?;
        debug!("resolved {name:?} to {}", hit.point);
        Ok(hit)
    }

    /// Resolve both place names and compute the original route between
    /// them.  Replaces any previous trip.
    pub fn plan_trip(&mut self, origin: &str, destination: &str) -> PlannerResult<PlannedRoute> {
        let result = self.plan_trip_inner(origin, destination);
        if let Err(e) = &result {
            self.map.notify(&Notice::error(e.to_string()));
        }
        result
    }

    fn plan_trip_inner(&mut self, origin: &str, destination: &str) -> PlannerResult<PlannedRoute> {
        let from = self.resolve_location(origin)?;
        let to   = self.resolve_location(destination)?;
        self.state.apply(SessionEvent::TripPlanned(Trip {
            origin_query:      origin.to_owned(),
            destination_query: destination.to_owned(),
            origin:            from.clone(),
            destination:       to.clone(),
        }));
        let route = self.compute_route_inner(from.point, to.point, None, false)?;
        self.map.notify(&Notice::info(route.summary_line()));
        Ok(route)
    }

    /// Request a route and put the selected candidate on the map.
    ///
    /// With `avoid`, the first candidate that differs from the cached
    /// original and keeps every vertex outside the area is chosen, falling
    /// back to the top-ranked one.  Without it, the top-ranked candidate is
    /// chosen and cached as the original.  On error the previous route
    /// stays on screen.
    pub fn compute_route(
        &mut self,
        origin:          GeoPoint,
        destination:     GeoPoint,
        avoid:           Option<BoundingBox>,
        prefer_shortest: bool,
    ) -> PlannerResult<PlannedRoute> {
        let result = self.compute_route_inner(origin, destination, avoid, prefer_shortest);
        if let Err(e) = &result {
            self.map.notify(&Notice::error(e.to_string()));
        }
        result
    }

    fn compute_route_inner(
        &mut self,
        origin:          GeoPoint,
        destination:     GeoPoint,
        avoid:           Option<BoundingBox>,
        prefer_shortest: bool,
    ) -> PlannerResult<PlannedRoute> {
        let ticket = self.prepare_route(origin, destination, avoid, prefer_shortest);
        let id = ticket.id;
        let candidates = self.router.routes(&ticket.request)?;
        self.finish_route(ticket, candidates)?
            .ok_or(PlannerError::StaleRequest(id))
    }

    /// Issue a new route request.  Any earlier unfinished ticket becomes
    /// stale.
    pub fn prepare_route(
        &mut self,
        origin:          GeoPoint,
        destination:     GeoPoint,
        avoid:           Option<BoundingBox>,
        prefer_shortest: bool,
    ) -> RouteTicket {
        let id = self.next_request;
        self.next_request = id.next();
        self.state.apply(SessionEvent::RouteRequested(id));

        let request = RouteRequest {
            origin,
            destination,
            avoid,
            preference:   RoutePreference::from_prefer_shortest(prefer_shortest),
            alternatives: self.config.alternatives,
        };
        debug!("{id}: {origin} -> {destination}, avoid {avoid:?}, {:?}", request.preference);
        RouteTicket { id, request }
    }

    /// Select and render a route from `candidates`.
    ///
    /// Returns `Ok(None)` without touching the map when `ticket` has been
    /// superseded.
    pub fn finish_route(
        &mut self,
        ticket:     RouteTicket,
        candidates: Vec<CandidateRoute>,
    ) -> PlannerResult<Option<PlannedRoute>> {
        if self.state.latest_request != Some(ticket.id) {
            warn!("{} superseded; dropping {} candidates", ticket.id, candidates.len());
            return Ok(None);
        }
        let request = &ticket.request;
        if candidates.is_empty() {
            return Err(SpatialError::NoRouteFound {
                origin:      request.origin,
                destination: request.destination,
            }
            .into());
        }

        let original = self.state.original.as_ref().map(|r| r.polyline.as_str());
        let index = select_candidate(&candidates, request.avoid.as_ref(), original);
        let chosen = &candidates[index];
        let points = chosen.points()?;

        let route = PlannedRoute {
            request:    ticket.id,
            kind:       if request.avoid.is_some() { RouteKind::Adjusted } else { RouteKind::Original },
            polyline:   chosen.polyline.clone(),
            bounds:     BoundingBox::from_points(&points),
            points,
            length_m:   chosen.summary.length_m,
            duration_s: chosen.summary.duration_s,
            co2_kg:     self.estimate_co2(chosen.summary.length_m, chosen.summary.duration_s),
        };

        if !self.state.apply(SessionEvent::RouteComputed(route.clone())) {
            return Ok(None);
        }
        info!(
            "{}: candidate {index}/{} selected, {:.1} km, {:.2} kg CO2",
            ticket.id,
            candidates.len(),
            route.length_m / 1000.0,
            route.co2_kg
        );

        let style = match request.preference {
            RoutePreference::Shortest => RouteStyle::Eco,
            RoutePreference::Fastest  => RouteStyle::Standard,
        };
        self.render_route(&route, style);
        self.redraw_endpoints(request.origin, request.destination);
        Ok(Some(route))
    }

    fn render_route(&mut self, route: &PlannedRoute, style: RouteStyle) {
        self.map.draw_route(&route.points, style);
        if let Some(bounds) = route.bounds {
            self.map.fit_bounds(bounds);
        }
    }

    fn redraw_endpoints(&mut self, origin: GeoPoint, destination: GeoPoint) {
        for marker in self.endpoints.drain(..) {
            self.map.remove_marker(marker);
        }
        self.endpoints.push(self.map.add_marker(origin, MarkerKind::Origin));
        self.endpoints.push(self.map.add_marker(destination, MarkerKind::Destination));
    }

    // ── Incidents ─────────────────────────────────────────────────────────

    /// Map-tap handler: record the incident, then re-run clustering.
    pub fn on_tap(&mut self, point: GeoPoint, at: Timestamp) -> PlannerResult<RerouteOutcome> {
        self.record_incident(point, at)?;
        Ok(self.recluster_and_maybe_reroute(at))
    }

    /// Add an incident mark at `point`, draw it, and credit eco-points.
    pub fn record_incident(&mut self, point: GeoPoint, at: Timestamp) -> PlannerResult<MarkId> {
        if !point.lat.is_finite() || !point.lon.is_finite() {
            return Err(PlannerError::InvalidPoint { lat: point.lat, lon: point.lon });
        }
        let marker = self.map.add_marker(point, MarkerKind::Incident);
        let id = self.marks.push(point, at, MarkOrigin::Tap, Some(marker));
        let taps = self.tally.record(point);
        self.state.apply(SessionEvent::IncidentTapped { points: self.config.eco_points_per_tap });
        debug!("{id} at {point}: {taps} tap(s) on this spot, {} live marks", self.marks.len());
        Ok(id)
    }

    /// Cluster the live marks, consume qualifying clusters, and reroute
    /// around the first one when the tap tally warrants it.
    pub fn recluster_and_maybe_reroute(&mut self, now: Timestamp) -> RerouteOutcome {
        self.state.apply(SessionEvent::ClustersEvaluated);
        let cycle = self.state.cycle;
        let expired = self.marks.drop_expired(cycle);
        if !expired.is_empty() {
            debug!("cycle {cycle}: {} centroid mark(s) expired", expired.len());
        }

        let clusters = find_clusters(self.marks.as_slice(), now, &self.config.cluster);
        let Some(first) = clusters.first() else {
            self.state.apply(SessionEvent::EvaluationSettled);
            return RerouteOutcome::NoCluster;
        };
        let avoided = first.bbox;

        let live_until_cycle = cycle.saturating_add(self.config.centroid_ttl_cycles);
        for cluster in &clusters {
            for &id in &cluster.members {
                if let Some(mark) = self.marks.remove(id) {
                    if let Some(marker) = mark.marker {
                        self.map.remove_marker(marker);
                    }
                }
            }
            self.map.add_marker(cluster.centroid, MarkerKind::Warning);
            self.marks.push(
                cluster.centroid,
                now,
                MarkOrigin::Centroid { cluster: cluster.id, live_until_cycle },
                None,
            );
        }
        info!("cycle {cycle}: {} cluster(s), avoiding {avoided}", clusters.len());

        if !self.tally.any_at_least(self.config.reroute_tap_threshold) {
            debug!("no spot tapped {} times yet", self.config.reroute_tap_threshold);
            self.state.apply(SessionEvent::EvaluationSettled);
            return RerouteOutcome::NotWarranted { clusters: clusters.len() };
        }

        let outcome = self.reroute_around(avoided);
        if !matches!(outcome, RerouteOutcome::Rerouted { .. }) {
            self.state.apply(SessionEvent::EvaluationSettled);
        }
        outcome
    }

    fn reroute_around(&mut self, avoided: BoundingBox) -> RerouteOutcome {
        let Some(trip) = self.state.trip.clone() else {
            warn!("no trip planned; cannot adjust route");
            self.map.notify(&Notice::warning("Original route not found, can't adjust route."));
            return RerouteOutcome::OriginalUnavailable;
        };
        let (from, to) = (trip.origin.point, trip.destination.point);

        let original = match self.state.original.clone() {
            Some(route) => route,
            None => match self.compute_route_inner(from, to, None, false) {
                Ok(route) => route,
                Err(e) => {
                    warn!("original route unavailable: {e}");
                    self.map.notify(&Notice::error(e.to_string()));
                    return RerouteOutcome::OriginalUnavailable;
                }
            },
        };

        let adjusted = match self.compute_route_inner(from, to, Some(avoided), true) {
            Ok(route) => route,
            Err(e) => {
                warn!("reroute failed: {e}");
                self.map.notify(&Notice::error(format!("{e}. Keeping the current route.")));
                return RerouteOutcome::Failed(e);
            }
        };

        if adjusted.polyline != original.polyline {
            let co2_saved_kg = original.co2_kg - adjusted.co2_kg;
            self.state.apply(SessionEvent::RerouteApplied { co2_saved_kg });
            info!("rerouted around {avoided}, {co2_saved_kg:.2} kg CO2 saved");
            self.map.notify(&Notice::info(format!(
                "Route adjusted to avoid traffic. CO2 saved: {co2_saved_kg:.2} kg"
            )));
            RerouteOutcome::Rerouted { avoided, co2_saved_kg }
        } else {
            self.state.apply(SessionEvent::OriginalRestored);
            self.render_route(&original, RouteStyle::Standard);
            info!("no alternative around {avoided}; original route kept");
            self.map.notify(&Notice::warning(
                "No alternative eco-route available. Using original route.",
            ));
            RerouteOutcome::KeptOriginal { avoided }
        }
    }

    // ── Driving mode ──────────────────────────────────────────────────────

    /// Enter driving mode at the trip origin and return the trip record
    /// for the original route.
    pub fn start_driving(&mut self) -> PlannerResult<TripRecord> {
        let (Some(trip), Some(original)) = (&self.state.trip, &self.state.original) else {
            self.map.notify(&Notice::warning("Please calculate a route first."));
            return Err(PlannerError::NoTrip);
        };
        let record = TripRecord::new(
            self.vehicle().map(|v| v.id.clone()),
            trip.origin_query.clone(),
            trip.destination_query.clone(),
            original.length_m,
            original.duration_s,
            self.estimate_co2(original.length_m, original.duration_s),
        );
        let start = trip.origin.point;

        self.state.apply(SessionEvent::DrivingStarted);
        self.map.set_current_location(start);
        info!(
            "driving: {} -> {}, {} km",
            record.start_location, record.destination, record.distance_km
        );
        Ok(record)
    }

    /// Move the current-location marker.  Ignored outside driving mode.
    pub fn update_position(&mut self, point: GeoPoint) -> bool {
        if !self.state.driving {
            return false;
        }
        self.map.set_current_location(point);
        true
    }

    pub fn stop_driving(&mut self) {
        self.state.apply(SessionEvent::DrivingStopped);
    }

    pub fn is_driving(&self) -> bool {
        self.state.driving
    }
}

/// Index of the candidate to use.  See [`Planner::compute_route`].
fn select_candidate(
    candidates: &[CandidateRoute],
    avoid:      Option<&BoundingBox>,
    original:   Option<&str>,
) -> usize {
    let Some(area) = avoid else {
        return 0;
    };
    for (i, candidate) in candidates.iter().enumerate() {
        if original == Some(candidate.polyline.as_str()) {
            continue;
        }
        match candidate.enters(area) {
            Ok(false) => return i,
            Ok(true)  => {}
            Err(e)    => warn!("skipping candidate {i}: {e}"),
        }
    }
    0
}
