//! Map widget adapter.
//!
//! The planner never talks to a concrete map SDK.  It pushes markers,
//! route lines, viewport changes, and user notices through [`MapView`];
//! taps flow the other way through [`Planner::on_tap`].
//!
//! [`Planner::on_tap`]: crate::Planner::on_tap

use std::collections::BTreeMap;

use eco_core::{BoundingBox, GeoPoint, MarkerId};

/// What a marker depicts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MarkerKind {
    Origin,
    Destination,
    /// A single user-reported incident.
    Incident,
    /// The centroid of a consumed incident cluster.
    Warning,
}

/// How the current route line is drawn.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum RouteStyle {
    /// Regular (fastest) route.
    #[default]
    Standard,
    /// Eco reroute.
    Eco,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A one-shot message for the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level:   NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Rendering surface driven by the planner.
///
/// `draw_route` always replaces the previous route line: at most one route
/// is on screen at a time.  The location and notice hooks default to
/// no-ops so headless hosts only implement the drawing calls.
pub trait MapView {
    /// Draw a marker and return a handle for later removal.
    fn add_marker(&mut self, at: GeoPoint, kind: MarkerKind) -> MarkerId;

    /// Remove a marker.  Unknown handles are ignored.
    fn remove_marker(&mut self, marker: MarkerId);

    /// Replace the route layer with `path`.
    fn draw_route(&mut self, path: &[GeoPoint], style: RouteStyle);

    /// Move the viewport so `bounds` is visible.
    fn fit_bounds(&mut self, bounds: BoundingBox);

    /// Move the current-location marker and centre on it.
    fn set_current_location(&mut self, _at: GeoPoint) {}

    fn notify(&mut self, _notice: &Notice) {}
}

impl<M: MapView + ?Sized> MapView for Box<M> {
    fn add_marker(&mut self, at: GeoPoint, kind: MarkerKind) -> MarkerId {
        (**self).add_marker(at, kind)
    }
    fn remove_marker(&mut self, marker: MarkerId) {
        (**self).remove_marker(marker)
    }
    fn draw_route(&mut self, path: &[GeoPoint], style: RouteStyle) {
        (**self).draw_route(path, style)
    }
    fn fit_bounds(&mut self, bounds: BoundingBox) {
        (**self).fit_bounds(bounds)
    }
    fn set_current_location(&mut self, at: GeoPoint) {
        (**self).set_current_location(at)
    }
    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice)
    }
}

// ── NoopMap ───────────────────────────────────────────────────────────────────

/// A [`MapView`] that draws nothing.  Marker handles are still unique.
#[derive(Debug, Default)]
pub struct NoopMap {
    next: u64,
}

impl MapView for NoopMap {
    fn add_marker(&mut self, _at: GeoPoint, _kind: MarkerKind) -> MarkerId {
        let id = MarkerId(self.next);
        self.next += 1;
        id
    }
    fn remove_marker(&mut self, _marker: MarkerId) {}
    fn draw_route(&mut self, _path: &[GeoPoint], _style: RouteStyle) {}
    fn fit_bounds(&mut self, _bounds: BoundingBox) {}
}

// ── RecordingMap ──────────────────────────────────────────────────────────────

/// A [`MapView`] that keeps the scene in memory.
///
/// Used by tests and the demo to inspect what a real widget would show.
#[derive(Debug, Default)]
pub struct RecordingMap {
    markers:          BTreeMap<MarkerId, (GeoPoint, MarkerKind)>,
    next_marker:      u64,
    route:            Option<(Vec<GeoPoint>, RouteStyle)>,
    routes_drawn:     usize,
    viewport:         Option<BoundingBox>,
    current_location: Option<GeoPoint>,
    notices:          Vec<Notice>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live markers of `kind`, in creation order.
    pub fn markers(&self, kind: MarkerKind) -> Vec<GeoPoint> {
        self.markers
            .values()
            .filter(|(_, k)| *k == kind)
            .map(|(p, _)| *p)
            .collect()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// The route line currently on screen.
    pub fn route(&self) -> Option<(&[GeoPoint], RouteStyle)> {
        self.route.as_ref().map(|(path, style)| (path.as_slice(), *style))
    }

    /// How many times the route layer has been replaced.
    pub fn routes_drawn(&self) -> usize {
        self.routes_drawn
    }

    pub fn viewport(&self) -> Option<BoundingBox> {
        self.viewport
    }

    pub fn current_location(&self) -> Option<GeoPoint> {
        self.current_location
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl MapView for RecordingMap {
    fn add_marker(&mut self, at: GeoPoint, kind: MarkerKind) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(id, (at, kind));
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn draw_route(&mut self, path: &[GeoPoint], style: RouteStyle) {
        self.route = Some((path.to_vec(), style));
        self.routes_drawn += 1;
    }

    fn fit_bounds(&mut self, bounds: BoundingBox) {
        self.viewport = Some(bounds);
    }

    fn set_current_location(&mut self, at: GeoPoint) {
        self.current_location = Some(at);
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
