//! HERE geocoding (v1) and routing (v8) clients.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use eco_core::{BoundingBox, GeoPoint};

use crate::{
    CandidateRoute, GeocodeHit, Geocoder, RoutePreference, RouteRequest, RouteSummary,
    RoutingProvider, SpatialError, SpatialResult,
};

use super::{build_client, fetch, DEFAULT_TIMEOUT};

const GEOCODE_URL: &str = "https://geocode.search.hereapi.com/v1/geocode";
const ROUTES_URL:  &str = "https://router.hereapi.com/v8/routes";

/// Client for the HERE geocoding and routing REST APIs.
///
/// ```rust,ignore
/// let here = HereClient::new(std::env::var("HERE_API_KEY")?)?;
/// let hits = here.geocode("Colombo, Sri Lanka")?;
/// ```
pub struct HereClient {
    http:        reqwest::blocking::Client,
    api_key:     String,
    geocode_url: String,
    routes_url:  String,
}

impl HereClient {
    pub fn new(api_key: impl Into<String>) -> SpatialResult<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> SpatialResult<Self> {
        Ok(Self {
            http:        build_client(timeout)?,
            api_key:     api_key.into(),
            geocode_url: GEOCODE_URL.to_owned(),
            routes_url:  ROUTES_URL.to_owned(),
        })
    }

    /// Point the client at different endpoints (proxies, mock servers).
    pub fn with_endpoints(mut self, geocode_url: impl Into<String>, routes_url: impl Into<String>) -> Self {
        self.geocode_url = geocode_url.into();
        self.routes_url  = routes_url.into();
        self
    }
}

impl Geocoder for HereClient {
    fn geocode(&self, query: &str) -> SpatialResult<Vec<GeocodeHit>> {
        debug!("HERE geocode {query:?}");
        let body = fetch(
            self.http
                .get(&self.geocode_url)
                .query(&[("apikey", self.api_key.as_str()), ("q", query)]),
        )?;
        parse_geocode(&body)
    }
}

impl RoutingProvider for HereClient {
    fn routes(&self, request: &RouteRequest) -> SpatialResult<Vec<CandidateRoute>> {
        let params = route_params(request);
        debug!("HERE routes {:?}", params);

        let body = fetch(
            self.http
                .get(&self.routes_url)
                .query(&[("apikey", self.api_key.as_str())])
                .query(&params),
        )?;
        let routes = parse_routes(&body)?;
        info!("HERE returned {} route(s)", routes.len());
        Ok(routes)
    }
}

// ── Request shaping ───────────────────────────────────────────────────────────

pub(crate) fn route_params(request: &RouteRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("transportMode", "car".to_owned()),
        ("origin",        lat_lon(request.origin)),
        ("destination",   lat_lon(request.destination)),
        ("return",        "polyline,summary".to_owned()),
        ("routingMode",   routing_mode(request.preference).to_owned()),
        ("alternatives",  request.alternatives.to_string()),
    ];
    if let Some(area) = &request.avoid {
        params.push(("avoid[areas]", avoid_bbox(area)));
    }
    params
}

fn lat_lon(p: GeoPoint) -> String {
    format!("{:.6},{:.6}", p.lat, p.lon)
}

fn routing_mode(preference: RoutePreference) -> &'static str {
    match preference {
        RoutePreference::Fastest  => "fast",
        RoutePreference::Shortest => "short",
    }
}

/// `bbox:west,south,east,north`, the order the v8 router expects.
pub(crate) fn avoid_bbox(area: &BoundingBox) -> String {
    format!(
        "bbox:{:.6},{:.6},{:.6},{:.6}",
        area.west, area.south, area.east, area.north
    )
}

// ── Response parsing ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    items: Vec<GeocodeItem>,
}

#[derive(Deserialize)]
struct GeocodeItem {
    #[serde(default)]
    title:    String,
    position: Position,
}

#[derive(Deserialize)]
struct Position {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    #[serde(default)]
    sections: Vec<Section>,
}

#[derive(Deserialize)]
struct Section {
    polyline: String,
    summary:  Summary,
}

#[derive(Deserialize)]
struct Summary {
    length:   f64,
    duration: f64,
}

/// Parse a `/v1/geocode` body.
pub fn parse_geocode(body: &str) -> SpatialResult<Vec<GeocodeHit>> {
    let response: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| SpatialError::Provider(e.to_string()))?;
    Ok(response
        .items
        .into_iter()
        .map(|item| GeocodeHit {
            point: GeoPoint::new(item.position.lat, item.position.lng),
            label: item.title,
        })
        .collect())
}

/// Parse a `/v8/routes` body.
///
/// A route without via points has exactly one section; only the first
/// section of each route is used.  Routes with no sections are skipped.
pub fn parse_routes(body: &str) -> SpatialResult<Vec<CandidateRoute>> {
    let response: RoutesResponse =
        serde_json::from_str(body).map_err(|e| SpatialError::Provider(e.to_string()))?;
    Ok(response
        .routes
        .into_iter()
        .filter_map(|route| route.sections.into_iter().next())
        .map(|section| CandidateRoute {
            polyline: section.polyline,
            summary:  RouteSummary {
                length_m:   section.summary.length,
                duration_s: section.summary.duration,
            },
        })
        .collect())
}
