//! OpenStreetMap Nominatim search client.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use eco_core::GeoPoint;

use crate::{GeocodeHit, Geocoder, SpatialError, SpatialResult};

use super::{build_client, fetch, DEFAULT_TIMEOUT};

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Geocoder over the public Nominatim `/search` endpoint.
///
/// The public instance requires an identifying user agent (set by the
/// shared client builder) and allows about one request per second.
pub struct NominatimClient {
    http:       reqwest::blocking::Client,
    search_url: String,
    limit:      u8,
}

impl NominatimClient {
    pub fn new() -> SpatialResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> SpatialResult<Self> {
        Ok(Self {
            http:       build_client(timeout)?,
            search_url: SEARCH_URL.to_owned(),
            limit:      5,
        })
    }

    pub fn with_endpoint(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Maximum hits requested per query.
    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = limit;
        self
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, query: &str) -> SpatialResult<Vec<GeocodeHit>> {
        debug!("Nominatim search {query:?}");
        let limit = self.limit.to_string();
        let body = fetch(
            self.http
                .get(&self.search_url)
                .query(&[("format", "json"), ("q", query), ("limit", limit.as_str())]),
        )?;
        parse_search(&body)
    }
}

#[derive(Deserialize)]
struct Place {
    lat:          String,
    lon:          String,
    #[serde(default)]
    display_name: String,
}

/// Parse a `/search?format=json` body.  Coordinates arrive as strings.
pub fn parse_search(body: &str) -> SpatialResult<Vec<GeocodeHit>> {
    let places: Vec<Place> =
        serde_json::from_str(body).map_err(|e| SpatialError::Provider(e.to_string()))?;
    places
        .into_iter()
        .map(|place| {
            let lat = parse_coord(&place.lat)?;
            let lon = parse_coord(&place.lon)?;
            Ok(GeocodeHit { point: GeoPoint::new(lat, lon), label: place.display_name })
        })
        .collect()
}

fn parse_coord(s: &str) -> SpatialResult<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| SpatialError::Provider(format!("invalid coordinate {s:?}")))
}
