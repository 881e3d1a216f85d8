//! Blocking HTTP provider clients.
//!
//! Each client parses responses through a free function (`parse_*`) that
//! takes the raw body, so payload handling is testable without a network.
//! Non-2xx statuses and undecodable bodies become
//! [`SpatialError::Provider`](crate::SpatialError::Provider); nothing is
//! retried.

pub(crate) mod here;
mod nominatim;

use std::time::Duration;

use crate::{SpatialError, SpatialResult};

pub use here::{parse_geocode, parse_routes, HereClient};
pub use nominatim::{parse_search, NominatimClient};

/// Request timeout applied when the caller does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

const USER_AGENT: &str = concat!("econav/", env!("CARGO_PKG_VERSION"));

fn build_client(timeout: Duration) -> SpatialResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SpatialError::Provider(e.to_string()))
}

/// Send `request`, returning the body of a 2xx response.
fn fetch(request: reqwest::blocking::RequestBuilder) -> SpatialResult<String> {
    let response = request.send().map_err(|e| {
        tracing::error!("provider request failed: {e}");
        SpatialError::Provider(e.to_string())
    })?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| SpatialError::Provider(e.to_string()))?;

    if !status.is_success() {
        let detail = error_title(&body).unwrap_or_else(|| status.to_string());
        return Err(SpatialError::Provider(format!("status {status}: {detail}")));
    }
    Ok(body)
}

/// Best-effort extraction of `title` / `error` from a JSON error body.
fn error_title(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("title")
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}
