//! `eco-spatial` — polylines, geocoding, and routing providers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`polyline`] | HERE flexible-polyline `encode` / `decode`                    |
//! | [`provider`] | `Geocoder` + `RoutingProvider` traits, `RouteRequest`, `CandidateRoute` |
//! | [`stub`]     | `StaticGeocoder`, `StaticRouter` — deterministic, offline     |
//! | [`http`]     | `HereClient`, `NominatimClient` (feature = `"http"` only)     |
//! | [`error`]    | `SpatialError`, `PolylineError`, `SpatialResult<T>`           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `http`  | Blocking HTTP clients via `reqwest`.                         |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod polyline;
pub mod provider;
pub mod stub;

#[cfg(feature = "http")]
pub mod http;

#[cfg(test)]
mod tests;

pub use error::{PolylineError, SpatialError, SpatialResult};
pub use polyline::{Polyline, PolylineHeader, ThirdDimension};
pub use provider::{
    path_enters, CandidateRoute, GeocodeHit, Geocoder, RoutePreference, RouteRequest,
    RouteSummary, RoutingProvider,
};
pub use stub::{StaticGeocoder, StaticRouter};

#[cfg(feature = "http")]
pub use http::{HereClient, NominatimClient};
