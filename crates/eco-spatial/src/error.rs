//! Spatial-subsystem error types.

use thiserror::Error;

/// Errors from the flexible-polyline codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character {ch:?} at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },

    #[error("unsupported polyline format version {0}")]
    UnsupportedVersion(u64),

    #[error("polyline ended in the middle of a value")]
    Truncated,

    #[error("polyline value overflows 64 bits")]
    Overflow,

    #[error("precision {0} is out of range 0..=15")]
    PrecisionOutOfRange(u64),

    #[error("third dimension code {0} is reserved")]
    ReservedThirdDimension(u64),

    #[error("{points} points but {values} third-dimension values")]
    ThirdDimensionMismatch { points: usize, values: usize },

    #[error("coordinate {0} is not finite")]
    NonFinite(f64),
}

/// Errors produced by geocoding and routing providers.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The geocoder returned zero results.
    #[error("no results found for {query:?}")]
    NotFound { query: String },

    /// The router returned zero routes.
    #[error("no route found from {origin} to {destination}")]
    NoRouteFound {
        origin:      eco_core::GeoPoint,
        destination: eco_core::GeoPoint,
    },

    /// Network, HTTP status, or payload failure from a third-party call.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("polyline error: {0}")]
    Polyline(#[from] PolylineError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
