use eco_core::RequestId;
use eco_incident::IncidentError;
use eco_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("no route has been computed yet; plan a trip first")]
    NoTrip,

    #[error("unknown vehicle {0:?}")]
    UnknownVehicle(String),

    #[error("coordinate ({lat}, {lon}) is not a valid position")]
    InvalidPoint { lat: f64, lon: f64 },

    #[error("route request {0} was superseded by a newer request")]
    StaleRequest(RequestId),

    #[error("incident clustering error: {0}")]
    Incident(#[from] IncidentError),

    #[error("planner configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
