use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IncidentError {
    #[error("cluster radius must be finite and positive, got {0}")]
    InvalidRadius(f64),

    #[error("bounding-box padding must be finite and non-negative, got {0}")]
    InvalidPadding(f64),

    #[error("a cluster needs at least one member")]
    ZeroMinMembers,

    #[error("recency window must be non-zero")]
    ZeroRecency,
}

pub type IncidentResult<T> = Result<T, IncidentError>;
