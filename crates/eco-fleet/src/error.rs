use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("vehicle parse error: {0}")]
    Parse(String),

    #[error("vehicle {id:?} has invalid emission factor {value} g/km")]
    InvalidEmissionFactor { id: String, value: f64 },

    #[error("duplicate vehicle id {0:?}")]
    DuplicateId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FleetResult<T> = Result<T, FleetError>;
