use thiserror::Error;

/// Errors from fitting a trend model.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Not enough history: need at least {required} bars, got {actual}")]
    NotEnoughData { required: usize, actual: usize },

    #[error("Polynomial degree must be between 1 and 5, got {0}")]
    InvalidDegree(usize),

    #[error("Least-squares system is singular for this data")]
    SingularSystem,
}
