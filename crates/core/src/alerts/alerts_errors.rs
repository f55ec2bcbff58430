use thiserror::Error;
use uuid::Uuid;

/// Errors from alert store operations.
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert not found: {0}")]
    NotFound(Uuid),

    #[error("Alert target price must be positive, got {0}")]
    NonPositiveTarget(String),
}
