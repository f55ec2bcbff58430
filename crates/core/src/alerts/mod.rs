//! Price alerts: user-defined thresholds checked against the latest close.

mod alerts_errors;
mod alerts_model;
mod alerts_service;

pub use alerts_errors::AlertError;
pub use alerts_model::{AlertCondition, PriceAlert};
pub use alerts_service::AlertStore;
