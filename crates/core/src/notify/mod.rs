//! Email notification for triggered price alerts.

mod email_model;
mod email_service;

pub use email_model::EmailSettings;
pub use email_service::{EmailNotifier, NotifyError};
