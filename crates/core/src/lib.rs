//! KRX Tracker Core Crate
//!
//! Session logic for the KRX Tracker dashboard: watchlist management,
//! price alerts with email notification, trend forecasting, market-hours
//! awareness, a lot-based virtual portfolio and CSV/JSON export, all over
//! the `krxtrack-market-data` loading pipeline.
//!
//! Everything is driven through a [`session::Session`], optionally kept
//! warm by the [`refresh`] scheduler.

pub mod alerts;
pub mod clock;
pub mod constants;
pub mod errors;
pub mod export;
pub mod forecast;
pub mod format;
pub mod notify;
pub mod portfolio;
pub mod refresh;
pub mod session;

pub use errors::{Error, Result};
pub use session::{Session, SymbolReport};
