use thiserror::Error;

use crate::alerts::AlertError;
use crate::export::ExportError;
use crate::forecast::ForecastError;
use crate::notify::NotifyError;
use crate::portfolio::PortfolioError;
use krxtrack_market_data::MarketDataError;

/// Type alias for Result using our root error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the tracker core.
///
/// Internal APIs return their own domain errors; this enum is the single
/// conversion target for embedders (the presentation layer) that funnel
/// several domains through one fallible call chain via `?`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Alert operation failed: {0}")]
    Alert(#[from] AlertError),

    #[error("Forecast failed: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Portfolio operation failed: {0}")]
    Portfolio(#[from] PortfolioError),
}
