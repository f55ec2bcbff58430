//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{History, InstrumentProfile, Interval, Period, Symbol};

/// Trait for market data providers.
///
/// The data loader drives a provider through its retry/fallback pipeline;
/// implementations only need to fetch and translate, never to retry. Tests
/// substitute a scripted implementation.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider (e.g. "YAHOO").
    ///
    /// Used for logging and for the `source` tag on profiles.
    fn id(&self) -> &'static str;

    /// Fetch OHLCV history for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - the instrument to fetch
    /// * `period` - how far back to go
    /// * `interval` - bar width
    ///
    /// # Returns
    ///
    /// Bars for the requested window. An empty result must be surfaced as
    /// [`MarketDataError::EmptyHistory`], never as an empty `History`.
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<History, MarketDataError>;

    /// Fetch descriptive metadata for a symbol.
    ///
    /// Partial results are fine; absent fields stay `None`.
    async fn fetch_profile(&self, symbol: &Symbol) -> Result<InstrumentProfile, MarketDataError>;
}
