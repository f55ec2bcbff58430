use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV bar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Timestamp of the bar (UTC; converted to the display timezone at
    /// the presentation boundary)
    pub timestamp: DateTime<Utc>,

    /// Opening price
    pub open: Decimal,

    /// High price
    pub high: Decimal,

    /// Low price
    pub low: Decimal,

    /// Closing/current price
    pub close: Decimal,

    /// Trading volume
    pub volume: Decimal,
}

impl Quote {
    /// Create a full OHLCV bar.
    pub fn ohlcv(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// An ordered run of OHLCV bars for one symbol.
///
/// Bars are kept sorted by timestamp ascending; the last bar is "current".
/// A successfully loaded history is never empty - an empty provider result
/// is treated as a failed attempt upstream, so consumers can rely on
/// [`last`](Self::last) being meaningful.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    quotes: Vec<Quote>,
}

impl History {
    /// Build a history from bars, sorting by timestamp ascending.
    pub fn from_quotes(mut quotes: Vec<Quote>) -> Self {
        quotes.sort_by_key(|q| q.timestamp);
        Self { quotes }
    }

    /// All bars, oldest first.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the history holds no bars.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// The most recent bar.
    pub fn last(&self) -> Option<&Quote> {
        self.quotes.last()
    }

    /// Close of the most recent bar.
    pub fn latest_close(&self) -> Option<Decimal> {
        self.last().map(|q| q.close)
    }

    /// Close of the bar before the most recent one. Falls back to the
    /// latest close when only one bar is present.
    pub fn previous_close(&self) -> Option<Decimal> {
        match self.quotes.len() {
            0 => None,
            1 => self.latest_close(),
            n => Some(self.quotes[n - 2].close),
        }
    }
}
