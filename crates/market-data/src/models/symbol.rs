//! Symbol identity and exchange classification.
//!
//! Korean listings carry a Yahoo-style exchange suffix: `.KS` for KOSPI,
//! `.KQ` for KOSDAQ. A symbol without a suffix is treated as a US-listed
//! ADR/GDR (e.g. SSNLF for Samsung Electronics).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Yahoo suffix marking a KOSPI listing.
pub const KOSPI_SUFFIX: &str = ".KS";

/// Yahoo suffix marking a KOSDAQ listing.
pub const KOSDAQ_SUFFIX: &str = ".KQ";

/// Exchange a symbol trades on, derived from its suffix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// Korea Composite Stock Price Index market (`.KS`).
    Kospi,
    /// Korean Securities Dealers Automated Quotations (`.KQ`).
    Kosdaq,
    /// US-listed ADR/GDR (no suffix).
    UsListed,
}

impl Exchange {
    /// Human-readable exchange label.
    pub fn label(&self) -> &'static str {
        match self {
            Exchange::Kospi => "KOSPI (Korea Composite Stock Price Index)",
            Exchange::Kosdaq => "KOSDAQ (Korean Securities Dealers Automated Quotations)",
            Exchange::UsListed => "US Listed (ADR/GDR)",
        }
    }
}

/// Trading currency, derived from the exchange.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Currency {
    /// Korean won.
    Krw,
    /// US dollar.
    Usd,
}

impl Currency {
    /// ISO 4217 currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Krw => "KRW",
            Currency::Usd => "USD",
        }
    }

    /// Currency sign used when formatting prices.
    pub fn sign(&self) -> &'static str {
        match self {
            Currency::Krw => "\u{20a9}", // ₩
            Currency::Usd => "$",
        }
    }
}

/// A ticker symbol with its exchange suffix (e.g. `005930.KS`).
///
/// Normalized to uppercase on construction and immutable afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol, normalizing to uppercase.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    /// The raw symbol string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange this symbol trades on.
    pub fn exchange(&self) -> Exchange {
        if self.0.ends_with(KOSPI_SUFFIX) {
            Exchange::Kospi
        } else if self.0.ends_with(KOSDAQ_SUFFIX) {
            Exchange::Kosdaq
        } else {
            Exchange::UsListed
        }
    }

    /// Trading currency: KRW for Korean listings, USD otherwise.
    pub fn currency(&self) -> Currency {
        match self.exchange() {
            Exchange::Kospi | Exchange::Kosdaq => Currency::Krw,
            Exchange::UsListed => Currency::Usd,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
