use serde::{Deserialize, Serialize};

/// Source tag for provider-sourced profiles.
pub const SOURCE_YAHOO: &str = "YAHOO";

/// Source tag for synthesized demo profiles.
pub const SOURCE_DEMO: &str = "DEMO";

/// Descriptive instrument metadata from a market data provider.
///
/// Every field except `source` is optional: providers return a loosely
/// populated bag and absent fields render as "N/A" downstream. Modeled as
/// named optional fields rather than an untyped map so missing-field
/// handling is a type-checked branch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InstrumentProfile {
    /// Where this profile came from (e.g. "YAHOO", "DEMO")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Company/instrument name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Business sector (e.g. "Technology")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    /// Industry within sector (e.g. "Semiconductors")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// Company website URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Market capitalization in the trading currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,

    /// Trailing price-to-earnings ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,

    /// Dividend yield as a decimal (0.021 for 2.1%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,

    /// Beta versus the market
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

impl InstrumentProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Set the source tag.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the sector.
    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Set the industry.
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Whether this profile was synthesized rather than fetched.
    pub fn is_simulated(&self) -> bool {
        self.source.as_deref() == Some(SOURCE_DEMO)
    }
}
