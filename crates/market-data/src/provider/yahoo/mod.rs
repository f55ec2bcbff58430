//! Yahoo Finance quote provider.
//!
//! History comes from the chart API via the `yahoo_finance_api` crate;
//! instrument profiles come from the quoteSummary API, which needs Yahoo's
//! crumb/cookie authentication dance.

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use lazy_static::lazy_static;
use log::{debug, warn};
use num_traits::FromPrimitive;
use reqwest::header;
use rust_decimal::Decimal;
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{
    History, InstrumentProfile, Interval, Period, Quote, Symbol, SOURCE_YAHOO,
};
use crate::provider::QuoteProvider;

use models::YahooQuoteSummaryResponse;

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for the Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            }
        })?;
        Ok(Self { connector })
    }

    /// Translate a `yahoo_finance_api` error into ours.
    ///
    /// Rate limiting and connection trouble become transient errors; an
    /// empty chart response becomes [`MarketDataError::EmptyHistory`].
    fn map_yahoo_error(symbol: &Symbol, error: yahoo::YahooError) -> MarketDataError {
        match error {
            yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => {
                MarketDataError::EmptyHistory {
                    symbol: symbol.to_string(),
                }
            }
            // The connector bundles its own HTTP client; keep the message,
            // not the foreign error type.
            yahoo::YahooError::ConnectionFailed(e) => MarketDataError::ConnectionFailed {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            },
            yahoo::YahooError::FetchFailed(message)
                if message.contains("429") || message.contains("Too Many Requests") =>
            {
                MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                }
            }
            other => MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: other.to_string(),
            },
        }
    }

    /// Convert a chart bar into our OHLCV type.
    fn convert_quote(yahoo_quote: yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Invalid bar timestamp: {}", yahoo_quote.timestamp),
            })?;

        let to_decimal = |value: f64, field: &str| {
            Decimal::from_f64_retain(value).ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to convert {} price {} to Decimal", field, value),
            })
        };

        Ok(Quote::ohlcv(
            timestamp,
            to_decimal(yahoo_quote.open, "open")?,
            to_decimal(yahoo_quote.high, "high")?,
            to_decimal(yahoo_quote.low, "low")?,
            to_decimal(yahoo_quote.close, "close")?,
            Decimal::from_u64(yahoo_quote.volume).unwrap_or_default(),
        ))
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        {
            let guard = YAHOO_CRUMB.read().unwrap_or_else(|p| p.into_inner());
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }
        self.fetch_crumb().await
    }

    /// Drop the cached crumb so the next request re-authenticates.
    fn clear_crumb(&self) {
        let mut guard = YAHOO_CRUMB.write().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let client = reqwest::Client::new();

        // Step 1: get a session cookie from fc.yahoo.com
        let response = client.get("https://fc.yahoo.com").send().await?;
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Failed to parse Yahoo cookie".to_string(),
            })?;

        // Step 2: exchange the cookie for a crumb
        let crumb = client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await?
            .text()
            .await?;

        let data = CrumbData { cookie, crumb };
        {
            let mut guard = YAHOO_CRUMB.write().unwrap_or_else(|p| p.into_inner());
            *guard = Some(data.clone());
        }
        debug!("Fetched new Yahoo authentication crumb");
        Ok(data)
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> Result<History, MarketDataError> {
        let response = self
            .connector
            .get_quote_range(symbol.as_str(), interval.as_str(), period.as_str())
            .await
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let yahoo_quotes = response
            .quotes()
            .map_err(|e| Self::map_yahoo_error(symbol, e))?;

        let quotes: Vec<Quote> = yahoo_quotes
            .into_iter()
            .filter_map(|q| match Self::convert_quote(q) {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("Skipping malformed bar for {}: {}", symbol, e);
                    None
                }
            })
            .collect();

        if quotes.is_empty() {
            return Err(MarketDataError::EmptyHistory {
                symbol: symbol.to_string(),
            });
        }

        Ok(History::from_quotes(quotes))
    }

    async fn fetch_profile(&self, symbol: &Symbol) -> Result<InstrumentProfile, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price,summaryProfile,summaryDetail&crumb={}",
            encode(symbol.as_str()),
            encode(&crumb.crumb)
        );

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Yahoo authentication expired".to_string(),
            });
        }
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let data: YahooQuoteSummaryResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse quoteSummary response: {}", e),
                })?;

        let result = data.quote_summary.result.into_iter().next().ok_or_else(|| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("No quoteSummary result for {}", symbol),
            }
        })?;

        let mut profile = InstrumentProfile::new().source(SOURCE_YAHOO);

        if let Some(price) = result.price {
            profile.name = price.long_name.or(price.short_name);
        }
        if let Some(summary) = result.summary_profile {
            profile.sector = summary.sector;
            profile.industry = summary.industry;
            profile.website = summary.website;
        }
        if let Some(detail) = result.summary_detail {
            profile.market_cap = detail.market_cap.and_then(|v| v.raw);
            profile.pe_ratio = detail.trailing_pe.and_then(|v| v.raw);
            profile.dividend_yield = detail.dividend_yield.and_then(|v| v.raw);
            profile.beta = detail.beta.and_then(|v| v.raw);
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RetryClass;

    fn samsung() -> Symbol {
        Symbol::new("005930.KS")
    }

    #[test]
    fn test_no_quotes_maps_to_empty_history() {
        let error = YahooProvider::map_yahoo_error(&samsung(), yahoo::YahooError::NoQuotes);
        assert!(matches!(
            error,
            MarketDataError::EmptyHistory { ref symbol } if symbol == "005930.KS"
        ));

        let error = YahooProvider::map_yahoo_error(&samsung(), yahoo::YahooError::NoResult);
        assert!(matches!(error, MarketDataError::EmptyHistory { .. }));
    }

    #[test]
    fn test_rate_limit_response_maps_to_rate_limited() {
        let error = YahooProvider::map_yahoo_error(
            &samsung(),
            yahoo::YahooError::FetchFailed("HTTP 429 Too Many Requests".to_string()),
        );
        assert!(matches!(error, MarketDataError::RateLimited { .. }));
        assert_eq!(error.retry_class(), RetryClass::Transient);
    }

    #[test]
    fn test_other_fetch_failures_map_to_provider_error() {
        let error = YahooProvider::map_yahoo_error(
            &samsung(),
            yahoo::YahooError::FetchFailed("HTTP 500 Internal Server Error".to_string()),
        );
        assert!(matches!(error, MarketDataError::ProviderError { .. }));
        assert_eq!(error.retry_class(), RetryClass::Unexpected);
    }
}
