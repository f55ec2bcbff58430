//! Yahoo Finance quoteSummary response models.
//!
//! The chart endpoint is covered by the `yahoo_finance_api` crate; these
//! models parse the richer quoteSummary payload used for instrument
//! profiles.

use serde::Deserialize;

/// Main response wrapper for the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    pub result: Vec<YahooQuoteSummaryResult>,
}

/// Individual result from the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_profile: Option<YahooSummaryProfile>,
    pub summary_detail: Option<YahooSummaryDetail>,
}

/// Price module (name and currency live here)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub currency: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

/// Value object with raw and formatted representations.
/// Yahoo returns `{"raw": 123.45, "fmt": "123.45"}` or an empty object
/// when no data is available; only `raw` is used.
#[derive(Debug, Deserialize, Clone)]
pub struct YahooRawValue {
    pub raw: Option<f64>,
}

/// Company info module
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryProfile {
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
}

/// Financial metrics module
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub market_cap: Option<YahooRawValue>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<YahooRawValue>,
    pub dividend_yield: Option<YahooRawValue>,
    pub beta: Option<YahooRawValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_raw_value() {
        let json = r#"{"raw": 15.2, "fmt": "15.20"}"#;
        let value: YahooRawValue = serde_json::from_str(json).unwrap();
        assert_eq!(value.raw, Some(15.2));
    }

    #[test]
    fn test_deserialize_raw_value_empty_object() {
        let json = r#"{}"#;
        let value: YahooRawValue = serde_json::from_str(json).unwrap();
        assert_eq!(value.raw, None);
    }

    #[test]
    fn test_deserialize_quote_summary() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "currency": "KRW",
                        "longName": "Samsung Electronics Co., Ltd."
                    },
                    "summaryProfile": {
                        "sector": "Technology",
                        "industry": "Semiconductors",
                        "website": "https://www.samsung.com"
                    },
                    "summaryDetail": {
                        "marketCap": {"raw": 450000000000000.0},
                        "trailingPE": {"raw": 15.2},
                        "dividendYield": {"raw": 0.021},
                        "beta": {"raw": 0.85}
                    }
                }]
            }
        }"#;
        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let result = &response.quote_summary.result[0];
        assert_eq!(
            result.price.as_ref().unwrap().long_name.as_deref(),
            Some("Samsung Electronics Co., Ltd.")
        );
        assert_eq!(
            result
                .summary_detail
                .as_ref()
                .unwrap()
                .beta
                .as_ref()
                .unwrap()
                .raw,
            Some(0.85)
        );
    }
}
