use serde::{Deserialize, Serialize};

/// In-sample quality metrics of a fitted model.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Root mean squared error of the fit
    pub rmse: f64,
    /// Mean absolute error of the fit
    pub mae: f64,
    /// Coefficient of determination
    pub r_squared: f64,
}

/// A fitted polynomial trend over close prices.
///
/// Close prices are regressed on the day offset from the first
/// observation; coefficients are stored lowest power first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendModel {
    /// Polynomial degree (1-5)
    pub degree: usize,
    /// Coefficients, constant term first
    pub coefficients: Vec<f64>,
    /// Day offset of the last observed bar
    pub last_day_offset: i64,
    /// Close of the last observed bar
    pub last_observed_close: f64,
    /// Standard deviation of in-sample residuals (drives the band)
    pub residual_std: f64,
    /// In-sample fit quality
    pub metrics: FitMetrics,
}

impl TrendModel {
    /// Evaluate the polynomial at a day offset.
    pub fn evaluate(&self, day_offset: f64) -> f64 {
        // Horner's rule, highest power first.
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * day_offset + c)
    }
}

/// One forecast step.
///
/// The band is a constant-width approximate 95% interval: plus/minus two
/// residual standard deviations at every horizon. An inherited
/// simplification; it understates uncertainty at longer horizons.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Day offset from the first observation
    pub day_offset: i64,
    /// Predicted close
    pub predicted: f64,
    /// Lower edge of the confidence band
    pub lower: f64,
    /// Upper edge of the confidence band
    pub upper: f64,
}

/// Direction of the forecast trend.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Neutral,
}

/// Trend direction with a magnitude qualifier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendLabel {
    /// Which way the forecast points
    pub direction: TrendDirection,
    /// Set when the relative change magnitude reaches 5%
    pub strong: bool,
    /// Relative change of the final prediction versus the last close
    pub relative_change: f64,
}

impl TrendLabel {
    /// Display form, e.g. "strongly bullish".
    pub fn label(&self) -> &'static str {
        match (self.direction, self.strong) {
            (TrendDirection::Bullish, true) => "strongly bullish",
            (TrendDirection::Bullish, false) => "bullish",
            (TrendDirection::Bearish, true) => "strongly bearish",
            (TrendDirection::Bearish, false) => "bearish",
            (TrendDirection::Neutral, _) => "neutral",
        }
    }
}
