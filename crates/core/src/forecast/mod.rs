//! Polynomial trend forecasting over recent closes.

mod forecast_errors;
mod forecast_model;
mod forecast_service;

pub use forecast_errors::ForecastError;
pub use forecast_model::{
    FitMetrics, ForecastPoint, TrendDirection, TrendLabel, TrendModel,
};
pub use forecast_service::{fit, predict, trend_label, MAX_DEGREE, MIN_OBSERVATIONS};
