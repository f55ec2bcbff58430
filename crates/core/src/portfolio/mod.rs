//! Virtual portfolio: lot-based positions and valuation.

mod portfolio_errors;
mod portfolio_model;
mod portfolio_service;

pub use portfolio_errors::PortfolioError;
pub use portfolio_model::{PortfolioSummary, Position, PositionValuation};
pub use portfolio_service::Portfolio;
