use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use krxtrack_market_data::Symbol;

/// A single purchase lot. Lots are never merged; two buys of the same
/// symbol remain distinct positions with their own cost basis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub symbol: Symbol,
    pub shares: u32,
    pub buy_price: Decimal,
    pub bought_at: DateTime<Utc>,
}

impl Position {
    /// Total acquisition cost of the lot, in the lot's trading currency.
    pub fn cost_basis(&self) -> Decimal {
        self.buy_price * Decimal::from(self.shares)
    }
}

/// Valuation of a single lot against a current market price.
#[derive(Clone, Debug, Serialize)]
pub struct PositionValuation {
    pub position: Position,
    /// Latest close in the lot's trading currency, if a price was available.
    pub current_price: Option<Decimal>,
    /// Cost basis converted to KRW.
    pub cost_krw: Decimal,
    /// Market value converted to KRW. Falls back to cost when unpriced.
    pub value_krw: Decimal,
}

impl PositionValuation {
    /// Unrealized gain in KRW.
    pub fn gain_krw(&self) -> Decimal {
        self.value_krw - self.cost_krw
    }
}

/// Whole-portfolio valuation, all amounts in KRW.
#[derive(Clone, Debug, Serialize)]
pub struct PortfolioSummary {
    pub total_cost_krw: Decimal,
    pub total_value_krw: Decimal,
    pub positions: Vec<PositionValuation>,
}

impl PortfolioSummary {
    /// Unrealized gain across all lots, in KRW.
    pub fn total_gain_krw(&self) -> Decimal {
        self.total_value_krw - self.total_cost_krw
    }

    /// Gain as a percentage of total cost. `None` when the portfolio is empty
    /// or has zero cost.
    pub fn gain_percent(&self) -> Option<Decimal> {
        if self.total_cost_krw.is_zero() {
            None
        } else {
            Some(self.total_gain_krw() / self.total_cost_krw * Decimal::from(100))
        }
    }
}
