use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use krxtrack_market_data::{Currency, Symbol};

use super::{PortfolioError, PortfolioSummary, Position, PositionValuation};
use crate::constants::USD_KRW;

/// Lot-based virtual portfolio.
///
/// Every purchase is recorded as its own [`Position`]; repeat buys of the
/// same symbol are never averaged together.
#[derive(Debug, Default)]
pub struct Portfolio {
    lots: Vec<Position>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a purchase lot. Rejects zero shares and non-positive prices.
    pub fn add_lot(
        &mut self,
        symbol: Symbol,
        shares: u32,
        buy_price: Decimal,
        bought_at: DateTime<Utc>,
    ) -> Result<Uuid, PortfolioError> {
        if shares == 0 {
            return Err(PortfolioError::InvalidLot {
                symbol: symbol.to_string(),
                reason: "shares must be positive".to_string(),
            });
        }
        if buy_price <= Decimal::ZERO {
            return Err(PortfolioError::InvalidLot {
                symbol: symbol.to_string(),
                reason: format!("buy price must be positive, got {buy_price}"),
            });
        }

        let id = Uuid::new_v4();
        self.lots.push(Position {
            id,
            symbol,
            shares,
            buy_price,
            bought_at,
        });
        Ok(id)
    }

    /// Remove a lot by id.
    pub fn remove_lot(&mut self, id: Uuid) -> Result<Position, PortfolioError> {
        let index = self
            .lots
            .iter()
            .position(|lot| lot.id == id)
            .ok_or(PortfolioError::LotNotFound(id))?;
        Ok(self.lots.remove(index))
    }

    /// All lots in insertion order.
    pub fn lots(&self) -> &[Position] {
        &self.lots
    }

    /// Lots for one symbol, in insertion order.
    pub fn lots_for(&self, symbol: &Symbol) -> Vec<&Position> {
        self.lots.iter().filter(|lot| &lot.symbol == symbol).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Value every lot against the given latest prices.
    ///
    /// Prices are in each symbol's trading currency; USD lots are converted
    /// to KRW at the fixed [`USD_KRW`] rate. A lot whose symbol has no entry
    /// in `prices` is carried at cost.
    pub fn valuation(&self, prices: &HashMap<Symbol, Decimal>) -> PortfolioSummary {
        let mut positions = Vec::with_capacity(self.lots.len());
        let mut total_cost_krw = Decimal::ZERO;
        let mut total_value_krw = Decimal::ZERO;

        for lot in &self.lots {
            let current_price = prices.get(&lot.symbol).copied();
            let cost_krw = to_krw(lot.cost_basis(), lot.symbol.currency());
            let value_krw = match current_price {
                Some(price) => to_krw(price * Decimal::from(lot.shares), lot.symbol.currency()),
                None => cost_krw,
            };

            total_cost_krw += cost_krw;
            total_value_krw += value_krw;
            positions.push(PositionValuation {
                position: lot.clone(),
                current_price,
                cost_krw,
                value_krw,
            });
        }

        PortfolioSummary {
            total_cost_krw,
            total_value_krw,
            positions,
        }
    }
}

fn to_krw(amount: Decimal, currency: Currency) -> Decimal {
    match currency {
        Currency::Krw => amount,
        Currency::Usd => amount * USD_KRW,
    }
}
