use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use krxtrack_market_data::Symbol;

/// Trigger direction for a price alert.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    /// Triggers when the price reaches or exceeds the target.
    Above,
    /// Triggers when the price reaches or falls below the target.
    Below,
}

impl AlertCondition {
    /// Display form ("above"/"below").
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCondition::Above => "above",
            AlertCondition::Below => "below",
        }
    }
}

/// A user-defined price threshold on one symbol.
///
/// Never mutated after creation; deleted on manual removal, or after
/// firing when `one_time` is set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceAlert {
    /// Stable identifier for removal
    pub id: Uuid,
    /// The watched symbol
    pub symbol: Symbol,
    /// Threshold price in the symbol's trading currency
    pub target: Decimal,
    /// Trigger direction
    pub condition: AlertCondition,
    /// Whether the alert is removed after its first trigger
    pub one_time: bool,
    /// When the alert was created
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    /// Create a new alert with a fresh id.
    pub fn new(symbol: Symbol, target: Decimal, condition: AlertCondition, one_time: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol,
            target,
            condition,
            one_time,
            created_at: Utc::now(),
        }
    }

    /// Whether the given current price trips this alert.
    ///
    /// Evaluated against the latest close only; both comparisons include
    /// the target itself.
    pub fn is_triggered_by(&self, current_price: Decimal) -> bool {
        match self.condition {
            AlertCondition::Above => current_price >= self.target,
            AlertCondition::Below => current_price <= self.target,
        }
    }
}
