use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use krxtrack_market_data::Symbol;

use super::{AlertCondition, AlertError, PriceAlert};

/// Session-scoped store of price alerts.
#[derive(Default)]
pub struct AlertStore {
    alerts: Vec<PriceAlert>,
}

impl AlertStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored alerts.
    pub fn alerts(&self) -> &[PriceAlert] {
        &self.alerts
    }

    /// Alerts watching one symbol.
    pub fn alerts_for(&self, symbol: &Symbol) -> Vec<&PriceAlert> {
        self.alerts.iter().filter(|a| &a.symbol == symbol).collect()
    }

    /// Create and store an alert, returning its id.
    pub fn add(
        &mut self,
        symbol: Symbol,
        target: Decimal,
        condition: AlertCondition,
        one_time: bool,
    ) -> Result<Uuid, AlertError> {
        if target <= Decimal::ZERO {
            return Err(AlertError::NonPositiveTarget(target.to_string()));
        }
        let alert = PriceAlert::new(symbol, target, condition, one_time);
        let id = alert.id;
        self.alerts.push(alert);
        Ok(id)
    }

    /// Remove an alert by id.
    pub fn remove(&mut self, id: Uuid) -> Result<PriceAlert, AlertError> {
        let index = self
            .alerts
            .iter()
            .position(|a| a.id == id)
            .ok_or(AlertError::NotFound(id))?;
        Ok(self.alerts.remove(index))
    }

    /// Alerts on `symbol` tripped by the current price.
    ///
    /// Pure check: triggered alerts stay stored and may trigger again on
    /// the next call. No ordering guarantee among multiple matches.
    pub fn check(&self, current_price: Decimal, symbol: &Symbol) -> Vec<PriceAlert> {
        self.alerts
            .iter()
            .filter(|a| &a.symbol == symbol && a.is_triggered_by(current_price))
            .cloned()
            .collect()
    }

    /// [`check`](Self::check), then prune triggered one-time alerts.
    pub fn fire(&mut self, current_price: Decimal, symbol: &Symbol) -> Vec<PriceAlert> {
        let triggered = self.check(current_price, symbol);
        if !triggered.is_empty() {
            self.alerts
                .retain(|a| !(a.one_time && triggered.iter().any(|t| t.id == a.id)));
            info!(
                "{} alert(s) triggered for {} at {}",
                triggered.len(),
                symbol,
                current_price
            );
        }
        triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn samsung() -> Symbol {
        Symbol::new("005930.KS")
    }

    #[test]
    fn test_above_alert_triggers_when_price_reaches_target() {
        let mut store = AlertStore::new();
        store
            .add(samsung(), dec!(70000), AlertCondition::Above, false)
            .unwrap();

        let triggered = store.check(dec!(75000), &samsung());
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].target, dec!(70000));
    }

    #[test]
    fn test_below_alert_does_not_trigger_above_target() {
        let mut store = AlertStore::new();
        store
            .add(samsung(), dec!(70000), AlertCondition::Below, false)
            .unwrap();

        assert!(store.check(dec!(75000), &samsung()).is_empty());
    }

    #[test]
    fn test_check_only_matches_requested_symbol() {
        let mut store = AlertStore::new();
        store
            .add(samsung(), dec!(70000), AlertCondition::Above, false)
            .unwrap();
        store
            .add(
                Symbol::new("000660.KS"),
                dec!(100000),
                AlertCondition::Above,
                false,
            )
            .unwrap();

        let triggered = store.check(dec!(200000), &samsung());
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].symbol, samsung());
    }

    #[test]
    fn test_repeating_alert_survives_fire() {
        let mut store = AlertStore::new();
        store
            .add(samsung(), dec!(70000), AlertCondition::Above, false)
            .unwrap();

        assert_eq!(store.fire(dec!(75000), &samsung()).len(), 1);
        // Still stored, triggers again.
        assert_eq!(store.fire(dec!(75000), &samsung()).len(), 1);
    }

    #[test]
    fn test_one_time_alert_removed_after_fire() {
        let mut store = AlertStore::new();
        store
            .add(samsung(), dec!(70000), AlertCondition::Above, true)
            .unwrap();

        assert_eq!(store.fire(dec!(75000), &samsung()).len(), 1);
        assert!(store.alerts().is_empty());
        assert!(store.fire(dec!(75000), &samsung()).is_empty());
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = AlertStore::new();
        let id = store
            .add(samsung(), dec!(70000), AlertCondition::Above, false)
            .unwrap();

        assert!(store.remove(id).is_ok());
        assert!(store.alerts().is_empty());
        assert!(matches!(store.remove(id), Err(AlertError::NotFound(_))));
    }

    #[test]
    fn test_non_positive_target_rejected() {
        let mut store = AlertStore::new();
        assert!(matches!(
            store.add(samsung(), dec!(0), AlertCondition::Above, false),
            Err(AlertError::NonPositiveTarget(_))
        ));
    }
}
