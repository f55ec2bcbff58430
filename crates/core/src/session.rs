//! Per-user session state and the refresh pipeline.
//!
//! A [`Session`] owns everything one user works with: the watchlist, the
//! data loader with its cache, stored alerts, email settings and the
//! virtual portfolio. State lives in this one struct so a caller can hold
//! it behind a single lock (or a single task) instead of scattering it
//! across globals.

use std::collections::HashMap;

use chrono::Utc;
use log::warn;
use rust_decimal::Decimal;

use krxtrack_market_data::{
    DataLoader, Exchange, History, InstrumentProfile, Interval, Period, Symbol,
};

use crate::alerts::{AlertStore, PriceAlert};
use crate::clock::{MarketClock, MarketStatus};
use crate::constants::DEFAULT_WATCHLIST;
use crate::format::format_price;
use crate::notify::{EmailNotifier, EmailSettings};
use crate::portfolio::{Portfolio, PortfolioSummary};

/// Result of refreshing one symbol.
#[derive(Debug)]
pub struct SymbolReport {
    pub symbol: Symbol,
    pub history: History,
    pub profile: InstrumentProfile,
    /// Alerts tripped by the latest close during this refresh.
    pub triggered_alerts: Vec<PriceAlert>,
}

impl SymbolReport {
    pub fn latest_close(&self) -> Option<Decimal> {
        self.history.latest_close()
    }

    /// Change from the previous close, as (absolute, percent).
    pub fn daily_change(&self) -> Option<(Decimal, Decimal)> {
        let latest = self.history.latest_close()?;
        let previous = self.history.previous_close()?;
        if previous.is_zero() {
            return None;
        }
        let change = latest - previous;
        Some((change, change / previous * Decimal::from(100)))
    }
}

/// One user's dashboard state.
pub struct Session {
    loader: DataLoader,
    watchlist: Vec<Symbol>,
    alerts: AlertStore,
    notifier: EmailNotifier,
    recipient: Option<String>,
    portfolio: Portfolio,
    clock: MarketClock,
    period: Period,
    interval: Interval,
}

impl Session {
    /// Start a session with the default Korean watchlist and a daily-bar
    /// three-month view.
    pub fn new(loader: DataLoader) -> Self {
        Self {
            loader,
            watchlist: DEFAULT_WATCHLIST.iter().map(Symbol::new).collect(),
            alerts: AlertStore::new(),
            notifier: EmailNotifier::new(EmailSettings::default()),
            recipient: None,
            portfolio: Portfolio::new(),
            clock: MarketClock::default(),
            period: Period::ThreeMonths,
            interval: Interval::OneDay,
        }
    }

    pub fn watchlist(&self) -> &[Symbol] {
        &self.watchlist
    }

    /// Add a symbol to the watchlist. Returns `false` if already present.
    pub fn watch(&mut self, symbol: Symbol) -> bool {
        if self.watchlist.contains(&symbol) {
            return false;
        }
        self.watchlist.push(symbol);
        true
    }

    /// Remove a symbol from the watchlist. Returns `false` if not present.
    pub fn unwatch(&mut self, symbol: &Symbol) -> bool {
        let before = self.watchlist.len();
        self.watchlist.retain(|s| s != symbol);
        self.watchlist.len() != before
    }

    /// Watchlist split by exchange, preserving order within each group.
    pub fn watchlist_by_exchange(&self) -> HashMap<Exchange, Vec<Symbol>> {
        let mut groups: HashMap<Exchange, Vec<Symbol>> = HashMap::new();
        for symbol in &self.watchlist {
            groups
                .entry(symbol.exchange())
                .or_default()
                .push(symbol.clone());
        }
        groups
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn set_view(&mut self, period: Period, interval: Interval) {
        self.period = period;
        self.interval = interval;
    }

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertStore {
        &mut self.alerts
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn portfolio_mut(&mut self) -> &mut Portfolio {
        &mut self.portfolio
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut DataLoader {
        &mut self.loader
    }

    /// Configure email notifications and where they go.
    pub fn configure_email(&mut self, settings: EmailSettings, recipient: Option<String>) {
        self.notifier = EmailNotifier::new(settings);
        self.recipient = recipient;
    }

    /// Current market status at the wall clock.
    pub fn market_status(&self) -> MarketStatus {
        self.clock.status(Utc::now())
    }

    /// Load one symbol, fire its alerts and email each triggered one.
    pub async fn refresh_symbol(&mut self, symbol: &Symbol) -> SymbolReport {
        let (history, profile) = self.loader.load(symbol, self.period, self.interval).await;

        let triggered_alerts = match history.latest_close() {
            Some(price) => {
                let triggered = self.alerts.fire(price, symbol);
                self.notify_triggered(symbol, price, &triggered);
                triggered
            }
            None => Vec::new(),
        };

        SymbolReport {
            symbol: symbol.clone(),
            history,
            profile,
            triggered_alerts,
        }
    }

    /// Refresh every watched symbol in watchlist order.
    pub async fn refresh_watchlist(&mut self) -> Vec<SymbolReport> {
        let symbols = self.watchlist.clone();
        let mut reports = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            reports.push(self.refresh_symbol(symbol).await);
        }
        reports
    }

    /// Value the portfolio against the latest cached closes.
    pub fn portfolio_valuation(&self) -> PortfolioSummary {
        let mut prices = HashMap::new();
        for lot in self.portfolio.lots() {
            if let Some(entry) = self.loader.cache().get(&lot.symbol) {
                if let Some(close) = entry.history.latest_close() {
                    prices.insert(lot.symbol.clone(), close);
                }
            }
        }
        self.portfolio.valuation(&prices)
    }

    fn notify_triggered(&self, symbol: &Symbol, price: Decimal, triggered: &[PriceAlert]) {
        let Some(recipient) = &self.recipient else {
            if !triggered.is_empty() {
                warn!("Alerts triggered for {} but no recipient configured", symbol);
            }
            return;
        };
        let formatted = format_price(price, symbol);
        for alert in triggered {
            let (subject, body) = EmailNotifier::alert_notification(symbol, &formatted, alert);
            self.notifier.send(&subject, &body, recipient);
        }
    }
}
