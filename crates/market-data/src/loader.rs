//! Resilient data loading: retry with backoff, last-known-good cache, and
//! demo-data fallback.
//!
//! The loader never fails its caller. Live fetches are retried a fixed
//! number of times with exponential backoff; when every attempt fails the
//! loader falls back to a sufficiently fresh cached snapshot, and failing
//! that, flips into demo mode and serves synthesized data clearly tagged
//! as simulated.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info, warn};

use crate::demo;
use crate::errors::RetryClass;
use crate::models::{History, InstrumentProfile, Interval, Period, Symbol};
use crate::provider::QuoteProvider;

/// Fetch attempts per load before falling back.
const MAX_ATTEMPTS: u32 = 3;

/// Cached snapshots older than this are not offered as fallback.
const CACHE_FRESHNESS_SECS: i64 = 3600;

/// Sleep before a retry attempt (attempt is 1-based).
///
/// No sleep before the first attempt; 2s before the second, 4s before the
/// third, absorbing provider rate limiting.
fn backoff_delay(attempt: u32) -> Option<Duration> {
    if attempt <= 1 {
        None
    } else {
        Some(Duration::from_secs(1 << (attempt - 1)))
    }
}

/// Injectable sleep used between retry attempts.
///
/// Production uses [`TokioDelay`]; tests substitute a recording no-op so
/// the retry loop runs instantly and sleeps can be asserted on.
#[async_trait]
pub trait RetryDelay: Send + Sync {
    /// Sleep for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock delay backed by `tokio::time::sleep`.
pub struct TokioDelay;

#[async_trait]
impl RetryDelay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Last-known-good snapshot for one symbol.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// The history as of the last successful fetch
    pub history: History,
    /// The profile as of the last successful fetch
    pub profile: InstrumentProfile,
    /// When the fetch happened
    pub fetched_at: DateTime<Utc>,
}

/// Session-scoped cache of last successful loads, keyed by symbol.
#[derive(Default)]
pub struct QuoteCache {
    entries: HashMap<Symbol, CacheEntry>,
}

impl QuoteCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot for a symbol, replacing any previous one.
    pub fn store(
        &mut self,
        symbol: Symbol,
        history: History,
        profile: InstrumentProfile,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries.insert(
            symbol,
            CacheEntry {
                history,
                profile,
                fetched_at,
            },
        );
    }

    /// The snapshot for a symbol, regardless of age.
    pub fn get(&self, symbol: &Symbol) -> Option<&CacheEntry> {
        self.entries.get(symbol)
    }

    /// The snapshot for a symbol, only if younger than the freshness
    /// window. Stale entries fall through to demo synthesis instead of
    /// being silently trusted.
    pub fn get_fresh(&self, symbol: &Symbol, now: DateTime<Utc>) -> Option<&CacheEntry> {
        self.entries
            .get(symbol)
            .filter(|entry| (now - entry.fetched_at).num_seconds() < CACHE_FRESHNESS_SECS)
    }

    /// Number of cached symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Retry-with-fallback data loader.
///
/// Owns the session cache and the demo-mode flag; one loader serves one
/// user session, so interior mutability is not needed.
pub struct DataLoader {
    provider: Arc<dyn QuoteProvider>,
    delay: Arc<dyn RetryDelay>,
    cache: QuoteCache,
    demo_mode: bool,
}

impl DataLoader {
    /// Create a loader over a provider with wall-clock retry delays.
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_delay(provider, Arc::new(TokioDelay))
    }

    /// Create a loader with an injected retry delay (used by tests).
    pub fn with_delay(provider: Arc<dyn QuoteProvider>, delay: Arc<dyn RetryDelay>) -> Self {
        Self {
            provider,
            delay,
            cache: QuoteCache::new(),
            demo_mode: false,
        }
    }

    /// Whether the loader is serving synthesized data.
    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Force demo mode on or off (manual toggle in the UI).
    ///
    /// Turning it off does not clear the cache; last-known-good data stays
    /// available as fallback.
    pub fn set_demo_mode(&mut self, enabled: bool) {
        self.demo_mode = enabled;
    }

    /// The session cache of last successful loads.
    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// Load history and profile for a symbol.
    ///
    /// Never fails: the result is live data, a fresh cached snapshot, or
    /// synthesized demo data (tagged as simulated), in that order of
    /// preference. May flip the demo-mode flag on as a side effect.
    pub async fn load(
        &mut self,
        symbol: &Symbol,
        period: Period,
        interval: Interval,
    ) -> (History, InstrumentProfile) {
        // Demo-mode fast path for symbols with a canned profile: no
        // network attempt at all.
        if self.demo_mode && demo::has_demo_profile(symbol) {
            return (demo::synthesize_history(symbol), demo::demo_profile(symbol));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            if let Some(delay) = backoff_delay(attempt) {
                self.delay.sleep(delay).await;
            }

            match self.provider.fetch_history(symbol, period, interval).await {
                Ok(history) if !history.is_empty() => {
                    let profile = self.fetch_profile_best_effort(symbol).await;
                    self.cache
                        .store(symbol.clone(), history.clone(), profile.clone(), Utc::now());
                    return (history, profile);
                }
                // Providers surface empty results as errors, but guard
                // anyway: an empty history is a failed attempt.
                Ok(_) => {
                    warn!(
                        "Empty history for {} (attempt {}/{})",
                        symbol, attempt, MAX_ATTEMPTS
                    );
                }
                Err(e) => match e.retry_class() {
                    RetryClass::Transient => {
                        warn!(
                            "Transient fetch failure for {} (attempt {}/{}): {}",
                            symbol, attempt, MAX_ATTEMPTS, e
                        );
                    }
                    RetryClass::Unexpected => {
                        error!(
                            "Unexpected fetch failure for {} (attempt {}/{}): {}",
                            symbol, attempt, MAX_ATTEMPTS, e
                        );
                    }
                },
            }
        }

        // Every attempt failed: a fresh cached snapshot wins over demo data.
        if let Some(entry) = self.cache.get_fresh(symbol, Utc::now()) {
            info!(
                "Serving cached data for {} fetched at {}",
                symbol,
                entry.fetched_at.format("%H:%M:%S")
            );
            return (entry.history.clone(), entry.profile.clone());
        }

        if !self.demo_mode {
            self.demo_mode = true;
            info!("Demo mode activated - serving simulated data");
        }
        (demo::synthesize_history(symbol), demo::demo_profile(symbol))
    }

    /// Fetch the profile alongside a successful history fetch.
    ///
    /// A profile failure does not fail the load; the symbol stands in for
    /// the name and the remaining fields render as "N/A".
    async fn fetch_profile_best_effort(&self, symbol: &Symbol) -> InstrumentProfile {
        match self.provider.fetch_profile(symbol).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile fetch failed for {}: {}", symbol, e);
                InstrumentProfile::with_name(symbol.to_string()).source(self.provider.id())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MarketDataError;
    use crate::models::Quote;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Provider that plays back a script of fetch outcomes.
    struct ScriptedProvider {
        script: Mutex<Vec<Result<History, MarketDataError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Result<History, MarketDataError>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl QuoteProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn fetch_history(
            &self,
            symbol: &Symbol,
            _period: Period,
            _interval: Interval,
        ) -> Result<History, MarketDataError> {
            *self.calls.lock().unwrap() += 1;
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                return Err(MarketDataError::EmptyHistory {
                    symbol: symbol.to_string(),
                });
            }
            script.remove(0)
        }

        async fn fetch_profile(
            &self,
            symbol: &Symbol,
        ) -> Result<InstrumentProfile, MarketDataError> {
            Ok(InstrumentProfile::with_name(symbol.to_string()).source("SCRIPTED"))
        }
    }

    /// Delay that records requested sleeps instead of sleeping.
    #[derive(Default)]
    struct RecordingDelay {
        sleeps: Mutex<Vec<Duration>>,
    }

    impl RecordingDelay {
        fn recorded(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RetryDelay for RecordingDelay {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }

    fn sample_history() -> History {
        History::from_quotes(vec![Quote::ohlcv(
            Utc::now(),
            dec!(73000),
            dec!(74200),
            dec!(72900),
            dec!(73500),
            dec!(1000000),
        )])
    }

    fn rate_limited() -> MarketDataError {
        MarketDataError::RateLimited {
            provider: "SCRIPTED".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_does_not_sleep() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(sample_history())]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider.clone(), delay.clone());

        let symbol = Symbol::new("005930.KS");
        let (history, profile) = loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;

        assert_eq!(history.latest_close(), Some(dec!(73500)));
        assert!(!profile.is_simulated());
        assert_eq!(provider.calls(), 1);
        assert!(delay.recorded().is_empty());
        assert!(!loader.demo_mode());
    }

    #[tokio::test]
    async fn test_two_transient_failures_then_success_on_third() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Ok(sample_history()),
        ]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider.clone(), delay.clone());

        let symbol = Symbol::new("005930.KS");
        let (history, _) = loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;

        assert_eq!(history.latest_close(), Some(dec!(73500)));
        assert_eq!(provider.calls(), 3);
        // Slept before attempts 2 and 3 only, with exponential backoff.
        assert_eq!(
            delay.recorded(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
        assert!(!loader.demo_mode());
    }

    #[tokio::test]
    async fn test_exhausted_retries_use_fresh_cache() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
        ]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider, delay);

        let symbol = Symbol::new("005930.KS");
        let cached = sample_history();
        loader.cache.store(
            symbol.clone(),
            cached.clone(),
            InstrumentProfile::with_name("Samsung Electronics Co., Ltd."),
            Utc::now() - chrono::Duration::minutes(30),
        );

        let (history, profile) = loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;

        assert_eq!(history.latest_close(), cached.latest_close());
        assert!(!profile.is_simulated());
        assert!(!loader.demo_mode());
    }

    #[tokio::test]
    async fn test_exhausted_retries_with_stale_cache_fall_to_demo() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
        ]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider, delay);

        let symbol = Symbol::new("005930.KS");
        loader.cache.store(
            symbol.clone(),
            sample_history(),
            InstrumentProfile::with_name("Samsung Electronics Co., Ltd."),
            Utc::now() - chrono::Duration::hours(2),
        );

        let (history, profile) = loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;

        assert!(profile.is_simulated());
        assert_eq!(history.len(), 100);
        assert!(loader.demo_mode());
    }

    #[tokio::test]
    async fn test_unexpected_errors_also_consume_attempts() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(MarketDataError::ProviderError {
                provider: "SCRIPTED".to_string(),
                message: "boom".to_string(),
            }),
            Err(MarketDataError::EmptyHistory {
                symbol: "005930.KS".to_string(),
            }),
            Ok(sample_history()),
        ]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider.clone(), delay);

        let symbol = Symbol::new("005930.KS");
        let (history, _) = loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;

        assert_eq!(history.latest_close(), Some(dec!(73500)));
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_demo_mode_fast_path_skips_network() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(sample_history())]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider.clone(), delay);
        loader.set_demo_mode(true);

        let symbol = Symbol::new("005930.KS");
        let (history, profile) = loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;

        assert!(profile.is_simulated());
        assert_eq!(history.len(), 100);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_demo_mode_without_canned_profile_still_tries_network() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(sample_history())]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider.clone(), delay);
        loader.set_demo_mode(true);

        // 035420.KS (NAVER) has no canned demo profile.
        let symbol = Symbol::new("035420.KS");
        let (history, _) = loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;

        assert_eq!(history.latest_close(), Some(dec!(73500)));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_success_refreshes_cache() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(sample_history())]));
        let delay = Arc::new(RecordingDelay::default());
        let mut loader = DataLoader::with_delay(provider, delay);

        let symbol = Symbol::new("005930.KS");
        assert!(loader.cache().is_empty());
        loader
            .load(&symbol, Period::OneMonth, Interval::OneDay)
            .await;
        assert_eq!(loader.cache().len(), 1);
        assert!(loader.cache().get_fresh(&symbol, Utc::now()).is_some());
    }
}
