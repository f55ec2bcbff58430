//! KRX Tracker Market Data Crate
//!
//! Market data fetching for the KRX Tracker application: Korean equities
//! (KOSPI/KOSDAQ listings and US-listed ADRs) with a resilient loading
//! pipeline.
//!
//! # Overview
//!
//! This crate provides:
//! - Symbol identity with exchange-suffix classification (`.KS`, `.KQ`)
//! - OHLCV history and partial instrument profiles
//! - A provider abstraction with a Yahoo Finance implementation
//! - A data loader with retry/backoff, a last-known-good session cache,
//!   and deterministic demo-data fallback
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |    DataLoader    |  retry/backoff -> cache -> demo fallback
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  QuoteProvider   |  (Yahoo Finance)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | History, Profile |  OHLCV bars + partial metadata
//! +------------------+
//! ```
//!
//! The loader never fails its caller: exhausted retries resolve through
//! the cache-then-demo chain, and demo results are tagged as simulated.

pub mod demo;
pub mod errors;
pub mod loader;
pub mod models;
pub mod provider;

// Re-export the core types
pub use errors::{MarketDataError, RetryClass};
pub use loader::{CacheEntry, DataLoader, QuoteCache, RetryDelay, TokioDelay};
pub use models::{
    Currency, Exchange, History, InstrumentProfile, Interval, Period, Quote, Symbol, SOURCE_DEMO,
    SOURCE_YAHOO,
};
pub use provider::{QuoteProvider, YahooProvider};
