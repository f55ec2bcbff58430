//! Core data types: symbols, OHLCV history, instrument profiles, and
//! request parameters.

mod profile;
mod quote;
mod symbol;
mod types;

pub use profile::{InstrumentProfile, SOURCE_DEMO, SOURCE_YAHOO};
pub use quote::{History, Quote};
pub use symbol::{Currency, Exchange, Symbol, KOSDAQ_SUFFIX, KOSPI_SUFFIX};
pub use types::{Interval, Period};
