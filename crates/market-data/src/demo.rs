//! Deterministic demo-data synthesis.
//!
//! When every live data path fails, the loader flips into demo mode and
//! serves synthetic history instead of erroring out. Series are generated
//! as a geometric random walk seeded from the symbol itself, so repeated
//! requests for the same symbol produce identical data and the UI stays
//! stable while the provider is down.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use rust_decimal::Decimal;

use crate::models::{History, InstrumentProfile, Quote, Symbol, SOURCE_DEMO};

/// Number of daily bars in a synthesized history.
const DEMO_WINDOW_DAYS: usize = 100;

/// Mean daily log-return of the synthetic walk (slight upward drift).
const DEMO_DRIFT: f64 = 0.0005;

/// Base price and daily volatility for the walk.
#[derive(Clone, Copy, Debug)]
struct DemoParams {
    base_price: f64,
    volatility: f64,
}

/// Canned demo profiles for the best-known KOSPI names.
///
/// Symbols outside this table still synthesize (with default walk
/// parameters and a placeholder profile), but only these get the demo-mode
/// fast path in the loader.
const DEMO_SYMBOLS: [&str; 3] = ["005930.KS", "000660.KS", "207940.KS"];

fn demo_params(symbol: &Symbol) -> DemoParams {
    match symbol.as_str() {
        // Samsung Electronics
        "005930.KS" => DemoParams {
            base_price: 73_500.0,
            volatility: 0.02,
        },
        // SK Hynix
        "000660.KS" => DemoParams {
            base_price: 120_000.0,
            volatility: 0.025,
        },
        // Samsung Biologics
        "207940.KS" => DemoParams {
            base_price: 800_000.0,
            volatility: 0.015,
        },
        _ => DemoParams {
            base_price: 50_000.0,
            volatility: 0.03,
        },
    }
}

/// Whether a symbol has a canned demo profile.
pub fn has_demo_profile(symbol: &Symbol) -> bool {
    DEMO_SYMBOLS.contains(&symbol.as_str())
}

/// Derive the walk seed from the symbol's identity.
///
/// FNV-1a over the symbol bytes: stable across calls and runs, so the same
/// symbol always walks the same path.
fn demo_seed(symbol: &Symbol) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in symbol.as_str().bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Synthesize a 100-day daily history ending now.
///
/// Closes follow a geometric random walk of normal log-returns around the
/// symbol's base price; open/high/low jitter the walk with bounded uniform
/// noise and volume is uniform in a fixed range.
pub fn synthesize_history(symbol: &Symbol) -> History {
    let params = demo_params(symbol);
    let mut rng = StdRng::seed_from_u64(demo_seed(symbol));

    // Parameters come from the fixed table above and are always finite.
    let returns = Normal::new(DEMO_DRIFT, params.volatility).expect("finite walk parameters");
    let open_jitter = Uniform::new(0.0, 0.01);
    let range_jitter = Uniform::new(0.0, 0.02);
    let volume_range = Uniform::new_inclusive(1_000_000u64, 10_000_000u64);

    let now = Utc::now();
    let mut log_price = params.base_price.ln();
    let mut quotes = Vec::with_capacity(DEMO_WINDOW_DAYS);

    for day in 0..DEMO_WINDOW_DAYS {
        log_price += returns.sample(&mut rng);
        let close = log_price.exp();
        let open = close * (1.0 - open_jitter.sample(&mut rng));
        let high = close * (1.0 + range_jitter.sample(&mut rng));
        let low = close * (1.0 - range_jitter.sample(&mut rng));
        let volume = volume_range.sample(&mut rng);

        let age = (DEMO_WINDOW_DAYS - 1 - day) as i64;
        quotes.push(Quote::ohlcv(
            now - Duration::days(age),
            to_price(open),
            to_price(high),
            to_price(low),
            to_price(close),
            Decimal::from(volume),
        ));
    }

    History::from_quotes(quotes)
}

/// Placeholder metadata for a synthesized symbol, tagged as simulated.
pub fn demo_profile(symbol: &Symbol) -> InstrumentProfile {
    let mut profile = match symbol.as_str() {
        "005930.KS" => InstrumentProfile::with_name("Samsung Electronics Co., Ltd. (demo data)")
            .sector("Technology")
            .industry("Semiconductors"),
        "000660.KS" => InstrumentProfile::with_name("SK Hynix Inc. (demo data)")
            .sector("Technology")
            .industry("Semiconductors"),
        "207940.KS" => InstrumentProfile::with_name("Samsung Biologics Co., Ltd. (demo data)")
            .sector("Healthcare")
            .industry("Biotechnology"),
        other => InstrumentProfile::with_name(format!("{} (demo data)", other))
            .sector("Technology")
            .industry("Electronics"),
    };

    profile.market_cap = Some(100_000_000_000_000.0);
    profile.pe_ratio = Some(15.0);
    profile.dividend_yield = Some(0.02);
    profile.beta = Some(1.0);
    profile.source(SOURCE_DEMO)
}

fn to_price(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(2)
}
