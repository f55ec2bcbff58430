//! Currency and magnitude formatting.
//!
//! KRW values are scaled into Korean magnitude units, choosing the largest
//! applicable one: 만 (10^4), 억 (10^8), 조 (10^12). USD values use plain
//! two-decimal notation. A missing or zero value formats as "N/A" rather
//! than propagating an error into the presentation layer.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use krxtrack_market_data::{Currency, Symbol};

/// 조 = 10^12
const JO: f64 = 1e12;
/// 억 = 10^8
const EOK: f64 = 1e8;
/// 만 = 10^4
const MAN: f64 = 1e4;

/// Format a monetary value in the symbol's trading currency.
///
/// `None` and zero both render as "N/A".
pub fn format_currency(value: Option<f64>, symbol: &Symbol) -> String {
    let value = match value {
        Some(v) if v != 0.0 => v,
        _ => return "N/A".to_string(),
    };

    match symbol.currency() {
        Currency::Krw => format!("\u{20a9}{}", format_korean_magnitude(value)),
        Currency::Usd => format!("${:.2}", value),
    }
}

/// Decimal front-end for [`format_currency`].
pub fn format_price(value: Decimal, symbol: &Symbol) -> String {
    format_currency(value.to_f64(), symbol)
}

/// Scale a number into the largest applicable Korean magnitude unit.
pub fn format_korean_magnitude(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= JO {
        format!("{:.2}\u{c870}", value / JO) // 조
    } else if magnitude >= EOK {
        format!("{:.2}\u{c5b5}", value / EOK) // 억
    } else if magnitude >= MAN {
        format!("{:.2}\u{b9cc}", value / MAN) // 만
    } else {
        group_thousands(value)
    }
}

/// Format a traded volume for display.
///
/// KRW listings scale with Korean units; USD listings use M/K shorthand.
pub fn format_volume(value: f64, currency: Currency) -> String {
    if value == 0.0 {
        return "N/A".to_string();
    }
    match currency {
        Currency::Krw => {
            if value >= JO {
                format!("{:.2}\u{c870}", value / JO)
            } else if value >= EOK {
                format!("{:.2}\u{c5b5}", value / EOK)
            } else {
                group_thousands(value)
            }
        }
        Currency::Usd => {
            if value >= 1e6 {
                format!("{:.1}M", value / 1e6)
            } else if value >= 1e3 {
                format!("{:.1}K", value / 1e3)
            } else {
                group_thousands(value)
            }
        }
    }
}

/// Comma-group a value rounded to a whole number (e.g. 73500 -> "73,500").
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
