//! Application-wide constants.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Timezone all timestamps are rendered in.
pub const DISPLAY_TZ: Tz = chrono_tz::Europe::Paris;

/// Korea Standard Time, the exchange's local timezone.
pub const KST: Tz = chrono_tz::Asia::Seoul;

/// Hard-coded USD/KRW conversion rate used for mixed-currency portfolio
/// totals. Deliberately a constant, not a live lookup.
pub const USD_KRW: Decimal = dec!(1350);

/// Floor for the auto-refresh interval; faster polling runs into provider
/// rate limits.
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 30;

/// Default Korean watchlist (KOSPI `.KS` and KOSDAQ `.KQ` listings).
pub const DEFAULT_WATCHLIST: [&str; 20] = [
    "005930.KS", // Samsung Electronics
    "000660.KS", // SK Hynix
    "207940.KS", // Samsung Biologics
    "005380.KS", // Hyundai Motor
    "068270.KS", // Celltrion
    "035420.KS", // NAVER
    "000270.KS", // KIA Corporation
    "051910.KS", // LG Chem
    "006400.KS", // Samsung SDI
    "003550.KS", // LG
    "035720.KQ", // Kakao (KOSDAQ)
    "028300.KS", // HLB
    "105560.KS", // KB Financial
    "055550.KS", // Shinhan Financial
    "086790.KS", // Hana Financial
    "033780.KS", // KT&G
    "017670.KS", // SK Telecom
    "034730.KS", // SK
    "012330.KS", // Hyundai Mobis
    "096770.KS", // SK Innovation
];

/// Korean market holidays, 2024 (year, month, day).
///
/// Refreshed per calendar year from an external source; the market clock
/// takes the list by constructor so later years are injected, not patched
/// in here.
pub const KOREAN_MARKET_HOLIDAYS_2024: [(i32, u32, u32); 18] = [
    (2024, 1, 1),   // New Year's Day
    (2024, 2, 9),   // Seollal holiday
    (2024, 2, 10),  // Seollal
    (2024, 2, 11),  // Seollal holiday
    (2024, 3, 1),   // Independence Movement Day
    (2024, 4, 10),  // National Assembly election
    (2024, 5, 1),   // Labour Day
    (2024, 5, 5),   // Children's Day
    (2024, 5, 15),  // Buddha's Birthday
    (2024, 6, 6),   // Memorial Day
    (2024, 8, 15),  // Liberation Day
    (2024, 9, 16),  // Chuseok holiday
    (2024, 9, 17),  // Chuseok
    (2024, 9, 18),  // Chuseok holiday
    (2024, 10, 3),  // National Foundation Day
    (2024, 10, 9),  // Hangul Day
    (2024, 12, 25), // Christmas Day
    (2024, 12, 31), // Year-end closing day
];
