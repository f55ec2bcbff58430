//! Korean market open/closed status.
//!
//! KOSPI and KOSDAQ trade Monday-Friday 09:00-15:30 KST, inclusive of the
//! closing minute. The holiday table is injected: it is hard-coded per
//! calendar year and must be refreshed from an external source, so callers
//! construct the clock with whichever year's list they have.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};

use crate::constants::{KOREAN_MARKET_HOLIDAYS_2024, KST};

/// Market session opens at 09:00 KST.
const OPEN_MINUTE_OF_DAY: u32 = 9 * 60;

/// Market session closes after the 15:30 KST minute.
const CLOSE_MINUTE_OF_DAY: u32 = 15 * 60 + 30;

/// Why the market is closed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClosedReason {
    /// Saturday or Sunday
    Weekend,
    /// Listed Korean market holiday
    Holiday,
    /// Weekday outside the 09:00-15:30 KST session
    OutsideHours,
}

/// Open/closed status of the Korean market.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarketStatus {
    Open,
    Closed(ClosedReason),
}

impl MarketStatus {
    /// Whether the market is currently trading.
    pub fn is_open(&self) -> bool {
        matches!(self, MarketStatus::Open)
    }

    /// Display label for the status.
    pub fn label(&self) -> &'static str {
        match self {
            MarketStatus::Open => "Open",
            MarketStatus::Closed(ClosedReason::Weekend) => "Closed (weekend)",
            MarketStatus::Closed(ClosedReason::Holiday) => "Closed (holiday)",
            MarketStatus::Closed(ClosedReason::OutsideHours) => "Closed",
        }
    }
}

/// Clock over the Korean trading calendar.
pub struct MarketClock {
    holidays: Vec<NaiveDate>,
}

impl Default for MarketClock {
    /// Clock loaded with the 2024 holiday table.
    fn default() -> Self {
        let holidays = KOREAN_MARKET_HOLIDAYS_2024
            .iter()
            .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
            .collect();
        Self { holidays }
    }
}

impl MarketClock {
    /// Clock with an injected holiday list (e.g. next year's table).
    pub fn with_holidays(holidays: Vec<NaiveDate>) -> Self {
        Self { holidays }
    }

    /// Market status at the given instant.
    pub fn status(&self, now: DateTime<Utc>) -> MarketStatus {
        let korea_now = now.with_timezone(&KST);

        if matches!(korea_now.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketStatus::Closed(ClosedReason::Weekend);
        }

        if self.holidays.contains(&korea_now.date_naive()) {
            return MarketStatus::Closed(ClosedReason::Holiday);
        }

        let minute_of_day = korea_now.hour() * 60 + korea_now.minute();
        if (OPEN_MINUTE_OF_DAY..=CLOSE_MINUTE_OF_DAY).contains(&minute_of_day) {
            MarketStatus::Open
        } else {
            MarketStatus::Closed(ClosedReason::OutsideHours)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Build a UTC instant from Korean wall-clock time.
    fn kst(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        KST.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_saturday_is_closed() {
        // 2024-06-08 is a Saturday
        let status = MarketClock::default().status(kst(2024, 6, 8, 10, 0));
        assert_eq!(status, MarketStatus::Closed(ClosedReason::Weekend));
        assert!(!status.is_open());
    }

    #[test]
    fn test_holiday_is_closed() {
        // 2024-05-15, Buddha's Birthday, falls on a Wednesday
        let status = MarketClock::default().status(kst(2024, 5, 15, 10, 0));
        assert_eq!(status, MarketStatus::Closed(ClosedReason::Holiday));
    }

    #[test]
    fn test_weekday_mid_session_is_open() {
        // 2024-06-05 is a Wednesday
        let status = MarketClock::default().status(kst(2024, 6, 5, 10, 0));
        assert_eq!(status, MarketStatus::Open);
    }

    #[test]
    fn test_weekday_after_close_is_closed() {
        let status = MarketClock::default().status(kst(2024, 6, 5, 16, 0));
        assert_eq!(status, MarketStatus::Closed(ClosedReason::OutsideHours));
    }

    #[test]
    fn test_session_boundaries_inclusive() {
        let clock = MarketClock::default();
        assert!(clock.status(kst(2024, 6, 5, 9, 0)).is_open());
        assert!(clock.status(kst(2024, 6, 5, 15, 30)).is_open());
        assert!(!clock.status(kst(2024, 6, 5, 8, 59)).is_open());
        assert!(!clock.status(kst(2024, 6, 5, 15, 31)).is_open());
    }

    #[test]
    fn test_injected_holiday_table() {
        // 2025-01-01 is a Wednesday; only closed if the table says so.
        let holiday = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let clock = MarketClock::with_holidays(vec![holiday]);
        assert_eq!(
            clock.status(kst(2025, 1, 1, 10, 0)),
            MarketStatus::Closed(ClosedReason::Holiday)
        );

        let empty = MarketClock::with_holidays(Vec::new());
        assert!(empty.status(kst(2025, 1, 1, 10, 0)).is_open());
    }
}
