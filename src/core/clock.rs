//! Clock seam for document building.
//!
//! Issue dates, due dates and the epoch-based invoice-number fallback
//! are wall-clock reads; routing them through a trait lets tests freeze
//! time and makes normalization fully deterministic.

use chrono::{NaiveDate, NaiveTime, Utc};

/// Source of "now" for document building.
pub trait Clock {
    /// Current date (UTC, date-only).
    fn today(&self) -> NaiveDate;
    /// Milliseconds since the Unix epoch, for generated identifiers.
    fn epoch_millis(&self) -> i64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn epoch_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A frozen clock for tests and replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
    epoch_millis: i64,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            epoch_millis: today.and_time(NaiveTime::MIN).and_utc().timestamp_millis(),
        }
    }

    /// Convenience constructor; an out-of-range date freezes at the
    /// epoch.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self::new(NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }
}
