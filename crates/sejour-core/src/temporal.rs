//! # Temporal Types — Epoch-Day Calendar Dates
//!
//! Defines `CalendarDate`, a timezone-naive calendar date stored as a
//! signed day count since 1970-01-01, plus the inclusive `DateRange` and
//! the injectable `Clock`.
//!
//! ## Invariants
//!
//! - A `CalendarDate` always lies in years 0001..=9999, so it can always
//!   be rendered as `YYYY-MM-DD`. Arithmetic saturates at those bounds.
//! - A `DateRange` always has `start <= end`.
//! - Dates carry no time of day. "Today" is resolved once, against UTC,
//!   by [`SystemClock`]; nothing else in the workspace reads the clock.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// `NaiveDate::num_days_from_ce()` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

// ─── CalendarDate ────────────────────────────────────────────────────

/// A calendar date with no time-of-day component.
///
/// Serialized as an ISO `YYYY-MM-DD` string; deserialization rejects
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(i32);

impl CalendarDate {
    /// 0001-01-01.
    pub const MIN: CalendarDate = CalendarDate(-719_162);
    /// 9999-12-31.
    pub const MAX: CalendarDate = CalendarDate(2_932_896);
    /// 1970-01-01.
    pub const EPOCH: CalendarDate = CalendarDate(0);

    /// Build from a day count since 1970-01-01.
    pub fn from_epoch_day(day: i32) -> Result<Self, ValidationError> {
        if day < Self::MIN.0 || day > Self::MAX.0 {
            return Err(ValidationError::DateOutOfRange {
                detail: format!("epoch day {day} outside years 0001..=9999"),
            });
        }
        Ok(Self(day))
    }

    /// Build from a `chrono::NaiveDate`.
    pub fn from_naive_date(date: NaiveDate) -> Result<Self, ValidationError> {
        Self::from_epoch_day(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }

    /// Build from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ValidationError::MalformedDate {
                input: format!("{year:04}-{month:02}-{day:02}"),
            }
        })?;
        Self::from_naive_date(date)
    }

    /// Parse a strict ISO `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedDate {
            input: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| malformed())?;
        Self::from_naive_date(date)
    }

    /// Days since 1970-01-01.
    pub fn epoch_day(&self) -> i32 {
        self.0
    }

    /// Convert to a `chrono::NaiveDate` for calendar-field access.
    pub fn to_naive_date(&self) -> NaiveDate {
        // In range by construction.
        NaiveDate::from_num_days_from_ce_opt(self.0 + UNIX_EPOCH_DAYS_FROM_CE)
            .unwrap_or(NaiveDate::MAX)
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.to_naive_date().year()
    }

    /// Month of year (1-12).
    pub fn month(&self) -> u32 {
        self.to_naive_date().month()
    }

    /// Day of month (1-31).
    pub fn day(&self) -> u32 {
        self.to_naive_date().day()
    }

    /// Shift by `days` (negative moves backwards), saturating at
    /// [`CalendarDate::MIN`] / [`CalendarDate::MAX`].
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = (self.0 as i64).saturating_add(days);
        Self(shifted.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as i32)
    }

    /// The following day.
    pub fn succ(&self) -> Self {
        self.add_days(1)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        other.0 as i64 - self.0 as i64
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        self.to_naive_date().format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_iso8601()
    }
}

// ─── DateRange ───────────────────────────────────────────────────────

/// An inclusive span of calendar days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ValidationError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build an inclusive range, rejecting `end < start`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart {
                start: start.to_iso8601(),
                end: end.to_iso8601(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single(day: CalendarDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// A range of `length` days beginning on `start`.
    pub fn starting_at(start: CalendarDate, length: u32) -> Result<Self, ValidationError> {
        if length == 0 {
            return Err(ValidationError::InvalidTripLength);
        }
        let end = start.add_days(length as i64 - 1);
        if start.days_until(end) != length as i64 - 1 {
            return Err(ValidationError::DateOutOfRange {
                detail: format!("{length}-day range from {start} passes 9999-12-31"),
            });
        }
        Ok(Self { start, end })
    }

    /// First day.
    pub fn start(&self) -> CalendarDate {
        self.start
    }

    /// Last day (inclusive).
    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Number of days covered, always at least one.
    pub fn len_days(&self) -> u32 {
        (self.start.days_until(self.end) + 1) as u32
    }

    /// Whether `day` falls within the range.
    pub fn contains(&self, day: CalendarDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// The overlap of two ranges, if any.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// The prefix `start..=through`, if `through` lies inside the range.
    pub fn prefix_through(&self, through: CalendarDate) -> Option<DateRange> {
        self.contains(through).then_some(DateRange {
            start: self.start,
            end: through,
        })
    }

    /// Every day of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> {
        (self.start.0..=self.end.0).map(CalendarDate)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

// ─── Clock ───────────────────────────────────────────────────────────

/// Source of the reference date for "as of today" queries.
pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> CalendarDate;
}

/// Wall clock pinned to UTC so every client agrees on the calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from_naive_date(Utc::now().date_naive()).unwrap_or(CalendarDate::MAX)
    }
}

/// A clock frozen at a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_epoch_is_day_zero() {
        assert_eq!(d("1970-01-01").epoch_day(), 0);
        assert_eq!(d("1970-01-02").epoch_day(), 1);
        assert_eq!(d("1969-12-31").epoch_day(), -1);
    }

    #[test]
    fn test_bounds_match_chrono() {
        assert_eq!(CalendarDate::MIN.to_iso8601(), "0001-01-01");
        assert_eq!(CalendarDate::MAX.to_iso8601(), "9999-12-31");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(CalendarDate::parse("2026-1-5").is_err());
        assert!(CalendarDate::parse("2026-02-30").is_err());
        assert!(CalendarDate::parse("2026/02/01").is_err());
        assert!(CalendarDate::parse("2026-02-01T00:00:00Z").is_err());
        assert!(CalendarDate::parse("").is_err());
    }

    #[test]
    fn test_parse_leap_day() {
        let leap = d("2024-02-29");
        assert_eq!(leap.succ(), d("2024-03-01"));
        assert_eq!((leap.year(), leap.month(), leap.day()), (2024, 2, 29));
    }

    #[test]
    fn test_add_days_crosses_dst_and_year() {
        // DST transitions have no effect on calendar arithmetic.
        assert_eq!(d("2026-03-28").add_days(2), d("2026-03-30"));
        assert_eq!(d("2026-12-31").add_days(1), d("2027-01-01"));
        assert_eq!(d("2026-01-01").add_days(-1), d("2025-12-31"));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(CalendarDate::MAX.add_days(10), CalendarDate::MAX);
        assert_eq!(CalendarDate::MIN.add_days(-10), CalendarDate::MIN);
    }

    #[test]
    fn test_days_until() {
        assert_eq!(d("2026-01-01").days_until(d("2026-07-01")), 181);
        assert_eq!(d("2026-07-01").days_until(d("2026-01-01")), -181);
    }

    #[test]
    fn test_serde_iso_string() {
        let date = d("2026-10-19");
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2026-10-19\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<CalendarDate>("\"19/10/2026\"").is_err());
    }

    #[test]
    fn test_range_rejects_inverted() {
        let err = DateRange::new(d("2026-03-10"), d("2026-03-01")).unwrap_err();
        assert!(matches!(err, ValidationError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_range_len_and_days() {
        let range = DateRange::new(d("2026-03-01"), d("2026-03-07")).unwrap();
        assert_eq!(range.len_days(), 7);
        assert_eq!(range.days().count(), 7);
        assert_eq!(range.days().next(), Some(d("2026-03-01")));
        assert_eq!(DateRange::single(d("2026-03-01")).len_days(), 1);
    }

    #[test]
    fn test_range_starting_at() {
        let range = DateRange::starting_at(d("2026-03-01"), 10).unwrap();
        assert_eq!(range.end(), d("2026-03-10"));
        assert!(DateRange::starting_at(d("2026-03-01"), 0).is_err());
        assert!(DateRange::starting_at(CalendarDate::MAX, 2).is_err());
    }

    #[test]
    fn test_range_intersect() {
        let a = DateRange::new(d("2026-03-01"), d("2026-03-10")).unwrap();
        let b = DateRange::new(d("2026-03-08"), d("2026-03-20")).unwrap();
        let c = DateRange::new(d("2026-04-01"), d("2026-04-02")).unwrap();
        assert_eq!(
            a.intersect(&b),
            Some(DateRange::new(d("2026-03-08"), d("2026-03-10")).unwrap())
        );
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_range_prefix_through() {
        let a = DateRange::new(d("2026-03-01"), d("2026-03-10")).unwrap();
        assert_eq!(a.prefix_through(d("2026-03-04")).unwrap().len_days(), 4);
        assert!(a.prefix_through(d("2026-03-11")).is_none());
    }

    #[test]
    fn test_range_serde_validates() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2026-03-01","end":"2026-03-02"}"#).unwrap();
        assert_eq!(ok.len_days(), 2);
        assert!(
            serde_json::from_str::<DateRange>(r#"{"start":"2026-03-02","end":"2026-03-01"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(d("2026-10-19"));
        assert_eq!(clock.today(), d("2026-10-19"));
    }

    #[test]
    fn test_system_clock_in_range() {
        let today = SystemClock.today();
        assert!(today > d("2020-01-01"));
        assert!(today < CalendarDate::MAX);
    }
}
