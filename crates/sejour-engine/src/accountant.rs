//! # Day Accountant
//!
//! Computes the set of distinct calendar days a person counts as present
//! in one jurisdiction on a reference date.
//!
//! ## Rules
//!
//! 1. Only records whose jurisdiction equals the rule's code are read.
//! 2. Records starting after the reference date are ignored.
//! 3. Each record is clamped to the rule's counting window and every day
//!    of the clamped span goes into one ordered set.
//!
//! Because the result is a set, overlapping or duplicated records within
//! a jurisdiction never count a day twice. A day spent under two
//! jurisdictions (say, a Schengen visit that also counts toward French tax
//! residency) counts once toward *each* of them, since every jurisdiction
//! is evaluated independently.

use std::collections::BTreeSet;

use sejour_core::{CalendarDate, DateRange, StayRecord};
use sejour_rules::{RuleCatalog, RuleDefinition};

/// Ordered set of counted calendar days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySet {
    days: BTreeSet<CalendarDate>,
}

impl DaySet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Number of distinct days as a day count.
    pub fn count(&self) -> u32 {
        u32::try_from(self.days.len()).unwrap_or(u32::MAX)
    }

    /// Whether no day is counted.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Oldest counted day.
    pub fn earliest(&self) -> Option<CalendarDate> {
        self.days.first().copied()
    }

    /// Most recent counted day.
    pub fn latest(&self) -> Option<CalendarDate> {
        self.days.last().copied()
    }

    /// Whether `day` is counted.
    pub fn contains(&self, day: CalendarDate) -> bool {
        self.days.contains(&day)
    }

    /// Counted days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.days.iter().copied()
    }

    fn insert_range(&mut self, range: DateRange) {
        self.days.extend(range.days());
    }
}

/// Days present under `rule` as of `reference`.
pub fn covered_days(
    records: &[StayRecord],
    rule: &RuleDefinition,
    reference: CalendarDate,
) -> DaySet {
    count_spans(jurisdiction_spans(records, rule), rule, reference)
}

/// Number of days present under `rule` as of `reference`.
pub fn days_used(records: &[StayRecord], rule: &RuleDefinition, reference: CalendarDate) -> u32 {
    covered_days(records, rule, reference).count()
}

/// [`covered_days`] for every rule of a catalog, in code order.
pub fn covered_days_by_jurisdiction<'a>(
    records: &[StayRecord],
    rules: &'a RuleCatalog,
    reference: CalendarDate,
) -> Vec<(&'a RuleDefinition, DaySet)> {
    rules
        .iter()
        .map(|rule| (rule, covered_days(records, rule, reference)))
        .collect()
}

/// Periods of the records that belong to `rule`'s jurisdiction.
pub(crate) fn jurisdiction_spans(records: &[StayRecord], rule: &RuleDefinition) -> Vec<DateRange> {
    records
        .iter()
        .filter(|record| record.jurisdiction == rule.code)
        .map(|record| record.period)
        .collect()
}

/// Union of `spans` clamped to the rule's window on `reference`.
pub(crate) fn count_spans<I>(spans: I, rule: &RuleDefinition, reference: CalendarDate) -> DaySet
where
    I: IntoIterator<Item = DateRange>,
{
    let window = rule.counting_window(reference);
    let mut days = DaySet::new();
    for span in spans {
        if span.start() > reference {
            continue;
        }
        if let Some(clamped) = span.intersect(&window) {
            days.insert_range(clamped);
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use sejour_core::JurisdictionCode;
    use sejour_rules::YearStart;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn schengen() -> RuleDefinition {
        RuleDefinition::rolling(JurisdictionCode::new("SCHENGEN").unwrap(), "Schengen", 90, 180)
            .unwrap()
    }

    fn fr_tax() -> RuleDefinition {
        RuleDefinition::calendar_year(JurisdictionCode::new("FR_TAX").unwrap(), "France", 183)
            .unwrap()
    }

    /// A stay from `from` to `to` days relative to `reference` (negative = past).
    fn stay(reference: CalendarDate, from: i64, to: i64, code: &str) -> StayRecord {
        StayRecord::new(
            reference.add_days(from),
            reference.add_days(to),
            JurisdictionCode::new(code).unwrap(),
        )
        .unwrap()
    }

    const REF: &str = "2026-10-19";

    #[test]
    fn test_empty_records() {
        let days = covered_days(&[], &schengen(), d(REF));
        assert!(days.is_empty());
        assert_eq!(days.earliest(), None);
    }

    #[test]
    fn test_single_trip_seven_days() {
        let r = d(REF);
        let records = [stay(r, -9, -3, "SCHENGEN")];
        assert_eq!(days_used(&records, &schengen(), r), 7);
    }

    #[test]
    fn test_overlapping_trips_count_once() {
        let r = d(REF);
        // 11 days and 8 days sharing 3 days.
        let records = [stay(r, -30, -20, "SCHENGEN"), stay(r, -22, -15, "SCHENGEN")];
        assert_eq!(records[0].period.len_days(), 11);
        assert_eq!(records[1].period.len_days(), 8);
        assert_eq!(days_used(&records, &schengen(), r), 16);
    }

    #[test]
    fn test_duplicate_records_count_once() {
        let r = d(REF);
        let records = [stay(r, -5, -5, "SCHENGEN"), stay(r, -5, -5, "SCHENGEN")];
        assert_eq!(days_used(&records, &schengen(), r), 1);
    }

    #[test]
    fn test_trip_clipped_by_window_start() {
        let r = d(REF);
        let records = [stay(r, -200, -170, "SCHENGEN")];
        assert_eq!(days_used(&records, &schengen(), r), 10);
    }

    #[test]
    fn test_window_boundary() {
        let r = d(REF);
        let out = [stay(r, -190, -180, "SCHENGEN")];
        let edge = [stay(r, -190, -179, "SCHENGEN")];
        assert_eq!(days_used(&out, &schengen(), r), 0);
        assert_eq!(days_used(&edge, &schengen(), r), 1);
    }

    #[test]
    fn test_future_trip_excluded() {
        let r = d(REF);
        let records = [stay(r, 1, 20, "SCHENGEN")];
        assert_eq!(days_used(&records, &schengen(), r), 0);
    }

    #[test]
    fn test_ongoing_trip_counts_through_reference_only() {
        let r = d(REF);
        let records = [stay(r, -4, 10, "SCHENGEN")];
        let days = covered_days(&records, &schengen(), r);
        assert_eq!(days.count(), 5);
        assert_eq!(days.latest(), Some(r));
    }

    #[test]
    fn test_other_jurisdiction_ignored() {
        let r = d(REF);
        let records = [stay(r, -9, -3, "UK_SRT")];
        assert_eq!(days_used(&records, &schengen(), r), 0);
    }

    #[test]
    fn test_same_day_two_jurisdictions_counts_for_each() {
        let r = d(REF);
        let records = [stay(r, -9, -3, "SCHENGEN"), stay(r, -9, -3, "FR_TAX")];
        assert_eq!(days_used(&records, &schengen(), r), 7);
        assert_eq!(days_used(&records, &fr_tax(), r), 7);
    }

    #[test]
    fn test_calendar_year_resets_on_january_first() {
        let rule = fr_tax();
        let records = [StayRecord::parse("2025-12-20", "2026-01-10", "FR_TAX").unwrap()];
        assert_eq!(days_used(&records, &rule, d("2025-12-31")), 12);
        assert_eq!(days_used(&records, &rule, d("2026-01-10")), 10);
    }

    #[test]
    fn test_fiscal_year_resets_on_year_start() {
        let rule = RuleDefinition::fiscal_year(
            JurisdictionCode::new("UK_SRT").unwrap(),
            "UK",
            183,
            YearStart::new(4, 6).unwrap(),
        )
        .unwrap();
        let records = [StayRecord::parse("2026-03-20", "2026-04-20", "UK_SRT").unwrap()];
        // 20 March through 5 April, all in the 2025/26 year.
        assert_eq!(days_used(&records, &rule, d("2026-04-05")), 17);
        // Only 6 April onward counts in the new year.
        let days = covered_days(&records, &rule, d("2026-04-20"));
        assert_eq!(days.count(), 15);
        assert_eq!(days.earliest(), Some(d("2026-04-06")));
    }

    #[test]
    fn test_earliest_day() {
        let r = d(REF);
        let records = [stay(r, -30, -28, "SCHENGEN"), stay(r, -60, -58, "SCHENGEN")];
        let days = covered_days(&records, &schengen(), r);
        assert_eq!(days.earliest(), Some(r.add_days(-60)));
        assert!(days.contains(r.add_days(-29)));
        assert!(!days.contains(r.add_days(-40)));
    }

    #[test]
    fn test_by_jurisdiction_uses_every_rule() {
        let r = d(REF);
        let records = [stay(r, -9, -3, "SCHENGEN")];
        let catalog = RuleCatalog::builtin();
        let per_rule = covered_days_by_jurisdiction(&records, &catalog, r);
        assert_eq!(per_rule.len(), catalog.len());
        let schengen_days = per_rule
            .iter()
            .find(|(rule, _)| rule.code.as_str() == "SCHENGEN")
            .map(|(_, days)| days.count());
        assert_eq!(schengen_days, Some(7));
    }
}
