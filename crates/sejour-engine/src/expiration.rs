//! # Expiration Finder
//!
//! Under a rolling rule every counted day eventually slides out of the
//! window. The next expiration is the day the oldest counted day stops
//! counting: `earliest + window_days`. Period methods reset all at once at
//! the period boundary, so they have no per-day expiration.

use sejour_core::CalendarDate;
use sejour_rules::RuleDefinition;

use crate::accountant::DaySet;

/// Date on which the oldest counted day leaves the window.
///
/// `None` for an empty set or a non-rolling rule.
pub fn next_expiration(covered: &DaySet, rule: &RuleDefinition) -> Option<CalendarDate> {
    if !rule.counting_method.is_rolling() {
        return None;
    }
    covered
        .earliest()
        .map(|earliest| earliest.add_days(rule.window_days as i64))
}

/// Days from `reference` until [`next_expiration`].
pub fn days_until_next_expiration(
    covered: &DaySet,
    rule: &RuleDefinition,
    reference: CalendarDate,
) -> Option<i64> {
    next_expiration(covered, rule).map(|date| reference.days_until(date))
}
