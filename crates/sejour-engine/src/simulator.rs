//! # Compliance Simulator
//!
//! What-if evaluation of a stay that has not happened yet.
//!
//! ## Why Day by Day
//!
//! During a candidate trip the rolling window moves forward with the
//! traveller: each new day of the trip adds one counted day while old
//! days may slide out of the window. Peak usage can therefore fall in the
//! middle of the trip, not only on its last day. [`would_violate`]
//! re-counts on every day `d` of the candidate, treating the trip so far
//! (`start..=d`) as an extra record and `d` as the reference date.
//!
//! ## Cost
//!
//! [`earliest_safe_entry`] runs up to [`SEARCH_HORIZON_DAYS`] simulations
//! and [`max_trip_length`] up to `days_allowed`; each simulation is one
//! day count per trip day, and each day count is `O(window)`. That is
//! comfortably fast at 90/180 scale and grows quadratically with the
//! allowance.

use serde::{Deserialize, Serialize};

use sejour_core::{CalendarDate, DateRange, StayRecord};
use sejour_rules::RuleDefinition;

use crate::accountant::{count_spans, jurisdiction_spans};

/// Number of candidate start dates examined by [`earliest_safe_entry`].
pub const SEARCH_HORIZON_DAYS: u32 = 365;

/// Outcome of a planning query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningResult {
    /// Whether any day of the candidate stay exceeds the allowance.
    pub would_violate: bool,
    /// Days counted on the first offending day, or the peak over the
    /// whole stay when nothing is exceeded.
    pub projected_days_used: u32,
    /// The rule's allowance.
    pub days_allowed: u32,
    /// First day on which the allowance is exceeded.
    pub violation_date: Option<CalendarDate>,
    /// Earliest start date from which a stay of the same length is safe.
    pub earliest_safe_entry: Option<CalendarDate>,
    /// Longest safe stay beginning on the candidate start date.
    pub max_trip_length: Option<u32>,
    /// Human-readable explanation.
    pub message: String,
}

/// Check whether staying for `candidate` on top of `existing` would
/// exceed the rule's allowance on any day.
///
/// Stops at the first offending day.
pub fn would_violate(
    existing: &[StayRecord],
    rule: &RuleDefinition,
    candidate: DateRange,
) -> PlanningResult {
    let spans = jurisdiction_spans(existing, rule);
    let outcome = simulate(&spans, rule, candidate);

    tracing::debug!(
        jurisdiction = %rule.code,
        candidate = %candidate,
        would_violate = outcome.violation_date.is_some(),
        projected = outcome.days_used,
        "simulated stay"
    );

    let message = describe(rule, candidate, &outcome);
    PlanningResult {
        would_violate: outcome.violation_date.is_some(),
        projected_days_used: outcome.days_used,
        days_allowed: rule.days_allowed,
        violation_date: outcome.violation_date,
        earliest_safe_entry: None,
        max_trip_length: None,
        message,
    }
}

/// First date, from `search_from` onward, on which a stay of
/// `trip_length` days can begin without exceeding the allowance.
///
/// Examines [`SEARCH_HORIZON_DAYS`] start dates; `None` when none is safe.
/// A zero-length stay is trivially safe on `search_from`.
pub fn earliest_safe_entry(
    existing: &[StayRecord],
    rule: &RuleDefinition,
    trip_length: u32,
    search_from: CalendarDate,
) -> Option<CalendarDate> {
    if trip_length == 0 {
        return Some(search_from);
    }
    let spans = jurisdiction_spans(existing, rule);
    for offset in 0..SEARCH_HORIZON_DAYS {
        let start = search_from.add_days(offset as i64);
        let Ok(candidate) = DateRange::starting_at(start, trip_length) else {
            break;
        };
        if simulate(&spans, rule, candidate).violation_date.is_none() {
            tracing::debug!(
                jurisdiction = %rule.code,
                trip_length,
                entry = %start,
                "found safe entry date"
            );
            return Some(start);
        }
    }
    tracing::debug!(
        jurisdiction = %rule.code,
        trip_length,
        search_from = %search_from,
        horizon = SEARCH_HORIZON_DAYS,
        "no safe entry date within search horizon"
    );
    None
}

/// Longest stay, up to `days_allowed`, that can begin on `start` without
/// exceeding the allowance. `0` when even a single day would exceed it.
pub fn max_trip_length(existing: &[StayRecord], rule: &RuleDefinition, start: CalendarDate) -> u32 {
    let spans = jurisdiction_spans(existing, rule);
    let mut longest = 0;
    for length in 1..=rule.days_allowed {
        let Ok(candidate) = DateRange::starting_at(start, length) else {
            break;
        };
        // A longer stay replays every day of a shorter one, so once a
        // length violates, every longer length does too.
        if simulate(&spans, rule, candidate).violation_date.is_some() {
            break;
        }
        longest = length;
    }
    longest
}

/// Full planning answer for a proposed stay.
///
/// Always fills `max_trip_length` for the candidate start date. When the
/// stay would violate, also searches for the earliest safe entry of a
/// stay with the same length, starting from the candidate start date.
pub fn plan_trip(
    existing: &[StayRecord],
    rule: &RuleDefinition,
    candidate: DateRange,
) -> PlanningResult {
    let mut result = would_violate(existing, rule, candidate);
    let longest = max_trip_length(existing, rule, candidate.start());
    result.max_trip_length = Some(longest);

    if result.would_violate {
        let length = candidate.len_days();
        result.earliest_safe_entry =
            earliest_safe_entry(existing, rule, length, candidate.start());
        match result.earliest_safe_entry {
            Some(entry) => result.message.push_str(&format!(
                " Earliest safe entry for a {length}-day stay: {entry}."
            )),
            None => result.message.push_str(&format!(
                " No safe entry for a {length}-day stay within the next {SEARCH_HORIZON_DAYS} days."
            )),
        }
    }
    result.message.push_str(&format!(
        " Longest safe stay starting {}: {longest} days.",
        candidate.start()
    ));
    result
}

struct Simulation {
    days_used: u32,
    violation_date: Option<CalendarDate>,
}

fn simulate(spans: &[DateRange], rule: &RuleDefinition, candidate: DateRange) -> Simulation {
    let mut peak = 0;
    for day in candidate.days() {
        let Some(so_far) = candidate.prefix_through(day) else {
            continue;
        };
        let used = count_spans(
            spans.iter().copied().chain(std::iter::once(so_far)),
            rule,
            day,
        )
        .count();
        if used > rule.days_allowed {
            return Simulation {
                days_used: used,
                violation_date: Some(day),
            };
        }
        peak = peak.max(used);
    }
    Simulation {
        days_used: peak,
        violation_date: None,
    }
}

fn describe(rule: &RuleDefinition, candidate: DateRange, outcome: &Simulation) -> String {
    let length = candidate.len_days();
    match outcome.violation_date {
        Some(date) => format!(
            "A {length}-day stay from {} to {} would exceed the {}-day limit of {} on {date} ({} days counted).",
            candidate.start(),
            candidate.end(),
            rule.days_allowed,
            rule.name,
            outcome.days_used,
        ),
        None => format!(
            "A {length}-day stay from {} to {} stays within the {}-day limit of {} (peak {} days counted).",
            candidate.start(),
            candidate.end(),
            rule.days_allowed,
            rule.name,
            outcome.days_used,
        ),
    }
}
