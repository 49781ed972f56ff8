//! # Summary Builder
//!
//! One reporting structure per (person, jurisdiction) combining the day
//! count, status and next expiration.

use serde::{Deserialize, Serialize};

use sejour_core::{CalendarDate, JurisdictionCode, StayRecord};
use sejour_rules::{CountingMethod, RuleDefinition, Thresholds};

use crate::accountant::covered_days;
use crate::expiration::next_expiration;
use crate::status::{classify, ComplianceStatus};

/// Compliance position in one jurisdiction on a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Jurisdiction the summary is for.
    pub jurisdiction: JurisdictionCode,
    /// Counting method of the rule.
    pub counting_method: CountingMethod,
    /// The rule's allowance.
    pub days_allowed: u32,
    /// Distinct days counted in the window.
    pub days_used: u32,
    /// `max(0, days_allowed - days_used)`.
    pub days_remaining: u32,
    /// First day of the counting window.
    pub window_start: CalendarDate,
    /// Last day of the counting window (the reference date).
    pub window_end: CalendarDate,
    /// Last day before usage resets, for calendar and fiscal years.
    pub period_end: Option<CalendarDate>,
    /// Compliance level.
    pub status: ComplianceStatus,
    /// When the oldest counted day stops counting (rolling rules only).
    pub next_expiration: Option<CalendarDate>,
}

/// Summarize `records` under `rule` as of `reference`.
pub fn build_summary(
    records: &[StayRecord],
    rule: &RuleDefinition,
    thresholds: &Thresholds,
    reference: CalendarDate,
) -> ComplianceSummary {
    let window = rule.counting_window(reference);
    let covered = covered_days(records, rule, reference);
    let days_used = covered.count();
    let status = classify(days_used, rule.days_allowed, thresholds);

    tracing::debug!(
        jurisdiction = %rule.code,
        reference = %reference,
        days_used,
        status = %status,
        "built compliance summary"
    );

    ComplianceSummary {
        jurisdiction: rule.code.clone(),
        counting_method: rule.counting_method,
        days_allowed: rule.days_allowed,
        days_used,
        days_remaining: rule.days_allowed.saturating_sub(days_used),
        window_start: window.start(),
        window_end: window.end(),
        period_end: rule.period_end(reference),
        status,
        next_expiration: next_expiration(&covered, rule),
    }
}

/// One summary per rule, in the order the rules are given.
///
/// `thresholds_for` picks the thresholds to apply to each rule, so callers
/// can combine user settings for one jurisdiction with scaled defaults for
/// the others.
pub fn build_summaries<'a, R, F>(
    records: &[StayRecord],
    rules: R,
    thresholds_for: F,
    reference: CalendarDate,
) -> Vec<ComplianceSummary>
where
    R: IntoIterator<Item = &'a RuleDefinition>,
    F: Fn(&RuleDefinition) -> Thresholds,
{
    rules
        .into_iter()
        .map(|rule| build_summary(records, rule, &thresholds_for(rule), reference))
        .collect()
}
