//! # End-to-End Day-Accounting Properties
//!
//! Exercises the public engine API the way the member portal uses it:
//! stay records in, summaries and planning answers out. Every scenario is
//! pinned to a fixed clock so results never depend on the day the suite
//! runs.

use sejour_core::{CalendarDate, Clock, DateRange, FixedClock, JurisdictionCode, StayRecord};
use sejour_engine::{
    build_summary, classify, covered_days, days_used, earliest_safe_entry, max_trip_length,
    next_expiration, plan_trip, would_violate, ComplianceStatus,
};
use sejour_rules::{catalog, RuleCatalog, RuleDefinition, Thresholds};

fn clock() -> FixedClock {
    FixedClock(CalendarDate::parse("2026-10-19").expect("valid date"))
}

fn rule(code: &str) -> RuleDefinition {
    RuleCatalog::builtin()
        .require(&JurisdictionCode::new(code).expect("valid code"))
        .expect("builtin rule")
        .clone()
}

/// Stay from `from` to `to` days relative to today.
fn stay(from: i64, to: i64, code: &str) -> StayRecord {
    let today = clock().today();
    StayRecord::new(
        today.add_days(from),
        today.add_days(to),
        JurisdictionCode::new(code).expect("valid code"),
    )
    .expect("valid stay")
}

// ---- day accountant ----

#[test]
fn seven_day_trip_counts_seven() {
    let records = [stay(-9, -3, catalog::SCHENGEN)];
    assert_eq!(days_used(&records, &rule(catalog::SCHENGEN), clock().today()), 7);
}

#[test]
fn overlapping_trips_collapse() {
    let records = [stay(-40, -30, catalog::SCHENGEN), stay(-32, -25, catalog::SCHENGEN)];
    assert_eq!(days_used(&records, &rule(catalog::SCHENGEN), clock().today()), 16);
}

#[test]
fn trip_straddling_window_start_is_clipped() {
    let records = [stay(-200, -170, catalog::SCHENGEN)];
    assert_eq!(days_used(&records, &rule(catalog::SCHENGEN), clock().today()), 10);
}

#[test]
fn window_edge_contributes_zero_or_one() {
    let schengen = rule(catalog::SCHENGEN);
    let today = clock().today();
    assert_eq!(days_used(&[stay(-185, -180, catalog::SCHENGEN)], &schengen, today), 0);
    assert_eq!(days_used(&[stay(-185, -179, catalog::SCHENGEN)], &schengen, today), 1);
}

#[test]
fn jurisdictions_count_independently_but_collapse_within() {
    let today = clock().today();
    let records = [
        stay(-20, -11, catalog::SCHENGEN),
        stay(-20, -11, catalog::FR_TAX),
        stay(-15, -11, catalog::SCHENGEN),
    ];
    // The same ten days count once for each jurisdiction ...
    assert_eq!(days_used(&records, &rule(catalog::SCHENGEN), today), 10);
    assert_eq!(days_used(&records, &rule(catalog::FR_TAX), today), 10);
    // ... and the overlapping Schengen record adds nothing.
    let days = covered_days(&records, &rule(catalog::SCHENGEN), today);
    assert_eq!(days.earliest(), Some(today.add_days(-20)));
}

// ---- classifier & expiration ----

#[test]
fn classifier_reference_points() {
    let t = Thresholds { yellow: 60, red: 80 };
    assert_eq!(classify(90, 90, &t), ComplianceStatus::Critical);
    assert_eq!(classify(89, 90, &t), ComplianceStatus::Danger);
    assert_eq!(classify(59, 90, &t), ComplianceStatus::Safe);
}

#[test]
fn expiration_follows_oldest_day() {
    let schengen = rule(catalog::SCHENGEN);
    let today = clock().today();
    let records = [stay(-100, -95, catalog::SCHENGEN), stay(-10, -5, catalog::SCHENGEN)];
    let covered = covered_days(&records, &schengen, today);
    assert_eq!(next_expiration(&covered, &schengen), Some(today.add_days(80)));
}

// ---- simulator ----

#[test]
fn empty_history_never_violates_within_allowance() {
    let schengen = rule(catalog::SCHENGEN);
    let today = clock().today();
    for length in [1, 45, 90] {
        let candidate = DateRange::starting_at(today, length).expect("valid range");
        let result = would_violate(&[], &schengen, candidate);
        assert!(!result.would_violate);
        assert_eq!(result.projected_days_used, length);
    }
}

#[test]
fn max_trip_length_extremes() {
    let schengen = rule(catalog::SCHENGEN);
    let today = clock().today();
    assert_eq!(max_trip_length(&[], &schengen, today), 90);
    assert_eq!(max_trip_length(&[stay(-90, -1, catalog::SCHENGEN)], &schengen, today), 0);
}

#[test]
fn earliest_entry_without_history_is_search_start() {
    let today = clock().today();
    assert_eq!(
        earliest_safe_entry(&[], &rule(catalog::SCHENGEN), 30, today),
        Some(today)
    );
}

#[test]
fn planning_a_blocked_trip_suggests_alternatives() {
    let schengen = rule(catalog::SCHENGEN);
    let today = clock().today();
    let history = [stay(-120, -51, catalog::SCHENGEN)];
    let candidate = DateRange::starting_at(today.add_days(7), 30).expect("valid range");

    let result = plan_trip(&history, &schengen, candidate);
    assert!(result.would_violate);
    assert!(result.projected_days_used > result.days_allowed);

    let entry = result.earliest_safe_entry.expect("entry within a year");
    let safe = DateRange::starting_at(entry, 30).expect("valid range");
    assert!(!would_violate(&history, &schengen, safe).would_violate);

    let longest = result.max_trip_length.expect("always filled");
    assert_eq!(longest, 20);
}

// ---- summary ----

#[test]
fn summary_respects_invariants() {
    let schengen = rule(catalog::SCHENGEN);
    let today = clock().today();
    let records = [stay(-60, -1, catalog::SCHENGEN), stay(-30, 5, catalog::SCHENGEN)];
    let summary = build_summary(&records, &schengen, &Thresholds::default(), today);
    assert_eq!(summary.days_used, 61);
    assert_eq!(summary.days_remaining, 29);
    assert_eq!(summary.window_end, today);
    assert_eq!(summary.status, ComplianceStatus::Warning);
}

#[test]
fn fiscal_year_summary_resets_on_sixth_of_april() {
    let uk = rule(catalog::UK_SRT);
    let records =
        [StayRecord::parse("2026-03-20", "2026-04-20", catalog::UK_SRT).expect("valid stay")];
    let t = Thresholds::scaled_for(uk.days_allowed);
    let day = |s: &str| CalendarDate::parse(s).expect("valid date");

    let before = build_summary(&records, &uk, &t, day("2026-04-05"));
    assert_eq!(before.days_used, 17);
    assert_eq!(before.window_start, day("2025-04-06"));
    assert_eq!(before.period_end, Some(day("2026-04-05")));

    let after = build_summary(&records, &uk, &t, day("2026-04-20"));
    assert_eq!(after.days_used, 15);
    assert_eq!(after.days_remaining, 168);
    assert_eq!(after.window_start, day("2026-04-06"));
    assert_eq!(after.period_end, Some(day("2027-04-05")));
    assert_eq!(after.next_expiration, None);
    assert_eq!(after.status, ComplianceStatus::Safe);
}
