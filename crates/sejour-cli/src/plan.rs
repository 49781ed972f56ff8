//! # Planning Subcommands
//!
//! What-if queries against one person's history:
//!
//! ```bash
//! # Would a stay from 1 to 30 November break the Schengen rule?
//! sejour plan -f household.yaml -j SCHENGEN --start 2026-11-01 --end 2026-11-30
//!
//! # When can I next spend three weeks in the Schengen area?
//! sejour earliest -f household.yaml -j SCHENGEN --length 21
//!
//! # How long can I stay if I enter on 1 December?
//! sejour max-length -f household.yaml -j SCHENGEN --start 2026-12-01
//! ```
//!
//! `plan` exits with status 2 when the stay would break the rule.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use sejour_core::{CalendarDate, Clock, DateRange, JurisdictionCode};
use sejour_engine::{earliest_safe_entry, max_trip_length, plan_trip, PlanningResult};

use crate::session::{emit, Session, SessionArgs};

/// Arguments for the plan subcommand.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Jurisdiction of the proposed stay.
    #[arg(long, short = 'j')]
    pub jurisdiction: JurisdictionCode,

    /// First day of the proposed stay.
    #[arg(long)]
    pub start: CalendarDate,

    /// Last day of the proposed stay (inclusive).
    #[arg(long)]
    pub end: CalendarDate,

    /// Household member travelling. Defaults to the primary person.
    #[arg(long)]
    pub person: Option<String>,
}

/// Arguments for the earliest subcommand.
#[derive(Args, Debug)]
pub struct EarliestArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Jurisdiction of the proposed stay.
    #[arg(long, short = 'j')]
    pub jurisdiction: JurisdictionCode,

    /// Length of the proposed stay in days.
    #[arg(long)]
    pub length: u32,

    /// First candidate start date. Defaults to the reference date.
    #[arg(long)]
    pub from: Option<CalendarDate>,

    /// Household member travelling. Defaults to the primary person.
    #[arg(long)]
    pub person: Option<String>,
}

/// Arguments for the max-length subcommand.
#[derive(Args, Debug)]
pub struct MaxLengthArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Jurisdiction of the proposed stay.
    #[arg(long, short = 'j')]
    pub jurisdiction: JurisdictionCode,

    /// Entry date. Defaults to the reference date.
    #[arg(long)]
    pub start: Option<CalendarDate>,

    /// Household member travelling. Defaults to the primary person.
    #[arg(long)]
    pub person: Option<String>,
}

/// Answer to `sejour earliest`.
#[derive(Debug, Serialize)]
pub struct EntryAnswer {
    /// Jurisdiction of the proposed stay.
    pub jurisdiction: JurisdictionCode,
    /// Requested stay length in days.
    pub trip_length: u32,
    /// First candidate start date examined.
    pub search_from: CalendarDate,
    /// First safe start date, `None` when the search horizon has no safe date.
    pub earliest_safe_entry: Option<CalendarDate>,
}

/// Answer to `sejour max-length`.
#[derive(Debug, Serialize)]
pub struct LengthAnswer {
    /// Jurisdiction of the proposed stay.
    pub jurisdiction: JurisdictionCode,
    /// Entry date.
    pub start: CalendarDate,
    /// Longest safe stay in days; `0` when entry on `start` is already unsafe.
    pub max_trip_length: u32,
}

/// Execute the plan subcommand.
pub fn run_plan(args: &PlanArgs, clock: &dyn Clock) -> Result<u8> {
    let session = Session::open(&args.session, clock)?;
    let candidate = DateRange::new(args.start, args.end)?;
    let result = plan(&session, &args.jurisdiction, candidate, args.person.as_deref())?;
    emit(&result)?;
    Ok(if result.would_violate { 2 } else { 0 })
}

/// Execute the earliest subcommand.
pub fn run_earliest(args: &EarliestArgs, clock: &dyn Clock) -> Result<u8> {
    let session = Session::open(&args.session, clock)?;
    let from = args.from.unwrap_or(session.reference);
    let answer = earliest(
        &session,
        &args.jurisdiction,
        args.length,
        from,
        args.person.as_deref(),
    )?;
    emit(&answer)?;
    Ok(0)
}

/// Execute the max-length subcommand.
pub fn run_max_length(args: &MaxLengthArgs, clock: &dyn Clock) -> Result<u8> {
    let session = Session::open(&args.session, clock)?;
    let start = args.start.unwrap_or(session.reference);
    let answer = max_length(&session, &args.jurisdiction, start, args.person.as_deref())?;
    emit(&answer)?;
    Ok(0)
}

/// Full planning answer for a proposed stay.
pub fn plan(
    session: &Session,
    jurisdiction: &JurisdictionCode,
    candidate: DateRange,
    person: Option<&str>,
) -> Result<PlanningResult> {
    let rule = session.rule(jurisdiction)?;
    let member = session.household.person(person)?;
    Ok(plan_trip(&member.stays, rule, candidate))
}

/// Earliest safe start for a stay of `length` days.
pub fn earliest(
    session: &Session,
    jurisdiction: &JurisdictionCode,
    length: u32,
    from: CalendarDate,
    person: Option<&str>,
) -> Result<EntryAnswer> {
    let rule = session.rule(jurisdiction)?;
    let member = session.household.person(person)?;
    Ok(EntryAnswer {
        jurisdiction: rule.code.clone(),
        trip_length: length,
        search_from: from,
        earliest_safe_entry: earliest_safe_entry(&member.stays, rule, length, from),
    })
}

/// Longest safe stay from `start`.
pub fn max_length(
    session: &Session,
    jurisdiction: &JurisdictionCode,
    start: CalendarDate,
    person: Option<&str>,
) -> Result<LengthAnswer> {
    let rule = session.rule(jurisdiction)?;
    let member = session.household.person(person)?;
    Ok(LengthAnswer {
        jurisdiction: rule.code.clone(),
        start,
        max_trip_length: max_trip_length(&member.stays, rule, start),
    })
}
