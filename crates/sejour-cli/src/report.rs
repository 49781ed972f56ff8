//! # Summary and Group Subcommands
//!
//! `sejour summary` prints one `ComplianceSummary` per jurisdiction for a
//! single person; `sejour group` prints the household overview under one
//! rule.

use anyhow::Result;
use clap::Args;

use sejour_core::{Clock, JurisdictionCode};
use sejour_engine::{build_group_overview, build_summary, ComplianceSummary, GroupOverview};
use sejour_rules::{RuleDefinition, Thresholds};

use crate::session::{emit, Session, SessionArgs};

/// Arguments for the summary subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Only this jurisdiction. Defaults to every rule in the catalog.
    #[arg(long, short = 'j')]
    pub jurisdiction: Option<JurisdictionCode>,

    /// Household member to report on. Defaults to the primary person.
    #[arg(long)]
    pub person: Option<String>,
}

/// Arguments for the group subcommand.
#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Jurisdiction to evaluate everyone under.
    #[arg(long, short = 'j')]
    pub jurisdiction: JurisdictionCode,
}

/// Execute the summary subcommand.
pub fn run_summary(args: &SummaryArgs, clock: &dyn Clock) -> Result<u8> {
    let session = Session::open(&args.session, clock)?;
    let summaries = summaries(&session, args.jurisdiction.as_ref(), args.person.as_deref())?;
    emit(&summaries)?;
    Ok(0)
}

/// Execute the group subcommand.
pub fn run_group(args: &GroupArgs, clock: &dyn Clock) -> Result<u8> {
    let session = Session::open(&args.session, clock)?;
    let overview = group(&session, &args.jurisdiction)?;
    emit(&overview)?;
    Ok(0)
}

/// Summaries for one person, in jurisdiction-code order.
pub fn summaries(
    session: &Session,
    jurisdiction: Option<&JurisdictionCode>,
    person: Option<&str>,
) -> Result<Vec<ComplianceSummary>> {
    let member = session.household.person(person)?;
    let rules = match jurisdiction {
        Some(code) => vec![session.rule(code)?],
        None => session.catalog.iter().collect(),
    };

    // Fail before computing anything if the user's thresholds misfit a rule.
    let resolved = rules
        .into_iter()
        .map(|rule| Ok((rule, session.thresholds_for(rule)?)))
        .collect::<Result<Vec<(&RuleDefinition, Thresholds)>>>()?;

    Ok(resolved
        .iter()
        .map(|(rule, thresholds)| {
            build_summary(&member.stays, rule, thresholds, session.reference)
        })
        .collect())
}

/// Household overview under one rule.
pub fn group(session: &Session, jurisdiction: &JurisdictionCode) -> Result<GroupOverview> {
    let rule = session.rule(jurisdiction)?;
    let thresholds = session.thresholds_for(rule)?;
    Ok(build_group_overview(
        &session.household.primary,
        &session.household.members,
        rule,
        &thresholds,
        session.reference,
    ))
}
