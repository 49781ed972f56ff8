//! # Household Overview
//!
//! Runs the per-person summary for the primary user and every tracked
//! family member. Each person's days are counted from their own records
//! only; nothing is shared across people.

use serde::{Deserialize, Serialize};

use sejour_core::{CalendarDate, PersonId, StayRecord};
use sejour_rules::{RuleDefinition, Thresholds};

use crate::status::ComplianceStatus;
use crate::summary::{build_summary, ComplianceSummary};

/// A person whose stays are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
    /// Person identifier.
    #[serde(default)]
    pub person: PersonId,
    /// Name shown in the overview.
    pub display_name: String,
    /// The person's own stays.
    #[serde(default)]
    pub stays: Vec<StayRecord>,
}

/// One person's summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    /// Person identifier.
    pub person: PersonId,
    /// Name shown in the overview.
    pub display_name: String,
    /// The person's position under the rule.
    pub summary: ComplianceSummary,
}

/// Summaries for a whole household under one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOverview {
    /// The account holder.
    pub primary: PersonSummary,
    /// Family members, in the order given.
    pub members: Vec<PersonSummary>,
    /// Most severe status across everyone.
    pub highest_status: ComplianceStatus,
    /// People (primary included) at danger or critical.
    pub members_at_risk: usize,
}

impl GroupOverview {
    /// Primary first, then members.
    pub fn everyone(&self) -> impl Iterator<Item = &PersonSummary> {
        std::iter::once(&self.primary).chain(self.members.iter())
    }
}

/// Build the household overview for `rule` as of `reference`.
pub fn build_group_overview(
    primary: &HouseholdMember,
    members: &[HouseholdMember],
    rule: &RuleDefinition,
    thresholds: &Thresholds,
    reference: CalendarDate,
) -> GroupOverview {
    let summarize = |member: &HouseholdMember| PersonSummary {
        person: member.person,
        display_name: member.display_name.clone(),
        summary: build_summary(&member.stays, rule, thresholds, reference),
    };

    let primary = summarize(primary);
    let members: Vec<PersonSummary> = members.iter().map(summarize).collect();

    let statuses = std::iter::once(&primary)
        .chain(members.iter())
        .map(|p| p.summary.status);
    let highest_status = statuses.clone().max().unwrap_or(ComplianceStatus::Safe);
    let members_at_risk = statuses.filter(ComplianceStatus::is_at_risk).count();

    tracing::debug!(
        jurisdiction = %rule.code,
        people = members.len() + 1,
        highest_status = %highest_status,
        members_at_risk,
        "built group overview"
    );

    GroupOverview {
        primary,
        members,
        highest_status,
        members_at_risk,
    }
}
