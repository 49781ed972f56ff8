//! # sejour-engine — Day Accounting & Compliance Simulation
//!
//! Pure, synchronous computation over stay records and jurisdiction rules:
//!
//! - **Accountant** (`accountant.rs`): the set of distinct calendar days
//!   counted as present inside a rule's window on a reference date.
//!
//! - **Status** (`status.rs`): maps days used to safe / warning / danger /
//!   critical.
//!
//! - **Expiration** (`expiration.rs`): the next date on which a counted day
//!   rolls out of a rolling window.
//!
//! - **Simulator** (`simulator.rs`): what-if evaluation of a proposed trip,
//!   earliest safe entry date, longest safe stay.
//!
//! - **Summary** (`summary.rs`, `group.rs`): per-jurisdiction reporting and
//!   the household overview.
//!
//! ```text
//! RuleDefinition + [StayRecord]
//!         │
//!         ▼
//!    covered_days ──▶ classify ─────────┐
//!         │                             ├──▶ ComplianceSummary ──▶ GroupOverview
//!         └────────▶ next_expiration ───┘
//!
//!    would_violate ──▶ covered_days (once per day of the candidate trip)
//! ```
//!
//! ## Invariants
//!
//! - No operation reads the clock. The reference date is always a
//!   parameter.
//! - No operation mutates or retains its inputs; every call allocates
//!   only transient sets, so summaries for different people or
//!   jurisdictions can run in parallel without coordination.
//! - Searches are bounded ([`SEARCH_HORIZON_DAYS`] start dates,
//!   `days_allowed` trip lengths) and always terminate.
//! - "Not found" outcomes are `None`, never errors.

pub mod accountant;
pub mod expiration;
pub mod group;
pub mod simulator;
pub mod status;
pub mod summary;

pub use accountant::{covered_days, covered_days_by_jurisdiction, days_used, DaySet};
pub use expiration::{days_until_next_expiration, next_expiration};
pub use group::{build_group_overview, GroupOverview, HouseholdMember, PersonSummary};
pub use simulator::{
    earliest_safe_entry, max_trip_length, plan_trip, would_violate, PlanningResult,
    SEARCH_HORIZON_DAYS,
};
pub use status::{classify, ComplianceStatus};
pub use summary::{build_summaries, build_summary, ComplianceSummary};
