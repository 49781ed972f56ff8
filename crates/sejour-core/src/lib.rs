//! # sejour-core — Foundational Types for Residency Day Accounting
//!
//! Leaf crate of the sejour workspace. It defines the primitives every
//! other crate builds on: calendar dates, inclusive date ranges, the
//! injected clock, identifier newtypes, and the stay record itself.
//!
//! ## Key Design Principles
//!
//! 1. **Epoch-day dates.** `CalendarDate` is a day count since 1970-01-01.
//!    All comparisons and arithmetic are integer operations; ISO strings
//!    exist only at the serialization boundary.
//!
//! 2. **Validated constructors.** `DateRange`, `JurisdictionCode` and
//!    `StayRecord` cannot be built in a state that violates their
//!    invariants. Deserialization goes through the same checks.
//!
//! 3. **Explicit clock.** Nothing in the workspace reads the wall clock
//!    except [`SystemClock`]; every computation takes its reference date
//!    as a parameter.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sejour-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod stay;
pub mod temporal;

pub use error::ValidationError;
pub use identity::{JurisdictionCode, PersonId, StayId};
pub use stay::{StayCategory, StayRecord};
pub use temporal::{CalendarDate, Clock, DateRange, FixedClock, SystemClock};
