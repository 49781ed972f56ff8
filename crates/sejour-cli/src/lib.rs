//! # sejour-cli — Residency Engine Command-Line Interface
//!
//! Loads a household file and a rule catalog, runs one engine query and
//! prints the result as JSON on stdout. Logs go to stderr.
//!
//! ## Subcommands
//!
//! - `summary`: days used / remaining per jurisdiction
//! - `group`: household overview under one rule
//! - `plan`: would a proposed stay break the rule, and what are the alternatives
//! - `earliest`: earliest safe entry for a stay of given length
//! - `max-length`: longest safe stay from a start date
//! - `rules`: list the active rule catalog
//!
//! ## Crate Policy
//!
//! - Argument parsing and file loading live here; every computation is
//!   delegated to `sejour-engine`.
//! - "Today" is resolved once, through the injected clock, when the
//!   session is opened.

pub mod household;
pub mod plan;
pub mod report;
pub mod rules;
pub mod session;
