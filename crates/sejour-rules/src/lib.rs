//! # sejour-rules — Jurisdiction Rules
//!
//! Static parameters of each residency regime the engine can count:
//!
//! - **Rule** (`rule.rs`): `RuleDefinition` (allowance, window length and
//!   counting method) and the counting window it implies for a given
//!   reference date.
//!
//! - **Thresholds** (`thresholds.rs`): per-user warning/danger levels used
//!   by the status classifier.
//!
//! - **Catalog** (`catalog.rs`): the built-in rule set and YAML loading of
//!   user-supplied rule files.
//!
//! ## Crate Policy
//!
//! - Depends only on `sejour-core` internally.
//! - Rules are configuration: loaded once, validated on load, never
//!   mutated by the engine.

pub mod catalog;
pub mod error;
pub mod rule;
pub mod thresholds;

pub use catalog::RuleCatalog;
pub use error::{RuleError, RuleResult};
pub use rule::{CountingMethod, RuleDefinition, YearStart};
pub use thresholds::Thresholds;
