//! # Session
//!
//! Everything a subcommand needs before it can call the engine: the
//! household, the merged rule catalog, the reference date and the
//! thresholds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use sejour_core::{CalendarDate, Clock, JurisdictionCode};
use sejour_rules::{RuleCatalog, RuleDefinition, Thresholds};

use crate::household::HouseholdFile;

/// Arguments shared by every engine query.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Household file (YAML, or JSON by `.json` extension).
    #[arg(long, short = 'f')]
    pub household: PathBuf,

    /// Extra rule catalog (YAML) overriding the built-in rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD). Defaults to today in UTC.
    #[arg(long)]
    pub on: Option<CalendarDate>,

    /// Warning threshold in days, overriding the household file.
    #[arg(long, requires = "red")]
    pub yellow: Option<u32>,

    /// Danger threshold in days, overriding the household file.
    #[arg(long, requires = "yellow")]
    pub red: Option<u32>,
}

/// Loaded inputs for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Session {
    /// The household being queried.
    pub household: HouseholdFile,
    /// Built-in rules merged with the user's catalog.
    pub catalog: RuleCatalog,
    /// The date all queries are evaluated on.
    pub reference: CalendarDate,
    thresholds: Option<Thresholds>,
}

impl Session {
    /// Load the household and catalog and resolve the reference date.
    pub fn open(args: &SessionArgs, clock: &dyn Clock) -> Result<Self> {
        let household = HouseholdFile::load(&args.household)?;
        let catalog = load_catalog(args.rules.as_deref())?;
        let reference = args.on.unwrap_or_else(|| clock.today());
        let thresholds = match (args.yellow, args.red) {
            (Some(yellow), Some(red)) => Some(Thresholds { yellow, red }),
            _ => household.thresholds,
        };

        tracing::debug!(reference = %reference, rules = catalog.len(), "session opened");
        Ok(Self::new(household, catalog, reference, thresholds))
    }

    /// Assemble a session from already loaded parts.
    pub fn new(
        household: HouseholdFile,
        catalog: RuleCatalog,
        reference: CalendarDate,
        thresholds: Option<Thresholds>,
    ) -> Self {
        Self {
            household,
            catalog,
            reference,
            thresholds,
        }
    }

    /// The rule for `code`.
    pub fn rule(&self, code: &JurisdictionCode) -> Result<&RuleDefinition> {
        Ok(self.catalog.require(code)?)
    }

    /// Thresholds to apply under `rule`: the user's, validated against
    /// the rule's allowance, or defaults scaled to it.
    pub fn thresholds_for(&self, rule: &RuleDefinition) -> Result<Thresholds> {
        match self.thresholds {
            Some(thresholds) => {
                thresholds
                    .validate_for(rule.days_allowed)
                    .with_context(|| format!("thresholds do not fit rule {}", rule.code))?;
                Ok(thresholds)
            }
            None => Ok(Thresholds::scaled_for(rule.days_allowed)),
        }
    }
}

/// Built-in rules, overlaid with the catalog at `path` when given.
pub(crate) fn load_catalog(path: Option<&std::path::Path>) -> Result<RuleCatalog> {
    let builtin = RuleCatalog::builtin();
    match path {
        Some(path) => Ok(builtin.merge(RuleCatalog::from_path(path)?)),
        None => Ok(builtin),
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn emit<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
