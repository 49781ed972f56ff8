//! # Rules Subcommand
//!
//! Prints the active rule catalog: the built-in rules, overlaid with a
//! user catalog when `--rules` is given.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use sejour_rules::RuleDefinition;

use crate::session::{emit, load_catalog};

/// Arguments for the rules subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Extra rule catalog (YAML) overriding the built-in rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

/// Execute the rules subcommand.
pub fn run_rules(args: &RulesArgs) -> Result<u8> {
    let rules = active_rules(args)?;
    emit(&rules)?;
    Ok(0)
}

/// The merged catalog as a list, in code order.
pub fn active_rules(args: &RulesArgs) -> Result<Vec<RuleDefinition>> {
    let catalog = load_catalog(args.rules.as_deref())?;
    Ok(catalog.iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_only() {
        let rules = active_rules(&RulesArgs { rules: None }).unwrap();
        let codes: Vec<_> = rules.iter().map(|r| r.code.to_string()).collect();
        assert_eq!(codes, vec!["FR_TAX", "SCHENGEN", "UK_SRT"]);
    }

    #[test]
    fn test_user_catalog_adds_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(
            &path,
            "rules:\n  - { code: SCHENGEN, name: Schengen (strict), days_allowed: 80, window_days: 180, counting_method: rolling }\n  - { code: CY, name: Cyprus, days_allowed: 90, window_days: 180, counting_method: rolling }\n",
        )
        .unwrap();
        let rules = active_rules(&RulesArgs { rules: Some(path) }).unwrap();
        assert_eq!(rules.len(), 4);
        let schengen = rules.iter().find(|r| r.code.as_str() == "SCHENGEN").unwrap();
        assert_eq!(schengen.days_allowed, 80);
    }

    #[test]
    fn test_missing_user_catalog_is_an_error() {
        let args = RulesArgs {
            rules: Some(PathBuf::from("/nonexistent/rules.yaml")),
        };
        assert!(active_rules(&args).is_err());
    }
}
