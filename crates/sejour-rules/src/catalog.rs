//! # Rule Catalog
//!
//! Keyed collection of [`RuleDefinition`]s, built in or loaded from YAML.
//!
//! ## File Format
//!
//! ```yaml
//! rules:
//!   - code: SCHENGEN
//!     name: Schengen Area short stay
//!     days_allowed: 90
//!     window_days: 180
//!     counting_method: rolling
//!   - code: UK_SRT
//!     name: UK statutory residence
//!     days_allowed: 183
//!     counting_method: fiscal_year
//!     fiscal_year_start: { month: 4, day: 6 }
//! ```
//!
//! Every rule is validated on load and codes must be unique within a file.
//! [`RuleCatalog::merge`] lets a user file override built-in rules.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use sejour_core::JurisdictionCode;

use crate::error::{RuleError, RuleResult};
use crate::rule::{RuleDefinition, YearStart};

/// Code of the built-in Schengen rule.
pub const SCHENGEN: &str = "SCHENGEN";
/// Code of the built-in French tax-residency rule.
pub const FR_TAX: &str = "FR_TAX";
/// Code of the built-in UK statutory-residence rule.
pub const UK_SRT: &str = "UK_SRT";

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    rules: Vec<RuleDefinition>,
}

/// Rules indexed by jurisdiction code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCatalog {
    rules: BTreeMap<JurisdictionCode, RuleDefinition>,
}

impl RuleCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules shipped with the engine.
    ///
    /// | Code | Allowance | Method |
    /// |------|-----------|--------|
    /// | `SCHENGEN` | 90 days | rolling 180 |
    /// | `FR_TAX` | 183 days | calendar year |
    /// | `UK_SRT` | 183 days | fiscal year from 6 April |
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let rules = [
            JurisdictionCode::new(SCHENGEN).and_then(|code| {
                RuleDefinition::rolling(code, "Schengen Area short stay", 90, 180)
            }),
            JurisdictionCode::new(FR_TAX).and_then(|code| {
                RuleDefinition::calendar_year(code, "France tax residency", 183)
            }),
            JurisdictionCode::new(UK_SRT).and_then(|code| {
                YearStart::new(4, 6).and_then(|start| {
                    RuleDefinition::fiscal_year(code, "UK statutory residence", 183, start)
                })
            }),
        ];
        for rule in rules.into_iter().flatten() {
            catalog.rules.insert(rule.code.clone(), rule);
        }
        catalog
    }

    /// Parse a YAML catalog.
    pub fn from_yaml_str(yaml: &str) -> RuleResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_rules(file.rules)
    }

    /// Read and parse a YAML catalog file.
    pub fn from_path(path: &Path) -> RuleResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile =
            serde_yaml::from_str(&content).map_err(|source| RuleError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_rules(file.rules)?;
        tracing::info!(
            path = %path.display(),
            rules = catalog.len(),
            "loaded rule catalog"
        );
        Ok(catalog)
    }

    /// Build from a list of rules, rejecting duplicate codes.
    pub fn from_rules(rules: impl IntoIterator<Item = RuleDefinition>) -> RuleResult<Self> {
        let mut catalog = Self::new();
        for rule in rules {
            catalog.insert(rule)?;
        }
        Ok(catalog)
    }

    /// Add a rule, rejecting invalid rules and duplicate codes.
    pub fn insert(&mut self, rule: RuleDefinition) -> RuleResult<()> {
        rule.validate()?;
        if self.rules.contains_key(&rule.code) {
            return Err(RuleError::DuplicateRule {
                code: rule.code.to_string(),
            });
        }
        self.rules.insert(rule.code.clone(), rule);
        Ok(())
    }

    /// Overlay `other` on this catalog; rules in `other` win.
    pub fn merge(mut self, other: RuleCatalog) -> Self {
        for (code, rule) in other.rules {
            if self.rules.contains_key(&code) {
                tracing::debug!(code = %code, "overriding rule");
            }
            self.rules.insert(code, rule);
        }
        self
    }

    /// Look up a rule.
    pub fn get(&self, code: &JurisdictionCode) -> Option<&RuleDefinition> {
        self.rules.get(code)
    }

    /// Look up a rule, failing with `UnknownJurisdiction`.
    pub fn require(&self, code: &JurisdictionCode) -> RuleResult<&RuleDefinition> {
        self.get(code).ok_or_else(|| RuleError::UnknownJurisdiction {
            code: code.to_string(),
        })
    }

    /// Rules in code order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.values()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
