//! # Household Files
//!
//! The traveller data the CLI reads: the primary person's stays, optional
//! status thresholds, and tracked family members.
//!
//! ```yaml
//! primary:
//!   display_name: Camille
//!   stays:
//!     - { start: 2026-06-01, end: 2026-06-14, jurisdiction: SCHENGEN }
//!     - { start: 2026-06-01, end: 2026-06-14, jurisdiction: FR_TAX, category: business }
//! thresholds: { yellow: 60, red: 80 }
//! members:
//!   - display_name: Sam
//!     stays: []
//! ```
//!
//! Files ending in `.json` are parsed as JSON, everything else as YAML.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use sejour_engine::HouseholdMember;
use sejour_rules::Thresholds;

/// Contents of a household file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdFile {
    /// The account holder.
    pub primary: HouseholdMember,
    /// Status thresholds chosen by the account holder.
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
    /// Tracked family members.
    #[serde(default)]
    pub members: Vec<HouseholdMember>,
}

impl HouseholdFile {
    /// Read a household file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read household file {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let household = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
        .with_context(|| format!("invalid household file {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            stays = household.primary.stays.len(),
            members = household.members.len(),
            "loaded household"
        );
        Ok(household)
    }

    /// Parse YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The primary person, or the member with the given display name
    /// (case-insensitive).
    pub fn person(&self, name: Option<&str>) -> Result<&HouseholdMember> {
        let Some(name) = name else {
            return Ok(&self.primary);
        };
        let found = std::iter::once(&self.primary)
            .chain(self.members.iter())
            .find(|m| m.display_name.eq_ignore_ascii_case(name));
        match found {
            Some(member) => Ok(member),
            None => bail!("no person named {name:?} in household"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
primary:
  display_name: Camille
  stays:
    - { start: 2026-06-01, end: 2026-06-14, jurisdiction: schengen }
thresholds: { yellow: 50, red: 70 }
members:
  - display_name: Sam
    stays:
      - { start: 2026-07-01, end: 2026-07-03, jurisdiction: SCHENGEN, category: business }
"#;

    #[test]
    fn test_parses_yaml_household() {
        let household = HouseholdFile::from_yaml_str(YAML).unwrap();
        assert_eq!(household.primary.stays.len(), 1);
        assert_eq!(household.thresholds, Some(Thresholds { yellow: 50, red: 70 }));
        assert_eq!(household.members[0].display_name, "Sam");
    }

    #[test]
    fn test_rejects_inverted_stay() {
        let yaml = "primary:\n  display_name: A\n  stays:\n    - { start: 2026-06-14, end: 2026-06-01, jurisdiction: SCHENGEN }\n";
        assert!(HouseholdFile::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_selects_person_by_name() {
        let household = HouseholdFile::from_yaml_str(YAML).unwrap();
        assert_eq!(household.person(None).unwrap().display_name, "Camille");
        assert_eq!(household.person(Some("sam")).unwrap().display_name, "Sam");
        assert!(household.person(Some("Lou")).is_err());
    }

    #[test]
    fn test_loads_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("household.json");
        std::fs::write(
            &path,
            r#"{"primary":{"display_name":"Camille","stays":[{"start":"2026-06-01","end":"2026-06-02","jurisdiction":"SCHENGEN"}]}}"#,
        )
        .unwrap();
        let household = HouseholdFile::load(&path).unwrap();
        assert_eq!(household.primary.stays.len(), 1);
        assert!(household.members.is_empty());
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = HouseholdFile::load(Path::new("/nonexistent/household.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/household.yaml"));
    }
}
