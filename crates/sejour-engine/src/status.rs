//! # Status Classifier
//!
//! Maps a days-used count to a compliance level. Total over any inputs;
//! threshold validation happens where thresholds are configured.

use serde::{Deserialize, Serialize};

use sejour_rules::Thresholds;

/// Compliance level, ordered from safest to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Below the warning threshold.
    Safe,
    /// At or above the warning threshold.
    Warning,
    /// At or above the danger threshold.
    Danger,
    /// At or above the hard limit.
    Critical,
}

impl ComplianceStatus {
    /// Danger or critical.
    pub fn is_at_risk(&self) -> bool {
        matches!(self, Self::Danger | Self::Critical)
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Classify `days_used` against the hard limit and the thresholds.
pub fn classify(days_used: u32, days_allowed: u32, thresholds: &Thresholds) -> ComplianceStatus {
    if days_used >= days_allowed {
        ComplianceStatus::Critical
    } else if days_used >= thresholds.red {
        ComplianceStatus::Danger
    } else if days_used >= thresholds.yellow {
        ComplianceStatus::Warning
    } else {
        ComplianceStatus::Safe
    }
}
