//! # Status Thresholds
//!
//! Per-user warning levels for the status classifier. Defaults are
//! calibrated for the 90-day Schengen allowance (yellow 60, red 80).
//! Validation is the caller's job: [`Thresholds::new`] checks
//! `0 <= yellow < red < days_allowed`, the classifier itself accepts any
//! values.

use serde::{Deserialize, Serialize};

use sejour_core::ValidationError;

/// Days-used levels at which the status escalates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Thresholds {
    /// Warning from this many days used.
    pub yellow: u32,
    /// Danger from this many days used.
    pub red: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { yellow: 60, red: 80 }
    }
}

impl Thresholds {
    /// Build thresholds validated against a rule's allowance.
    pub fn new(yellow: u32, red: u32, days_allowed: u32) -> Result<Self, ValidationError> {
        let thresholds = Self { yellow, red };
        thresholds.validate_for(days_allowed)?;
        Ok(thresholds)
    }

    /// Check `yellow < red < days_allowed`.
    pub fn validate_for(&self, days_allowed: u32) -> Result<(), ValidationError> {
        if self.yellow < self.red && self.red < days_allowed {
            Ok(())
        } else {
            Err(ValidationError::InvalidThresholds {
                yellow: self.yellow,
                red: self.red,
                days_allowed,
            })
        }
    }

    /// Defaults for an arbitrary allowance, keeping the 60/90 and 80/90
    /// ratios of the Schengen defaults.
    ///
    /// Strictly ordered below `days_allowed` whenever the allowance is at
    /// least 3 days.
    pub fn scaled_for(days_allowed: u32) -> Self {
        let allowed = days_allowed as u64;
        let red = (allowed * 80 / 90).min(allowed.saturating_sub(1)) as u32;
        let yellow = (allowed * 60 / 90).min(red.saturating_sub(1) as u64) as u32;
        Self { yellow, red }
    }
}
