//! # Error Types — Input Validation
//!
//! The engine is total over well-formed input. Everything that can be
//! wrong with caller data is rejected here, at construction time, before
//! any day counting happens.

use thiserror::Error;

/// Rejection of malformed caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    #[error("malformed date {input:?}: expected YYYY-MM-DD")]
    MalformedDate {
        /// The offending input.
        input: String,
    },

    /// A date fell outside the supported calendar range.
    #[error("date out of supported range: {detail}")]
    DateOutOfRange {
        /// What overflowed.
        detail: String,
    },

    /// A range ended before it started.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Range start (ISO).
        start: String,
        /// Range end (ISO).
        end: String,
    },

    /// A rule allowed zero days.
    #[error("rule {code}: days_allowed must be greater than zero")]
    NonPositiveAllowance {
        /// Rule code.
        code: String,
    },

    /// A rolling rule had a zero-length window.
    #[error("rule {code}: window_days must be greater than zero for the rolling method")]
    NonPositiveWindow {
        /// Rule code.
        code: String,
    },

    /// Status thresholds were not strictly ordered below the allowance.
    #[error("invalid thresholds: need 0 <= yellow ({yellow}) < red ({red}) < days_allowed ({days_allowed})")]
    InvalidThresholds {
        /// Warning threshold.
        yellow: u32,
        /// Danger threshold.
        red: u32,
        /// Hard limit of the rule.
        days_allowed: u32,
    },

    /// A jurisdiction code was empty or contained unsupported characters.
    #[error("invalid jurisdiction code {input:?}: {reason}")]
    InvalidJurisdictionCode {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A fiscal-year start was not a real month/day.
    #[error("invalid year start {month:02}-{day:02}")]
    InvalidYearStart {
        /// Month (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// A trip length of zero days was requested where a stay is required.
    #[error("trip length must be at least one day")]
    InvalidTripLength,
}
