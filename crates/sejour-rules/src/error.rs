//! Rule-specific error types.
//!
//! Structured errors for rule validation and catalog loading. File-level
//! errors carry the path so a bad rules file is easy to locate.

use std::path::PathBuf;

use thiserror::Error;

use sejour_core::ValidationError;

/// Errors that can occur while building or loading rules.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rule or threshold failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// YAML parsing of a rules file failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading a rules file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Two rules in one catalog share a code.
    #[error("duplicate rule for jurisdiction {code}")]
    DuplicateRule { code: String },

    /// No rule is defined for the requested jurisdiction.
    #[error("no rule defined for jurisdiction {code}")]
    UnknownJurisdiction { code: String },
}

/// Result type alias for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;
