//! # Rule Definitions
//!
//! A `RuleDefinition` is the (allowance, window, counting method) tuple of
//! one residency regime. The rule alone decides which calendar days are
//! eligible to count on a given reference date; see
//! [`RuleDefinition::counting_window`].
//!
//! ## Counting Methods
//!
//! ```text
//! rolling        [ref - (window_days - 1), ref]
//! calendar_year  [01-01 of ref's year,     ref]
//! fiscal_year    [latest year start <= ref, ref]
//! ```
//!
//! Every window ends on the reference date: days after it are never
//! counted, even when an ongoing stay already covers them.

use serde::{Deserialize, Serialize};

use sejour_core::{CalendarDate, DateRange, JurisdictionCode, ValidationError};

/// How presence days are grouped for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMethod {
    /// Look-back window of fixed length ending on the reference date.
    Rolling,
    /// Resets every 1 January.
    CalendarYear,
    /// Resets every year on the rule's [`YearStart`].
    FiscalYear,
}

impl CountingMethod {
    /// Whether counted days expire individually as the window slides.
    pub fn is_rolling(&self) -> bool {
        matches!(self, Self::Rolling)
    }
}

impl std::fmt::Display for CountingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Rolling => "rolling",
            Self::CalendarYear => "calendar_year",
            Self::FiscalYear => "fiscal_year",
        };
        f.write_str(s)
    }
}

/// Month and day on which a fiscal year begins.
///
/// 29 February is rejected so the start exists in every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearStart {
    /// Month (1-12).
    pub month: u32,
    /// Day of month.
    pub day: u32,
}

impl YearStart {
    /// Validate a month/day pair.
    pub fn new(month: u32, day: u32) -> Result<Self, ValidationError> {
        let start = Self { month, day };
        start.validate()?;
        Ok(start)
    }

    /// Check the pair exists in a non-leap year.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // 2023 is not a leap year.
        CalendarDate::from_ymd(2023, self.month, self.day)
            .map(|_| ())
            .map_err(|_| ValidationError::InvalidYearStart {
                month: self.month,
                day: self.day,
            })
    }

    /// This start in the given year.
    fn in_year(&self, year: i32) -> Option<CalendarDate> {
        CalendarDate::from_ymd(year, self.month, self.day).ok()
    }
}

impl Default for YearStart {
    /// 1 April.
    fn default() -> Self {
        Self { month: 4, day: 1 }
    }
}

/// Static parameters for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleDefinition")]
pub struct RuleDefinition {
    /// Jurisdiction code matched against `StayRecord::jurisdiction`.
    pub code: JurisdictionCode,
    /// Human-readable name.
    pub name: String,
    /// Maximum number of counted days.
    pub days_allowed: u32,
    /// Window length for the rolling method. Ignored otherwise.
    pub window_days: u32,
    /// How days are grouped.
    pub counting_method: CountingMethod,
    /// Fiscal-year start. Only read by the fiscal-year method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_year_start: Option<YearStart>,
}

#[derive(Deserialize)]
struct RawRuleDefinition {
    code: JurisdictionCode,
    name: String,
    days_allowed: u32,
    #[serde(default)]
    window_days: u32,
    counting_method: CountingMethod,
    #[serde(default)]
    fiscal_year_start: Option<YearStart>,
}

impl TryFrom<RawRuleDefinition> for RuleDefinition {
    type Error = ValidationError;

    fn try_from(raw: RawRuleDefinition) -> Result<Self, Self::Error> {
        let rule = Self {
            code: raw.code,
            name: raw.name,
            days_allowed: raw.days_allowed,
            window_days: raw.window_days,
            counting_method: raw.counting_method,
            fiscal_year_start: raw.fiscal_year_start,
        };
        rule.validate()?;
        Ok(rule)
    }
}

impl RuleDefinition {
    /// A rolling-window rule, e.g. 90 days in any 180.
    pub fn rolling(
        code: JurisdictionCode,
        name: impl Into<String>,
        days_allowed: u32,
        window_days: u32,
    ) -> Result<Self, ValidationError> {
        let rule = Self {
            code,
            name: name.into(),
            days_allowed,
            window_days,
            counting_method: CountingMethod::Rolling,
            fiscal_year_start: None,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// A rule that resets every 1 January.
    pub fn calendar_year(
        code: JurisdictionCode,
        name: impl Into<String>,
        days_allowed: u32,
    ) -> Result<Self, ValidationError> {
        let rule = Self {
            code,
            name: name.into(),
            days_allowed,
            window_days: 0,
            counting_method: CountingMethod::CalendarYear,
            fiscal_year_start: None,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// A rule that resets every year on `start`.
    pub fn fiscal_year(
        code: JurisdictionCode,
        name: impl Into<String>,
        days_allowed: u32,
        start: YearStart,
    ) -> Result<Self, ValidationError> {
        let rule = Self {
            code,
            name: name.into(),
            days_allowed,
            window_days: 0,
            counting_method: CountingMethod::FiscalYear,
            fiscal_year_start: Some(start),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Check the rule's invariants.
    ///
    /// # Errors
    ///
    /// - `NonPositiveAllowance` if `days_allowed == 0`.
    /// - `NonPositiveWindow` if the method is rolling and `window_days == 0`.
    /// - `InvalidYearStart` if a fiscal-year start is not a real date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.days_allowed == 0 {
            return Err(ValidationError::NonPositiveAllowance {
                code: self.code.to_string(),
            });
        }
        if self.counting_method.is_rolling() && self.window_days == 0 {
            return Err(ValidationError::NonPositiveWindow {
                code: self.code.to_string(),
            });
        }
        if let Some(start) = &self.fiscal_year_start {
            start.validate()?;
        }
        Ok(())
    }

    /// The span of days eligible to count on `reference`.
    ///
    /// Always ends on `reference`.
    pub fn counting_window(&self, reference: CalendarDate) -> DateRange {
        let start = match self.counting_method {
            CountingMethod::Rolling => {
                reference.add_days(-(self.window_days.max(1) as i64 - 1))
            }
            CountingMethod::CalendarYear => {
                CalendarDate::from_ymd(reference.year(), 1, 1).unwrap_or(CalendarDate::MIN)
            }
            CountingMethod::FiscalYear => self.fiscal_period_start(reference),
        };
        DateRange::new(start, reference).unwrap_or_else(|_| DateRange::single(reference))
    }

    /// Last day of the period containing `reference`, for period methods.
    ///
    /// `None` for the rolling method, where there is no reset date.
    pub fn period_end(&self, reference: CalendarDate) -> Option<CalendarDate> {
        match self.counting_method {
            CountingMethod::Rolling => None,
            CountingMethod::CalendarYear => CalendarDate::from_ymd(reference.year(), 12, 31).ok(),
            CountingMethod::FiscalYear => {
                let start = self.fiscal_year_start.unwrap_or_default();
                let current = self.fiscal_period_start(reference);
                start
                    .in_year(current.year() + 1)
                    .map(|next| next.add_days(-1))
            }
        }
    }

    fn fiscal_period_start(&self, reference: CalendarDate) -> CalendarDate {
        let start = self.fiscal_year_start.unwrap_or_default();
        match start.in_year(reference.year()) {
            Some(this_year) if this_year <= reference => this_year,
            _ => start
                .in_year(reference.year() - 1)
                .unwrap_or(CalendarDate::MIN),
        }
    }
}
