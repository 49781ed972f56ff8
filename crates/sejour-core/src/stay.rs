//! # Stay Records
//!
//! A `StayRecord` is one period of physical presence in one jurisdiction.
//! Records are created and edited by the surrounding application and
//! handed to the engine as an immutable slice per call.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{JurisdictionCode, StayId};
use crate::temporal::{CalendarDate, DateRange};

/// Purpose of a stay. Both categories count toward presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayCategory {
    /// Tourism, family visits, relocation scouting.
    #[default]
    Personal,
    /// Work trips, conferences.
    Business,
}

impl std::fmt::Display for StayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Personal => "personal",
            Self::Business => "business",
        };
        f.write_str(s)
    }
}

/// One inclusive period of presence in a single jurisdiction.
///
/// Serialized with `start` and `end` inline. Deserialization rejects
/// `end < start` and malformed dates; a missing `id` gets a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStayRecord")]
pub struct StayRecord {
    /// Record identifier.
    pub id: StayId,
    /// Days of presence (inclusive on both ends).
    #[serde(flatten)]
    pub period: DateRange,
    /// Jurisdiction the presence counts toward.
    pub jurisdiction: JurisdictionCode,
    /// Purpose of the stay.
    pub category: StayCategory,
    /// Free-form notes from the traveller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
struct RawStayRecord {
    #[serde(default)]
    id: StayId,
    start: CalendarDate,
    end: CalendarDate,
    jurisdiction: JurisdictionCode,
    #[serde(default)]
    category: StayCategory,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<RawStayRecord> for StayRecord {
    type Error = ValidationError;

    fn try_from(raw: RawStayRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            period: DateRange::new(raw.start, raw.end)?,
            jurisdiction: raw.jurisdiction,
            category: raw.category,
            notes: raw.notes,
        })
    }
}

impl StayRecord {
    /// Create a personal stay with a fresh identifier.
    pub fn new(
        start: CalendarDate,
        end: CalendarDate,
        jurisdiction: JurisdictionCode,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: StayId::new(),
            period: DateRange::new(start, end)?,
            jurisdiction,
            category: StayCategory::Personal,
            notes: None,
        })
    }

    /// Parse ISO dates and a jurisdiction code into a personal stay.
    pub fn parse(start: &str, end: &str, jurisdiction: &str) -> Result<Self, ValidationError> {
        Self::new(
            CalendarDate::parse(start)?,
            CalendarDate::parse(end)?,
            JurisdictionCode::new(jurisdiction)?,
        )
    }

    /// Set the category.
    pub fn with_category(mut self, category: StayCategory) -> Self {
        self.category = category;
        self
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// First day of presence.
    pub fn start(&self) -> CalendarDate {
        self.period.start()
    }

    /// Last day of presence.
    pub fn end(&self) -> CalendarDate {
        self.period.end()
    }
}
