//! Core data model: booking records, intervals, and calendar events.
//!
//! A `BookingRecord` is built once per source document and never mutated
//! afterwards. Missing fields are carried as [`FieldOutcome::Missing`] and
//! only materialize as human-readable sentinels at presentation time
//! (`title()` / `reference_label()`), so callers can branch on the outcome
//! without string-matching on defaults.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── FieldOutcome ────────────────────────────────────────────────────────

/// Outcome of a single pattern-extraction rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The pattern matched; the captured text.
    Found(String),
    /// The pattern did not match anywhere in the document.
    Missing,
}

impl FieldOutcome {
    /// The captured text, if the rule matched.
    pub fn as_found(&self) -> Option<&str> {
        match self {
            Self::Found(text) => Some(text),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

// ── Interval ────────────────────────────────────────────────────────────

/// One booking time span. `end` is always derived from `start` via the
/// session-slot table, never parsed independently, so `end > start` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// ── BookingRecord ───────────────────────────────────────────────────────

/// Extracted identity and time intervals for one source document.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    /// Source identifier (file name), used in diagnostics and sentinels.
    pub source: String,
    /// Booking name extraction outcome.
    pub name: FieldOutcome,
    /// Reference number extraction outcome.
    pub reference: FieldOutcome,
    /// Intervals in order of appearance in the source text. May be empty.
    pub intervals: Vec<Interval>,
}

impl BookingRecord {
    /// The booking title, with the unresolved-name sentinel materialized.
    pub fn title(&self) -> String {
        match self.name.as_found() {
            Some(name) => name.to_string(),
            None => format!("Unknown Booking Name ({})", self.source),
        }
    }

    /// The reference number, with the unresolved-reference sentinel
    /// materialized.
    pub fn reference_label(&self) -> String {
        match self.reference.as_found() {
            Some(reference) => reference.to_string(),
            None => "Unknown Reference Number".to_string(),
        }
    }

    /// Serializable projection with sentinels materialized.
    pub fn report(&self) -> BookingReport {
        BookingReport {
            booking_name: self.title(),
            booking_reference_number: self.reference_label(),
            booking_dates: self
                .intervals
                .iter()
                .map(|iv| BookingDates {
                    booking_start: iv.start,
                    booking_end: iv.end,
                })
                .collect(),
        }
    }
}

/// JSON projection of a [`BookingRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReport {
    pub booking_name: String,
    pub booking_reference_number: String,
    pub booking_dates: Vec<BookingDates>,
}

/// One resolved interval in the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDates {
    pub booking_start: DateTime<Utc>,
    pub booking_end: DateTime<Utc>,
}

// ── BusyStatus ──────────────────────────────────────────────────────────

/// Free/busy classification stamped on every event of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BusyStatus {
    Free,
    Tentative,
    Busy,
    /// Out of office.
    #[default]
    Oof,
}

impl BusyStatus {
    /// All statuses, in prompt-listing order.
    pub const ALL: [Self; 4] = [Self::Free, Self::Tentative, Self::Busy, Self::Oof];

    /// The iCalendar property value (`X-MICROSOFT-CDO-BUSYSTATUS`).
    pub fn as_ics(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Tentative => "TENTATIVE",
            Self::Busy => "BUSY",
            Self::Oof => "OOF",
        }
    }
}

impl fmt::Display for BusyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ics())
    }
}

/// Error returned when a busy status string is not one of the four
/// recognized values.
#[derive(Debug, Error, Diagnostic)]
#[error("unknown busy status: \"{value}\"")]
#[diagnostic(
    code(seshat::model::busy_status),
    help("Valid busy statuses are FREE, TENTATIVE, BUSY, and OOF.")
)]
pub struct BusyStatusParseError {
    pub value: String,
}

impl FromStr for BusyStatus {
    type Err = BusyStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FREE" => Ok(Self::Free),
            "TENTATIVE" => Ok(Self::Tentative),
            "BUSY" => Ok(Self::Busy),
            "OOF" => Ok(Self::Oof),
            _ => Err(BusyStatusParseError {
                value: s.to_string(),
            }),
        }
    }
}

// ── CalendarEvent ───────────────────────────────────────────────────────

/// Calendar-local date-time components, to the minute. Seconds are
/// truncated when projecting from an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl EventDateTime {
    /// Project a UTC timestamp onto calendar components, dropping seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
        }
    }

    /// Reassemble a UTC timestamp. `None` if the components do not name a
    /// real calendar date-time.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(self.year, self.month, self.day, self.hour, self.minute, 0)
            .single()
    }
}

/// Serialization-ready projection of one interval plus booking identity.
///
/// The VEVENT status is fixed: every emitted event is `CONFIRMED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title (the materialized booking name).
    pub title: String,
    /// Event description; contains the materialized reference number.
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    /// Run-wide free/busy classification.
    pub busy_status: BusyStatus,
}

// ── Tests ───────────────────────────────────────────────────────────────
