//! Booking extraction: pattern rules over normalized confirmation text.
//!
//! Two independent concerns, both pure functions over the flat text:
//!
//! - [`fields`] recovers the booking name and reference number. A rule that
//!   does not match yields [`FieldOutcome::Missing`](crate::model::FieldOutcome),
//!   never an error.
//! - [`intervals`] recovers the ordered (start, end) time spans. Occurrences
//!   that fail to parse or name an unknown start slot are dropped, each with
//!   an [`ExtractDiagnostic`] collected alongside the result.
//!
//! Nothing in this module prints or logs; diagnostics are data, and the
//! pipeline decides how to surface them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::BookingRecord;

pub mod fields;
pub mod intervals;

pub use fields::{booking_name, reference_number};
pub use intervals::{SessionSlot, resolve};

// ── ExtractDiagnostic ───────────────────────────────────────────────────

/// A discarded interval occurrence, with enough context to locate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractDiagnostic {
    /// The date-time token did not parse against the expected format.
    MalformedDate {
        /// The offending token, verbatim.
        text: String,
        /// Source document identifier.
        source: String,
    },
    /// The date parsed, but its start time is not a known session slot.
    UnknownStartTime {
        /// The unexpected time, formatted `HH:MM`.
        time: String,
        /// Source document identifier.
        source: String,
    },
}

impl fmt::Display for ExtractDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDate { text, source } => {
                write!(f, "invalid date format for '{text}' in file '{source}'")
            }
            Self::UnknownStartTime { time, source } => {
                write!(f, "unexpected start time '{time}' in file '{source}'")
            }
        }
    }
}

// ── booking_record ──────────────────────────────────────────────────────

/// Run both field rules and the interval resolver over one document's
/// normalized text, producing its immutable [`BookingRecord`].
///
/// The rules are independent: a missing name does not block the reference
/// number, and unresolvable intervals leave the fields untouched.
pub fn booking_record(text: &str, source: &str) -> (BookingRecord, Vec<ExtractDiagnostic>) {
    let name = fields::booking_name(text);
    let reference = fields::reference_number(text);
    let (intervals, diagnostics) = intervals::resolve(text, source);

    let record = BookingRecord {
        source: source.to_string(),
        name,
        reference,
        intervals,
    };
    (record, diagnostics)
}
