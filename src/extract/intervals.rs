//! Interval resolution: date+duration occurrences → (start, end) spans.
//!
//! Confirmation documents encode only a start timestamp plus a generic
//! "N day(s)" phrase that does not reliably map to a duration in hours. The
//! two observed start times correspond to two fixed session slots (morning,
//! afternoon), so end times come from the closed [`SessionSlot`] table and
//! the duration figure is matched but never used. Occurrences outside the
//! table are dropped with a diagnostic rather than guessed at.

use std::sync::LazyLock;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;

use super::ExtractDiagnostic;
use crate::model::Interval;

/// A date-time token (`DD Month YYYY at HH:MM`) followed, non-greedily, by
/// a numeric duration and the word "day". The duration is captured for
/// shape-matching only.
static RE_DATE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2} \w+ \d{4} at \d{2}:\d{2}).+?(\d+(?:\.\d+)?) day").unwrap()
});

/// Parse format for the date-time token, interpreted in UTC.
const DATE_FORMAT: &str = "%d %B %Y at %H:%M";

// ── SessionSlot ─────────────────────────────────────────────────────────

/// The known booking session slots. Start times outside this table are
/// unresolvable; `from_start` is total over all times and returns `None`
/// for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSlot {
    /// 09:30 – 12:30.
    Morning,
    /// 13:30 – 16:30.
    Afternoon,
}

impl SessionSlot {
    /// Look up the slot for a start time.
    pub fn from_start(time: NaiveTime) -> Option<Self> {
        match (time.hour(), time.minute()) {
            (9, 30) => Some(Self::Morning),
            (13, 30) => Some(Self::Afternoon),
            _ => None,
        }
    }

    /// The slot's end time, on the same calendar date as its start.
    pub fn end_time(self) -> NaiveTime {
        let (hour, minute) = match self {
            Self::Morning => (12, 30),
            Self::Afternoon => (16, 30),
        };
        NaiveTime::from_hms_opt(hour, minute, 0).expect("static slot time must be valid")
    }
}

// ── resolve ─────────────────────────────────────────────────────────────

/// Scan the normalized text for all date+duration occurrences, left to
/// right, and resolve each into an [`Interval`].
///
/// Occurrences are dropped (with a diagnostic) when the date-time token
/// fails to parse or the start time is not a known slot; scanning always
/// continues to the end of the text.
pub fn resolve(text: &str, source: &str) -> (Vec<Interval>, Vec<ExtractDiagnostic>) {
    let mut intervals = Vec::new();
    let mut diagnostics = Vec::new();

    for caps in RE_DATE_DURATION.captures_iter(text) {
        let date_text = &caps[1];

        let start = match NaiveDateTime::parse_from_str(date_text, DATE_FORMAT) {
            Ok(dt) => dt.and_utc(),
            Err(_) => {
                diagnostics.push(ExtractDiagnostic::MalformedDate {
                    text: date_text.to_string(),
                    source: source.to_string(),
                });
                continue;
            }
        };

        let Some(slot) = SessionSlot::from_start(start.time()) else {
            diagnostics.push(ExtractDiagnostic::UnknownStartTime {
                time: start.format("%H:%M").to_string(),
                source: source.to_string(),
            });
            continue;
        };

        let end = start
            .date_naive()
            .and_time(slot.end_time())
            .and_utc();

        intervals.push(Interval { start, end });
    }

    (intervals, diagnostics)
}
