//! Field rules: booking name and reference number.
//!
//! Each rule is the first match of a fixed phrase pattern against the full
//! normalized text. Absence is an ordinary outcome, not an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::FieldOutcome;

static RE_BOOKING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"QA Booking Confirmation for (.*?) Start Date:").unwrap());

static RE_REFERENCE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"reference number is (\d+)").unwrap());

/// First match of `QA Booking Confirmation for <NAME> Start Date:`.
pub fn booking_name(text: &str) -> FieldOutcome {
    capture_first(&RE_BOOKING_NAME, text)
}

/// First match of `reference number is <DIGITS>`.
pub fn reference_number(text: &str) -> FieldOutcome {
    capture_first(&RE_REFERENCE_NUMBER, text)
}

fn capture_first(re: &Regex, text: &str) -> FieldOutcome {
    match re.captures(text) {
        Some(caps) => FieldOutcome::Found(caps[1].to_string()),
        None => FieldOutcome::Missing,
    }
}
