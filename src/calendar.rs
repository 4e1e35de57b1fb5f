//! Calendar event building and iCalendar serialization.
//!
//! Projects a [`BookingRecord`] into [`CalendarEvent`]s (one per interval)
//! and serializes them into a single VCALENDAR payload per record. Every
//! event is emitted `STATUS:CONFIRMED`; the run-wide busy status becomes
//! the `X-MICROSOFT-CDO-BUSYSTATUS` property.

use std::sync::LazyLock;

use icalendar::{Calendar, Component, Event, EventLike, EventStatus};
use miette::Diagnostic;
use regex::Regex;
use thiserror::Error;

use crate::model::{BookingRecord, BusyStatus, CalendarEvent, EventDateTime};

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// ── Errors ──────────────────────────────────────────────────────────────

/// Errors from calendar serialization. Reported per record; the batch
/// continues past them.
#[derive(Debug, Error, Diagnostic)]
pub enum CalendarError {
    #[error("invalid event \"{title}\": {message}")]
    #[diagnostic(
        code(seshat::calendar::invalid_event),
        help(
            "The event's date-time components do not form a valid interval. \
             This points at a defect in interval resolution, not at the \
             source document."
        )
    )]
    InvalidEvent { title: String, message: String },
}

/// Convenience alias for calendar operations.
pub type CalendarResult<T> = std::result::Result<T, CalendarError>;

// ── build_events ────────────────────────────────────────────────────────

/// Produce one [`CalendarEvent`] per interval of the record.
///
/// Seconds are truncated when projecting timestamps onto calendar
/// components. A record with no intervals yields no events; that is an
/// ordinary empty result, not an error.
pub fn build_events(record: &BookingRecord, busy_status: BusyStatus) -> Vec<CalendarEvent> {
    let title = record.title();
    let description = format!("Booking Reference Number: {}", record.reference_label());

    record
        .intervals
        .iter()
        .map(|interval| CalendarEvent {
            title: title.clone(),
            description: description.clone(),
            start: EventDateTime::from_utc(interval.start),
            end: EventDateTime::from_utc(interval.end),
            busy_status,
        })
        .collect()
}

// ── to_ics ──────────────────────────────────────────────────────────────

/// Serialize one record's events into iCalendar text.
///
/// Events are validated before serialization: the components must form
/// real date-times and each event must end after it starts.
pub fn to_ics(events: &[CalendarEvent]) -> CalendarResult<String> {
    let mut calendar = Calendar::new();

    for event in events {
        calendar.push(to_vevent(event)?);
    }

    Ok(calendar.to_string())
}

fn to_vevent(event: &CalendarEvent) -> CalendarResult<Event> {
    let start = event.start.to_utc().ok_or_else(|| CalendarError::InvalidEvent {
        title: event.title.clone(),
        message: format!("start components do not name a real date-time: {:?}", event.start),
    })?;
    let end = event.end.to_utc().ok_or_else(|| CalendarError::InvalidEvent {
        title: event.title.clone(),
        message: format!("end components do not name a real date-time: {:?}", event.end),
    })?;

    if end <= start {
        return Err(CalendarError::InvalidEvent {
            title: event.title.clone(),
            message: format!("end {end} is not after start {start}"),
        });
    }

    let mut vevent = Event::new();
    vevent
        .summary(&event.title)
        .description(&event.description)
        .starts(start)
        .ends(end)
        .status(EventStatus::Confirmed)
        .add_property("X-MICROSOFT-CDO-BUSYSTATUS", event.busy_status.as_ics());

    Ok(vevent.done())
}

// ── ics_file_name ───────────────────────────────────────────────────────

/// Derive the output file name from the booking title: every whitespace
/// run becomes a single underscore, all other characters are preserved.
pub fn ics_file_name(title: &str) -> String {
    format!("{}.ics", RE_WHITESPACE.replace_all(title, "_"))
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldOutcome, Interval};
    use chrono::{TimeZone, Utc};

    fn sample_record() -> BookingRecord {
        BookingRecord {
            source: "jane.html".to_string(),
            name: FieldOutcome::Found("Jane Doe".to_string()),
            reference: FieldOutcome::Found("12345".to_string()),
            intervals: vec![
                Interval {
                    start: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
                    end: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
                },
                Interval {
                    start: Utc.with_ymd_and_hms(2024, 3, 2, 13, 30, 0).unwrap(),
                    end: Utc.with_ymd_and_hms(2024, 3, 2, 16, 30, 0).unwrap(),
                },
            ],
        }
    }

    #[test]
    fn one_event_per_interval() {
        let events = build_events(&sample_record(), BusyStatus::Busy);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.title == "Jane Doe"));
        assert!(
            events
                .iter()
                .all(|e| e.description == "Booking Reference Number: 12345")
        );
        assert!(events.iter().all(|e| e.busy_status == BusyStatus::Busy));
        assert_eq!(events[0].start.hour, 9);
        assert_eq!(events[1].start.hour, 13);
    }

    #[test]
    fn empty_record_builds_no_events() {
        let mut record = sample_record();
        record.intervals.clear();
        assert!(build_events(&record, BusyStatus::Oof).is_empty());
    }

    #[test]
    fn sentinel_title_flows_into_events() {
        let mut record = sample_record();
        record.name = FieldOutcome::Missing;
        let events = build_events(&record, BusyStatus::Oof);
        assert_eq!(events[0].title, "Unknown Booking Name (jane.html)");
    }

    #[test]
    fn ics_payload_contains_utc_times_and_status() {
        let events = build_events(&sample_record(), BusyStatus::Oof);
        let ics = to_ics(&events).unwrap();

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("SUMMARY:Jane Doe"));
        assert!(ics.contains("DTSTART:20240301T093000Z"));
        assert!(ics.contains("DTEND:20240301T123000Z"));
        assert!(ics.contains("DTSTART:20240302T133000Z"));
        assert!(ics.contains("DTEND:20240302T163000Z"));
        assert!(ics.contains("STATUS:CONFIRMED"));
        assert!(ics.contains("X-MICROSOFT-CDO-BUSYSTATUS:OOF"));
    }

    #[test]
    fn ics_of_no_events_is_still_a_calendar() {
        let ics = to_ics(&[]).unwrap();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let event = CalendarEvent {
            title: "Broken".to_string(),
            description: "Booking Reference Number: 1".to_string(),
            start: EventDateTime {
                year: 2024,
                month: 3,
                day: 1,
                hour: 12,
                minute: 30,
            },
            end: EventDateTime {
                year: 2024,
                month: 3,
                day: 1,
                hour: 9,
                minute: 30,
            },
            busy_status: BusyStatus::Oof,
        };

        let err = to_ics(std::slice::from_ref(&event)).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn impossible_date_components_are_rejected() {
        let event = CalendarEvent {
            title: "Leap".to_string(),
            description: String::new(),
            start: EventDateTime {
                year: 2023,
                month: 2,
                day: 29,
                hour: 9,
                minute: 30,
            },
            end: EventDateTime {
                year: 2023,
                month: 3,
                day: 1,
                hour: 12,
                minute: 30,
            },
            busy_status: BusyStatus::Free,
        };

        assert!(to_ics(std::slice::from_ref(&event)).is_err());
    }

    #[test]
    fn file_name_replaces_whitespace_runs() {
        assert_eq!(ics_file_name("Jane Doe"), "Jane_Doe.ics");
        assert_eq!(ics_file_name("Jane  \t Doe  Smith"), "Jane_Doe_Smith.ics");
        assert_eq!(
            ics_file_name("Unknown Booking Name (x.html)"),
            "Unknown_Booking_Name_(x.html).ics"
        );
    }
}
