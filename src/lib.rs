//! # seshat
//!
//! Converts QA booking-confirmation emails (HTML) into iCalendar files.
//!
//! ## Architecture
//!
//! The pipeline is strictly left-to-right, one document at a time:
//!
//! - **Normalization** (`normalize`): HTML → flat single-spaced body text
//! - **Extraction** (`extract`): pattern rules → booking name, reference
//!   number, and session intervals, with structured diagnostics
//! - **Calendar** (`calendar`): booking records → VEVENTs → `.ics` payloads
//! - **Pipeline** (`pipeline`): batch orchestration with per-document
//!   failure isolation
//! - **Boundaries** (`source`, `config`, `prompt`): directory enumeration,
//!   validated run configuration, and the interactive prompts that feed it
//!
//! ## Library usage
//!
//! ```
//! use seshat::extract;
//!
//! let text = "QA Booking Confirmation for Jane Doe Start Date: \
//!             01 March 2024 at 09:30 for 1 day. Your reference number is 12345.";
//! let (record, diagnostics) = extract::booking_record(text, "jane.html");
//!
//! assert_eq!(record.title(), "Jane Doe");
//! assert_eq!(record.reference_label(), "12345");
//! assert_eq!(record.intervals.len(), 1);
//! assert!(diagnostics.is_empty());
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod source;

pub use error::{SeshatError, SeshatResult};
pub use model::{BookingRecord, BusyStatus, CalendarEvent, FieldOutcome, Interval};
