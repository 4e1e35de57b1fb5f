//! Batch pipeline: documents → booking records → calendar files.
//!
//! Documents are processed one at a time, in the order the source handed
//! them over. Per-document problems — extraction diagnostics, serialization
//! failures, unwritable files — are logged and isolated; the batch always
//! runs to the end.

use tracing::{debug, error, info, warn};

use crate::calendar;
use crate::config::RunConfig;
use crate::extract;
use crate::model::BookingRecord;
use crate::source::EmailDocument;

// ── Extraction ──────────────────────────────────────────────────────────

/// Extract one document: normalize the raw HTML, then run the field rules
/// and the interval resolver. Never fails; diagnostics come back as data.
pub fn extract_document(
    document: &EmailDocument,
) -> (BookingRecord, Vec<extract::ExtractDiagnostic>) {
    let text = crate::normalize::body_text(&document.raw);
    extract::booking_record(&text, &document.id)
}

/// Extract every document, logging each diagnostic as it surfaces.
pub fn extract_all(documents: &[EmailDocument]) -> Vec<BookingRecord> {
    documents
        .iter()
        .map(|document| {
            let (record, diagnostics) = extract_document(document);
            for diagnostic in &diagnostics {
                warn!("{diagnostic}");
            }
            record
        })
        .collect()
}

// ── Emission ────────────────────────────────────────────────────────────

/// Outcome counts for one batch of calendar writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Calendar files written.
    pub written: usize,
    /// Records with zero resolved intervals (no file emitted).
    pub skipped_empty: usize,
    /// Records whose serialization or write failed.
    pub failed: usize,
}

/// Serialize and write one `.ics` file per record with at least one
/// interval. A failing record is reported and skipped; the rest of the
/// batch continues.
pub fn write_calendars(records: &[BookingRecord], config: &RunConfig) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for record in records {
        let events = calendar::build_events(record, config.busy_status);
        if events.is_empty() {
            debug!(source = %record.source, "no resolvable booking dates, skipping");
            summary.skipped_empty += 1;
            continue;
        }

        let payload = match calendar::to_ics(&events) {
            Ok(payload) => payload,
            Err(e) => {
                error!(source = %record.source, "calendar serialization failed: {e}");
                summary.failed += 1;
                continue;
            }
        };

        let path = config.ics_dir.join(calendar::ics_file_name(&record.title()));
        match std::fs::write(&path, payload) {
            Ok(()) => {
                info!("ICS file created: {}", path.display());
                summary.written += 1;
            }
            Err(e) => {
                error!(file = %path.display(), "write failed: {e}");
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusyStatus, FieldOutcome};
    use std::path::Path;

    fn document(id: &str, body: &str) -> EmailDocument {
        EmailDocument {
            id: id.to_string(),
            raw: format!("<html><body>{body}</body></html>"),
        }
    }

    fn run_config(ics_dir: &Path, busy_status: BusyStatus) -> RunConfig {
        RunConfig {
            emails_dir: ics_dir.to_path_buf(),
            ics_dir: ics_dir.to_path_buf(),
            busy_status,
        }
    }

    #[test]
    fn extract_document_normalizes_before_matching() {
        // The anchor phrase is split across markup and lines; normalization
        // must flatten it before the rules run.
        let doc = document(
            "split.html",
            "<p>QA Booking Confirmation for\n<b>Ada Lovelace</b>\nStart Date:</p>\n\
             <p>01 March 2024 at 09:30</p>\n<p>1 day</p>\n\
             <p>Your reference number is 4711.</p>",
        );

        let (record, diagnostics) = extract_document(&doc);
        assert_eq!(record.name, FieldOutcome::Found("Ada Lovelace".to_string()));
        assert_eq!(record.reference, FieldOutcome::Found("4711".to_string()));
        assert_eq!(record.intervals.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn extract_all_isolates_bad_documents() {
        let docs = vec![
            document("bad.html", "10 March 2024 at 10:00 then 1 day"),
            document(
                "good.html",
                "QA Booking Confirmation for Jane Start Date: \
                 10 March 2024 at 09:30 then 1 day. reference number is 1",
            ),
        ];

        let records = extract_all(&docs);
        assert_eq!(records.len(), 2);
        assert!(records[0].intervals.is_empty());
        assert_eq!(records[1].intervals.len(), 1);
    }

    #[test]
    fn write_calendars_skips_empty_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let record = BookingRecord {
            source: "empty.html".to_string(),
            name: FieldOutcome::Found("No Dates".to_string()),
            reference: FieldOutcome::Missing,
            intervals: Vec::new(),
        };

        let summary = write_calendars(&[record], &run_config(dir.path(), BusyStatus::Oof));

        assert_eq!(
            summary,
            BatchSummary {
                written: 0,
                skipped_empty: 1,
                failed: 0
            }
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn write_calendars_emits_one_file_per_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let doc = document(
            "jane.html",
            "QA Booking Confirmation for Jane Doe Start Date: \
             01 March 2024 at 09:30 for 1 day. reference number is 12345",
        );
        let records = extract_all(&[doc]);

        let summary = write_calendars(&records, &run_config(dir.path(), BusyStatus::Tentative));

        assert_eq!(summary.written, 1);
        let payload = std::fs::read_to_string(dir.path().join("Jane_Doe.ics")).unwrap();
        assert!(payload.contains("SUMMARY:Jane Doe"));
        assert!(payload.contains("X-MICROSOFT-CDO-BUSYSTATUS:TENTATIVE"));
    }
}
