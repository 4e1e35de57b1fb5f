//! Document source: enumerates eligible email files in a directory.
//!
//! Eligibility is by file name: anything ending in `.html` or `.htm`
//! (case-insensitive). Files are surfaced in directory-listing order, each
//! as an `(identifier, rawText)` pair. A file that cannot be read is
//! logged and skipped; only failing to list the directory itself is an
//! error.

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;
use tracing::warn;

// ── Errors ──────────────────────────────────────────────────────────────

/// Errors from the document source.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("cannot list email directory \"{path}\": {message}")]
    #[diagnostic(
        code(seshat::source::list_dir),
        help(
            "Check that the directory exists and is readable. The input \
             directory is validated up front, so this usually means it was \
             removed mid-run."
        )
    )]
    ListDir { path: String, message: String },
}

/// Convenience alias for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

// ── EmailDocument ───────────────────────────────────────────────────────

/// One eligible document: its identifier (file name) and raw HTML text.
#[derive(Debug, Clone)]
pub struct EmailDocument {
    /// File name, used as the source identifier in diagnostics.
    pub id: String,
    /// Raw file contents (UTF-8).
    pub raw: String,
}

// ── scan_directory ──────────────────────────────────────────────────────

/// Enumerate and read all eligible email files in `dir`.
///
/// Subdirectories and non-HTML files are skipped silently; unreadable
/// eligible files are skipped with a warning.
pub fn scan_directory(dir: &Path) -> SourceResult<Vec<EmailDocument>> {
    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::ListDir {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut documents = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() || !is_eligible(&path) {
            continue;
        }

        let id = entry.file_name().to_string_lossy().to_string();

        match std::fs::read_to_string(&path) {
            Ok(raw) => documents.push(EmailDocument { id, raw }),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable email file");
            }
        }
    }

    Ok(documents)
}

/// Whether the file name carries a recognized document-markup extension.
fn is_eligible(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_only_html_files() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.html"), "<body>a</body>").unwrap();
        std::fs::write(dir.path().join("b.HTM"), "<body>b</body>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an email").unwrap();
        std::fs::write(dir.path().join("c.html.bak"), "backup").unwrap();
        std::fs::create_dir(dir.path().join("nested.html")).unwrap();

        let mut ids: Vec<String> = scan_directory(dir.path())
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["a.html", "b.HTM"]);
    }

    #[test]
    fn documents_carry_raw_contents() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("one.html"), "<body>payload</body>").unwrap();

        let docs = scan_directory(dir.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "one.html");
        assert!(docs[0].raw.contains("payload"));
    }

    #[test]
    fn empty_directory_yields_no_documents() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(scan_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let gone = dir.path().join("nope");
        assert!(scan_directory(&gone).is_err());
    }
}
