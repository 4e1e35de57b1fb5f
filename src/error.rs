//! Rich diagnostic error types for seshat.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives (error codes and help text); this module aggregates them into
//! the top-level [`SeshatError`] so callers see the full diagnostic chain.
//!
//! Extraction itself has no error type on purpose: missing fields are
//! [`FieldOutcome::Missing`](crate::model::FieldOutcome) and discarded
//! interval occurrences are
//! [`ExtractDiagnostic`](crate::extract::ExtractDiagnostic)s — data, not
//! failures.

use miette::Diagnostic;
use thiserror::Error;

use crate::calendar::CalendarError;
use crate::config::ConfigError;
use crate::source::SourceError;

/// Top-level error type for seshat operations.
#[derive(Debug, Error, Diagnostic)]
pub enum SeshatError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias used throughout the crate.
pub type SeshatResult<T> = std::result::Result<T, SeshatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsystem_errors_convert_transparently() {
        let err: SeshatError = ConfigError::MissingDirectory {
            path: "./nope".to_string(),
        }
        .into();
        assert!(err.to_string().contains("./nope"));
    }

    #[test]
    fn result_alias_works() {
        let ok: SeshatResult<u32> = Ok(7);
        assert_eq!(ok.unwrap(), 7);
    }
}
