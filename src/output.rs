//! Result types returned by a run.
//!
//! A run always yields a [`BatchOutcome`], even when every document failed:
//! error information lives inside each [`DocumentResult`] rather than being
//! thrown. Callers that only care about success booleans use
//! [`DocumentResult::succeeded`] and [`BatchOutcome::all_succeeded`]; callers
//! that need diagnostics inspect [`DocumentResult::error`].

use crate::documents::Language;
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which path produced the output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// The rendering engine printed real PDFs.
    Rendered,
    /// The engine was unavailable; sources were copied byte-for-byte to the
    /// destination names. The outputs are HTML files with a `.pdf` name,
    /// kept for manual print-to-PDF from a browser.
    CopiedVerbatim,
}

/// Outcome of one document attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Language variant of the document.
    pub language: Language,
    /// Resolved source path.
    pub source: PathBuf,
    /// Resolved destination path.
    pub output: PathBuf,
    /// Whether this result came from rendering or the fallback copy.
    pub mode: ConversionMode,
    /// Bytes written to the destination. 0 when the attempt failed.
    pub bytes_written: u64,
    /// Wall-clock duration of the attempt in milliseconds.
    pub duration_ms: u64,
    /// The failure, if any. `None` means the destination was written.
    pub error: Option<DocumentError>,
}

impl DocumentResult {
    /// True when the destination file was written.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    /// Documents attempted (always 2 for the fixed table).
    pub total_documents: usize,
    /// Documents whose destination was written.
    pub converted: usize,
    /// Documents that failed.
    pub failed: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub total_duration_ms: u64,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Which path produced the outputs (same for every document in a run:
    /// the engine probe happens once, before any document is attempted).
    pub mode: ConversionMode,
    /// Per-document results, in table order (English, then French).
    pub documents: Vec<DocumentResult>,
    /// Aggregate counters.
    pub stats: BatchStats,
}

impl BatchOutcome {
    /// True when every document succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.stats.failed == 0
    }

    /// True when at least one document succeeded and at least one failed.
    pub fn is_partial(&self) -> bool {
        self.stats.failed > 0 && self.stats.converted > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(language: Language, error: Option<DocumentError>) -> DocumentResult {
        DocumentResult {
            language,
            source: PathBuf::from("in.html"),
            output: PathBuf::from("out.pdf"),
            mode: ConversionMode::Rendered,
            bytes_written: if error.is_none() { 1024 } else { 0 },
            duration_ms: 12,
            error,
        }
    }

    fn outcome(results: Vec<DocumentResult>) -> BatchOutcome {
        let converted = results.iter().filter(|r| r.succeeded()).count();
        let failed = results.len() - converted;
        BatchOutcome {
            mode: ConversionMode::Rendered,
            stats: BatchStats {
                total_documents: results.len(),
                converted,
                failed,
                total_duration_ms: 34,
            },
            documents: results,
        }
    }

    #[test]
    fn all_succeeded_when_no_errors() {
        let o = outcome(vec![result(Language::En, None), result(Language::Fr, None)]);
        assert!(o.all_succeeded());
        assert!(!o.is_partial());
    }

    #[test]
    fn partial_when_one_fails() {
        let o = outcome(vec![
            result(Language::En, None),
            result(
                Language::Fr,
                Some(DocumentError::SourceMissing {
                    path: PathBuf::from("in.html"),
                }),
            ),
        ]);
        assert!(!o.all_succeeded());
        assert!(o.is_partial());
        assert_eq!(o.stats.converted, 1);
        assert_eq!(o.stats.failed, 1);
    }

    #[test]
    fn total_failure_is_not_partial() {
        let missing = DocumentError::SourceMissing {
            path: PathBuf::from("in.html"),
        };
        let o = outcome(vec![
            result(Language::En, Some(missing.clone())),
            result(Language::Fr, Some(missing)),
        ]);
        assert!(!o.all_succeeded());
        assert!(!o.is_partial());
    }

    #[test]
    fn outcome_serialises_to_json() {
        let o = outcome(vec![result(Language::En, None), result(Language::Fr, None)]);
        let json = serde_json::to_string_pretty(&o).unwrap();
        assert!(json.contains("\"rendered\""));
        assert!(json.contains("\"converted\": 2"));
    }
}
