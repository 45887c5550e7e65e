//! Error types for the avenir-script2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Script2PdfError`] — errors outside any single document attempt
//!   (invalid configuration, no browser executable on the machine, runtime
//!   creation). Notably, [`Script2PdfError::EngineUnavailable`] is not fatal
//!   either: the orchestrator consumes it to select the verbatim-copy
//!   fallback instead of rendering.
//!
//! * [`DocumentError`] — a single document failed (missing source, render
//!   glitch, write error) but the other document is unaffected. Stored inside
//!   [`crate::output::DocumentResult`] so callers can inspect partial
//!   success rather than losing the whole run to one bad file.
//!
//! The separation keeps the top-level contract simple: a run always completes
//! and always yields a [`crate::output::BatchOutcome`]; only per-document
//! results carry errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside a per-document conversion attempt.
///
/// Document-level failures use [`DocumentError`] and are stored in
/// [`crate::output::DocumentResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Script2PdfError {
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No usable Chrome/Chromium executable could be located.
    ///
    /// Consumed by [`crate::convert::run`] to engage the fallback path; it
    /// surfaces to callers only through [`crate::engine::RenderEngine::probe`].
    #[error(
        "No HTML rendering engine available: {detail}\n\
Install Google Chrome or Chromium, or point the CHROME environment variable\n\
at an existing executable. Without a browser the documents are copied\n\
verbatim instead of rendered."
    )]
    EngineUnavailable { detail: String },

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document.
///
/// Stored in [`crate::output::DocumentResult`] when a conversion or copy
/// attempt fails. The overall run continues with the remaining document.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// Source file was not found at the given path.
    #[error("Source file not found: '{path}'\nRun from the directory that contains the script documents.")]
    SourceMissing { path: PathBuf },

    /// Process does not have read permission on the source file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The browser failed to load or print the document.
    #[error("Rendering failed for '{path}': {detail}")]
    RenderFailed { path: PathBuf, detail: String },

    /// The browser did not produce a PDF within the configured timeout.
    #[error("Rendering timed out after {secs}s for '{path}'\nIncrease --timeout for very large documents.")]
    RenderTimeout { path: PathBuf, secs: u64 },

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {detail}")]
    OutputWrite { path: PathBuf, detail: String },

    /// The fallback byte copy failed.
    #[error("Failed to copy '{from}' to '{to}': {detail}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_missing_display_names_path() {
        let e = DocumentError::SourceMissing {
            path: PathBuf::from("AVENIR_VIDEO_SCRIPT_CLEAN_EN.html"),
        };
        let msg = e.to_string();
        assert!(msg.contains("AVENIR_VIDEO_SCRIPT_CLEAN_EN.html"), "got: {msg}");
    }

    #[test]
    fn render_timeout_display() {
        let e = DocumentError::RenderTimeout {
            path: PathBuf::from("doc.html"),
            secs: 60,
        };
        assert!(e.to_string().contains("60s"));
        assert!(e.to_string().contains("doc.html"));
    }

    #[test]
    fn copy_failed_display_names_both_paths() {
        let e = DocumentError::CopyFailed {
            from: PathBuf::from("a.html"),
            to: PathBuf::from("a.pdf"),
            detail: "disk full".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("a.html"));
        assert!(msg.contains("a.pdf"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn engine_unavailable_mentions_chrome_hint() {
        let e = Script2PdfError::EngineUnavailable {
            detail: "no executable found".into(),
        };
        assert!(e.to_string().contains("CHROME"));
    }

    #[test]
    fn document_error_round_trips_through_json() {
        let e = DocumentError::RenderFailed {
            path: PathBuf::from("doc.html"),
            detail: "tab crashed".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: DocumentError = serde_json::from_str(&json).unwrap();
        assert!(back.to_string().contains("tab crashed"));
    }
}
