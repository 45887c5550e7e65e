//! Progress-callback trait for per-document conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the run processes each document.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a log sink, or a GUI without
//! the library knowing anything about how the host application communicates.
//! The trait is `Send + Sync` so a callback can also be shared with other
//! tasks the host is running.
//!
//! # Example
//!
//! ```rust
//! use avenir_script2pdf::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_document_complete(&self, doc_num: usize, total: usize, bytes_written: u64) {
//!         let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("Document {}/{} done ({} bytes), {} so far", doc_num, total, bytes_written, done);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the orchestrator as it processes each document.
///
/// Documents are processed strictly sequentially, so callbacks never run
/// concurrently with each other; `Send + Sync` is still required so the same
/// callback can be shared with other tasks the host is running. All methods
/// have default no-op implementations so callers only override what they
/// care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before any document is processed.
    ///
    /// # Arguments
    /// * `total_documents` — number of documents that will be processed
    fn on_batch_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called once, before any document, when the rendering engine could not
    /// be loaded and the run switched to the verbatim-copy fallback.
    ///
    /// # Arguments
    /// * `reason` — human-readable description of the missing engine
    fn on_fallback_engaged(&self, reason: &str) {
        let _ = reason;
    }

    /// Called just before a document conversion attempt starts.
    ///
    /// # Arguments
    /// * `doc_num` — 1-indexed document number
    /// * `total`   — total documents in the run
    /// * `label`   — human-readable document label (e.g. "English")
    fn on_document_start(&self, doc_num: usize, total: usize, label: &str) {
        let _ = (doc_num, total, label);
    }

    /// Called when a document is successfully converted (or copied).
    ///
    /// # Arguments
    /// * `doc_num`       — 1-indexed document number
    /// * `total`         — total documents in the run
    /// * `bytes_written` — size of the produced output file
    fn on_document_complete(&self, doc_num: usize, total: usize, bytes_written: u64) {
        let _ = (doc_num, total, bytes_written);
    }

    /// Called when a document attempt fails.
    ///
    /// # Arguments
    /// * `doc_num` — 1-indexed document number
    /// * `total`   — total documents in the run
    /// * `error`   — human-readable error description
    fn on_document_error(&self, doc_num: usize, total: usize, error: &str) {
        let _ = (doc_num, total, error);
    }

    /// Called once after all documents have been attempted.
    ///
    /// # Arguments
    /// * `total_documents` — total documents in the run
    /// * `success_count`   — documents that completed without error
    fn on_batch_complete(&self, total_documents: usize, success_count: usize) {
        let _ = (total_documents, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        fallbacks: AtomicUsize,
        completed_total: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_fallback_engaged(&self, _reason: &str) {
            self.fallbacks.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_start(&self, _doc_num: usize, _total: usize, _label: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_complete(&self, _doc_num: usize, _total: usize, _bytes_written: u64) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_error(&self, _doc_num: usize, _total: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total_documents: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_fallback_engaged("no browser");
        cb.on_document_start(1, 2, "English");
        cb.on_document_complete(1, 2, 42);
        cb.on_document_error(2, 2, "some error");
        cb.on_batch_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            fallbacks: AtomicUsize::new(0),
            completed_total: AtomicUsize::new(0),
        };

        tracker.on_batch_start(2);
        tracker.on_document_start(1, 2, "English");
        tracker.on_document_complete(1, 2, 1024);
        tracker.on_document_start(2, 2, "French");
        tracker.on_document_error(2, 2, "source missing");
        tracker.on_batch_complete(2, 1);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.fallbacks.load(Ordering::SeqCst), 0);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_batch_start(2);
        cb.on_document_start(1, 2, "English");
        cb.on_document_complete(1, 2, 512);
    }
}
