//! # avenir-script2pdf
//!
//! Render the Avenir video-script HTML documents (English and French) to PDF.
//!
//! ## Why this crate?
//!
//! The two script documents are finalised as HTML and need distributable
//! PDFs placed next to them. Instead of a one-off shell incantation, this
//! crate drives a headless Chrome/Chromium — the one renderer that prints
//! the scripts' CSS layout faithfully — and degrades gracefully on machines
//! without a browser: each source is then copied byte-for-byte under the
//! `.pdf` name so it can still be printed manually later. A run never
//! aborts; every failure is recorded per document and reported at the end.
//!
//! ## Pipeline Overview
//!
//! ```text
//! fixed document table (EN, FR)
//!  │
//!  ├─ 1. Probe    locate Chrome/Chromium once (CHROME env, known paths)
//!  │      ├─ found ──▶ 2a. Render  file:// load + print-to-PDF, per document
//!  │      └─ absent ─▶ 2b. Copy    verbatim bytes to the .pdf name
//!  └─ 3. Outcome  per-document results + batch summary
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use avenir_script2pdf::{run, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ConversionConfig::default();
//!     let outcome = run(&config).await;
//!     for doc in &outcome.documents {
//!         match &doc.error {
//!             None => println!("{}: {} bytes", doc.language, doc.bytes_written),
//!             Some(e) => eprintln!("{}: {}", doc.language, e),
//!         }
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `script2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! avenir-script2pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod documents;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod input;
pub mod output;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert_document, run, run_sync};
pub use documents::{Language, ScriptDocument, SCRIPT_DOCUMENTS};
pub use engine::RenderEngine;
pub use error::{DocumentError, Script2PdfError};
pub use output::{BatchOutcome, BatchStats, ConversionMode, DocumentResult};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
