//! Conversion entry points and the two-document orchestration.
//!
//! ## Why one probe, then a plain loop?
//!
//! Whether a rendering engine exists is a property of the machine, not of a
//! document, so it is decided exactly once per run. After that the two fixed
//! documents are processed strictly one after the other — there is nothing
//! to gain from overlapping two sub-second browser prints, and sequential
//! execution keeps the status output in table order. Per-document failures
//! are recorded, never thrown: [`run`] always returns a complete
//! [`BatchOutcome`].

use crate::config::ConversionConfig;
use crate::documents::{ScriptDocument, SCRIPT_DOCUMENTS};
use crate::engine::RenderEngine;
use crate::error::Script2PdfError;
use crate::output::{BatchOutcome, BatchStats, ConversionMode, DocumentResult};
use crate::{fallback, input};
use std::time::Instant;
use tracing::{info, warn};

/// Convert the two fixed script documents to PDF.
///
/// This is the primary entry point for the library.
///
/// Probes for a rendering engine once; renders each document when one is
/// found, otherwise copies each source verbatim to its destination name.
///
/// # Returns
/// A [`BatchOutcome`] in every case — missing sources, a missing engine, and
/// write failures are all recorded per document (check
/// `outcome.stats.failed`), never raised.
pub async fn run(config: &ConversionConfig) -> BatchOutcome {
    let total_start = Instant::now();
    let total = SCRIPT_DOCUMENTS.len();
    info!(
        "Starting script conversion: {} documents in {}",
        total,
        config.base_dir.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    // ── Step 1: Probe the engine once ────────────────────────────────────
    // A missing engine is not an error; it selects the fallback for the
    // whole run.
    let (mode, engine) = match RenderEngine::probe(config) {
        Ok(engine) => (ConversionMode::Rendered, Some(engine)),
        Err(e) => {
            warn!("{e}");
            if let Some(ref cb) = config.progress_callback {
                cb.on_fallback_engaged(&e.to_string());
            }
            (ConversionMode::CopiedVerbatim, None)
        }
    };

    // ── Step 2: Process documents sequentially, in table order ───────────
    let mut documents = Vec::with_capacity(total);
    for (i, doc) in SCRIPT_DOCUMENTS.iter().enumerate() {
        let doc_num = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_document_start(doc_num, total, doc.language.label());
        }

        let result = match &engine {
            Some(engine) => convert_document(engine, doc, config).await,
            None => fallback_document(doc, config).await,
        };

        if let Some(ref cb) = config.progress_callback {
            match &result.error {
                None => cb.on_document_complete(doc_num, total, result.bytes_written),
                Some(e) => cb.on_document_error(doc_num, total, &e.to_string()),
            }
        }
        documents.push(result);
    }

    // ── Step 3: Aggregate ────────────────────────────────────────────────
    let converted = documents.iter().filter(|d| d.succeeded()).count();
    let failed = documents.len() - converted;
    let stats = BatchStats {
        total_documents: total,
        converted,
        failed,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    if failed == 0 {
        info!(
            "All {} documents converted in {}ms",
            converted, stats.total_duration_ms
        );
    } else {
        warn!(
            "{}/{} documents converted ({} failed)",
            converted, total, failed
        );
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, converted);
    }

    BatchOutcome {
        mode,
        documents,
        stats,
    }
}

/// Synchronous wrapper around [`run`].
///
/// Creates a temporary tokio runtime internally.
pub fn run_sync(config: &ConversionConfig) -> Result<BatchOutcome, Script2PdfError> {
    Ok(tokio::runtime::Runtime::new()
        .map_err(|e| Script2PdfError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(run(config)))
}

/// Render one document through the engine.
///
/// Every failure — missing source, browser error, write error — is caught
/// and stored in the returned [`DocumentResult`]; this function never
/// returns `Err` and never panics on bad input.
pub async fn convert_document(
    engine: &RenderEngine,
    document: &ScriptDocument,
    config: &ConversionConfig,
) -> DocumentResult {
    let start = Instant::now();
    let source = document.source_path(&config.base_dir);
    let output = document.output_path(&config.base_dir);

    let attempt = async {
        let resolved = input::resolve_source(&source)?;
        engine.render_to_pdf(&resolved, &output, config).await
    };

    let (bytes_written, error) = match attempt.await {
        Ok(bytes) => {
            info!(
                "Converted {} → {} ({} bytes)",
                source.display(),
                output.display(),
                bytes
            );
            (bytes, None)
        }
        Err(e) => {
            warn!("Conversion failed for {}: {}", source.display(), e);
            (0, Some(e))
        }
    };

    DocumentResult {
        language: document.language,
        source,
        output,
        mode: ConversionMode::Rendered,
        bytes_written,
        duration_ms: start.elapsed().as_millis() as u64,
        error,
    }
}

/// Copy one document verbatim (degraded mode).
///
/// Same contract as [`convert_document`]: all failures are caught and
/// recorded in the result.
async fn fallback_document(document: &ScriptDocument, config: &ConversionConfig) -> DocumentResult {
    let start = Instant::now();
    let source = document.source_path(&config.base_dir);
    let output = document.output_path(&config.base_dir);

    let attempt = async {
        let resolved = input::resolve_source(&source)?;
        fallback::copy_verbatim(&resolved, &output).await
    };

    let (bytes_written, error) = match attempt.await {
        Ok(bytes) => (bytes, None),
        Err(e) => {
            warn!("Fallback copy failed for {}: {}", source.display(), e);
            (0, Some(e))
        }
    };

    DocumentResult {
        language: document.language,
        source,
        output,
        mode: ConversionMode::CopiedVerbatim,
        bytes_written,
        duration_ms: start.elapsed().as_millis() as u64,
        error,
    }
}
