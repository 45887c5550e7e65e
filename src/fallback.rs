//! Degraded mode: copy sources verbatim when no rendering engine exists.
//!
//! No format conversion happens here. The destination is the source's bytes
//! under the `.pdf` name, kept so the documents can still be printed to PDF
//! manually from a browser. This mirror-the-bytes behaviour is intentional
//! and must stay byte-exact: downstream checks compare the copy against the
//! source to confirm nothing was transformed.

use crate::error::DocumentError;
use std::path::Path;
use tracing::info;

/// Copy the source file's bytes to the destination path unchanged.
///
/// Overwrites an existing destination. Returns the number of bytes copied.
pub async fn copy_verbatim(source: &Path, dest: &Path) -> Result<u64, DocumentError> {
    let bytes = tokio::fs::copy(source, dest)
        .await
        .map_err(|e| DocumentError::CopyFailed {
            from: source.to_path_buf(),
            to: dest.to_path_buf(),
            detail: e.to_string(),
        })?;

    info!(
        "Copied {} → {} ({} bytes, no conversion)",
        source.display(),
        dest.display(),
        bytes
    );
    Ok(bytes)
}
