//! The HTML rendering capability: locate a browser and print documents.
//!
//! ## Why spawn_blocking?
//!
//! The `headless_chrome` crate drives a real Chrome process over the DevTools
//! protocol with synchronous, blocking calls. `tokio::task::spawn_blocking`
//! moves that work onto a dedicated thread-pool thread so the async executor
//! is never stalled while the browser launches or prints.
//!
//! ## Why probe separately from rendering?
//!
//! Whether a browser exists on the machine is decided once, before any
//! document is touched. [`RenderEngine::probe`] does only the executable
//! lookup; a failed probe selects the verbatim-copy fallback for the whole
//! run. Errors during an actual print (crashed tab, bad HTML reference,
//! timeout) are per-document and do not affect the other document.

use crate::config::ConversionConfig;
use crate::error::{DocumentError, Script2PdfError};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{browser::default_executable, Browser, LaunchOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// A probed, ready-to-use rendering engine.
///
/// Holds the resolved browser executable path. Each document print launches
/// a fresh headless browser; for a two-document run this costs far less than
/// the machinery to keep one warm, and a crashed browser can never poison
/// the other document's attempt.
#[derive(Debug)]
pub struct RenderEngine {
    executable: PathBuf,
}

impl RenderEngine {
    /// Locate a usable Chrome/Chromium executable.
    ///
    /// Resolution order, most-specific first:
    ///
    /// 1. `config.chrome_path` — the caller named an executable explicitly.
    /// 2. The `CHROME` environment variable and the platform's well-known
    ///    install locations, via [`default_executable`].
    ///
    /// A failed probe is the "missing rendering capability" condition: the
    /// orchestrator responds by copying sources verbatim instead of
    /// rendering. Nothing is launched here; launch errors surface later,
    /// per document.
    pub fn probe(config: &ConversionConfig) -> Result<Self, Script2PdfError> {
        let executable = match &config.chrome_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Script2PdfError::EngineUnavailable {
                        detail: format!(
                            "configured browser '{}' does not exist",
                            path.display()
                        ),
                    });
                }
                path.clone()
            }
            None => default_executable()
                .map_err(|detail| Script2PdfError::EngineUnavailable { detail })?,
        };

        info!("Rendering engine: {}", executable.display());
        Ok(Self { executable })
    }

    /// Path of the probed browser executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Print one HTML document to a PDF file.
    ///
    /// Launches the browser, loads the source over a `file://` URL, prints
    /// it with the configured page options, and writes the PDF atomically
    /// (temp file + rename) so a failed run never leaves a truncated output.
    ///
    /// # Returns
    /// The number of bytes written to `dest`.
    pub async fn render_to_pdf(
        &self,
        source: &Path,
        dest: &Path,
        config: &ConversionConfig,
    ) -> Result<u64, DocumentError> {
        let pdf = self.print_document(source, config).await?;
        debug!(
            "Printed {} → {} bytes of PDF",
            source.display(),
            pdf.len()
        );

        write_atomic(dest, &pdf).await?;
        Ok(pdf.len() as u64)
    }

    /// Render the source document to PDF bytes in memory.
    async fn print_document(
        &self,
        source: &Path,
        config: &ConversionConfig,
    ) -> Result<Vec<u8>, DocumentError> {
        // file:// URLs must be absolute; canonicalise relative to the cwd.
        let canonical = std::fs::canonicalize(source).map_err(|e| DocumentError::RenderFailed {
            path: source.to_path_buf(),
            detail: format!("could not canonicalise path: {e}"),
        })?;
        let url = file_url(&canonical);
        debug!("Loading {}", url);

        let executable = self.executable.clone();
        let options = pdf_options(config);
        let timeout = Duration::from_secs(config.render_timeout_secs);

        let task =
            tokio::task::spawn_blocking(move || print_blocking(&executable, &url, options, timeout));

        match tokio::time::timeout(timeout, task).await {
            Err(_) => Err(DocumentError::RenderTimeout {
                path: source.to_path_buf(),
                secs: config.render_timeout_secs,
            }),
            Ok(Err(join_err)) => Err(DocumentError::RenderFailed {
                path: source.to_path_buf(),
                detail: format!("render task panicked: {join_err}"),
            }),
            Ok(Ok(Err(detail))) => Err(DocumentError::RenderFailed {
                path: source.to_path_buf(),
                detail,
            }),
            Ok(Ok(Ok(bytes))) => Ok(bytes),
        }
    }
}

/// Blocking implementation of one browser print.
///
/// Every fallible step maps to a plain detail string; the async wrapper
/// attaches the document path.
fn print_blocking(
    executable: &Path,
    url: &str,
    options: PrintToPdfOptions,
    timeout: Duration,
) -> Result<Vec<u8>, String> {
    let launch = LaunchOptions::default_builder()
        .path(Some(executable.to_path_buf()))
        .headless(true)
        .idle_browser_timeout(timeout)
        .build()
        .map_err(|e| format!("invalid launch options: {e}"))?;

    let browser = Browser::new(launch).map_err(|e| format!("failed to launch browser: {e}"))?;
    let tab = browser
        .new_tab()
        .map_err(|e| format!("failed to open tab: {e}"))?;
    tab.set_default_timeout(timeout);

    tab.navigate_to(url)
        .map_err(|e| format!("failed to load document: {e}"))?
        .wait_until_navigated()
        .map_err(|e| format!("document did not finish loading: {e}"))?;

    tab.print_to_pdf(Some(options))
        .map_err(|e| format!("print to PDF failed: {e}"))
}

/// Map the page-layout half of the config onto DevTools print options.
fn pdf_options(config: &ConversionConfig) -> PrintToPdfOptions {
    PrintToPdfOptions {
        landscape: Some(config.landscape),
        display_header_footer: Some(false),
        print_background: Some(config.print_background),
        paper_width: Some(config.paper_width_in),
        paper_height: Some(config.paper_height_in),
        margin_top: Some(config.margin_in),
        margin_bottom: Some(config.margin_in),
        margin_left: Some(config.margin_in),
        margin_right: Some(config.margin_in),
        prefer_css_page_size: Some(false),
        ..Default::default()
    }
}

/// Build a `file://` URL for an absolute path.
fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Write `bytes` to `dest` atomically: temp file in the same directory,
/// then rename over the destination.
async fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), DocumentError> {
    let write_err = |e: std::io::Error| DocumentError::OutputWrite {
        path: dest.to_path_buf(),
        detail: e.to_string(),
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
    }

    let tmp_path = dest.with_extension("pdf.tmp");
    tokio::fs::write(&tmp_path, bytes).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, dest).await.map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_rejects_nonexistent_configured_browser() {
        let config = ConversionConfig::builder()
            .chrome_path("/no/such/chromium")
            .build()
            .unwrap();

        let err = RenderEngine::probe(&config).unwrap_err();
        assert!(matches!(err, Script2PdfError::EngineUnavailable { .. }));
        assert!(err.to_string().contains("/no/such/chromium"));
    }

    #[test]
    fn probe_accepts_existing_configured_path() {
        // Any existing file passes the probe; launch failures are per-document.
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("chromium");
        std::fs::write(&fake, "").unwrap();

        let config = ConversionConfig::builder()
            .chrome_path(&fake)
            .build()
            .unwrap();

        let engine = RenderEngine::probe(&config).unwrap();
        assert_eq!(engine.executable(), fake.as_path());
    }

    #[test]
    fn file_url_prefixes_scheme() {
        assert_eq!(
            file_url(Path::new("/work/doc.html")),
            "file:///work/doc.html"
        );
    }

    #[test]
    fn pdf_options_reflect_config() {
        let config = ConversionConfig::builder()
            .paper_size_in(8.27, 11.69)
            .margin_in(0.75)
            .landscape(true)
            .print_background(false)
            .build()
            .unwrap();

        let opts = pdf_options(&config);
        assert_eq!(opts.landscape, Some(true));
        assert_eq!(opts.print_background, Some(false));
        assert_eq!(opts.paper_width, Some(8.27));
        assert_eq!(opts.paper_height, Some(11.69));
        assert_eq!(opts.margin_top, Some(0.75));
        assert_eq!(opts.display_header_footer, Some(false));
    }

    #[tokio::test]
    async fn write_atomic_creates_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");

        write_atomic(&dest, b"first").await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"first");

        write_atomic(&dest, b"second").await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"second");

        // No stray temp file left behind.
        assert!(!dir.path().join("out.pdf.tmp").exists());
    }
}
