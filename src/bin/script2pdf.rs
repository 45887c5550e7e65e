//! CLI binary for avenir-script2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints per-document status plus a summary.

use anyhow::{Context, Result};
use avenir_script2pdf::{
    run, ConversionConfig, ConversionProgressCallback, ProgressCallback,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner plus one log line per document.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Per-document wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Locating rendering engine…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
        })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_documents: usize) {
        self.bar.set_length(total_documents as u64);
        self.bar.set_prefix("Converting");
    }

    fn on_fallback_engaged(&self, _reason: &str) {
        self.bar.set_prefix("Copying");
        self.bar.println(format!(
            "{} {}",
            cyan("⚠"),
            bold("No rendering engine found — copying files verbatim for manual conversion")
        ));
    }

    fn on_document_start(&self, doc_num: usize, _total: usize, label: &str) {
        self.start_times
            .lock()
            .unwrap()
            .insert(doc_num, Instant::now());
        self.bar.set_message(format!("{label} script"));
    }

    fn on_document_complete(&self, doc_num: usize, total: usize, bytes_written: u64) {
        let elapsed_ms = self.elapsed_ms(doc_num);
        self.bar.println(format!(
            "  {} Document {}/{}  {:<12}  {}",
            green("✓"),
            doc_num,
            total,
            dim(&format!("{bytes_written} bytes")),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, doc_num: usize, total: usize, error: &str) {
        let elapsed_ms = self.elapsed_ms(doc_num);

        // Keep one line per document; the first line of the error names the cause.
        let msg = error.lines().next().unwrap_or(error);
        self.bar.println(format!(
            "  {} Document {}/{}  {}  {}",
            red("✗"),
            doc_num,
            total,
            red(msg),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _total_documents: usize, _success_count: usize) {
        self.bar.finish_and_clear();
    }
}

impl CliProgressCallback {
    fn elapsed_ms(&self, doc_num: usize) -> u128 {
        self.start_times
            .lock()
            .unwrap()
            .remove(&doc_num)
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0)
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert both script documents in the current directory
  script2pdf

  # Use a specific browser executable
  script2pdf --chrome /usr/bin/chromium

  # Wider margins, landscape, no progress spinner
  script2pdf --margin 0.75 --landscape --no-progress

  # Machine-readable results
  script2pdf --json > outcome.json

DOCUMENTS:
  The two documents are fixed and read from the working directory:
    AVENIR_VIDEO_SCRIPT_CLEAN_EN.html  →  AVENIR_VIDEO_SCRIPT_CLEAN_EN.pdf
    AVENIR_VIDEO_SCRIPT_CLEAN_FR.html  →  AVENIR_VIDEO_SCRIPT_CLEAN_FR.pdf

FALLBACK:
  Without a usable Chrome/Chromium the sources are copied byte-for-byte to
  the .pdf names (no conversion) so they can be printed manually later.

ENVIRONMENT VARIABLES:
  CHROME                  Path to a Chrome/Chromium executable
  SCRIPT2PDF_TIMEOUT      Per-document render timeout in seconds
  RUST_LOG                Tracing filter (overrides -v/-q defaults)

EXIT STATUS:
  Always 0. Failed conversions are reported in the output, not the exit code.
"#;

/// Render the Avenir video-script HTML documents to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "script2pdf",
    version,
    about = "Render the Avenir video-script HTML documents (EN + FR) to PDF",
    long_about = "Render the two Avenir video-script HTML documents to PDF using a headless \
Chrome/Chromium. On machines without a browser the sources are copied verbatim \
under the .pdf names for manual conversion.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to a Chrome/Chromium executable.
    #[arg(long, env = "CHROME")]
    chrome: Option<PathBuf>,

    /// Per-document render timeout in seconds.
    #[arg(long, env = "SCRIPT2PDF_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Uniform page margin in inches.
    #[arg(long, default_value_t = 0.5)]
    margin: f64,

    /// Landscape orientation.
    #[arg(long)]
    landscape: bool,

    /// Skip CSS backgrounds when printing.
    #[arg(long)]
    no_background: bool,

    /// Output the run outcome as JSON instead of status lines.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress callback is active;
    // the per-document lines provide all the feedback that matters.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .margin_in(cli.margin)
        .landscape(cli.landscape)
        .print_background(!cli.no_background)
        .render_timeout_secs(cli.timeout);

    if let Some(chrome) = cli.chrome.clone() {
        builder = builder.chrome_path(chrome);
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    // Conversion failures are part of the outcome, not process errors: the
    // summary names them and the exit status stays 0.
    let outcome = run(&config).await;

    if cli.json {
        let json =
            serde_json::to_string_pretty(&outcome).context("Failed to serialise outcome")?;
        println!("{json}");
        return Ok(());
    }

    if !cli.quiet {
        let note = match outcome.mode {
            avenir_script2pdf::ConversionMode::Rendered => String::new(),
            avenir_script2pdf::ConversionMode::CopiedVerbatim => {
                format!("  {}", dim("(verbatim copies — print manually from a browser)"))
            }
        };

        if outcome.all_succeeded() {
            eprintln!(
                "{} {} script PDFs created  {}ms{}",
                green("✔"),
                bold(&outcome.stats.converted.to_string()),
                outcome.stats.total_duration_ms,
                note,
            );
        } else {
            eprintln!(
                "{} {}/{} documents converted  ({} failed){}",
                if outcome.stats.converted == 0 {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&outcome.stats.converted.to_string()),
                outcome.stats.total_documents,
                red(&outcome.stats.failed.to_string()),
                note,
            );
        }
    }

    Ok(())
}
