//! Configuration types for the HTML-to-PDF run.
//!
//! All behaviour is controlled through [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share the config between the CLI and tests, and to diff two
//! runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest. Note the document *paths* are not
//! here: which files are converted is fixed by
//! [`crate::documents::SCRIPT_DOCUMENTS`] and intentionally not configurable.

use crate::error::Script2PdfError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for a script-to-PDF run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use avenir_script2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .margin_in(0.75)
///     .render_timeout_secs(120)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Paper width in inches. Default: 8.5 (US Letter).
    ///
    /// The script documents are laid out for Letter; A4 callers can set
    /// 8.27 × 11.69 instead. The browser scales CSS pixels to fit.
    pub paper_width_in: f64,

    /// Paper height in inches. Default: 11.0 (US Letter).
    pub paper_height_in: f64,

    /// Uniform page margin in inches, applied to all four sides. Default: 0.5.
    ///
    /// Half an inch keeps dialogue tables clear of printer dead zones while
    /// leaving the script readable at a glance. Must stay under half the
    /// smaller paper dimension or the printable area vanishes.
    pub margin_in: f64,

    /// Landscape orientation. Default: false.
    pub landscape: bool,

    /// Render CSS backgrounds into the PDF. Default: true.
    ///
    /// The script documents use shaded table rows to mark speakers; without
    /// backgrounds those rows print as undifferentiated white.
    pub print_background: bool,

    /// Per-document render timeout in seconds. Default: 60.
    ///
    /// Covers browser launch, page load, and PDF generation for one document.
    /// The script documents render in well under a second; the margin exists
    /// for cold browser starts on slow machines.
    pub render_timeout_secs: u64,

    /// Explicit path to a Chrome/Chromium executable.
    ///
    /// If None, the engine probe consults the `CHROME` environment variable
    /// and then the platform's well-known install locations.
    pub chrome_path: Option<PathBuf>,

    /// Directory the fixed document filenames are resolved against.
    /// Default: `"."` (the working directory).
    pub base_dir: PathBuf,

    /// Progress callback fired per document. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            paper_width_in: 8.5,
            paper_height_in: 11.0,
            margin_in: 0.5,
            landscape: false,
            print_background: true,
            render_timeout_secs: 60,
            chrome_path: None,
            base_dir: PathBuf::from("."),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("paper_width_in", &self.paper_width_in)
            .field("paper_height_in", &self.paper_height_in)
            .field("margin_in", &self.margin_in)
            .field("landscape", &self.landscape)
            .field("print_background", &self.print_background)
            .field("render_timeout_secs", &self.render_timeout_secs)
            .field("chrome_path", &self.chrome_path)
            .field("base_dir", &self.base_dir)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn paper_size_in(mut self, width: f64, height: f64) -> Self {
        self.config.paper_width_in = width;
        self.config.paper_height_in = height;
        self
    }

    pub fn margin_in(mut self, margin: f64) -> Self {
        self.config.margin_in = margin;
        self
    }

    pub fn landscape(mut self, v: bool) -> Self {
        self.config.landscape = v;
        self
    }

    pub fn print_background(mut self, v: bool) -> Self {
        self.config.print_background = v;
        self
    }

    pub fn render_timeout_secs(mut self, secs: u64) -> Self {
        self.config.render_timeout_secs = secs.max(1);
        self
    }

    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = dir.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Script2PdfError> {
        let c = &self.config;
        if c.paper_width_in <= 0.0 || c.paper_height_in <= 0.0 {
            return Err(Script2PdfError::InvalidConfig(format!(
                "Paper size must be positive, got {}×{} in",
                c.paper_width_in, c.paper_height_in
            )));
        }
        if c.margin_in < 0.0 {
            return Err(Script2PdfError::InvalidConfig(format!(
                "Margin must be ≥ 0, got {}",
                c.margin_in
            )));
        }
        let min_edge = c.paper_width_in.min(c.paper_height_in);
        if c.margin_in * 2.0 >= min_edge {
            return Err(Script2PdfError::InvalidConfig(format!(
                "Margin {} in leaves no printable area on {}×{} in paper",
                c.margin_in, c.paper_width_in, c.paper_height_in
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_us_letter() {
        let c = ConversionConfig::default();
        assert_eq!(c.paper_width_in, 8.5);
        assert_eq!(c.paper_height_in, 11.0);
        assert_eq!(c.margin_in, 0.5);
        assert!(!c.landscape);
        assert!(c.print_background);
        assert_eq!(c.render_timeout_secs, 60);
        assert!(c.chrome_path.is_none());
    }

    #[test]
    fn builder_accepts_valid_overrides() {
        let c = ConversionConfig::builder()
            .paper_size_in(8.27, 11.69)
            .margin_in(0.75)
            .landscape(true)
            .render_timeout_secs(120)
            .base_dir("/tmp/scripts")
            .build()
            .unwrap();
        assert_eq!(c.paper_width_in, 8.27);
        assert!(c.landscape);
        assert_eq!(c.base_dir, PathBuf::from("/tmp/scripts"));
    }

    #[test]
    fn timeout_is_clamped_to_at_least_one_second() {
        let c = ConversionConfig::builder()
            .render_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(c.render_timeout_secs, 1);
    }

    #[test]
    fn negative_margin_is_rejected() {
        let err = ConversionConfig::builder().margin_in(-0.5).build();
        assert!(matches!(err, Err(Script2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn margin_swallowing_the_page_is_rejected() {
        let err = ConversionConfig::builder().margin_in(5.0).build();
        assert!(matches!(err, Err(Script2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn zero_paper_size_is_rejected() {
        let err = ConversionConfig::builder().paper_size_in(0.0, 11.0).build();
        assert!(matches!(err, Err(Script2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn debug_impl_elides_callback() {
        use crate::progress::NoopProgressCallback;
        use std::sync::Arc;

        let c = ConversionConfig::builder()
            .progress_callback(Arc::new(NoopProgressCallback))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn callback>"));
    }
}
