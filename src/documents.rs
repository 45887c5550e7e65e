//! The fixed table of script documents to convert.
//!
//! Centralising the document list here serves two purposes:
//!
//! 1. **Single source of truth** — the English and French variants are the
//!    only documents this tool handles; their filenames appear exactly once.
//!
//! 2. **Testability** — unit and integration tests resolve the same table
//!    against a temp directory instead of duplicating filename literals.
//!
//! The filenames are deliberately not configurable: the tool exists to
//! produce the two script PDFs next to their sources, nothing more.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Language variant of a script document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// English variant.
    En,
    /// French variant.
    Fr,
}

impl Language {
    /// Human-readable name, used in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One source/destination pair from the fixed document table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptDocument {
    /// Language variant of this document.
    pub language: Language,
    /// Source HTML filename, relative to the base directory.
    pub source: &'static str,
    /// Destination PDF filename, relative to the base directory.
    pub output: &'static str,
}

impl ScriptDocument {
    /// Absolute (or base-relative) path of the source file.
    pub fn source_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.source)
    }

    /// Absolute (or base-relative) path of the destination file.
    pub fn output_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.output)
    }
}

/// The two documents every run converts, in order.
pub const SCRIPT_DOCUMENTS: [ScriptDocument; 2] = [
    ScriptDocument {
        language: Language::En,
        source: "AVENIR_VIDEO_SCRIPT_CLEAN_EN.html",
        output: "AVENIR_VIDEO_SCRIPT_CLEAN_EN.pdf",
    },
    ScriptDocument {
        language: Language::Fr,
        source: "AVENIR_VIDEO_SCRIPT_CLEAN_FR.html",
        output: "AVENIR_VIDEO_SCRIPT_CLEAN_FR.pdf",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_english_then_french() {
        assert_eq!(SCRIPT_DOCUMENTS.len(), 2);
        assert_eq!(SCRIPT_DOCUMENTS[0].language, Language::En);
        assert_eq!(SCRIPT_DOCUMENTS[1].language, Language::Fr);
    }

    #[test]
    fn outputs_mirror_sources_with_pdf_extension() {
        for doc in SCRIPT_DOCUMENTS {
            let stem = doc.source.strip_suffix(".html").expect("source ends in .html");
            assert_eq!(doc.output, format!("{stem}.pdf"));
        }
    }

    #[test]
    fn paths_resolve_against_base_dir() {
        let base = Path::new("/work");
        let doc = SCRIPT_DOCUMENTS[0];
        assert_eq!(
            doc.source_path(base),
            Path::new("/work/AVENIR_VIDEO_SCRIPT_CLEAN_EN.html")
        );
        assert_eq!(
            doc.output_path(base),
            Path::new("/work/AVENIR_VIDEO_SCRIPT_CLEAN_EN.pdf")
        );
    }

    #[test]
    fn language_labels() {
        assert_eq!(Language::En.label(), "English");
        assert_eq!(Language::Fr.to_string(), "French");
    }
}
