//! Supported export formats and the extraction path each one takes.

use serde::{Deserialize, Serialize};

/// Export formats a ticket can arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Xlsx,
    Xml,
    Docx,
}

/// How a format is turned into ticket fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    /// One concatenated text stream; shared by both ticketing systems.
    LinearText,
    /// Rows of named columns.
    Tabular,
    /// Element tree queried by element name.
    Tree,
    /// Word-processor paragraphs.
    Paragraph,
}

impl DocumentFormat {
    /// Detect the format from a file extension (with or without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "xlsx" => Some(Self::Xlsx),
            "xml" => Some(Self::Xml),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn extraction_path(&self) -> ExtractionPath {
        match self {
            Self::Pdf => ExtractionPath::LinearText,
            Self::Xlsx => ExtractionPath::Tabular,
            Self::Xml => ExtractionPath::Tree,
            Self::Docx => ExtractionPath::Paragraph,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Xlsx => "xlsx",
            Self::Xml => "xml",
            Self::Docx => "docx",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
