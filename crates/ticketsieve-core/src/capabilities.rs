//! Reader capability detection.
//!
//! Each export format needs one decoding capability. Readers are optional,
//! so a runtime built without, say, spreadsheet support still parses PDFs
//! and only fails for the formats whose reader is missing.

use serde::{Deserialize, Serialize};

use crate::format::DocumentFormat;

/// A decoding capability supplied by an external reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Linear text of a paginated document.
    Text,
    /// Embedded raster images of a paginated document.
    Images,
    /// Spreadsheet rows.
    Tabular,
    /// XML element tree.
    Tree,
    /// Word-processor paragraphs.
    Paragraphs,
}

impl Capability {
    /// The capability needed to parse ticket fields out of `format`.
    pub fn for_format(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Pdf => Self::Text,
            DocumentFormat::Xlsx => Self::Tabular,
            DocumentFormat::Xml => Self::Tree,
            DocumentFormat::Docx => Self::Paragraphs,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Images => write!(f, "image"),
            Self::Tabular => write!(f, "spreadsheet"),
            Self::Tree => write!(f, "xml"),
            Self::Paragraphs => write!(f, "word-processor"),
        }
    }
}

/// Which reader capabilities are present in the current runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderCapabilities {
    pub text: bool,
    pub images: bool,
    pub tabular: bool,
    pub tree: bool,
    pub paragraphs: bool,
}

impl ReaderCapabilities {
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Text => self.text,
            Capability::Images => self.images,
            Capability::Tabular => self.tabular,
            Capability::Tree => self.tree,
            Capability::Paragraphs => self.paragraphs,
        }
    }

    /// Whether ticket fields can be parsed from `format`.
    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.has(Capability::for_format(format))
    }

    /// Formats that can be parsed, in a fixed order.
    pub fn supported_formats(&self) -> Vec<DocumentFormat> {
        [
            DocumentFormat::Pdf,
            DocumentFormat::Xlsx,
            DocumentFormat::Xml,
            DocumentFormat::Docx,
        ]
        .into_iter()
        .filter(|f| self.supports(*f))
        .collect()
    }
}
