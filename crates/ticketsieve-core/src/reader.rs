//! Document reader interfaces.
//!
//! Format decoding lives outside the parsing engine. Every capability is a
//! separate trait so readers can be supplied (or left out) independently;
//! [`ReaderSet`] bundles whichever are available.

use std::sync::Arc;

use crate::capabilities::{Capability, ReaderCapabilities};
use crate::error::{Error, Result};
use crate::format::DocumentFormat;

/// Extracts the text of every page, concatenated in page order.
pub trait TextReader: Send + Sync {
    fn read_text(&self, bytes: &[u8]) -> Result<String>;
}

/// Extracts the embedded raster images of every page.
pub trait ImageReader: Send + Sync {
    /// One entry per page, in page order. Within a page, slots follow
    /// document order; a slot the reader could not decode is an `Err`.
    fn read_images(&self, bytes: &[u8]) -> Result<Vec<PageImages>>;
}

/// Reads spreadsheet rows keyed by header name.
pub trait TableReader: Send + Sync {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<TableRow>>;
}

/// Parses an XML export into an owned element tree.
pub trait TreeReader: Send + Sync {
    fn read_tree(&self, bytes: &[u8]) -> Result<Element>;
}

/// Extracts word-processor paragraphs in document order.
pub trait ParagraphReader: Send + Sync {
    fn read_paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// A raster image as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// File extension matching `data`, without the dot (e.g. `png`, `jpg`).
    pub extension: String,
}

pub type ImageSlot = Result<RawImage>;

/// Image slots of a single page.
pub type PageImages = Vec<ImageSlot>;

/// One spreadsheet row: `(column, value)` pairs in column order.
/// Blank cells are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<(String, String)>,
}

impl TableRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }
}

/// Owned XML element: local name, own text, children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// First descendant (depth-first, document order) named `name`.
    /// The element itself is not considered.
    pub fn find(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Direct children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Non-blank texts of this element and its descendants, one per line,
    /// in document order.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.collect_text(&mut lines);
        lines.join("\n")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(text) = self.text.as_deref().map(str::trim) {
            if !text.is_empty() {
                out.push(text);
            }
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// The readers available to a parser. Any of them may be absent.
#[derive(Clone, Default)]
pub struct ReaderSet {
    text: Option<Arc<dyn TextReader>>,
    images: Option<Arc<dyn ImageReader>>,
    tabular: Option<Arc<dyn TableReader>>,
    tree: Option<Arc<dyn TreeReader>>,
    paragraphs: Option<Arc<dyn ParagraphReader>>,
}

impl ReaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, reader: impl TextReader + 'static) -> Self {
        self.text = Some(Arc::new(reader));
        self
    }

    pub fn with_images(mut self, reader: impl ImageReader + 'static) -> Self {
        self.images = Some(Arc::new(reader));
        self
    }

    pub fn with_tabular(mut self, reader: impl TableReader + 'static) -> Self {
        self.tabular = Some(Arc::new(reader));
        self
    }

    pub fn with_tree(mut self, reader: impl TreeReader + 'static) -> Self {
        self.tree = Some(Arc::new(reader));
        self
    }

    pub fn with_paragraphs(mut self, reader: impl ParagraphReader + 'static) -> Self {
        self.paragraphs = Some(Arc::new(reader));
        self
    }

    /// Probe which capabilities are present.
    pub fn capabilities(&self) -> ReaderCapabilities {
        ReaderCapabilities {
            text: self.text.is_some(),
            images: self.images.is_some(),
            tabular: self.tabular.is_some(),
            tree: self.tree.is_some(),
            paragraphs: self.paragraphs.is_some(),
        }
    }

    pub fn text(&self, format: DocumentFormat) -> Result<&dyn TextReader> {
        self.text
            .as_deref()
            .ok_or_else(|| missing(format, Capability::Text))
    }

    pub fn images(&self, format: DocumentFormat) -> Result<&dyn ImageReader> {
        self.images
            .as_deref()
            .ok_or_else(|| missing(format, Capability::Images))
    }

    pub fn tabular(&self, format: DocumentFormat) -> Result<&dyn TableReader> {
        self.tabular
            .as_deref()
            .ok_or_else(|| missing(format, Capability::Tabular))
    }

    pub fn tree(&self, format: DocumentFormat) -> Result<&dyn TreeReader> {
        self.tree
            .as_deref()
            .ok_or_else(|| missing(format, Capability::Tree))
    }

    pub fn paragraphs(&self, format: DocumentFormat) -> Result<&dyn ParagraphReader> {
        self.paragraphs
            .as_deref()
            .ok_or_else(|| missing(format, Capability::Paragraphs))
    }
}

impl std::fmt::Debug for ReaderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSet")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

fn missing(format: DocumentFormat, capability: Capability) -> Error {
    Error::MissingOptionalDependency { format, capability }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoText;

    impl TextReader for EchoText {
        fn read_text(&self, bytes: &[u8]) -> Result<String> {
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    #[test]
    fn test_missing_reader_is_reported_per_format() {
        let readers = ReaderSet::new().with_text(EchoText);
        assert!(readers.text(DocumentFormat::Pdf).is_ok());

        match readers.tabular(DocumentFormat::Xlsx) {
            Err(Error::MissingOptionalDependency { format, capability }) => {
                assert_eq!(format, DocumentFormat::Xlsx);
                assert_eq!(capability, Capability::Tabular);
            }
            _ => panic!("expected MissingOptionalDependency"),
        }
    }

    #[test]
    fn test_capabilities_reflect_readers() {
        let caps = ReaderSet::new().with_text(EchoText).capabilities();
        assert!(caps.text);
        assert!(!caps.images);
        assert!(!caps.tree);
    }

    #[test]
    fn test_element_find_is_depth_first() {
        let tree = Element::new("rss").with_child(
            Element::new("channel").with_child(
                Element::new("item")
                    .with_child(Element::new("key").with_text("RED-1"))
                    .with_child(Element::new("summary").with_text("Crash")),
            ),
        );
        assert_eq!(tree.find("key").and_then(|e| e.text.as_deref()), Some("RED-1"));
        assert!(tree.find("rss").is_none());
        assert!(tree.find("missing").is_none());
        assert_eq!(tree.text_content(), "RED-1\nCrash");
    }
}
