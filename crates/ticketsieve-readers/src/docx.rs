//! Word-processor exports: `word/document.xml` read out of the zip
//! container and walked with roxmltree.

use std::io::{Cursor, Read};

use roxmltree::{Document, Node};
use ticketsieve_core::{Error, ParagraphReader, Result};
use tracing::debug;

const DOCUMENT_PART: &str = "word/document.xml";

/// Body paragraphs in document order, empty ones included. Paragraphs
/// nested in tables, headers and footers are not part of the body text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxParagraphReader;

impl ParagraphReader for DocxParagraphReader {
    fn read_paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let xml = document_part(bytes)?;
        let doc = Document::parse(&xml)
            .map_err(|e| Error::Reader(format!("Invalid {}: {}", DOCUMENT_PART, e)))?;

        let Some(body) = doc
            .root_element()
            .children()
            .find(|n| n.tag_name().name() == "body")
        else {
            return Err(Error::Reader("DOCX document has no body".to_string()));
        };

        let paragraphs: Vec<String> = body
            .children()
            .filter(|n| n.tag_name().name() == "p")
            .map(paragraph_text)
            .collect();

        debug!(paragraphs = paragraphs.len(), "read DOCX body");
        Ok(paragraphs)
    }
}

fn document_part(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Reader(format!("Invalid DOCX container: {}", e)))?;
    let mut entry = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| Error::Reader(format!("DOCX has no {}: {}", DOCUMENT_PART, e)))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

fn paragraph_text(paragraph: Node<'_, '_>) -> String {
    let mut text = String::new();
    for node in paragraph.descendants().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "t" => text.push_str(node.text().unwrap_or("")),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}
