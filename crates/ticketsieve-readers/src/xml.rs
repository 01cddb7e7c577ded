//! XML exports via roxmltree.

use roxmltree::{Document, Node, ParsingOptions};
use ticketsieve_core::{Element, Error, Result, TreeReader};
use tracing::debug;

/// Converts an XML export into an owned [`Element`] tree.
///
/// Element names are local names; namespaces are dropped. An element's
/// text is the concatenation of its direct text and CDATA children, or
/// `None` when that is blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlTreeReader;

impl TreeReader for XmlTreeReader {
    fn read_tree(&self, bytes: &[u8]) -> Result<Element> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Reader(format!("XML is not valid UTF-8: {}", e)))?;

        // Issue-tracker RSS exports ship with a DOCTYPE
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)
            .map_err(|e| Error::Reader(format!("Failed to parse XML: {}", e)))?;

        let root = convert(doc.root_element());
        debug!(root = %root.name, "parsed XML export");
        Ok(root)
    }
}

fn convert(node: Node<'_, '_>) -> Element {
    let own_text: String = node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect();

    Element {
        name: node.tag_name().name().to_string(),
        text: (!own_text.trim().is_empty()).then_some(own_text),
        children: node
            .children()
            .filter(|child| child.is_element())
            .map(convert)
            .collect(),
    }
}
