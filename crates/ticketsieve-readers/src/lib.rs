//! ticketsieve readers — concrete document readers behind cargo features.
//!
//! | feature | reader(s) |
//! |---------|-----------|
//! | `pdf`   | [`PdfTextReader`], [`PdfImageReader`] |
//! | `xlsx`  | [`XlsxTableReader`] |
//! | `xml`   | [`XmlTreeReader`] |
//! | `docx`  | [`DocxParagraphReader`] |

#[cfg(feature = "docx")]
pub mod docx;
#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "xlsx")]
pub mod xlsx;
#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "docx")]
pub use docx::DocxParagraphReader;
#[cfg(feature = "pdf")]
pub use pdf::{PdfImageReader, PdfTextReader};
#[cfg(feature = "xlsx")]
pub use xlsx::XlsxTableReader;
#[cfg(feature = "xml")]
pub use xml::XmlTreeReader;

use ticketsieve_core::ReaderSet;

/// Every reader compiled into this build.
#[allow(unused_mut)]
pub fn available_readers() -> ReaderSet {
    let mut readers = ReaderSet::new();

    #[cfg(feature = "pdf")]
    {
        readers = readers.with_text(PdfTextReader).with_images(PdfImageReader);
    }
    #[cfg(feature = "xlsx")]
    {
        readers = readers.with_tabular(XlsxTableReader);
    }
    #[cfg(feature = "xml")]
    {
        readers = readers.with_tree(XmlTreeReader);
    }
    #[cfg(feature = "docx")]
    {
        readers = readers.with_paragraphs(DocxParagraphReader);
    }

    tracing::debug!(capabilities = ?readers.capabilities(), "readers available");
    readers
}
