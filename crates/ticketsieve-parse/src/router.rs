//! Format router: file → reader → classifier → field extraction.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use ticketsieve_core::{
    DocumentFormat, Error, ExtractionPath, ImageRef, NormalizedTicket, ReaderSet, Result,
    TicketSieveConfig, TicketSource,
};
use tracing::{debug, info};

use crate::classify::classify;
use crate::images::{select_significant, write_images};
use crate::{jira, tabular, tree, zendesk};

/// Ticket number embedded in an export filename, used to name the image
/// directory when the ticket itself carries no identifier.
static FILENAME_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5,7}").unwrap());

const UNKNOWN_TICKET_ID: &str = "unknown";

/// Parses ticket exports with whichever readers are available.
#[derive(Debug, Clone, Default)]
pub struct TicketParser {
    readers: ReaderSet,
    config: TicketSieveConfig,
}

impl TicketParser {
    pub fn new(readers: ReaderSet, config: TicketSieveConfig) -> Self {
        Self { readers, config }
    }

    pub fn config(&self) -> &TicketSieveConfig {
        &self.config
    }

    /// Parse one export file into a fresh ticket.
    ///
    /// The format is chosen by extension alone. Unsupported extensions are
    /// rejected before any reader is consulted.
    pub fn parse(&self, path: &Path) -> Result<NormalizedTicket> {
        let format = self.format_of(path)?;
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&file_name(path), format, &bytes)
    }

    /// Parse an export already held in memory. `filename` feeds the
    /// classifier and the identifier cascade.
    pub fn parse_bytes(
        &self,
        filename: &str,
        format: DocumentFormat,
        bytes: &[u8],
    ) -> Result<NormalizedTicket> {
        let ticket = match format.extraction_path() {
            ExtractionPath::LinearText => {
                let text = self.readers.text(format)?.read_text(bytes)?;
                let classification = classify(filename, &text);
                match classification.source {
                    TicketSource::Zendesk => zendesk::parse(filename, &text),
                    TicketSource::Jira => jira::parse(filename, &text),
                }
            }
            ExtractionPath::Tabular => {
                let rows = self.readers.tabular(format)?.read_rows(bytes)?;
                tabular::parse(&rows)?
            }
            ExtractionPath::Tree => {
                let root = self.readers.tree(format)?.read_tree(bytes)?;
                tree::parse(&root)
            }
            ExtractionPath::Paragraph => {
                let paragraphs = self.readers.paragraphs(format)?.read_paragraphs(bytes)?;
                jira::parse(filename, &paragraphs.join("\n"))
            }
        };

        info!(
            file = filename,
            %format,
            source = %ticket.source(),
            identifier = ticket.identifier.as_deref().unwrap_or("-"),
            "Parsed ticket export"
        );
        Ok(ticket)
    }

    /// Extract the significant images of a PDF export and attach them to
    /// `ticket`.
    ///
    /// Other formats yield no images. Without `output_dir`, images go to
    /// `images_<ticket id>` under the configured output root.
    pub fn extract_images(
        &self,
        path: &Path,
        ticket: &mut NormalizedTicket,
        output_dir: Option<&Path>,
    ) -> Result<Vec<ImageRef>> {
        let format = self.format_of(path)?;
        if format != DocumentFormat::Pdf {
            debug!("No image extraction for {} exports", format);
            return Ok(Vec::new());
        }

        let reader = self.readers.images(format)?;
        let bytes = std::fs::read(path)?;
        let selected = select_significant(reader.read_images(&bytes)?);

        let filename = file_name(path);
        let ticket_id = image_ticket_id(ticket, &filename);
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => self.config.image_dir_for(&ticket_id),
        };

        let refs = write_images(selected, &dir, &ticket_id)?;
        info!(
            count = refs.len(),
            dir = %dir.display(),
            "Extracted significant images"
        );

        ticket.extracted_images = refs.clone();
        Ok(refs)
    }

    fn format_of(&self, path: &Path) -> Result<DocumentFormat> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        DocumentFormat::from_extension(ext).ok_or_else(|| {
            let shown = if ext.is_empty() {
                "(no extension)".to_string()
            } else {
                format!(".{}", ext.to_lowercase())
            };
            Error::UnsupportedFormat(shown)
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Identifier, else a 5–7 digit run in the filename, else `unknown`.
fn image_ticket_id(ticket: &NormalizedTicket, filename: &str) -> String {
    if let Some(id) = &ticket.identifier {
        return id.clone();
    }
    FILENAME_ID_RE
        .find(filename)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_TICKET_ID.to_string())
}
