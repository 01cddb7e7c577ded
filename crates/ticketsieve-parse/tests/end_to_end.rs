//! End-to-end parsing through the router with in-memory readers.

use std::path::{Path, PathBuf};

use ticketsieve_core::{
    Capability, DocumentFormat, Element, Error, ImageReader, PageImages, ParagraphReader,
    RawImage, ReaderSet, Result, TableReader, TableRow, TextReader, TicketSieveConfig,
    TicketSource, TreeReader,
};
use ticketsieve_parse::TicketParser;

const ACME_TEXT: &str =
    "#149320 Acme - memory alert\nSubmitted\nJane Doe Jan 5, 2024 at 10:02\nWe see high memory.\n";

struct FixedText(String);

impl TextReader for FixedText {
    fn read_text(&self, _bytes: &[u8]) -> Result<String> {
        Ok(self.0.clone())
    }
}

struct FixedRows(Vec<TableRow>);

impl TableReader for FixedRows {
    fn read_rows(&self, _bytes: &[u8]) -> Result<Vec<TableRow>> {
        Ok(self.0.clone())
    }
}

struct FixedTree(Element);

impl TreeReader for FixedTree {
    fn read_tree(&self, _bytes: &[u8]) -> Result<Element> {
        Ok(self.0.clone())
    }
}

struct FixedParagraphs(Vec<String>);

impl ParagraphReader for FixedParagraphs {
    fn read_paragraphs(&self, _bytes: &[u8]) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

struct FixedImages(Vec<(u32, u32)>);

impl ImageReader for FixedImages {
    fn read_images(&self, _bytes: &[u8]) -> Result<Vec<PageImages>> {
        let page = self
            .0
            .iter()
            .map(|&(width, height)| {
                Ok(RawImage {
                    width,
                    height,
                    data: vec![0x89, b'P', b'N', b'G'],
                    extension: "png".to_string(),
                })
            })
            .collect();
        Ok(vec![page])
    }
}

/// Fails the test if the router ever consults it.
struct Untouchable;

impl TextReader for Untouchable {
    fn read_text(&self, _bytes: &[u8]) -> Result<String> {
        panic!("text reader must not be called");
    }
}

impl TableReader for Untouchable {
    fn read_rows(&self, _bytes: &[u8]) -> Result<Vec<TableRow>> {
        panic!("table reader must not be called");
    }
}

impl TreeReader for Untouchable {
    fn read_tree(&self, _bytes: &[u8]) -> Result<Element> {
        panic!("tree reader must not be called");
    }
}

impl ParagraphReader for Untouchable {
    fn read_paragraphs(&self, _bytes: &[u8]) -> Result<Vec<String>> {
        panic!("paragraph reader must not be called");
    }
}

impl ImageReader for Untouchable {
    fn read_images(&self, _bytes: &[u8]) -> Result<Vec<PageImages>> {
        panic!("image reader must not be called");
    }
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"placeholder").unwrap();
    path
}

fn text_parser(text: &str) -> TicketParser {
    TicketParser::new(
        ReaderSet::new().with_text(FixedText(text.to_string())),
        TicketSieveConfig::default(),
    )
}

#[test]
fn test_support_desk_print_export() {
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "acme_tickets_149320_print.pdf");

    let ticket = text_parser(ACME_TEXT).parse(&path).unwrap();

    assert_eq!(ticket.source(), TicketSource::Zendesk);
    assert_eq!(ticket.identifier.as_deref(), Some("149320"));
    assert_eq!(ticket.summary.as_deref(), Some("Acme - memory alert"));
    assert!(ticket
        .description
        .contains("**Jane Doe Jan 5, 2024 at 10:02**\n\nWe see high memory."));
    assert!(!ticket.description.contains("Submitted"));
    assert_eq!(ticket.raw_text(), ACME_TEXT);
    assert!(ticket.extracted_images.is_empty());
}

#[test]
fn test_parsing_is_deterministic() {
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "acme_tickets_149320_print.pdf");
    let parser = text_parser(ACME_TEXT);

    let first = parser.parse(&path).unwrap();
    let second = parser.parse(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.to_summary_json().unwrap(),
        second.to_summary_json().unwrap()
    );
}

#[test]
fn test_no_comment_header_falls_back_to_raw_text() {
    let text = format!(
        "Ticket #42 about nothing in particular\nrequester unknown\n{}",
        "lorem ipsum ".repeat(200)
    );
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "export.pdf");

    let ticket = text_parser(&text).parse(&path).unwrap();

    assert_eq!(ticket.source(), TicketSource::Zendesk);
    assert_eq!(ticket.identifier.as_deref(), Some("42"));
    assert_eq!(ticket.description, text.chars().take(1000).collect::<String>());
}

#[test]
fn test_issue_tracker_text_export() {
    let text = "[RED-101] Cluster split brain Created: 2024-02-01\n\
                Project: RED\nIssue Type: Bug\nResolution: Unresolved\n\
                Priority: Blocker\nStatus: Open\n\
                Description: Both nodes claim primary.\nLabels: cluster\n";
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "RED-101.pdf");

    let ticket = text_parser(text).parse(&path).unwrap();

    assert_eq!(ticket.source(), TicketSource::Jira);
    assert_eq!(ticket.identifier.as_deref(), Some("RED-101"));
    assert_eq!(ticket.summary.as_deref(), Some("Cluster split brain"));
    assert_eq!(ticket.priority.as_deref(), Some("Blocker"));
    assert_eq!(ticket.description, "Both nodes claim primary.");
    assert_eq!(ticket.labels, vec!["cluster"]);
}

#[test]
fn test_unsupported_extension_never_reaches_a_reader() {
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "tickets.csv");
    let readers = ReaderSet::new()
        .with_text(Untouchable)
        .with_tabular(Untouchable)
        .with_tree(Untouchable)
        .with_paragraphs(Untouchable)
        .with_images(Untouchable);
    let parser = TicketParser::new(readers, TicketSieveConfig::default());

    assert!(matches!(parser.parse(&path), Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_missing_reader_only_disables_its_format() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf = touch(tmp.path(), "acme_tickets_149320_print.pdf");
    let xlsx = touch(tmp.path(), "RED-1.xlsx");
    let parser = text_parser(ACME_TEXT);

    match parser.parse(&xlsx) {
        Err(Error::MissingOptionalDependency { format, capability }) => {
            assert_eq!(format, DocumentFormat::Xlsx);
            assert_eq!(capability, Capability::Tabular);
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(parser.parse(&pdf).is_ok());
}

#[test]
fn test_missing_file_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let parser = text_parser(ACME_TEXT);
    assert!(matches!(
        parser.parse(&tmp.path().join("gone.pdf")),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_spreadsheet_batches_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "batch.xlsx");
    let row = |key: &str| TableRow::new(vec![("Issue key".to_string(), key.to_string())]);
    let parser = TicketParser::new(
        ReaderSet::new().with_tabular(FixedRows(vec![row("RED-1"), row("RED-2"), row("RED-3")])),
        TicketSieveConfig::default(),
    );

    assert!(matches!(
        parser.parse(&path),
        Err(Error::MultiRowTabularInput(3))
    ));
}

#[test]
fn test_xml_and_docx_exports() {
    let tmp = tempfile::tempdir().unwrap();
    let xml = touch(tmp.path(), "RED-5.xml");
    let docx = touch(tmp.path(), "RED-6.docx");

    let item = Element::new("item")
        .with_child(Element::new("key").with_text("RED-5"))
        .with_child(Element::new("summary").with_text("Eviction storm"));
    let readers = ReaderSet::new()
        .with_tree(FixedTree(Element::new("rss").with_child(item)))
        .with_paragraphs(FixedParagraphs(vec![
            "Issue Key: RED-6".to_string(),
            "Summary: TLS handshake fails".to_string(),
        ]));
    let parser = TicketParser::new(readers, TicketSieveConfig::default());

    let from_xml = parser.parse(&xml).unwrap();
    assert_eq!(from_xml.identifier.as_deref(), Some("RED-5"));
    assert_eq!(from_xml.summary.as_deref(), Some("Eviction storm"));

    let from_docx = parser.parse(&docx).unwrap();
    assert_eq!(from_docx.source(), TicketSource::Jira);
    assert_eq!(from_docx.identifier.as_deref(), Some("RED-6"));
    assert_eq!(from_docx.summary.as_deref(), Some("TLS handshake fails"));
}

#[test]
fn test_extract_images_into_default_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "acme_tickets_149320_print.pdf");
    let output_root = tmp.path().join("output");
    let parser = TicketParser::new(
        ReaderSet::new()
            .with_text(FixedText(ACME_TEXT.to_string()))
            .with_images(FixedImages(vec![(64, 64), (1280, 720), (499, 100)])),
        TicketSieveConfig::default().with_image_output_root(&output_root),
    );

    let mut ticket = parser.parse(&path).unwrap();
    let refs = parser.extract_images(&path, &mut ticket, None).unwrap();

    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].filename, "page1_img2_1280x720.png");
    assert_eq!(refs[0].relative_path, "images_149320/page1_img2_1280x720.png");
    assert_eq!(
        refs[0].path,
        output_root.join("images_149320").join("page1_img2_1280x720.png")
    );
    assert!(refs[0].path.exists());
    assert_eq!(ticket.extracted_images, refs);
}

#[test]
fn test_extract_images_from_non_pdf_is_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let path = touch(tmp.path(), "RED-5.xml");
    let parser = TicketParser::new(
        ReaderSet::new().with_images(Untouchable),
        TicketSieveConfig::default(),
    );
    let mut ticket = ticketsieve_core::NormalizedTicket::new(TicketSource::Jira, "");

    let refs = parser
        .extract_images(&path, &mut ticket, Some(tmp.path()))
        .unwrap();
    assert!(refs.is_empty());
}
