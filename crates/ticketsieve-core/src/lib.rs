//! ticketsieve core — ticket model, error taxonomy, configuration, reader interfaces.

pub mod capabilities;
pub mod config;
pub mod error;
pub mod format;
pub mod reader;
pub mod ticket;

pub use capabilities::{Capability, ReaderCapabilities};
pub use config::TicketSieveConfig;
pub use error::{Error, Result};
pub use format::{DocumentFormat, ExtractionPath};
pub use reader::{
    Element, ImageReader, ImageSlot, PageImages, ParagraphReader, RawImage, ReaderSet, TableReader,
    TableRow, TextReader, TreeReader,
};
pub use ticket::{
    non_empty, ImageRef, NormalizedTicket, TicketSource, MIN_IMAGE_HEIGHT, MIN_IMAGE_WIDTH,
};
