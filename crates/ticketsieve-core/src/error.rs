//! Error types for ticketsieve.

use thiserror::Error;

use crate::capabilities::Capability;
use crate::format::DocumentFormat;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Missing optional dependency: {capability} reader required for {format} support")]
    MissingOptionalDependency {
        format: DocumentFormat,
        capability: Capability,
    },

    #[error("Batch spreadsheet exports not supported ({0} rows); use a batch scoring tool instead")]
    MultiRowTabularInput(usize),

    #[error("Reader error: {0}")]
    Reader(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
