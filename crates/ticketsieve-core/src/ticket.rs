//! Normalized ticket record shared by every export format.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Minimum pixel width for an embedded image to be worth extracting.
pub const MIN_IMAGE_WIDTH: u32 = 500;
/// Minimum pixel height for an embedded image to be worth extracting.
pub const MIN_IMAGE_HEIGHT: u32 = 100;

/// Ticketing system that produced an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketSource {
    /// Issue tracker.
    Jira,
    /// Support desk.
    Zendesk,
}

impl std::fmt::Display for TicketSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jira => write!(f, "jira"),
            Self::Zendesk => write!(f, "zendesk"),
        }
    }
}

/// An image extracted from a ticket export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub path: PathBuf,
    /// `images_<ticket>/<filename>`, for report templates.
    pub relative_path: String,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// 1-based page number.
    pub page: u32,
    /// Filled in later by whoever looks at the image.
    pub description: String,
}

/// A ticket normalized from any supported export.
///
/// `source` and `raw_text` are fixed when the record is created; everything
/// else is populated by the extraction cascades. `identifier` and `summary`
/// are either a non-empty trimmed string or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTicket {
    source: TicketSource,
    pub identifier: Option<String>,
    pub summary: Option<String>,
    pub description: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub requester: Option<String>,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub severity: Option<String>,
    pub rca: Option<String>,
    pub customer: Option<String>,
    pub labels: Vec<String>,
    pub support_tier: Option<String>,
    raw_text: String,
    pub extracted_images: Vec<ImageRef>,
}

impl NormalizedTicket {
    pub fn new(source: TicketSource, raw_text: impl Into<String>) -> Self {
        Self {
            source,
            identifier: None,
            summary: None,
            description: String::new(),
            priority: None,
            status: None,
            requester: None,
            assignee: None,
            reporter: None,
            created: None,
            updated: None,
            severity: None,
            rca: None,
            customer: None,
            labels: Vec::new(),
            support_tier: None,
            raw_text: raw_text.into(),
            extracted_images: Vec::new(),
        }
    }

    pub fn source(&self) -> TicketSource {
        self.source
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// JSON view without `raw_text`, which is too verbose for terminal output.
    pub fn to_summary_json(&self) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("raw_text");
        }
        Ok(value)
    }
}

/// Trim a candidate field value; empty means absent.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  RED-1 "), Some("RED-1".to_string()));
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(""), None);
    }

    #[test]
    fn test_summary_json_drops_raw_text() {
        let mut ticket = NormalizedTicket::new(TicketSource::Zendesk, "full text");
        ticket.identifier = Some("149320".into());
        let json = ticket.to_summary_json().unwrap();
        assert_eq!(json["source"], "zendesk");
        assert_eq!(json["identifier"], "149320");
        assert!(json.get("raw_text").is_none());
        assert!(json["extracted_images"].as_array().unwrap().is_empty());
    }
}
