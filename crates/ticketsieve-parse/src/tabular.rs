//! Issue-tracker spreadsheet exports.
//!
//! Only single-ticket exports are handled. A sheet with several rows is a
//! batch export and is rejected outright rather than truncated.

use ticketsieve_core::{non_empty, Error, NormalizedTicket, Result, TableRow, TicketSource};
use tracing::warn;

use crate::cascade::{fallback_excerpt, split_list};

/// Candidate column names per field; a column matches when its name
/// contains a candidate, ignoring case. Earlier candidates win.
const IDENTIFIER_COLUMNS: &[&str] = &["Issue key", "Key", "Jira"];
const SUMMARY_COLUMNS: &[&str] = &["Summary", "Title"];
const DESCRIPTION_COLUMNS: &[&str] = &["Description"];
const PRIORITY_COLUMNS: &[&str] = &["Priority"];
const SEVERITY_COLUMNS: &[&str] = &["Severity", "Custom field (Severity)"];
const STATUS_COLUMNS: &[&str] = &["Status"];
const ASSIGNEE_COLUMNS: &[&str] = &["Assignee"];
const LABELS_COLUMNS: &[&str] = &["Labels"];
const RCA_COLUMNS: &[&str] = &["RCA", "Custom field (RCA)", "Root Cause Analysis"];
const CUSTOMER_COLUMNS: &[&str] = &["Customer", "Account", "Organization"];

/// First non-blank cell whose column name contains one of `candidates`.
pub fn lookup(row: &TableRow, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        let candidate = candidate.to_lowercase();
        row.cells
            .iter()
            .filter(|(column, _)| column.to_lowercase().contains(&candidate))
            .find_map(|(_, value)| non_empty(value))
    })
}

/// `Column: value` lines in column order.
pub fn render_row(row: &TableRow) -> String {
    row.cells
        .iter()
        .map(|(column, value)| format!("{}: {}", column, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a spreadsheet export that must hold exactly one ticket.
pub fn parse(rows: &[TableRow]) -> Result<NormalizedTicket> {
    let row = match rows {
        [row] => row,
        [] => {
            warn!("spreadsheet export has no rows");
            return Ok(NormalizedTicket::new(TicketSource::Jira, ""));
        }
        _ => return Err(Error::MultiRowTabularInput(rows.len())),
    };

    let raw_text = render_row(row);
    let description =
        lookup(row, DESCRIPTION_COLUMNS).unwrap_or_else(|| fallback_excerpt(&raw_text));
    let mut ticket = NormalizedTicket::new(TicketSource::Jira, raw_text);

    ticket.identifier = lookup(row, IDENTIFIER_COLUMNS);
    ticket.summary = lookup(row, SUMMARY_COLUMNS);
    ticket.description = description;
    ticket.priority = lookup(row, PRIORITY_COLUMNS);
    ticket.severity = lookup(row, SEVERITY_COLUMNS);
    ticket.status = lookup(row, STATUS_COLUMNS);
    ticket.assignee = lookup(row, ASSIGNEE_COLUMNS);
    ticket.labels = lookup(row, LABELS_COLUMNS)
        .map(|labels| split_list(&labels))
        .unwrap_or_default();
    ticket.rca = lookup(row, RCA_COLUMNS);
    ticket.customer = lookup(row, CUSTOMER_COLUMNS);

    Ok(ticket)
}
