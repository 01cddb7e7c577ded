//! Issue-tracker (Jira) fields from linear text.
//!
//! Used for PDF print exports and for word-processor exports, which both
//! reduce to `Label: value` text. Print exports often lack the labelled
//! key and summary and only carry a `[KEY-123] Title Created: ...` title
//! line, hence the title fallbacks.

use once_cell::sync::Lazy;
use regex::Regex;
use ticketsieve_core::{NormalizedTicket, TicketSource};

use crate::cascade::{
    capture, fallback_excerpt, label_pattern, split_list, Cascade, Rule, TextSource,
};

static ISSUE_KEY_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Issue Key", r"[A-Z]+-\d+"));
static TITLE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\[?(?P<value>[A-Z]+-\d+)\]?").unwrap());

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Summary", ".+"));
static TITLE_SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\[[A-Z]+-\d+\]\s+(?P<value>.+?)\s+Created:").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TITLE_TAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(Updated|Status|Priority):.*$").unwrap());

// Runs until the next `Word:` label at a line start, or the end of text.
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)Description:\s*(?P<value>.+?)(?:\n[A-Z][a-z]+:|$)").unwrap()
});

static PRIORITY_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Priority", r"\w+"));
static SEVERITY_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Severity", ".+"));
static STATUS_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Status", r"\w+"));
static ASSIGNEE_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Assignee", ".+"));
static REPORTER_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Reporter", ".+"));
static LABELS_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Labels", ".+"));
static RCA_RE: Lazy<Regex> = Lazy::new(|| label_pattern("RCA", ".+"));

/// Customer-ish fields, most specific first.
static CUSTOMER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "Customer",
        "Account",
        "Organization",
        "Company",
        "Affected Organizations?",
        "Seen by Customers?",
    ]
    .iter()
    .map(|label| label_pattern(label, ".+"))
    .collect()
});

/// Values that mean "no customer" in exports.
const CUSTOMER_PLACEHOLDERS: &[&str] = &["None", "N/A", "-"];

pub static IDENTIFIER: Cascade = Cascade {
    field: "identifier",
    rules: &[
        Rule { name: "issue-key", extract: key_from_label },
        Rule { name: "title-line", extract: key_from_title },
    ],
};

pub static SUMMARY: Cascade = Cascade {
    field: "summary",
    rules: &[
        Rule { name: "summary", extract: summary_from_label },
        Rule { name: "title-line", extract: summary_from_title },
    ],
};

pub static DESCRIPTION: Cascade = Cascade {
    field: "description",
    rules: &[Rule { name: "description", extract: description_from_label }],
};

pub static CUSTOMER: Cascade = Cascade {
    field: "customer",
    rules: &[Rule { name: "customer-fields", extract: customer_from_fields }],
};

fn key_from_label(source: &TextSource<'_>) -> Option<String> {
    capture(&ISSUE_KEY_RE, source.text)
}

fn key_from_title(source: &TextSource<'_>) -> Option<String> {
    capture(&TITLE_KEY_RE, source.text)
}

fn summary_from_label(source: &TextSource<'_>) -> Option<String> {
    capture(&SUMMARY_RE, source.text)
}

fn summary_from_title(source: &TextSource<'_>) -> Option<String> {
    let title = capture(&TITLE_SUMMARY_RE, source.text)?;
    let title = WHITESPACE_RE.replace_all(&title, " ");
    Some(TITLE_TAIL_RE.replace(&title, "").into_owned())
}

fn description_from_label(source: &TextSource<'_>) -> Option<String> {
    capture(&DESCRIPTION_RE, source.text)
}

fn customer_from_fields(source: &TextSource<'_>) -> Option<String> {
    CUSTOMER_RES
        .iter()
        .filter_map(|re| capture(re, source.text))
        .find(|value| !CUSTOMER_PLACEHOLDERS.contains(&value.as_str()))
}

/// Assemble an issue-tracker ticket from linear text.
pub fn parse(filename: &str, raw_text: &str) -> NormalizedTicket {
    let source = TextSource::new(filename, raw_text);
    let mut ticket = NormalizedTicket::new(TicketSource::Jira, raw_text);

    ticket.identifier = IDENTIFIER.resolve(&source);
    ticket.summary = SUMMARY.resolve(&source);
    ticket.description = DESCRIPTION
        .resolve(&source)
        .unwrap_or_else(|| fallback_excerpt(raw_text));
    ticket.priority = capture(&PRIORITY_RE, raw_text);
    ticket.severity = capture(&SEVERITY_RE, raw_text);
    ticket.status = capture(&STATUS_RE, raw_text);
    ticket.assignee = capture(&ASSIGNEE_RE, raw_text);
    ticket.reporter = capture(&REPORTER_RE, raw_text);
    ticket.labels = capture(&LABELS_RE, raw_text)
        .map(|labels| split_list(&labels))
        .unwrap_or_default();
    ticket.rca = capture(&RCA_RE, raw_text);
    ticket.customer = CUSTOMER.resolve(&source);

    ticket
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELLED: &str = "Issue Key: RED-12345\n\
        Summary: Crash on failover\n\
        Priority: Critical\n\
        Severity: Sev 1 - outage\n\
        Status: Open\n\
        Assignee: Sam Roe\n\
        Reporter: Jane Doe\n\
        Labels: failover, crash\n\
        Description: Node crashes\nwhen the primary fails over.\n\
        Customer: N/A\n\
        Account: Acme Corp\n\
        RCA: Pending\n";

    #[test]
    fn test_labelled_export() {
        let ticket = parse("RED-12345.pdf", LABELLED);
        assert_eq!(ticket.source(), TicketSource::Jira);
        assert_eq!(ticket.identifier.as_deref(), Some("RED-12345"));
        assert_eq!(ticket.summary.as_deref(), Some("Crash on failover"));
        assert_eq!(ticket.priority.as_deref(), Some("Critical"));
        assert_eq!(ticket.severity.as_deref(), Some("Sev 1 - outage"));
        assert_eq!(ticket.status.as_deref(), Some("Open"));
        assert_eq!(ticket.assignee.as_deref(), Some("Sam Roe"));
        assert_eq!(ticket.reporter.as_deref(), Some("Jane Doe"));
        assert_eq!(ticket.labels, vec!["failover", "crash"]);
        assert_eq!(
            ticket.description,
            "Node crashes\nwhen the primary fails over."
        );
        assert_eq!(ticket.customer.as_deref(), Some("Acme Corp"));
        assert_eq!(ticket.rca.as_deref(), Some("Pending"));
    }

    #[test]
    fn test_title_line_fallbacks() {
        let text = "[RED-174782] Replica never\nrecovers after restart Updated: 2024-01-02 Created: 2024-01-01\nbody";
        let source = TextSource::new("export.pdf", text);
        assert_eq!(
            IDENTIFIER.resolve_with_rule(&source),
            Some(("title-line", "RED-174782".to_string()))
        );
        assert_eq!(
            SUMMARY.resolve_with_rule(&source),
            Some(("title-line", "Replica never recovers after restart".to_string()))
        );
    }

    #[test]
    fn test_description_runs_to_end_of_text() {
        let source = TextSource::new("x.pdf", "Description: only paragraph\nstill going");
        assert_eq!(
            DESCRIPTION.resolve(&source),
            Some("only paragraph\nstill going".to_string())
        );
    }

    #[test]
    fn test_missing_description_falls_back_to_raw_text() {
        let text = "x".repeat(1200);
        let ticket = parse("x.pdf", &text);
        assert_eq!(ticket.description.len(), 1000);
        assert_eq!(ticket.identifier, None);
        assert_eq!(ticket.summary, None);
        assert!(ticket.labels.is_empty());
    }

    #[test]
    fn test_customer_placeholders_are_skipped() {
        let source = TextSource::new("x.pdf", "Customer: -\nOrganization: None\n");
        assert_eq!(CUSTOMER.resolve(&source), None);
    }
}
