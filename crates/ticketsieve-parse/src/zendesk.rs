//! Support-desk (Zendesk) print export fields.

use once_cell::sync::Lazy;
use regex::Regex;
use ticketsieve_core::{NormalizedTicket, TicketSource};

use crate::cascade::{capture, label_pattern, prefix_chars, split_list, Cascade, Rule, TextSource};
use crate::conversation;

/// Window searched for the primary ticket reference.
const PRIMARY_TICKET_WINDOW: usize = 2000;
/// Window searched for the title line.
const TITLE_WINDOW: usize = 500;

static FILENAME_TICKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tickets?_(?P<value>\d+)").unwrap());
// `#<id> <Customer> -` marks the primary ticket; other references in the
// body belong to related tickets.
static PRIMARY_TICKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(?P<value>\d{5,7})\s+[\w\s]+-").unwrap());
static ANY_TICKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Ticket #(?P<value>\d+)").unwrap());

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\d{5,7}\s+(?P<value>.+)").unwrap());
static TRAILING_SUBMITTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+Submitted$").unwrap());
static SUBJECT_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Subject", ".+"));

static PRIORITY_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Priority", r"\w+"));
static STATUS_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Status", r"\w+"));
static REQUESTER_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Requester", ".+"));
static ASSIGNEE_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Assignee", ".+"));
static CREATED_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Created", ".+"));
static UPDATED_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Updated", ".+"));
static TAGS_RE: Lazy<Regex> = Lazy::new(|| label_pattern("Tags", ".+"));

static SLA_PACKAGE_RE: Lazy<Regex> = Lazy::new(|| label_pattern("SLA Package", ".+"));
static TAM_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+TAM:.*").unwrap());
static VIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)VIP\s+(?:Support|Package|Customer)").unwrap());

/// Filename metadata first, then the anchored title reference, then any
/// `Ticket #` mention as a last resort.
pub static IDENTIFIER: Cascade = Cascade {
    field: "identifier",
    rules: &[
        Rule { name: "filename", extract: id_from_filename },
        Rule { name: "primary-reference", extract: id_from_primary_reference },
        Rule { name: "any-reference", extract: id_from_any_reference },
    ],
};

pub static SUMMARY: Cascade = Cascade {
    field: "summary",
    rules: &[
        Rule { name: "title-line", extract: summary_from_title },
        Rule { name: "subject", extract: summary_from_subject },
    ],
};

pub static SUPPORT_TIER: Cascade = Cascade {
    field: "support_tier",
    rules: &[
        Rule { name: "sla-package", extract: tier_from_sla_package },
        Rule { name: "vip", extract: tier_from_vip_mention },
    ],
};

fn id_from_filename(source: &TextSource<'_>) -> Option<String> {
    capture(&FILENAME_TICKET_RE, source.filename)
}

fn id_from_primary_reference(source: &TextSource<'_>) -> Option<String> {
    capture(&PRIMARY_TICKET_RE, prefix_chars(source.text, PRIMARY_TICKET_WINDOW))
}

fn id_from_any_reference(source: &TextSource<'_>) -> Option<String> {
    capture(&ANY_TICKET_RE, source.text)
}

fn summary_from_title(source: &TextSource<'_>) -> Option<String> {
    let title = capture(&TITLE_RE, prefix_chars(source.text, TITLE_WINDOW))?;
    Some(TRAILING_SUBMITTED_RE.replace(&title, "").into_owned())
}

fn summary_from_subject(source: &TextSource<'_>) -> Option<String> {
    capture(&SUBJECT_RE, source.text)
}

fn tier_from_sla_package(source: &TextSource<'_>) -> Option<String> {
    let tier = capture(&SLA_PACKAGE_RE, source.text)?;
    Some(TAM_SUFFIX_RE.replace(&tier, "").into_owned())
}

fn tier_from_vip_mention(source: &TextSource<'_>) -> Option<String> {
    VIP_RE
        .is_match(source.text)
        .then(|| "VIP Support".to_string())
}

/// Assemble a support-desk ticket from its linear text.
pub fn parse(filename: &str, raw_text: &str) -> NormalizedTicket {
    let source = TextSource::new(filename, raw_text);
    let mut ticket = NormalizedTicket::new(TicketSource::Zendesk, raw_text);

    ticket.identifier = IDENTIFIER.resolve(&source);
    ticket.summary = SUMMARY.resolve(&source);
    ticket.description = conversation::reconstruct(raw_text);
    ticket.priority = capture(&PRIORITY_RE, raw_text);
    ticket.status = capture(&STATUS_RE, raw_text);
    ticket.requester = capture(&REQUESTER_RE, raw_text);
    ticket.assignee = capture(&ASSIGNEE_RE, raw_text);
    ticket.created = capture(&CREATED_RE, raw_text);
    ticket.updated = capture(&UPDATED_RE, raw_text);
    ticket.labels = capture(&TAGS_RE, raw_text)
        .map(|tags| split_list(&tags))
        .unwrap_or_default();
    ticket.support_tier = SUPPORT_TIER.resolve(&source);

    ticket
}
