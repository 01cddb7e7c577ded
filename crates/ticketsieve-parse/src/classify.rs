//! Source classification for linear-text exports.
//!
//! Print exports carry no explicit format marker, so the producing system is
//! decided from the filename and the extracted text. The checks form an
//! ordered decision table: unambiguous signals (filename, domain) come
//! first, then strong issue-tracker evidence is allowed to veto the weaker
//! helpdesk marker count, and the issue tracker is the default.

use once_cell::sync::Lazy;
use regex::Regex;
use ticketsieve_core::TicketSource;
use tracing::debug;

use crate::indicators::{IndicatorSet, HELPDESK_MARKERS, ISSUE_TRACKER_FIELDS};

/// Name token that marks a support-desk export filename.
pub const HELPDESK_FILENAME_TOKEN: &str = "zendesk";
/// Domain that only appears in support-desk exports.
pub const HELPDESK_DOMAIN_TOKEN: &str = "zendesk.com";
/// Distinct issue-tracker field labels needed to overrule helpdesk markers.
pub const ISSUE_TRACKER_THRESHOLD: usize = 3;
/// Distinct helpdesk markers needed to classify as support desk.
pub const HELPDESK_THRESHOLD: usize = 2;

/// Support-desk print exports are saved as `..._tickets_<id>_print.pdf`.
static HELPDESK_FILENAME_TICKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tickets?_\d+").unwrap());

/// A row of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Filename names the support desk or carries its ticket token.
    FilenameToken,
    /// Text contains the support-desk domain.
    DomainToken,
    /// At least [`ISSUE_TRACKER_THRESHOLD`] issue-tracker field labels.
    IssueTrackerFields,
    /// At least [`HELPDESK_THRESHOLD`] helpdesk markers.
    HelpdeskMarkers,
    /// Nothing matched.
    Default,
}

/// Evaluated top to bottom; the first signal that holds decides.
pub const DECISION_TABLE: &[(Signal, TicketSource)] = &[
    (Signal::FilenameToken, TicketSource::Zendesk),
    (Signal::DomainToken, TicketSource::Zendesk),
    (Signal::IssueTrackerFields, TicketSource::Jira),
    (Signal::HelpdeskMarkers, TicketSource::Zendesk),
    (Signal::Default, TicketSource::Jira),
];

/// Outcome of classifying one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub source: TicketSource,
    pub signal: Signal,
}

struct Evidence<'a> {
    filename_lower: String,
    text_lower: &'a str,
}

impl Signal {
    fn holds(self, evidence: &Evidence<'_>) -> bool {
        match self {
            Signal::FilenameToken => {
                evidence.filename_lower.contains(HELPDESK_FILENAME_TOKEN)
                    || HELPDESK_FILENAME_TICKET_RE.is_match(&evidence.filename_lower)
            }
            Signal::DomainToken => evidence.text_lower.contains(HELPDESK_DOMAIN_TOKEN),
            Signal::IssueTrackerFields => {
                meets(&ISSUE_TRACKER_FIELDS, evidence.text_lower, ISSUE_TRACKER_THRESHOLD)
            }
            Signal::HelpdeskMarkers => {
                meets(&HELPDESK_MARKERS, evidence.text_lower, HELPDESK_THRESHOLD)
            }
            Signal::Default => true,
        }
    }
}

fn meets(set: &IndicatorSet, text_lower: &str, threshold: usize) -> bool {
    let count = set.count_in(text_lower);
    debug!(
        indicators = set.name,
        count,
        threshold,
        matched = ?set.matched_in(text_lower),
        "indicator count"
    );
    count >= threshold
}

/// Decide which system produced a linear-text export.
pub fn classify(filename: &str, text: &str) -> Classification {
    let text_lower = text.to_lowercase();
    let evidence = Evidence {
        filename_lower: filename.to_lowercase(),
        text_lower: &text_lower,
    };

    for &(signal, source) in DECISION_TABLE {
        if signal.holds(&evidence) {
            debug!(?signal, %source, "classified export");
            return Classification { source, signal };
        }
    }

    // The table ends with an unconditional row.
    Classification {
        source: TicketSource::Jira,
        signal: Signal::Default,
    }
}
