//! Conversation reconstruction for support-desk print exports.
//!
//! Text extracted from a paginated export interleaves human comments with
//! system chrome: bot narration, page counters, mention tokens, ticket-list
//! fragments, footers. This module walks the lines once, front to back,
//! dropping the noise and keeping comments and their timestamp headers in
//! order.
//!
//! Noise blocks are recognised by the line that *precedes* them (a bot
//! banner, a bare ticket reference), so the filter is a small state machine
//! with a skip counter rather than a per-line classifier. It never looks
//! behind or ahead of the current line.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::cascade::fallback_excerpt;

/// Lines swallowed after a bot banner.
pub const BOT_BLOCK_LINES: usize = 10;
/// Lines swallowed after a bare ticket reference.
pub const TICKET_ENTRY_LINES: usize = 3;

/// Where the conversation starts: the problem summary section or the first
/// `<name> <Mon> <d>, <yyyy> at <h>:<mm>` comment header. Names may carry
/// apostrophes.
static ENTRY_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Problem Summary|[\w \t']+ \w+ \d+, \d{4} at \d+:\d+)").unwrap()
});

/// A human comment header on a single line.
static COMMENT_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w\s']+ \w+ \d+, \d{4} at \d+:\d+").unwrap());

/// A ticket-list entry starts with a bare ticket number on its own line.
static TICKET_REFERENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\d{5,7}$").unwrap());

/// System-generated lines, matched against the trimmed line.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^Problem Summary \*SF",
        r"^Focus Score",
        r"^Ticket Location",
        r"^Ticket Clusters",
        r"^Redis Support Bot Agent",
        r"^Analyzer Bot",
        r"^File uploaded to SFTP",
        r"^Package.*successfully analyzed",
        r"^Parsed Logs",
        r"^Health check",
        r"^Total Open Tickets:",
        r"^Organization Notes:",
        r"^\*\*\*",
        r"^EOF",
        r"^Ticket ID$",
        r"^Status$",
        r"^Assignee$",
        r"^Subject$",
        // page counters
        r"^\d+/\d+$",
        r"redislabs\.zendesk\.com",
        r"^https?://files\.cs\.redislabs",
        // mentions
        r"^@\w+$",
        r"^\d{6}$",
        r"^Support Software by Zendesk",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Scanner state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    /// Inside a ticket-list entry; the count is the lines still to drop.
    SkippingTicketEntry(usize),
    /// Inside bot narration; the count is the lines still to drop.
    SkippingBotBlock(usize),
}

impl ScanState {
    /// Consume one line of a pending skip. Returns the next state, or
    /// `None` when the line should be processed normally.
    fn consume(self) -> Option<ScanState> {
        match self {
            ScanState::Scanning => None,
            ScanState::SkippingTicketEntry(n) | ScanState::SkippingBotBlock(n) if n == 0 => None,
            ScanState::SkippingTicketEntry(n) => {
                Some(Self::after(n - 1, Self::SkippingTicketEntry))
            }
            ScanState::SkippingBotBlock(n) => Some(Self::after(n - 1, Self::SkippingBotBlock)),
        }
    }

    fn after(remaining: usize, skipping: fn(usize) -> ScanState) -> ScanState {
        if remaining == 0 {
            ScanState::Scanning
        } else {
            skipping(remaining)
        }
    }
}

/// Output lines with blank-run collapsing.
#[derive(Debug, Default)]
struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    fn last_is_blank(&self) -> bool {
        self.lines.last().is_some_and(|l| l.is_empty())
    }

    fn push_blank(&mut self) {
        if !self.lines.is_empty() && !self.last_is_blank() {
            self.lines.push(String::new());
        }
    }

    fn push_header(&mut self, header: &str) {
        self.push_blank();
        self.lines.push(format!("**{}**", header));
        self.lines.push(String::new());
    }

    fn push_text(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn finish(mut self) -> Option<String> {
        while self.last_is_blank() {
            self.lines.pop();
        }
        let joined = self.lines.join("\n");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

fn is_noise(line: &str) -> bool {
    NOISE_PATTERNS.iter().any(|re| re.is_match(line))
}

/// Rebuild the human conversation from a support-desk export.
///
/// Falls back to the head of the raw text when no conversation start is
/// found or nothing survives filtering.
pub fn reconstruct(raw_text: &str) -> String {
    let Some(start) = ENTRY_ANCHOR_RE.find(raw_text) else {
        debug!("no conversation anchor, using raw text excerpt");
        return fallback_excerpt(raw_text);
    };

    let mut state = ScanState::Scanning;
    let mut transcript = Transcript::default();

    for line in raw_text[start.start()..].split('\n') {
        let line = line.trim();

        if let Some(next) = state.consume() {
            state = next;
            continue;
        }

        if is_noise(line) {
            if line.contains("Bot") {
                state = ScanState::SkippingBotBlock(BOT_BLOCK_LINES);
            }
            continue;
        }

        if TICKET_REFERENCE_RE.is_match(line) {
            state = ScanState::SkippingTicketEntry(TICKET_ENTRY_LINES);
            continue;
        }

        if COMMENT_HEADER_RE.is_match(line) {
            transcript.push_header(line);
        } else if line.chars().count() > 2 {
            transcript.push_text(line);
        } else if line.is_empty() {
            transcript.push_blank();
        }
    }

    transcript.finish().unwrap_or_else(|| {
        debug!("conversation filtered to nothing, using raw text excerpt");
        fallback_excerpt(raw_text)
    })
}
