//! ticketsieve parse — source classification, field extraction cascades,
//! conversation reconstruction and image selection for ticket exports.

pub mod cascade;
pub mod classify;
pub mod conversation;
pub mod images;
pub mod indicators;
pub mod jira;
pub mod router;
pub mod tabular;
pub mod tree;
pub mod zendesk;

pub use cascade::{Cascade, Rule, TextSource, DESCRIPTION_FALLBACK_CHARS};
pub use classify::{classify, Classification, Signal};
pub use conversation::reconstruct;
pub use images::{is_significant, select_significant, write_images, SignificantImage};
pub use router::TicketParser;
