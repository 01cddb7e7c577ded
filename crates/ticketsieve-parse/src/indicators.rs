//! Named string markers whose presence hints at the producing system.

/// A fixed list of literal markers.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSet {
    pub name: &'static str,
    pub markers: &'static [&'static str],
}

/// Field labels only the issue tracker prints.
pub const ISSUE_TRACKER_FIELDS: IndicatorSet = IndicatorSet {
    name: "issue-tracker fields",
    markers: &[
        "project:",
        "issue type:",
        "fix versions:",
        "affects versions:",
        "resolution:",
        "components:",
        "sprint:",
    ],
};

/// Phrases typical of support-desk print exports.
pub const HELPDESK_MARKERS: IndicatorSet = IndicatorSet {
    name: "helpdesk markers",
    markers: &[
        "ticket #",
        "requester",
        "submitted",
        "received via",
        "sla package",
        "zendesk",
    ],
};

impl IndicatorSet {
    /// Number of distinct markers present in `text_lower`.
    ///
    /// Markers are lowercase; callers pass already lowercased text.
    pub fn count_in(&self, text_lower: &str) -> usize {
        self.markers
            .iter()
            .filter(|marker| text_lower.contains(*marker))
            .count()
    }

    /// Markers present in `text_lower`, in list order.
    pub fn matched_in(&self, text_lower: &str) -> Vec<&'static str> {
        self.markers
            .iter()
            .copied()
            .filter(|marker| text_lower.contains(marker))
            .collect()
    }
}
