//! Issue-tracker XML exports.

use ticketsieve_core::{non_empty, Element, NormalizedTicket, TicketSource};

use crate::cascade::{fallback_excerpt, split_list};

fn field(root: &Element, name: &str) -> Option<String> {
    root.find(name)?.text.as_deref().and_then(non_empty)
}

/// Labels come either as `<label>` children or as comma-separated text.
fn labels(root: &Element) -> Vec<String> {
    let Some(element) = root.find("labels") else {
        return Vec::new();
    };

    let nested: Vec<String> = element
        .children_named("label")
        .filter_map(|label| label.text.as_deref().and_then(non_empty))
        .collect();
    if !nested.is_empty() {
        return nested;
    }

    element
        .text
        .as_deref()
        .map(split_list)
        .unwrap_or_default()
}

/// Normalize an XML export.
pub fn parse(root: &Element) -> NormalizedTicket {
    let raw_text = root.text_content();
    let description = field(root, "description").unwrap_or_else(|| fallback_excerpt(&raw_text));
    let mut ticket = NormalizedTicket::new(TicketSource::Jira, raw_text);

    ticket.identifier = field(root, "key");
    ticket.summary = field(root, "summary");
    ticket.description = description;
    ticket.priority = field(root, "priority");
    ticket.status = field(root, "status");
    ticket.assignee = field(root, "assignee");
    ticket.reporter = field(root, "reporter");
    ticket.created = field(root, "created");
    ticket.updated = field(root, "updated");
    ticket.labels = labels(root);

    ticket
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(children: Vec<Element>) -> Element {
        let mut item = Element::new("item");
        item.children = children;
        Element::new("rss").with_child(Element::new("channel").with_child(item))
    }

    #[test]
    fn test_rss_item() {
        let root = item(vec![
            Element::new("title").with_text("[RED-7] Leak"),
            Element::new("key").with_text(" RED-7 "),
            Element::new("summary").with_text("Leak"),
            Element::new("description").with_text("Memory grows"),
            Element::new("priority").with_text("Major"),
            Element::new("status").with_text("Open"),
            Element::new("assignee").with_text(""),
            Element::new("labels")
                .with_child(Element::new("label").with_text("memory"))
                .with_child(Element::new("label").with_text("leak")),
        ]);
        let ticket = parse(&root);
        assert_eq!(ticket.source(), TicketSource::Jira);
        assert_eq!(ticket.identifier.as_deref(), Some("RED-7"));
        assert_eq!(ticket.summary.as_deref(), Some("Leak"));
        assert_eq!(ticket.description, "Memory grows");
        assert_eq!(ticket.priority.as_deref(), Some("Major"));
        assert_eq!(ticket.assignee, None);
        assert_eq!(ticket.labels, vec!["memory", "leak"]);
        assert!(ticket.raw_text().starts_with("[RED-7] Leak\nRED-7"));
    }

    #[test]
    fn test_flat_labels_and_missing_description() {
        let root = item(vec![
            Element::new("key").with_text("RED-8"),
            Element::new("labels").with_text("a, b"),
        ]);
        let ticket = parse(&root);
        assert_eq!(ticket.labels, vec!["a", "b"]);
        assert_eq!(ticket.description, "RED-8\na, b");
        assert_eq!(ticket.summary, None);
    }
}
