//! Field extraction cascades.
//!
//! A field is resolved by an ordered list of rules. The first rule that
//! yields a non-empty value wins; earlier rules are the more trusted ones,
//! so order matters more than pattern cleverness.

use regex::Regex;
use ticketsieve_core::non_empty;
use tracing::debug;

/// Number of raw-text characters used when a description cannot be found.
pub const DESCRIPTION_FALLBACK_CHARS: usize = 1000;

/// Linear text of an export together with its filename.
#[derive(Debug, Clone, Copy)]
pub struct TextSource<'a> {
    pub filename: &'a str,
    pub text: &'a str,
}

impl<'a> TextSource<'a> {
    pub fn new(filename: &'a str, text: &'a str) -> Self {
        Self { filename, text }
    }
}

pub type Extractor = fn(&TextSource<'_>) -> Option<String>;

/// One step of a cascade.
pub struct Rule {
    pub name: &'static str,
    pub extract: Extractor,
}

/// Ordered extraction rules for a single field.
pub struct Cascade {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

impl Cascade {
    /// Evaluate rules in order and return the first non-empty value.
    pub fn resolve(&self, source: &TextSource<'_>) -> Option<String> {
        self.resolve_with_rule(source).map(|(_, value)| value)
    }

    /// Like [`Cascade::resolve`], also naming the rule that matched.
    pub fn resolve_with_rule(&self, source: &TextSource<'_>) -> Option<(&'static str, String)> {
        for rule in self.rules {
            if let Some(value) = (rule.extract)(source).as_deref().and_then(non_empty) {
                debug!(field = self.field, rule = rule.name, "cascade matched");
                return Some((rule.name, value));
            }
        }
        debug!(field = self.field, "cascade exhausted");
        None
    }
}

/// Build a case-insensitive `Label: value` pattern with a named `value` group.
pub fn label_pattern(label: &str, value: &str) -> Regex {
    Regex::new(&format!(r"(?i){}:\s*(?P<value>{})", label, value)).unwrap()
}

/// Trimmed `value` group (or group 1) of the first match, if non-empty.
pub fn capture(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    let m = caps.name("value").or_else(|| caps.get(1))?;
    non_empty(m.as_str())
}

/// The first `n` characters of `text`, cut on a char boundary.
pub fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Description of last resort: the head of the raw text, verbatim.
pub fn fallback_excerpt(text: &str) -> String {
    prefix_chars(text, DESCRIPTION_FALLBACK_CHARS).to_string()
}

/// Split a comma separated list, dropping blank entries.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').filter_map(non_empty).collect()
}
