//! Classification of element-hiding rules from a filter list.
//!
//! Element-hiding rules are lines of the form `##<selector>`. Domain-scoped
//! rules (`example.com##.ad`) and exceptions (`#@#`) are not picked up.

use crate::SelectorArtifact;

/// The prefix of a generic element-hiding rule.
pub const ELEMENT_HIDING_MARKER: &str = "##";

/// The bucket a selector fragment falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind<'a> {
    /// `#name`, carrying the name without `#`.
    Id(&'a str),
    /// `.name`, carrying the name without `.`.
    Class(&'a str),
    /// A lone presence test such as `[data-ad]`.
    SimpleAttribute(&'a str),
    /// Any other selector using `[...]`, e.g. `[href*="ads.com"]` or `a[target]`.
    ComplexAttribute(&'a str),
    /// Everything else (tag names, combinators, pseudo-classes).
    Element(&'a str),
}

/// Classifies a selector fragment by its leading punctuation.
///
/// Checks run in order and the last arm catches everything, so every
/// fragment lands in exactly one bucket.
pub fn classify(fragment: &str) -> SelectorKind<'_> {
    if let Some(name) = fragment.strip_prefix('#') {
        SelectorKind::Id(name)
    } else if let Some(name) = fragment.strip_prefix('.') {
        SelectorKind::Class(name)
    } else if is_simple_attribute(fragment) {
        SelectorKind::SimpleAttribute(fragment)
    } else if fragment.contains('[') && fragment.contains(']') {
        SelectorKind::ComplexAttribute(fragment)
    } else {
        SelectorKind::Element(fragment)
    }
}

/// `[name]` with nothing but an attribute name between the brackets.
fn is_simple_attribute(fragment: &str) -> bool {
    fragment
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|name| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        })
}

/// Yields the selector of every line that starts with `##`.
///
/// Lines are split on `\n`; a trailing `\r` is dropped.
pub fn element_hiding_selectors(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| line.strip_prefix(ELEMENT_HIDING_MARKER))
}

/// Selectors from a filter list, grouped by [`SelectorKind`].
///
/// Order follows the filter list; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorBuckets {
    /// Id names.
    pub ids: Vec<String>,
    /// Class names.
    pub classes: Vec<String>,
    /// Simple attribute selectors, verbatim.
    pub simple_attributes: Vec<String>,
    /// Complex attribute selectors, verbatim.
    pub complex_attributes: Vec<String>,
    /// All other selectors, verbatim.
    pub elements: Vec<String>,
}

impl SelectorBuckets {
    /// Classifies every element-hiding rule in `text`.
    pub fn from_filter_list(text: &str) -> Self {
        let mut buckets = Self::default();
        for selector in element_hiding_selectors(text) {
            buckets.push(classify(selector));
        }
        buckets
    }

    /// Adds one classified selector.
    pub fn push(&mut self, kind: SelectorKind<'_>) {
        match kind {
            SelectorKind::Id(name) => self.ids.push(name.to_string()),
            SelectorKind::Class(name) => self.classes.push(name.to_string()),
            SelectorKind::SimpleAttribute(s) => self.simple_attributes.push(s.to_string()),
            SelectorKind::ComplexAttribute(s) => self.complex_attributes.push(s.to_string()),
            SelectorKind::Element(s) => self.elements.push(s.to_string()),
        }
    }

    /// Total number of classified selectors.
    pub fn total(&self) -> usize {
        self.ids.len()
            + self.classes.len()
            + self.simple_attributes.len()
            + self.complex_attributes.len()
            + self.elements.len()
    }

    /// Keeps the id and class buckets. Attribute and element selectors are
    /// not persisted.
    pub fn into_artifact(self) -> SelectorArtifact {
        SelectorArtifact {
            id: self.ids,
            class: self.classes,
        }
    }
}
