//! Frozen lookup sets.

use crate::{SelectorArtifact, SelectorListError, BUNDLED_ARTIFACT};
use camino::Utf8Path;
use rustc_hash::FxHashSet;

/// Forbidden ids and classes, immutable once built.
///
/// Membership is exact: case-sensitive, no trimming or normalization.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenSelectorSet {
    ids: FxHashSet<String>,
    classes: FxHashSet<String>,
}

impl ForbiddenSelectorSet {
    /// Builds the sets from an artifact.
    pub fn from_artifact(artifact: SelectorArtifact) -> Self {
        Self {
            ids: artifact.id.into_iter().collect(),
            classes: artifact.class.into_iter().collect(),
        }
    }

    /// Loads the artifact embedded in this crate.
    pub fn bundled() -> Result<Self, SelectorListError> {
        SelectorArtifact::from_json(BUNDLED_ARTIFACT).map(Self::from_artifact)
    }

    /// Loads an artifact file.
    pub fn load(path: &Utf8Path) -> Result<Self, SelectorListError> {
        SelectorArtifact::read(path).map(Self::from_artifact)
    }

    /// Returns true if `name` is a forbidden element id.
    pub fn is_forbidden_id(&self, name: &str) -> bool {
        self.ids.contains(name)
    }

    /// Returns true if `name` is a forbidden class name.
    pub fn is_forbidden_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    /// Iterates over the forbidden ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Iterates over the forbidden classes, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Total number of distinct ids and classes.
    pub fn len(&self) -> usize {
        self.ids.len() + self.classes.len()
    }

    /// Returns true if both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_contains_known_selectors() {
        let set = ForbiddenSelectorSet::bundled().unwrap();
        assert!(set.is_forbidden_id("AC_ad"));
        assert!(set.is_forbidden_class("AD-POST"));
        assert!(!set.is_forbidden_id("AD-POST"));
    }

    #[test]
    fn test_exact_matching() {
        let set = ForbiddenSelectorSet::from_artifact(SelectorArtifact {
            id: vec!["AC_ad".into()],
            class: vec![],
        });
        assert!(set.is_forbidden_id("AC_ad"));
        assert!(!set.is_forbidden_id("ac_ad"));
        assert!(!set.is_forbidden_id(" AC_ad"));
        assert!(!set.is_forbidden_id("AC_ad2"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = ForbiddenSelectorSet::from_artifact(SelectorArtifact {
            id: vec!["a".into(), "a".into()],
            class: vec!["a".into()],
        });
        assert_eq!(set.len(), 2);
        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_empty() {
        let set = ForbiddenSelectorSet::from_artifact(SelectorArtifact::default());
        assert!(set.is_empty());
        assert!(!set.is_forbidden_class(""));
    }
}
