//! Ad-blocker-targeted CSS selector lists.
//!
//! This crate owns both ends of the selector artifact:
//! - [`classify`] turns an EasyList-style filter list into selector buckets,
//!   the id and class buckets of which become a [`SelectorArtifact`].
//! - [`ForbiddenSelectorSet`] loads an artifact into two lookup sets used by
//!   the lint rule.
//!
//! # Example
//!
//! ```
//! use selector_list::{ForbiddenSelectorSet, SelectorBuckets};
//!
//! let list = "! comment\n###AC_ad\n##.AD-POST\n##[data-ad]\n";
//! let artifact = SelectorBuckets::from_filter_list(list).into_artifact();
//! let set = ForbiddenSelectorSet::from_artifact(artifact);
//!
//! assert!(set.is_forbidden_id("AC_ad"));
//! assert!(set.is_forbidden_class("AD-POST"));
//! assert!(!set.is_forbidden_class("data-ad"));
//! ```

mod artifact;
pub mod classify;
mod error;
mod set;

pub use artifact::SelectorArtifact;
pub use classify::{classify, element_hiding_selectors, SelectorBuckets, SelectorKind};
pub use error::SelectorListError;
pub use set::ForbiddenSelectorSet;

/// The artifact shipped with the crate.
///
/// The checked-in file is a seed list. Run `easylist-gen` from the workspace
/// root to replace it with the current EasyList extract.
pub const BUNDLED_ARTIFACT: &str = include_str!("../data/easylist-css-selectors.json");
