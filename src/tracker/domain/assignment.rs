//! Replace-semantics planning for task tag sets.

use super::{TagId, ValidationError};
use std::collections::BTreeSet;

/// Link changes needed to move a task from its current tag set to a
/// requested one. Tags present in both sets are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAssignment {
    to_link: BTreeSet<TagId>,
    to_unlink: BTreeSet<TagId>,
}

impl TagAssignment {
    /// Computes the links to add and remove.
    #[must_use]
    pub fn plan(current: &BTreeSet<TagId>, requested: &BTreeSet<TagId>) -> Self {
        Self {
            to_link: requested.difference(current).copied().collect(),
            to_unlink: current.difference(requested).copied().collect(),
        }
    }

    /// Tags that must be newly linked.
    #[must_use]
    pub const fn to_link(&self) -> &BTreeSet<TagId> {
        &self.to_link
    }

    /// Tags that must be unlinked.
    #[must_use]
    pub const fn to_unlink(&self) -> &BTreeSet<TagId> {
        &self.to_unlink
    }

    /// Returns `true` when the requested set equals the current one.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.to_link.is_empty() && self.to_unlink.is_empty()
    }

    /// Applies the plan to an in-memory tag set.
    pub fn apply_to(&self, tags: &mut BTreeSet<TagId>) {
        for tag_id in &self.to_unlink {
            tags.remove(tag_id);
        }
        tags.extend(self.to_link.iter().copied());
    }
}

/// Checks every requested tag is one of `project_tags`.
///
/// Must run against tag ids read in the same transaction that applies the
/// assignment.
///
/// # Errors
///
/// Returns [`ValidationError::TagNotInProject`] naming the first offending tag.
pub fn ensure_tags_in_project<'a>(
    requested: impl IntoIterator<Item = &'a TagId>,
    project_tags: &BTreeSet<TagId>,
) -> Result<(), ValidationError> {
    requested
        .into_iter()
        .find(|tag_id| !project_tags.contains(tag_id))
        .map_or(Ok(()), |stray| Err(ValidationError::TagNotInProject(*stray)))
}
