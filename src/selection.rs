use std::collections::BTreeSet;

use crate::model::ProfileId;

/// State of the "select all" control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectAll {
    Empty,
    Partial,
    All,
}

/// Profiles currently marked for a bulk action.
///
/// The tracker doesn't know which profiles are visible; callers pass the
/// visible ids in and are responsible for clearing the selection when the
/// visible set changes.
#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    selected: BTreeSet<ProfileId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the profile if it isn't selected, deselect it otherwise.
    ///
    /// Returns whether the profile is selected afterwards.
    pub fn toggle(&mut self, id: ProfileId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Select exactly the given profiles
    pub fn select_all<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a ProfileId>,
    {
        self.selected = visible.into_iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Header checkbox behaviour: clear when everything visible is already
    /// selected, select all visible otherwise.
    pub fn toggle_all(&mut self, visible: &[ProfileId]) {
        if self.is_all_selected(visible) {
            self.clear();
        } else {
            self.select_all(visible);
        }
    }

    /// True iff the selection is non-empty and equals the visible ids
    pub fn is_all_selected(&self, visible: &[ProfileId]) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        let visible: BTreeSet<&ProfileId> = visible.iter().collect();
        visible.len() == self.selected.len()
            && self.selected.iter().all(|id| visible.contains(id))
    }

    pub fn state(&self, visible: &[ProfileId]) -> SelectAll {
        if self.selected.is_empty() {
            SelectAll::Empty
        } else if self.is_all_selected(visible) {
            SelectAll::All
        } else {
            SelectAll::Partial
        }
    }

    pub fn contains(&self, id: &ProfileId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<ProfileId> {
        self.selected.iter().cloned().collect()
    }
}
