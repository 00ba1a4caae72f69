//! Selection tracker: the bulk-action id set.
//!
//! RULE: Selection is independent of filtering and paging. Ids stay
//! selected while hidden by a filter or sitting on another page, and
//! may even outlive the record they name (see DeskSession::replace_roster).

use crate::types::SubscriberId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a page-scoped select-all did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectAllOutcome {
    /// Some visible id was unselected; `added` ids were newly selected.
    Selected { added: usize },
    /// Every visible id was selected; all of them were removed.
    Deselected { removed: usize },
    /// Nothing visible, nothing changed.
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: BTreeSet<SubscriberId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add if absent, remove if present. Returns whether `id` is now selected.
    pub fn toggle(&mut self, id: SubscriberId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Page-scoped select-all. Ids outside `visible` are never touched.
    ///
    /// Applying it twice to the same visible set restores the original
    /// selection only when no visible id was selected beforehand: the
    /// first call selects all, the second deselects all.
    pub fn select_all_visible(&mut self, visible: &[SubscriberId]) -> SelectAllOutcome {
        if visible.is_empty() {
            return SelectAllOutcome::Unchanged;
        }
        if self.page_fully_selected(visible) {
            let removed = visible.iter().filter(|id| self.ids.remove(*id)).count();
            SelectAllOutcome::Deselected { removed }
        } else {
            let added = visible.iter().filter(|id| self.ids.insert(**id)).count();
            SelectAllOutcome::Selected { added }
        }
    }

    /// Header checkbox state: non-empty and every visible id selected.
    pub fn page_fully_selected(&self, visible: &[SubscriberId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = SubscriberId> + '_ {
        self.ids.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<SubscriberId> {
        self.iter().collect()
    }
}
