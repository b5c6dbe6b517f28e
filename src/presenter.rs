use std::collections::{HashMap, HashSet};

use crate::types::FavoriteRecord;

/// One position-level change between two list snapshots. `Removed` carries
/// the index in the previous snapshot; `Inserted` and `Changed` carry the
/// index in the new one. Applying removals in the emitted (descending) order
/// followed by insertions reproduces the new list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEdit {
    Removed { index: usize, record: FavoriteRecord },
    Inserted { index: usize, record: FavoriteRecord },
    Changed { index: usize, record: FavoriteRecord },
}

/// Holds the presented snapshot of the favorites collection and reconciles
/// each new snapshot against it with a minimal structural diff. Item identity
/// is the record id; content equality is full-field equality. The snapshot is
/// always replaced wholesale, never patched in place.
#[derive(Debug, Default)]
pub struct ListPresenter {
    items: Vec<FavoriteRecord>,
}

impl ListPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[FavoriteRecord] {
        &self.items
    }

    /// Replace the presented collection and return the edit script that takes
    /// the previous snapshot to the new one.
    pub fn submit(&mut self, next: Vec<FavoriteRecord>) -> Vec<ListEdit> {
        let old_by_id: HashMap<i64, &FavoriteRecord> =
            self.items.iter().map(|r| (r.id, r)).collect();
        let next_ids: HashSet<i64> = next.iter().map(|r| r.id).collect();

        let mut edits = Vec::new();

        // Removals first, highest old index first, so earlier positions stay
        // valid while the script is applied.
        for (i, r) in self.items.iter().enumerate().rev() {
            if !next_ids.contains(&r.id) {
                edits.push(ListEdit::Removed { index: i, record: r.clone() });
            }
        }

        for (i, r) in next.iter().enumerate() {
            match old_by_id.get(&r.id) {
                None => edits.push(ListEdit::Inserted { index: i, record: r.clone() }),
                Some(old) if *old != r => {
                    edits.push(ListEdit::Changed { index: i, record: r.clone() })
                }
                Some(_) => {}
            }
        }

        self.items = next;
        edits
    }
}
