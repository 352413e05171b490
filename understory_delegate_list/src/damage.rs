// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item change summaries returned from [`crate::DelegateAdapter::commit`].

use smallvec::SmallVec;

/// A single structural or content change to the item sequence.
///
/// Positions refer to the sequence as it was when the change was recorded,
/// so hosts must apply entries in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemChange {
    /// `count` slots were inserted starting at `start`.
    Inserted {
        /// First inserted position.
        start: usize,
        /// Number of inserted slots.
        count: usize,
    },
    /// `count` slots were removed starting at `start`.
    Removed {
        /// First removed position.
        start: usize,
        /// Number of removed slots.
        count: usize,
    },
    /// The slot at `position` was replaced; its view must be rebound and may change type.
    Changed {
        /// Replaced position.
        position: usize,
    },
    /// A slot moved from `from` to `to`.
    Moved {
        /// Position before the move.
        from: usize,
        /// Position after the move.
        to: usize,
    },
    /// The whole sequence was replaced or cleared.
    Reset,
}

/// A batched set of item changes derived from [`crate::DelegateAdapter::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDamage {
    /// Changes in the order they were made.
    pub changes: SmallVec<[ItemChange; 4]>,
}

impl ItemDamage {
    /// Returns `true` if nothing changed since the previous commit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns `true` if the batch contains a [`ItemChange::Reset`].
    ///
    /// A reset is always the first entry, since it supersedes earlier changes.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        matches!(self.changes.first(), Some(ItemChange::Reset))
    }

    /// Records a change, coalescing it with the previous entry where possible.
    pub(crate) fn record(&mut self, change: ItemChange) {
        if change == ItemChange::Reset {
            self.changes.clear();
            self.changes.push(change);
            return;
        }
        if let Some(last) = self.changes.last_mut() {
            match (last, change) {
                // Consecutive inserts: appending after the range, or prepending at its start.
                (
                    ItemChange::Inserted { start, count },
                    ItemChange::Inserted {
                        start: next,
                        count: more,
                    },
                ) if next >= *start && next <= *start + *count => {
                    *count += more;
                    return;
                }
                // Repeated removal at the same position, or removal just before the range.
                (
                    ItemChange::Removed { start, count },
                    ItemChange::Removed {
                        start: next,
                        count: more,
                    },
                ) if next == *start || next + more == *start => {
                    *start = next.min(*start);
                    *count += more;
                    return;
                }
                (ItemChange::Changed { position }, ItemChange::Changed { position: next })
                    if *position == next =>
                {
                    return;
                }
                _ => {}
            }
        }
        self.changes.push(change);
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemChange, ItemDamage};

    #[test]
    fn appends_coalesce_into_one_insert() {
        let mut dmg = ItemDamage::default();
        dmg.record(ItemChange::Inserted { start: 3, count: 1 });
        dmg.record(ItemChange::Inserted { start: 4, count: 2 });
        dmg.record(ItemChange::Inserted { start: 3, count: 1 });
        assert_eq!(
            dmg.changes.as_slice(),
            [ItemChange::Inserted { start: 3, count: 4 }]
        );
    }

    #[test]
    fn disjoint_inserts_stay_separate() {
        let mut dmg = ItemDamage::default();
        dmg.record(ItemChange::Inserted { start: 0, count: 1 });
        dmg.record(ItemChange::Inserted { start: 5, count: 1 });
        assert_eq!(dmg.changes.len(), 2);
    }

    #[test]
    fn removals_at_same_or_preceding_position_coalesce() {
        let mut dmg = ItemDamage::default();
        dmg.record(ItemChange::Removed { start: 4, count: 1 });
        dmg.record(ItemChange::Removed { start: 4, count: 1 });
        dmg.record(ItemChange::Removed { start: 3, count: 1 });
        assert_eq!(
            dmg.changes.as_slice(),
            [ItemChange::Removed { start: 3, count: 3 }]
        );
    }

    #[test]
    fn repeated_change_of_one_position_is_recorded_once() {
        let mut dmg = ItemDamage::default();
        dmg.record(ItemChange::Changed { position: 2 });
        dmg.record(ItemChange::Changed { position: 2 });
        dmg.record(ItemChange::Changed { position: 1 });
        assert_eq!(
            dmg.changes.as_slice(),
            [
                ItemChange::Changed { position: 2 },
                ItemChange::Changed { position: 1 },
            ]
        );
    }

    #[test]
    fn reset_supersedes_earlier_changes() {
        let mut dmg = ItemDamage::default();
        dmg.record(ItemChange::Changed { position: 0 });
        dmg.record(ItemChange::Moved { from: 0, to: 1 });
        dmg.record(ItemChange::Reset);
        assert!(dmg.is_reset());
        assert_eq!(dmg.changes.as_slice(), [ItemChange::Reset]);

        dmg.record(ItemChange::Inserted { start: 0, count: 1 });
        assert!(dmg.is_reset());
        assert_eq!(dmg.changes.len(), 2);
    }
}
