//! Item reconciliation.
//!
//! [`diff`] compares the previous and the next contents of a tab list and
//! describes the change as a [`Difference`]: an ordered list of primitive
//! [`Edit`]s that a renderer can animate instead of rebuilding every button.
//!
//! # Apply order
//!
//! Edits are always emitted in this order, and must be applied in it:
//!
//! 1. [`Edit::Remove`], by descending old index
//! 2. [`Edit::Move`], against the list left after the removals
//! 3. [`Edit::Insert`], by ascending final index
//! 4. [`Edit::Update`], by final index
//!
//! Applying them one after another to a single array seeded with the old
//! list produces exactly the new list. [`Difference::apply_to`] is the
//! reference implementation of that contract.
//!
//! # Matching
//!
//! Items are paired by [`TabItem::same_identity`], scanning the new list left
//! to right and taking the earliest unpaired old item each time. Among the
//! paired items, those that form the longest run already in the right
//! relative order stay where they are; only the others are moved.
//!
//! # Example
//!
//! ```
//! use horizon_tabbar::{TabBarItem, diff::{diff, Edit}};
//!
//! let a = TabBarItem::new(1, "A");
//! let b = TabBarItem::new(2, "B");
//! let c = TabBarItem::new(3, "C");
//!
//! let old = vec![a.clone(), b.clone(), c.clone()];
//! let new = vec![a.clone(), c.clone(), b.clone()];
//!
//! let difference = diff(&old, &new);
//! assert_eq!(difference.len(), 1);
//! assert!(matches!(difference.edits()[0], Edit::Move { .. }));
//!
//! let mut model = old.clone();
//! difference.apply_to(&mut model);
//! assert_eq!(model, new);
//! ```

use horizon_tabbar_core::logging::{span_names, targets};

use crate::item::TabItem;

/// A primitive change to an ordered list of tabs.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit<T> {
    /// Remove the item at `index` (an index into the old list).
    Remove { index: usize },
    /// Take the item at `from` out of the list and re-insert it at `to`.
    ///
    /// Both indexes refer to the list as it is after all removals and
    /// preceding moves, before any insertion.
    Move { from: usize, to: usize },
    /// Insert `item` at `index` (an index into the new list).
    Insert { index: usize, item: T },
    /// Replace the displayed payload of the item at `index` (an index into the
    /// new list) with `item`.
    Update { index: usize, item: T },
}

impl<T> Edit<T> {
    /// Returns a short name for the edit kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Edit::Remove { .. } => "remove",
            Edit::Move { .. } => "move",
            Edit::Insert { .. } => "insert",
            Edit::Update { .. } => "update",
        }
    }
}

/// An ordered description of how one tab list turns into another.
///
/// An empty difference means nothing changed; renderers must not animate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference<T> {
    edits: Vec<Edit<T>>,
}

impl<T> Default for Difference<T> {
    fn default() -> Self {
        Self { edits: Vec::new() }
    }
}

impl<T> Difference<T> {
    /// Returns the edits in apply order.
    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    /// Returns true if the difference contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns the number of edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Iterate over the edits in apply order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edit<T>> {
        self.edits.iter()
    }

    /// Old indexes of removed items, in apply order (descending).
    pub fn removals(&self) -> impl Iterator<Item = usize> + '_ {
        self.edits.iter().filter_map(|edit| match edit {
            Edit::Remove { index } => Some(*index),
            _ => None,
        })
    }

    /// `(from, to)` pairs of moved items, in apply order.
    pub fn moves(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edits.iter().filter_map(|edit| match edit {
            Edit::Move { from, to } => Some((*from, *to)),
            _ => None,
        })
    }

    /// Inserted items with their final index, ascending.
    pub fn insertions(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.edits.iter().filter_map(|edit| match edit {
            Edit::Insert { index, item } => Some((*index, item)),
            _ => None,
        })
    }

    /// Updated items with their final index, ascending.
    pub fn updates(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.edits.iter().filter_map(|edit| match edit {
            Edit::Update { index, item } => Some((*index, item)),
            _ => None,
        })
    }
}

impl<T: Clone> Difference<T> {
    /// Apply the edits, in order, to `target`.
    ///
    /// `target` must hold the list this difference was computed from; it then
    /// ends up holding the new list.
    ///
    /// # Panics
    ///
    /// Panics if an edit refers to an index outside `target`, which only
    /// happens when `target` is not the old list of this difference.
    pub fn apply_to(&self, target: &mut Vec<T>) {
        for edit in &self.edits {
            match edit {
                Edit::Remove { index } => {
                    target.remove(*index);
                }
                Edit::Move { from, to } => {
                    let item = target.remove(*from);
                    target.insert(*to, item);
                }
                Edit::Insert { index, item } => target.insert(*index, item.clone()),
                Edit::Update { index, item } => target[*index] = item.clone(),
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a Difference<T> {
    type Item = &'a Edit<T>;
    type IntoIter = std::slice::Iter<'a, Edit<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

impl<T> IntoIterator for Difference<T> {
    type Item = Edit<T>;
    type IntoIter = std::vec::IntoIter<Edit<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.into_iter()
    }
}

/// Pair every old item with the new item that carries it forward.
///
/// Matching is by identity and stable: each new item takes the earliest
/// unpaired old item of the same identity, so duplicates keep their relative
/// order. Entry `i` is the new index of `old[i]`, or `None` if it is gone.
pub fn pair_identities<T: TabItem>(old: &[T], new: &[T]) -> Vec<Option<usize>> {
    let mut old_to_new: Vec<Option<usize>> = vec![None; old.len()];
    for (new_index, item) in new.iter().enumerate() {
        let candidate = old
            .iter()
            .enumerate()
            .position(|(old_index, old_item)| {
                old_to_new[old_index].is_none() && old_item.same_identity(item)
            });
        if let Some(old_index) = candidate {
            old_to_new[old_index] = Some(new_index);
        }
    }
    old_to_new
}

/// Compute the edits that turn `old` into `new`.
///
/// This never fails: any pair of lists, including empty ones, is valid input.
pub fn diff<T: TabItem>(old: &[T], new: &[T]) -> Difference<T> {
    let _span = tracing::trace_span!(
        target: targets::DIFF,
        span_names::RECONCILE,
        old = old.len(),
        new = new.len()
    )
    .entered();

    let old_to_new = pair_identities(old, new);
    let mut new_to_old: Vec<Option<usize>> = vec![None; new.len()];
    for (old_index, matched) in old_to_new.iter().enumerate() {
        if let Some(new_index) = matched {
            new_to_old[*new_index] = Some(old_index);
        }
    }

    let mut edits = Vec::new();

    for (old_index, matched) in old_to_new.iter().enumerate().rev() {
        if matched.is_none() {
            edits.push(Edit::Remove { index: old_index });
        }
    }

    // After the removals the list holds the paired items in old order. Track
    // them by their new index and settle them into new order.
    let mut working: Vec<usize> = old_to_new.iter().flatten().copied().collect();
    let order: Vec<usize> = new_to_old
        .iter()
        .enumerate()
        .filter(|(_, old_index)| old_index.is_some())
        .map(|(new_index, _)| new_index)
        .collect();
    let mut working_pos = vec![0; new.len()];
    for (pos, &new_index) in working.iter().enumerate() {
        working_pos[new_index] = pos;
    }
    let sequence: Vec<usize> = order.iter().map(|&new_index| working_pos[new_index]).collect();
    let stays = longest_increasing_subsequence(&sequence);

    for (rank, &new_index) in order.iter().enumerate() {
        if stays[rank] {
            continue;
        }
        let Some(from) = working.iter().position(|&n| n == new_index) else {
            continue;
        };
        working.remove(from);
        // Every target before this one is settled, so place the item right
        // behind its predecessor in the new order.
        let to = match rank.checked_sub(1) {
            Some(prev_rank) => {
                let predecessor = order[prev_rank];
                working
                    .iter()
                    .position(|&n| n == predecessor)
                    .map_or(0, |pos| pos + 1)
            }
            None => 0,
        };
        working.insert(to, new_index);
        if from != to {
            edits.push(Edit::Move { from, to });
        }
    }
    debug_assert_eq!(working, order);

    for (new_index, matched) in new_to_old.iter().enumerate() {
        if matched.is_none() {
            edits.push(Edit::Insert {
                index: new_index,
                item: new[new_index].clone(),
            });
        }
    }

    for (new_index, matched) in new_to_old.iter().enumerate() {
        if let Some(old_index) = matched {
            if !old[*old_index].payload_eq(&new[new_index]) {
                edits.push(Edit::Update {
                    index: new_index,
                    item: new[new_index].clone(),
                });
            }
        }
    }

    for edit in &edits {
        tracing::trace!(target: targets::DIFF, kind = edit.kind(), at = ?edit_index(edit), "edit");
    }
    tracing::debug!(
        target: targets::DIFF,
        edits = edits.len(),
        paired = order.len(),
        "reconciled tab list"
    );

    Difference { edits }
}

fn edit_index<T>(edit: &Edit<T>) -> (usize, Option<usize>) {
    match edit {
        Edit::Remove { index } | Edit::Insert { index, .. } | Edit::Update { index, .. } => {
            (*index, None)
        }
        Edit::Move { from, to } => (*from, Some(*to)),
    }
}

/// Marks the members of one longest strictly increasing subsequence.
fn longest_increasing_subsequence(sequence: &[usize]) -> Vec<bool> {
    // tails[len] = index of the smallest tail of an increasing run of len + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; sequence.len()];

    for (i, &value) in sequence.iter().enumerate() {
        let slot = tails.partition_point(|&t| sequence[t] < value);
        if slot > 0 {
            previous[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut members = vec![false; sequence.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        members[i] = true;
        cursor = previous[i];
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Badge, TabBarItem};

    fn items(titles: &str) -> Vec<TabBarItem> {
        titles
            .chars()
            .map(|c| TabBarItem::new(c as u64, c.to_string()))
            .collect()
    }

    fn assert_round_trip(old: &[TabBarItem], new: &[TabBarItem]) -> Difference<TabBarItem> {
        let difference = diff(old, new);
        let mut model = old.to_vec();
        difference.apply_to(&mut model);
        assert_eq!(model, new);
        difference
    }

    #[test]
    fn test_identical_lists_yield_empty_difference() {
        let list = items("ABCDE");
        let difference = diff(&list, &list);
        assert!(difference.is_empty());
        assert_eq!(difference, Difference::default());
    }

    #[test]
    fn test_empty_to_full_is_all_inserts() {
        let new = items("ABC");
        let difference = assert_round_trip(&[], &new);
        assert_eq!(difference.len(), 3);
        let indexes: Vec<_> = difference.insertions().map(|(index, _)| index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_full_to_empty_is_all_removes() {
        let old = items("ABC");
        let difference = assert_round_trip(&old, &[]);
        let removals: Vec<_> = difference.removals().collect();
        assert_eq!(removals, vec![2, 1, 0]);
        assert_eq!(difference.len(), 3);
    }

    #[test]
    fn test_single_swap_is_one_move() {
        let difference = assert_round_trip(&items("ABCDE"), &items("ACBDE"));
        assert_eq!(difference.moves().collect::<Vec<_>>(), vec![(2, 1)]);
        assert_eq!(difference.len(), 1);
    }

    #[test]
    fn test_rotation_is_one_move() {
        let difference = assert_round_trip(&items("ABCDE"), &items("BCDEA"));
        assert_eq!(difference.moves().count(), 1);
        assert_eq!(difference.len(), 1);
    }

    #[test]
    fn test_reversal() {
        let difference = assert_round_trip(&items("ABCDE"), &items("EDCBA"));
        assert_eq!(difference.moves().count(), 4);
    }

    #[test]
    fn test_mixed_changes_follow_apply_order() {
        let difference = assert_round_trip(&items("ABCDEF"), &items("XFBDY"));

        let kinds: Vec<_> = difference.iter().map(Edit::kind).collect();
        let mut sorted = kinds.clone();
        let rank = |kind: &&str| match *kind {
            "remove" => 0,
            "move" => 1,
            "insert" => 2,
            _ => 3,
        };
        sorted.sort_by_key(rank);
        assert_eq!(kinds, sorted);

        let removals: Vec<_> = difference.removals().collect();
        assert_eq!(removals, vec![4, 2, 0]);
        let inserts: Vec<_> = difference.insertions().map(|(index, _)| index).collect();
        assert_eq!(inserts, vec![0, 4]);
    }

    #[test]
    fn test_payload_change_is_update_not_replace() {
        let old = items("ABC");
        let mut new = old.clone();
        new[1] = new[1].clone().with_badge(Badge::Count(4));

        let difference = assert_round_trip(&old, &new);
        assert_eq!(difference.len(), 1);
        let updates: Vec<_> = difference.updates().collect();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, 1);
        assert_eq!(updates[0].1.badge, Badge::Count(4));
    }

    #[test]
    fn test_moved_item_with_new_payload_is_updated_at_new_index() {
        let old = items("ABC");
        let mut new = items("CAB");
        new[0].title = "C*".to_string();

        let difference = assert_round_trip(&old, &new);
        let updates: Vec<_> = difference.updates().map(|(index, _)| index).collect();
        assert_eq!(updates, vec![0]);
    }

    #[test]
    fn test_duplicate_identities_match_in_order() {
        // Two tabs share identity "A"; each pairs with the earliest unpaired old one.
        let old = items("AAB");
        let new = items("BAA");
        let difference = assert_round_trip(&old, &new);
        assert!(difference.removals().next().is_none());
        assert!(difference.insertions().next().is_none());
    }

    #[test]
    fn test_pair_identities_keeps_duplicates_in_order() {
        let old = items("AAB");
        assert_eq!(pair_identities(&old, &items("BAA")), vec![Some(1), Some(2), Some(0)]);
        assert_eq!(pair_identities(&old, &items("A")), vec![Some(0), None, None]);
        assert!(pair_identities(&old, &[]).iter().all(Option::is_none));
    }

    #[test]
    fn test_hidden_overflow_insert() {
        let difference = assert_round_trip(&items("F"), &items("FG"));
        assert_eq!(difference.len(), 1);
        let inserted: Vec<_> = difference
            .insertions()
            .map(|(index, item)| (index, item.title.clone()))
            .collect();
        assert_eq!(inserted, vec![(1, "G".to_string())]);
    }

    #[test]
    fn test_longest_increasing_subsequence() {
        let members = longest_increasing_subsequence(&[0, 2, 1, 3, 4]);
        assert_eq!(members.iter().filter(|m| **m).count(), 4);
        assert!(!members[1] || !members[2]);

        assert!(longest_increasing_subsequence(&[]).is_empty());
        assert_eq!(
            longest_increasing_subsequence(&[3, 2, 1]).iter().filter(|m| **m).count(),
            1
        );
    }
}
