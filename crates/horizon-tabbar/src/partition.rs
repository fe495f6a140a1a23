//! Splitting the item list into visible and hidden tabs.
//!
//! A tab bar shows at most `capacity` tabs; the rest overflow into a hidden
//! list (typically presented behind a "More" button). Which indexes of the
//! full list are visible, and in which order, is decided by a
//! [`VisibleIndexPolicy`].
//!
//! # Example
//!
//! ```
//! use horizon_tabbar::{TabBarItem, partition::{partition, LeadingIndexes}};
//!
//! let items: Vec<_> = (0..7u64).map(|i| TabBarItem::new(i, format!("Tab {i}"))).collect();
//! let split = partition(&items, 5, &LeadingIndexes).unwrap();
//!
//! assert_eq!(split.visible.len(), 5);
//! assert_eq!(split.hidden.len(), 2);
//! ```

use horizon_tabbar_core::logging::targets;
use horizon_tabbar_core::{Result, TabBarError};

use crate::item::TabItem;

/// Decides which indexes of the full item list are visible.
///
/// Implementations must return at most `capacity` distinct indexes, each in
/// `0..count`. The tab bar treats the policy as trusted code: a violation is
/// reported as a [`TabBarError`] rather than being repaired.
pub trait VisibleIndexPolicy: Send + Sync {
    /// Returns the visible indexes, in display order.
    fn visible_indexes(&self, count: usize, capacity: usize) -> Vec<usize>;
}

/// The default policy: the first `capacity` items, in list order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadingIndexes;

impl VisibleIndexPolicy for LeadingIndexes {
    fn visible_indexes(&self, count: usize, capacity: usize) -> Vec<usize> {
        (0..count.min(capacity)).collect()
    }
}

/// The first `capacity` items, displayed in reverse order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReversedIndexes;

impl VisibleIndexPolicy for ReversedIndexes {
    fn visible_indexes(&self, count: usize, capacity: usize) -> Vec<usize> {
        (0..count.min(capacity)).rev().collect()
    }
}

impl<F> VisibleIndexPolicy for F
where
    F: Fn(usize, usize) -> Vec<usize> + Send + Sync,
{
    fn visible_indexes(&self, count: usize, capacity: usize) -> Vec<usize> {
        self(count, capacity)
    }
}

/// The result of splitting an item list.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    /// Items shown as tab buttons, in display order.
    pub visible: Vec<T>,
    /// Overflow items, in original list order.
    pub hidden: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            hidden: Vec::new(),
        }
    }
}

/// Split `items` into visible and hidden tabs.
///
/// A `capacity` of 0 means unlimited: the policy is consulted with the full
/// item count as its capacity, any index it leaves out is appended to the
/// visible tabs in list order, and the hidden list is always empty.
///
/// # Errors
///
/// Returns a policy error if the policy yields an index outside the list, a
/// duplicate index, or more indexes than the capacity allows.
pub fn partition<T: TabItem>(
    items: &[T],
    capacity: usize,
    policy: &dyn VisibleIndexPolicy,
) -> Result<Partition<T>> {
    let count = items.len();
    let unlimited = capacity == 0;
    let effective_capacity = if unlimited { count } else { capacity };

    let indexes = policy.visible_indexes(count, effective_capacity);
    validate_indexes(&indexes, count, effective_capacity)?;

    let mut taken = vec![false; count];
    let mut visible = Vec::with_capacity(indexes.len());
    for &index in &indexes {
        taken[index] = true;
        visible.push(items[index].clone());
    }

    let rest = items
        .iter()
        .zip(&taken)
        .filter(|(_, taken)| !**taken)
        .map(|(item, _)| item.clone());

    let result = if unlimited {
        visible.extend(rest);
        Partition {
            visible,
            hidden: Vec::new(),
        }
    } else {
        Partition {
            visible,
            hidden: rest.collect(),
        }
    };

    tracing::debug!(
        target: targets::PARTITION,
        count,
        capacity,
        visible = result.visible.len(),
        hidden = result.hidden.len(),
        "partitioned items"
    );
    Ok(result)
}

fn validate_indexes(indexes: &[usize], count: usize, capacity: usize) -> Result<()> {
    if indexes.len() > capacity {
        let err = TabBarError::PolicyOverCapacity {
            returned: indexes.len(),
            capacity,
        };
        tracing::warn!(target: targets::PARTITION, %err, "rejecting visible index policy result");
        return Err(err);
    }

    let mut seen = vec![false; count];
    for &index in indexes {
        if index >= count {
            let err = TabBarError::policy_index_out_of_range(index, count);
            tracing::warn!(target: targets::PARTITION, %err, "rejecting visible index policy result");
            return Err(err);
        }
        if std::mem::replace(&mut seen[index], true) {
            let err = TabBarError::PolicyDuplicateIndex { index };
            tracing::warn!(target: targets::PARTITION, %err, "rejecting visible index policy result");
            return Err(err);
        }
    }
    Ok(())
}
