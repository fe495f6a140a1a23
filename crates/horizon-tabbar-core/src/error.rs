//! Error types for Horizon TabBar.
//!
//! Only contract violations are errors. Rejected transitions (a vetoed
//! selection, a press event in the wrong state) are ordinary outcomes and
//! never show up here.

/// Result type alias for tab bar operations.
pub type Result<T> = std::result::Result<T, TabBarError>;

/// Programming-contract violations detected by the tab bar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TabBarError {
    /// A selection was requested for a slot outside the visible tabs.
    #[error("selection index {index} is out of range for {visible} visible tabs")]
    SelectionOutOfRange { index: usize, visible: usize },

    /// The visible index policy returned an index outside the item list.
    #[error("visible index policy returned index {index}, but there are only {count} items")]
    PolicyIndexOutOfRange { index: usize, count: usize },

    /// The visible index policy returned the same index twice.
    #[error("visible index policy returned index {index} more than once")]
    PolicyDuplicateIndex { index: usize },

    /// The visible index policy returned more indexes than the capacity allows.
    #[error("visible index policy returned {returned} indexes, but the capacity is {capacity}")]
    PolicyOverCapacity { returned: usize, capacity: usize },

    /// Items were updated from inside a notification raised by an update.
    #[error("tab items were updated re-entrantly while a previous update was being applied")]
    ReentrantUpdate,
}

impl TabBarError {
    /// Create a selection range error.
    pub fn selection_out_of_range(index: usize, visible: usize) -> Self {
        Self::SelectionOutOfRange { index, visible }
    }

    /// Create a policy range error.
    pub fn policy_index_out_of_range(index: usize, count: usize) -> Self {
        Self::PolicyIndexOutOfRange { index, count }
    }

    /// Returns true for errors caused by a misbehaving visible index policy.
    pub fn is_policy_error(&self) -> bool {
        matches!(
            self,
            Self::PolicyIndexOutOfRange { .. }
                | Self::PolicyDuplicateIndex { .. }
                | Self::PolicyOverCapacity { .. }
        )
    }
}
