//! Selection state machine.
//!
//! The selection is a single index into the *visible* tabs, or nothing.
//! [`SelectionModel`] owns that index and is the only thing allowed to change
//! it. It does not raise notifications itself: each transition returns an
//! outcome, and the tab bar turns the outcomes that need it into did-select
//! notifications.
//!
//! Two kinds of transitions exist:
//!
//! - **User driven** ([`SelectionModel::request_select`]): validated, checked
//!   against a veto, and confirmed with a notification, even when the index
//!   is already selected.
//! - **Bookkeeping** ([`SelectionModel::items_changed`]): when the visible tabs
//!   change, the selection silently follows its tab to a new index, or falls
//!   back to the first tab when its tab is gone. The two halves are also
//!   available on their own, so the follow step can run while the new
//!   visible list is being installed and the vetoed fallback afterwards.

use horizon_tabbar_core::logging::targets;
use horizon_tabbar_core::{Result, TabBarError};

use crate::diff::pair_identities;
use crate::item::TabItem;

/// The state of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No tab is selected.
    #[default]
    None,
    /// The visible tab at this index is selected.
    Selected(usize),
}

/// Result of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tab at this visible index is now selected; did-select fires.
    Selected(usize),
    /// The veto refused, or the tab is disabled. Nothing changed.
    Rejected,
    /// The requested item is not among the visible tabs. Nothing changed.
    NotVisible,
}

impl SelectOutcome {
    /// Returns true if the selection request went through.
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectOutcome::Selected(_))
    }
}

/// How the selection reacted to a change of the visible tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Nothing to do.
    Unchanged,
    /// The selected tab moved; the selection followed it without notification.
    Followed { from: usize, to: usize },
    /// The selection fell back to this index; did-select fires.
    Reset { index: usize },
    /// The fallback selection was refused; nothing is selected now.
    ResetRejected,
    /// No visible tabs are left; nothing is selected now.
    Cleared,
}

impl SelectionChange {
    /// Returns true if this change must be announced with did-select.
    pub fn notifies(&self) -> bool {
        matches!(self, SelectionChange::Reset { .. })
    }
}

/// Owns the currently selected visible index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    state: SelectionState,
}

impl SelectionModel {
    /// Creates a model with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Returns the selected visible index, if any.
    pub fn current(&self) -> Option<usize> {
        match self.state {
            SelectionState::None => None,
            SelectionState::Selected(index) => Some(index),
        }
    }

    /// Returns true if the visible tab at `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.current() == Some(index)
    }

    /// Drops the selection without notification.
    pub fn clear(&mut self) {
        self.state = SelectionState::None;
    }

    /// Request the visible tab at `index`.
    ///
    /// Disabled tabs are refused before the veto is consulted. Selecting the
    /// current index again is allowed and reported as `Selected`.
    ///
    /// # Errors
    ///
    /// Returns [`TabBarError::SelectionOutOfRange`] if `index` is not a
    /// visible slot. The state is left untouched.
    pub fn request_select<T, F>(&mut self, index: usize, visible: &[T], veto: F) -> Result<SelectOutcome>
    where
        T: TabItem,
        F: FnOnce(&T, usize) -> bool,
    {
        let Some(item) = visible.get(index) else {
            let err = TabBarError::selection_out_of_range(index, visible.len());
            tracing::warn!(target: targets::SELECTION, %err, "invalid selection request");
            return Err(err);
        };

        if !item.is_enabled() {
            tracing::debug!(target: targets::SELECTION, index, "refusing disabled tab");
            return Ok(SelectOutcome::Rejected);
        }

        if !veto(item, index) {
            tracing::debug!(target: targets::SELECTION, index, "selection vetoed");
            return Ok(SelectOutcome::Rejected);
        }

        self.state = SelectionState::Selected(index);
        tracing::debug!(target: targets::SELECTION, index, "tab selected");
        Ok(SelectOutcome::Selected(index))
    }

    /// Repair the selection after the visible tabs changed from `previous` to
    /// `visible`.
    ///
    /// With `select_first` set, an empty selection also picks the first tab
    /// once tabs are available. Any fallback to index 0 goes through the same
    /// checks as [`request_select`](Self::request_select).
    ///
    /// This is [`follow_items`](Self::follow_items) followed, when needed, by
    /// [`reset_to_first`](Self::reset_to_first).
    pub fn items_changed<T, F>(
        &mut self,
        previous: &[T],
        visible: &[T],
        select_first: bool,
        veto: F,
    ) -> SelectionChange
    where
        T: TabItem,
        F: FnOnce(&T, usize) -> bool,
    {
        match self.follow_items(previous, visible, select_first) {
            Some(change) => change,
            None => self.reset_to_first(visible, veto),
        }
    }

    /// The part of a repair that needs no veto.
    ///
    /// The selected tab is tracked through the same identity pairing the
    /// reconciliation engine uses, so with duplicate identities the selection
    /// stays on the instance it was on. Returns `None` when the selection has
    /// to fall back to the first tab; the state is then `None` until
    /// [`reset_to_first`](Self::reset_to_first) runs.
    pub fn follow_items<T: TabItem>(
        &mut self,
        previous: &[T],
        visible: &[T],
        select_first: bool,
    ) -> Option<SelectionChange> {
        let SelectionState::Selected(index) = self.state else {
            if select_first && !visible.is_empty() {
                return None;
            }
            return Some(SelectionChange::Unchanged);
        };

        let paired = pair_identities(previous, visible).get(index).copied().flatten();
        let change = match paired {
            Some(to) if to == index => return Some(SelectionChange::Unchanged),
            Some(to) => {
                self.state = SelectionState::Selected(to);
                SelectionChange::Followed { from: index, to }
            }
            None if visible.is_empty() => {
                self.state = SelectionState::None;
                SelectionChange::Cleared
            }
            None => {
                tracing::debug!(target: targets::SELECTION, index, "selected tab went away");
                self.state = SelectionState::None;
                return None;
            }
        };
        tracing::debug!(target: targets::SELECTION, ?change, "selection repaired");
        Some(change)
    }

    /// Fall back to the first visible tab, through the disabled check and
    /// the veto. Nothing is selected afterwards if either refuses.
    pub fn reset_to_first<T, F>(&mut self, visible: &[T], veto: F) -> SelectionChange
    where
        T: TabItem,
        F: FnOnce(&T, usize) -> bool,
    {
        let change = if visible.is_empty() {
            self.state = SelectionState::None;
            SelectionChange::Cleared
        } else {
            match self.request_select(0, visible, veto) {
                Ok(SelectOutcome::Selected(index)) => SelectionChange::Reset { index },
                _ => {
                    self.state = SelectionState::None;
                    SelectionChange::ResetRejected
                }
            }
        };
        tracing::debug!(target: targets::SELECTION, ?change, "selection repaired");
        change
    }
}
