//! The rendering side of the tab bar.
//!
//! The tab bar does not draw anything. After every items update it hands the
//! visible and hidden differences to a [`TabBarRenderer`], which updates its
//! buttons (or overflow menu entries) edit by edit. Empty differences are
//! never delivered.

use parking_lot::Mutex;

use crate::diff::Difference;

/// Applies reconciled changes to whatever displays the tabs.
///
/// Edits must be applied in the order given; see [`crate::diff`] for the
/// contract.
pub trait TabBarRenderer<T>: Send + Sync {
    /// Apply the changes to the visible tab buttons.
    fn apply_visible_difference(&self, difference: &Difference<T>);

    /// Apply the changes to the overflow list.
    fn apply_hidden_difference(&self, difference: &Difference<T>);
}

/// A renderer that keeps a copy of both lists by replaying the edits.
///
/// Useful as a model for real renderers and for checking that replayed
/// edits agree with the tab bar's own snapshot.
#[derive(Debug)]
pub struct MirrorRenderer<T> {
    visible: Mutex<Vec<T>>,
    hidden: Mutex<Vec<T>>,
    batches: Mutex<usize>,
}

impl<T> Default for MirrorRenderer<T> {
    fn default() -> Self {
        Self {
            visible: Mutex::new(Vec::new()),
            hidden: Mutex::new(Vec::new()),
            batches: Mutex::new(0),
        }
    }
}

impl<T: Clone> MirrorRenderer<T> {
    /// Create an empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mirrored visible tabs.
    pub fn visible(&self) -> Vec<T> {
        self.visible.lock().clone()
    }

    /// The mirrored hidden tabs.
    pub fn hidden(&self) -> Vec<T> {
        self.hidden.lock().clone()
    }

    /// How many differences have been applied so far.
    pub fn batches_applied(&self) -> usize {
        *self.batches.lock()
    }
}

impl<T: Clone + Send> TabBarRenderer<T> for MirrorRenderer<T> {
    fn apply_visible_difference(&self, difference: &Difference<T>) {
        difference.apply_to(&mut self.visible.lock());
        *self.batches.lock() += 1;
    }

    fn apply_hidden_difference(&self, difference: &Difference<T>) {
        difference.apply_to(&mut self.hidden.lock());
        *self.batches.lock() += 1;
    }
}
