//! Delegates notified by the tab bar.
//!
//! A tab bar has at most one [`TabBarDelegate`] (selection veto and
//! did-select) and one [`LongPressHandler`]. Both are held weakly: the tab bar
//! never keeps its owner alive, and a dropped delegate simply stops receiving
//! calls.
//!
//! Every delegate method is optional. Which ones the tab bar calls is decided
//! once, when the delegate is installed, by its `capabilities()`. Changing the
//! answer afterwards has no effect until the delegate is installed again.

use std::sync::{Arc, Weak};

use crate::press::PressEvent;

/// Which [`TabBarDelegate`] methods the tab bar should call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelegateCapabilities {
    /// Call [`TabBarDelegate::should_select_item`].
    pub should_select: bool,
    /// Call [`TabBarDelegate::did_select_item`].
    pub did_select: bool,
}

impl DelegateCapabilities {
    /// Every method is called.
    pub const ALL: Self = Self {
        should_select: true,
        did_select: true,
    };

    /// No method is called.
    pub const NONE: Self = Self {
        should_select: false,
        did_select: false,
    };
}

impl Default for DelegateCapabilities {
    fn default() -> Self {
        Self::ALL
    }
}

/// Which [`LongPressHandler`] methods the tab bar should call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongPressCapabilities {
    /// Call [`LongPressHandler::long_press_began`].
    pub began: bool,
    /// Call [`LongPressHandler::long_press_changed`].
    pub changed: bool,
    /// Call [`LongPressHandler::long_press_ended`].
    pub ended: bool,
}

impl LongPressCapabilities {
    /// Every method is called.
    pub const ALL: Self = Self {
        began: true,
        changed: true,
        ended: true,
    };

    /// No method is called.
    pub const NONE: Self = Self {
        began: false,
        changed: false,
        ended: false,
    };
}

impl Default for LongPressCapabilities {
    fn default() -> Self {
        Self::ALL
    }
}

/// Receives selection notifications.
///
/// # Example
///
/// ```
/// use horizon_tabbar::{DelegateCapabilities, TabBarDelegate, TabBarItem};
///
/// struct ReadOnlySettings;
///
/// impl TabBarDelegate<TabBarItem> for ReadOnlySettings {
///     fn should_select_item(&self, item: &TabBarItem, _index: usize) -> bool {
///         item.title != "Settings"
///     }
///
///     fn capabilities(&self) -> DelegateCapabilities {
///         DelegateCapabilities { should_select: true, did_select: false }
///     }
/// }
/// ```
pub trait TabBarDelegate<T>: Send + Sync {
    /// Asked before a tab is selected. Returning false keeps the current
    /// selection.
    fn should_select_item(&self, _item: &T, _index: usize) -> bool {
        true
    }

    /// Called after a tab was selected.
    fn did_select_item(&self, _item: &T, _index: usize) {}

    /// The methods this delegate implements.
    fn capabilities(&self) -> DelegateCapabilities {
        DelegateCapabilities::ALL
    }
}

/// Receives long-press notifications.
pub trait LongPressHandler: Send + Sync {
    /// A press started.
    fn long_press_began(&self, _event: &PressEvent) {}

    /// The pointer of the press moved.
    fn long_press_changed(&self, _event: &PressEvent) {}

    /// The press ended. Check [`PressEvent::cancelled`] to tell a release from
    /// a cancellation.
    fn long_press_ended(&self, _event: &PressEvent) {}

    /// The methods this handler implements.
    fn capabilities(&self) -> LongPressCapabilities {
        LongPressCapabilities::ALL
    }
}

/// A weakly held delegate together with its captured capabilities.
pub(crate) struct DelegateSlot<D: ?Sized, C> {
    target: Weak<D>,
    capabilities: C,
}

impl<D: ?Sized, C: Copy> DelegateSlot<D, C> {
    pub(crate) fn new(target: &Arc<D>, capabilities: C) -> Self {
        Self {
            target: Arc::downgrade(target),
            capabilities,
        }
    }

    /// The delegate, if it is still alive, with its capabilities.
    pub(crate) fn get(&self) -> Option<(Arc<D>, C)> {
        self.target
            .upgrade()
            .map(|target| (target, self.capabilities))
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}
