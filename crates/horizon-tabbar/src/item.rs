//! Tab item identity and payload.
//!
//! The tab bar never compares items by value as a whole. It asks two separate
//! questions through [`TabItem`]:
//!
//! - [`same_identity`](TabItem::same_identity): do these two values stand for
//!   the same logical tab across updates?
//! - [`payload_eq`](TabItem::payload_eq): would they look the same on screen?
//!
//! Two items with the same identity but a different payload are one tab that
//! needs an update, never a removal followed by an insertion.
//!
//! [`TabBarItem`] is a ready-made implementation keyed by [`TabId`].

use serde::{Deserialize, Serialize};

/// Trait for values that can be shown as tabs.
///
/// # Example
///
/// ```
/// use horizon_tabbar::TabItem;
///
/// #[derive(Clone)]
/// struct Document {
///     path: String,
///     title: String,
///     dirty: bool,
/// }
///
/// impl TabItem for Document {
///     fn same_identity(&self, other: &Self) -> bool {
///         self.path == other.path
///     }
///
///     fn payload_eq(&self, other: &Self) -> bool {
///         self.title == other.title && self.dirty == other.dirty
///     }
/// }
/// ```
pub trait TabItem: Clone + Send + Sync + 'static {
    /// Returns true if both values represent the same logical tab.
    fn same_identity(&self, other: &Self) -> bool;

    /// Returns true if both values would be displayed identically.
    fn payload_eq(&self, other: &Self) -> bool;

    /// Returns whether the tab can be selected.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Stable identity of a [`TabBarItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl From<u64> for TabId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Badge shown on top of a tab button.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Badge {
    /// No badge.
    #[default]
    None,
    /// A small dot indicating pending notifications.
    Dot,
    /// A counter.
    Count(u32),
    /// Free-form text.
    Text(String),
}

/// A tab with a title, an optional icon name and a badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabBarItem {
    /// Stable identity.
    pub id: TabId,
    /// Tab label text.
    pub title: String,
    /// Optional icon (resolved by the renderer).
    pub icon: Option<String>,
    /// Icon used while the tab is selected.
    pub selected_icon: Option<String>,
    /// Notification badge.
    pub badge: Badge,
    /// Whether the tab can be selected.
    pub enabled: bool,
}

impl TabBarItem {
    /// Create an enabled tab with no icon and no badge.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: TabId(id),
            title: title.into(),
            icon: None,
            selected_icon: None,
            badge: Badge::None,
            enabled: true,
        }
    }

    /// Set the icon using builder pattern.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the selected-state icon using builder pattern.
    pub fn with_selected_icon(mut self, icon: impl Into<String>) -> Self {
        self.selected_icon = Some(icon.into());
        self
    }

    /// Set the badge using builder pattern.
    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = badge;
        self
    }

    /// Set whether the tab is enabled using builder pattern.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns true if the tab shows a notification indicator.
    pub fn shows_notification(&self) -> bool {
        !matches!(self.badge, Badge::None)
    }
}

impl TabItem for TabBarItem {
    fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn payload_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Returns the position of the first item in `items` with the same identity as `item`.
pub fn position_of<T: TabItem>(items: &[T], item: &T) -> Option<usize> {
    items.iter().position(|candidate| candidate.same_identity(item))
}
