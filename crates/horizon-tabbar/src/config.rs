//! Tab bar configuration.
//!
//! [`TabBarConfig`] is plain data with serde support so hosts can keep it in
//! their own settings files. Missing fields take their defaults.
//!
//! ```
//! use horizon_tabbar::{LayoutOrientation, TabBarConfig};
//!
//! let config = TabBarConfig::default()
//!     .with_max_visible_tabs(4)
//!     .with_orientation(LayoutOrientation::Vertical);
//!
//! assert_eq!(config.max_visible_tabs, 4);
//! assert!(config.orientation.is_vertical());
//! ```

use serde::{Deserialize, Serialize};

/// Default number of visible tabs.
pub const DEFAULT_MAX_VISIBLE_TABS: usize = 5;

/// Direction in which the tab buttons are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutOrientation {
    /// Buttons side by side.
    #[default]
    Horizontal,
    /// Buttons stacked.
    Vertical,
}

impl LayoutOrientation {
    /// Returns true for [`LayoutOrientation::Horizontal`].
    pub fn is_horizontal(&self) -> bool {
        matches!(self, LayoutOrientation::Horizontal)
    }

    /// Returns true for [`LayoutOrientation::Vertical`].
    pub fn is_vertical(&self) -> bool {
        matches!(self, LayoutOrientation::Vertical)
    }
}

/// Behaviour settings of a [`TabBar`](crate::TabBar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabBarConfig {
    /// How many tabs are shown before the rest overflow. 0 means no limit.
    pub max_visible_tabs: usize,
    /// Layout direction.
    pub orientation: LayoutOrientation,
    /// Select the first tab once tabs become available and nothing is selected.
    pub select_first_on_populate: bool,
    /// Select the pressed tab when a press ends normally.
    pub select_on_press_end: bool,
}

impl Default for TabBarConfig {
    fn default() -> Self {
        Self {
            max_visible_tabs: DEFAULT_MAX_VISIBLE_TABS,
            orientation: LayoutOrientation::Horizontal,
            select_first_on_populate: true,
            select_on_press_end: true,
        }
    }
}

impl TabBarConfig {
    /// Set the visible tab capacity using builder pattern.
    pub fn with_max_visible_tabs(mut self, max: usize) -> Self {
        self.max_visible_tabs = max;
        self
    }

    /// Set the orientation using builder pattern.
    pub fn with_orientation(mut self, orientation: LayoutOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set whether the first tab is selected on populate using builder pattern.
    pub fn with_select_first_on_populate(mut self, enabled: bool) -> Self {
        self.select_first_on_populate = enabled;
        self
    }

    /// Set whether a completed press selects its tab using builder pattern.
    pub fn with_select_on_press_end(mut self, enabled: bool) -> Self {
        self.select_on_press_end = enabled;
        self
    }

    /// Returns true if every tab is visible.
    pub fn is_unlimited(&self) -> bool {
        self.max_visible_tabs == 0
    }
}
