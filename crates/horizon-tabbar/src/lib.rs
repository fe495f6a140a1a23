//! Horizon TabBar - a selectable tab bar with overflow and incremental updates.
//!
//! The crate contains the logic of a tab bar control without any drawing:
//!
//! - [`partition`]: splits the items into visible tabs and an overflow list
//! - [`diff`]: turns two snapshots of a list into ordered edits
//! - [`selection`]: the selection state machine with delegate veto
//! - [`press`]: the press / long-press state machine
//! - [`TabBar`]: ties them together and notifies delegates and signals
//!
//! A [`TabBarRenderer`] receives the edits and does the actual drawing.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tabbar::prelude::*;
//!
//! struct NoSettings;
//!
//! impl TabBarDelegate<TabBarItem> for NoSettings {
//!     fn should_select_item(&self, item: &TabBarItem, _index: usize) -> bool {
//!         item.title != "Settings"
//!     }
//! }
//!
//! let tab_bar = TabBar::new();
//! let delegate = Arc::new(NoSettings);
//! tab_bar.set_delegate(&delegate);
//!
//! tab_bar
//!     .update_items(vec![
//!         TabBarItem::new(1, "Home"),
//!         TabBarItem::new(2, "Settings"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(tab_bar.request_select(1).unwrap(), SelectOutcome::Rejected);
//! assert_eq!(tab_bar.current_selection(), Some(0));
//! ```

pub use horizon_tabbar_core::*;

pub mod config;
pub mod delegate;
pub mod diff;
pub mod item;
pub mod partition;
pub mod prelude;
pub mod press;
pub mod renderer;
pub mod selection;
mod tab_bar;

pub use config::{LayoutOrientation, TabBarConfig};
pub use delegate::{DelegateCapabilities, LongPressCapabilities, LongPressHandler, TabBarDelegate};
pub use diff::{Difference, Edit};
pub use item::{Badge, TabBarItem, TabId, TabItem};
pub use partition::{LeadingIndexes, Partition, ReversedIndexes, VisibleIndexPolicy};
pub use press::{PressContext, PressEvent, PressPhase, PressState, PressTracker};
pub use renderer::{MirrorRenderer, TabBarRenderer};
pub use selection::{SelectOutcome, SelectionChange, SelectionModel, SelectionState};
pub use tab_bar::TabBar;
