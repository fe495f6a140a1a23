//! Prelude module for Horizon TabBar.
//!
//! ```
//! use horizon_tabbar::prelude::*;
//! ```

// ============================================================================
// Control
// ============================================================================

pub use crate::TabBar;
pub use crate::config::{LayoutOrientation, TabBarConfig};

// ============================================================================
// Items
// ============================================================================

pub use crate::item::{Badge, TabBarItem, TabId, TabItem};
pub use crate::partition::VisibleIndexPolicy;

// ============================================================================
// Notifications
// ============================================================================

pub use crate::delegate::{
    DelegateCapabilities, LongPressCapabilities, LongPressHandler, TabBarDelegate,
};
pub use crate::press::{PressEvent, PressPhase};
pub use crate::selection::SelectOutcome;
pub use horizon_tabbar_core::{Point, Signal};

// ============================================================================
// Rendering
// ============================================================================

pub use crate::diff::{Difference, Edit};
pub use crate::renderer::{MirrorRenderer, TabBarRenderer};
