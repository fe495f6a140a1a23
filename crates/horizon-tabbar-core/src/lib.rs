//! Core systems for Horizon TabBar.
//!
//! This crate provides the foundational pieces the tab bar control is built on:
//!
//! - **Errors**: [`TabBarError`] for contract violations
//! - **Signal/Slot System**: direct, type-safe notifications via [`Signal`]
//! - **Thread Checks**: [`ThreadAffinity`] and [`ReentrancyGuard`]
//! - **Logging**: `tracing` targets for filtering per subsystem
//! - **Geometry**: the [`Point`] carried by press events
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_tabbar_core::Signal;
//!
//! let tab_selected = Signal::<usize>::new();
//!
//! let conn_id = tab_selected.connect(|index| {
//!     println!("Selected tab {}", index);
//! });
//!
//! tab_selected.emit(2);
//! tab_selected.disconnect(conn_id);
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use error::{Result, TabBarError};
pub use geometry::Point;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::{ReentrancyGuard, ReentrancyToken, ThreadAffinity};
