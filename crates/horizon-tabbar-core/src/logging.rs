//! Logging facilities for Horizon TabBar.
//!
//! Horizon TabBar uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the host installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_tabbar::diff=trace")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Use the constants in [`targets`] to filter logs per subsystem.

/// Span names used throughout Horizon TabBar for tracing.
pub mod span_names {
    /// The full items update pipeline.
    pub const UPDATE_ITEMS: &str = "horizon_tabbar::update_items";
    /// A single reconciliation pass.
    pub const RECONCILE: &str = "horizon_tabbar::reconcile";
    /// Performance measurement span, recorded under [`targets::PERF`].
    pub const PERF: &str = "perf";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_tabbar_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_tabbar_core::signal";
    /// The tab bar control target.
    pub const TAB_BAR: &str = "horizon_tabbar::tab_bar";
    /// Partitioning into visible and hidden tabs.
    pub const PARTITION: &str = "horizon_tabbar::partition";
    /// Reconciliation engine target.
    pub const DIFF: &str = "horizon_tabbar::diff";
    /// Selection state machine target.
    pub const SELECTION: &str = "horizon_tabbar::selection";
    /// Press interaction target.
    pub const PRESS: &str = "horizon_tabbar::press";
    /// Performance spans.
    pub const PERF: &str = "horizon_tabbar::perf";
}

/// A performance tracing span guard.
///
/// Records an `info`-level span for the lifetime of the guard, so the time
/// spent in an operation shows up in any timing-aware subscriber.
///
/// # Example
///
/// ```
/// use horizon_tabbar_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("reconcile_visible");
///     // ... expensive work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, span_names::PERF, operation = name);
        Self {
            span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}
