//! The tab bar control.
//!
//! [`TabBar`] owns the item list and keeps everything derived from it
//! consistent:
//!
//! 1. the list is split into visible and hidden tabs ([`crate::partition`]),
//! 2. each half is reconciled against its previous snapshot ([`crate::diff`]),
//! 3. the new lists are installed together with the followed selection
//!    ([`crate::selection`]), and a press whose tab went away is cancelled
//!    ([`crate::press`]),
//! 4. a selection whose tab went away falls back to the first tab,
//! 5. the non-empty differences go to the [`TabBarRenderer`] and the
//!    cancelled press is reported.
//!
//! All methods take `&self` so delegates and signal slots may call back into
//! the tab bar. No internal lock is held while user code runs. Starting a new
//! items update from inside a callback of a running one fails with
//! [`TabBarError::ReentrantUpdate`].
//!
//! # Signals
//!
//! - `tab_selected(usize)`: a tab was selected (mirrors did-select)
//! - `long_press(PressEvent)`: any press notification
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tabbar::{MirrorRenderer, TabBar, TabBarItem};
//!
//! let renderer = Arc::new(MirrorRenderer::new());
//! let tab_bar = TabBar::new()
//!     .with_max_visible_tabs(3)
//!     .with_renderer(renderer.clone());
//!
//! tab_bar.tab_selected.connect(|index| {
//!     println!("selected {index}");
//! });
//!
//! let items: Vec<_> = ["Home", "Search", "Inbox", "Profile"]
//!     .iter()
//!     .enumerate()
//!     .map(|(id, title)| TabBarItem::new(id as u64, *title))
//!     .collect();
//! tab_bar.update_items(items).unwrap();
//!
//! assert_eq!(renderer.visible().len(), 3);
//! assert_eq!(renderer.hidden().len(), 1);
//! assert_eq!(tab_bar.current_selection(), Some(0));
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use horizon_tabbar_core::logging::{PerfSpan, span_names, targets};
use horizon_tabbar_core::{Point, ReentrancyGuard, Result, Signal, TabBarError, ThreadAffinity};

use crate::config::{LayoutOrientation, TabBarConfig};
use crate::delegate::{
    DelegateCapabilities, DelegateSlot, LongPressCapabilities, LongPressHandler, TabBarDelegate,
};
use crate::diff::diff;
use crate::item::{TabItem, position_of};
use crate::partition::{LeadingIndexes, VisibleIndexPolicy, partition};
use crate::press::{PressEvent, PressPhase, PressState, PressTracker};
use crate::renderer::TabBarRenderer;
use crate::selection::{SelectOutcome, SelectionChange, SelectionModel};

type DelegateRef<T> = DelegateSlot<dyn TabBarDelegate<T>, DelegateCapabilities>;
type LongPressRef = DelegateSlot<dyn LongPressHandler, LongPressCapabilities>;

/// Everything derived from the item list.
struct TabBarState<T> {
    items: Vec<T>,
    visible: Vec<T>,
    hidden: Vec<T>,
    selection: SelectionModel,
    press: PressTracker,
}

impl<T> Default for TabBarState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            hidden: Vec::new(),
            selection: SelectionModel::new(),
            press: PressTracker::new(),
        }
    }
}

/// A tab bar showing a bounded number of tabs with overflow.
pub struct TabBar<T: TabItem> {
    state: Mutex<TabBarState<T>>,
    config: RwLock<TabBarConfig>,
    policy: RwLock<Arc<dyn VisibleIndexPolicy>>,
    renderer: RwLock<Option<Arc<dyn TabBarRenderer<T>>>>,
    delegate: RwLock<Option<DelegateRef<T>>>,
    long_press_handler: RwLock<Option<LongPressRef>>,
    update_guard: ReentrancyGuard,
    thread: ThreadAffinity,

    /// Signal emitted when a tab is selected, with its visible index.
    pub tab_selected: Signal<usize>,

    /// Signal emitted for every press notification.
    pub long_press: Signal<PressEvent>,
}

impl<T: TabItem> Default for TabBar<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TabItem> TabBar<T> {
    /// Create an empty tab bar with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TabBarConfig::default())
    }

    /// Create an empty tab bar with the given configuration.
    pub fn with_config(config: TabBarConfig) -> Self {
        Self {
            state: Mutex::new(TabBarState::default()),
            config: RwLock::new(config),
            policy: RwLock::new(Arc::new(LeadingIndexes)),
            renderer: RwLock::new(None),
            delegate: RwLock::new(None),
            long_press_handler: RwLock::new(None),
            update_guard: ReentrancyGuard::new(),
            thread: ThreadAffinity::current(),
            tab_selected: Signal::new(),
            long_press: Signal::new(),
        }
    }

    /// Set the visible tab capacity using builder pattern.
    ///
    /// Use [`set_max_visible_tabs`](Self::set_max_visible_tabs) once items are
    /// present.
    pub fn with_max_visible_tabs(self, max: usize) -> Self {
        self.config.write().max_visible_tabs = max;
        self
    }

    /// Set the orientation using builder pattern.
    pub fn with_orientation(self, orientation: LayoutOrientation) -> Self {
        self.config.write().orientation = orientation;
        self
    }

    /// Set the visible index policy using builder pattern.
    pub fn with_visible_index_policy<P>(self, policy: P) -> Self
    where
        P: VisibleIndexPolicy + 'static,
    {
        *self.policy.write() = Arc::new(policy);
        self
    }

    /// Set the renderer using builder pattern.
    pub fn with_renderer<R>(self, renderer: Arc<R>) -> Self
    where
        R: TabBarRenderer<T> + 'static,
    {
        self.set_renderer(renderer);
        self
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Install the renderer that receives differences from now on.
    ///
    /// The renderer is expected to reflect the current tabs already; nothing
    /// is replayed.
    pub fn set_renderer<R>(&self, renderer: Arc<R>)
    where
        R: TabBarRenderer<T> + 'static,
    {
        let renderer: Arc<dyn TabBarRenderer<T>> = renderer;
        *self.renderer.write() = Some(renderer);
    }

    /// Install the selection delegate. Held weakly.
    ///
    /// The delegate's [`capabilities`](TabBarDelegate::capabilities) are read
    /// once, here.
    pub fn set_delegate<D>(&self, delegate: &Arc<D>)
    where
        D: TabBarDelegate<T> + 'static,
    {
        let capabilities = TabBarDelegate::<T>::capabilities(&**delegate);
        let target: Arc<dyn TabBarDelegate<T>> = delegate.clone();
        *self.delegate.write() = Some(DelegateSlot::new(&target, capabilities));
        tracing::debug!(target: targets::TAB_BAR, ?capabilities, "delegate installed");
    }

    /// Remove the selection delegate.
    pub fn clear_delegate(&self) {
        *self.delegate.write() = None;
    }

    /// Returns true if a selection delegate is installed and still alive.
    pub fn has_delegate(&self) -> bool {
        self.delegate.read().as_ref().is_some_and(DelegateSlot::is_alive)
    }

    /// Install the long-press handler. Held weakly.
    pub fn set_long_press_handler<H>(&self, handler: &Arc<H>)
    where
        H: LongPressHandler + 'static,
    {
        let capabilities = LongPressHandler::capabilities(&**handler);
        let target: Arc<dyn LongPressHandler> = handler.clone();
        *self.long_press_handler.write() = Some(DelegateSlot::new(&target, capabilities));
        tracing::debug!(target: targets::TAB_BAR, ?capabilities, "long-press handler installed");
    }

    /// Remove the long-press handler.
    pub fn clear_long_press_handler(&self) {
        *self.long_press_handler.write() = None;
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Replace the item list.
    ///
    /// Partitions the items and installs the new visible and hidden lists
    /// together with the repaired selection. Then it runs any fallback
    /// selection, sends the differences to the renderer and reports a press
    /// cancelled by the update.
    ///
    /// # Errors
    ///
    /// - [`TabBarError::ReentrantUpdate`] if called while another update is
    ///   running on this tab bar.
    /// - A policy error if the visible index policy misbehaves. Nothing is
    ///   changed in that case.
    pub fn update_items(&self, items: Vec<T>) -> Result<()> {
        self.thread.debug_assert_same_thread();
        let _span = tracing::debug_span!(
            target: targets::TAB_BAR,
            span_names::UPDATE_ITEMS,
            count = items.len()
        )
        .entered();
        let Some(_token) = self.update_guard.enter() else {
            return Err(Self::reentrant_update());
        };
        self.run_pipeline(items)
    }

    /// Change the visible tab capacity and re-partition the current items.
    ///
    /// # Errors
    ///
    /// Same as [`update_items`](Self::update_items). On error the previous
    /// capacity is kept.
    pub fn set_max_visible_tabs(&self, max: usize) -> Result<()> {
        self.thread.debug_assert_same_thread();
        let Some(_token) = self.update_guard.enter() else {
            return Err(Self::reentrant_update());
        };

        let previous = std::mem::replace(&mut self.config.write().max_visible_tabs, max);
        let items = self.state.lock().items.clone();
        self.run_pipeline(items).inspect_err(|_| {
            self.config.write().max_visible_tabs = previous;
        })
    }

    /// Swap the visible index policy and re-partition the current items.
    ///
    /// # Errors
    ///
    /// Same as [`update_items`](Self::update_items). On error the previous
    /// policy is kept.
    pub fn set_visible_index_policy<P>(&self, policy: P) -> Result<()>
    where
        P: VisibleIndexPolicy + 'static,
    {
        self.thread.debug_assert_same_thread();
        let Some(_token) = self.update_guard.enter() else {
            return Err(Self::reentrant_update());
        };

        let policy: Arc<dyn VisibleIndexPolicy> = Arc::new(policy);
        let previous = std::mem::replace(&mut *self.policy.write(), policy);
        let items = self.state.lock().items.clone();
        self.run_pipeline(items).inspect_err(|_| {
            *self.policy.write() = previous;
        })
    }

    fn reentrant_update() -> TabBarError {
        let err = TabBarError::ReentrantUpdate;
        tracing::warn!(target: targets::TAB_BAR, %err, "rejecting nested update");
        err
    }

    fn run_pipeline(&self, items: Vec<T>) -> Result<()> {
        let _perf = PerfSpan::new("tab_bar_pipeline");

        let (capacity, select_first) = {
            let config = self.config.read();
            (config.max_visible_tabs, config.select_first_on_populate)
        };
        let policy = self.policy.read().clone();
        let split = partition(&items, capacity, policy.as_ref())?;

        // The selection is repaired in the same critical section that installs
        // the new visible list, so no callback sees an index past its end.
        let (visible_diff, hidden_diff, needs_reset, cancelled_press) = {
            let mut state = self.state.lock();
            let visible_diff = diff(&state.visible, &split.visible);
            let hidden_diff = diff(&state.hidden, &split.hidden);

            let previous_visible = std::mem::replace(&mut state.visible, split.visible);
            state.hidden = split.hidden;
            state.items = items;

            let state = &mut *state;
            let needs_reset = state
                .selection
                .follow_items(&previous_visible, &state.visible, select_first)
                .is_none();

            // The pressed slot must still hold the same tab.
            let cancelled_press = match state.press.context() {
                Some(context) => {
                    let kept = previous_visible
                        .get(context.slot)
                        .zip(state.visible.get(context.slot))
                        .is_some_and(|(before, after)| before.same_identity(after));
                    if kept { None } else { state.press.cancel() }
                }
                None => None,
            };

            (visible_diff, hidden_diff, needs_reset, cancelled_press)
        };

        tracing::debug!(
            target: targets::TAB_BAR,
            visible_edits = visible_diff.len(),
            hidden_edits = hidden_diff.len(),
            "items reconciled"
        );

        if needs_reset {
            self.reset_selection();
        }

        let renderer = self.renderer.read().clone();
        if let Some(renderer) = renderer {
            if !visible_diff.is_empty() {
                renderer.apply_visible_difference(&visible_diff);
            }
            if !hidden_diff.is_empty() {
                renderer.apply_hidden_difference(&hidden_diff);
            }
        }

        if let Some(event) = cancelled_press {
            tracing::debug!(target: targets::TAB_BAR, slot = event.slot, "pressed tab went away");
            self.notify_press(&event);
        }

        Ok(())
    }

    /// Fall back to the first visible tab. The veto runs with no lock held.
    fn reset_selection(&self) {
        let visible = self.state.lock().visible.clone();

        let mut selection = SelectionModel::new();
        let change = selection.reset_to_first(&visible, |item, index| self.should_select(item, index));
        let SelectionChange::Reset { index } = change else {
            return;
        };

        {
            let mut state = self.state.lock();
            // A selection made from inside the veto wins.
            if state.selection.current().is_some() {
                return;
            }
            state.selection = selection;
        }

        if let Some(item) = visible.get(index) {
            self.notify_did_select(item, index);
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select the visible tab at `index`.
    ///
    /// The delegate may veto the selection, and disabled tabs are refused;
    /// both yield [`SelectOutcome::Rejected`]. Selecting the current tab again
    /// notifies again.
    ///
    /// # Errors
    ///
    /// Returns [`TabBarError::SelectionOutOfRange`] if `index` is not a
    /// visible slot.
    pub fn request_select(&self, index: usize) -> Result<SelectOutcome> {
        self.thread.debug_assert_same_thread();

        let (mut selection, visible) = {
            let state = self.state.lock();
            (state.selection, state.visible.clone())
        };

        let outcome = selection.request_select(index, &visible, |item, index| {
            self.should_select(item, index)
        })?;

        if let SelectOutcome::Selected(index) = outcome {
            self.state.lock().selection = selection;
            if let Some(item) = visible.get(index) {
                self.notify_did_select(item, index);
            }
        }
        Ok(outcome)
    }

    /// Select a tab by identity.
    ///
    /// Returns [`SelectOutcome::NotVisible`] if the item is hidden or not in
    /// the tab bar at all.
    pub fn select_item(&self, item: &T) -> Result<SelectOutcome> {
        let position = position_of(&self.state.lock().visible, item);
        match position {
            Some(index) => self.request_select(index),
            None => {
                tracing::debug!(target: targets::SELECTION, "item is not visible");
                Ok(SelectOutcome::NotVisible)
            }
        }
    }

    /// The selected visible index.
    pub fn current_selection(&self) -> Option<usize> {
        self.state.lock().selection.current()
    }

    /// The selected tab.
    pub fn selected_item(&self) -> Option<T> {
        let state = self.state.lock();
        state
            .selection
            .current()
            .and_then(|index| state.visible.get(index).cloned())
    }

    fn should_select(&self, item: &T, index: usize) -> bool {
        let delegate = self.delegate.read().as_ref().and_then(DelegateSlot::get);
        match delegate {
            Some((delegate, capabilities)) if capabilities.should_select => {
                delegate.should_select_item(item, index)
            }
            _ => true,
        }
    }

    fn notify_did_select(&self, item: &T, index: usize) {
        let delegate = self.delegate.read().as_ref().and_then(DelegateSlot::get);
        if let Some((delegate, capabilities)) = delegate
            && capabilities.did_select
        {
            delegate.did_select_item(item, index);
        }
        if self.tab_selected.is_observed() {
            self.tab_selected.emit(index);
        }
    }

    // =========================================================================
    // Press interaction
    // =========================================================================

    /// Start a press on a visible slot.
    ///
    /// Returns the `Began` event, or `None` if the press was ignored.
    pub fn press_begin(&self, slot: usize, location: impl Into<Point>) -> Option<PressEvent> {
        self.thread.debug_assert_same_thread();
        let event = {
            let mut state = self.state.lock();
            let visible_len = state.visible.len();
            state.press.begin(slot, location.into(), visible_len)
        }?;
        self.notify_press(&event);
        Some(event)
    }

    /// Move the pointer of the press in progress.
    pub fn press_change(&self, location: impl Into<Point>) -> Option<PressEvent> {
        self.thread.debug_assert_same_thread();
        let event = self.state.lock().press.change(location.into())?;
        self.notify_press(&event);
        Some(event)
    }

    /// Release the press in progress.
    ///
    /// When [`TabBarConfig::select_on_press_end`] is set, the pressed tab is
    /// then requested for selection.
    pub fn press_end(&self, location: impl Into<Point>) -> Option<PressEvent> {
        self.thread.debug_assert_same_thread();
        let event = self.state.lock().press.end(location.into())?;
        self.notify_press(&event);

        if event.is_completed() && self.config.read().select_on_press_end {
            if let Err(err) = self.request_select(event.slot) {
                tracing::debug!(target: targets::PRESS, %err, "pressed tab no longer selectable");
            }
        }
        Some(event)
    }

    /// Abandon the press in progress. Never selects.
    pub fn press_cancel(&self) -> Option<PressEvent> {
        self.thread.debug_assert_same_thread();
        let event = self.state.lock().press.cancel()?;
        self.notify_press(&event);
        Some(event)
    }

    /// The press state.
    pub fn press_state(&self) -> PressState {
        self.state.lock().press.state()
    }

    /// Returns true while a press is in progress.
    pub fn is_pressing(&self) -> bool {
        self.state.lock().press.is_pressing()
    }

    fn notify_press(&self, event: &PressEvent) {
        let handler = self
            .long_press_handler
            .read()
            .as_ref()
            .and_then(DelegateSlot::get);
        if let Some((handler, capabilities)) = handler {
            match event.phase {
                PressPhase::Began if capabilities.began => handler.long_press_began(event),
                PressPhase::Changed if capabilities.changed => handler.long_press_changed(event),
                PressPhase::Ended if capabilities.ended => handler.long_press_ended(event),
                _ => {}
            }
        }
        if self.long_press.is_observed() {
            self.long_press.emit(*event);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All items, in list order.
    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    /// The visible tabs, in display order.
    pub fn visible_items(&self) -> Vec<T> {
        self.state.lock().visible.clone()
    }

    /// The overflow tabs, in list order.
    pub fn hidden_items(&self) -> Vec<T> {
        self.state.lock().hidden.clone()
    }

    /// The tab shown at a visible slot.
    pub fn visible_item(&self, slot: usize) -> Option<T> {
        self.state.lock().visible.get(slot).cloned()
    }

    /// Number of visible tabs.
    pub fn visible_count(&self) -> usize {
        self.state.lock().visible.len()
    }

    /// Returns true if at least one tab is shown.
    pub fn is_visible(&self) -> bool {
        !self.state.lock().visible.is_empty()
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> TabBarConfig {
        self.config.read().clone()
    }

    /// The visible tab capacity (0 means unlimited).
    pub fn max_visible_tabs(&self) -> usize {
        self.config.read().max_visible_tabs
    }

    /// The layout orientation.
    pub fn orientation(&self) -> LayoutOrientation {
        self.config.read().orientation
    }

    /// Set the layout orientation. Does not affect the items.
    pub fn set_orientation(&self, orientation: LayoutOrientation) {
        self.config.write().orientation = orientation;
    }

    /// Returns true if the tabs are stacked vertically.
    pub fn is_vertical(&self) -> bool {
        self.orientation().is_vertical()
    }

    /// Set whether a completed press selects its tab.
    pub fn set_select_on_press_end(&self, enabled: bool) {
        self.config.write().select_on_press_end = enabled;
    }
}

impl<T: TabItem + std::fmt::Debug> std::fmt::Debug for TabBar<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TabBar")
            .field("visible", &state.visible)
            .field("hidden", &state.hidden)
            .field("selection", &state.selection.current())
            .field("press", &state.press.state())
            .field("config", &*self.config.read())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(TabBar<crate::item::TabBarItem>: Send, Sync);
