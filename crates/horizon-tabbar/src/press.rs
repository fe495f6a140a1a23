//! Press interaction state machine.
//!
//! Tracks at most one press on a visible tab slot at a time:
//!
//! ```text
//!           begin(slot < visible_len)
//!   Idle  ----------------------------->  Pressing
//!    ^                                     |    ^
//!    |        end(location) / cancel()     |    | change(location)
//!    +-------------------------------------+----+
//! ```
//!
//! Every accepted transition yields a [`PressEvent`]. Events that do not
//! fit the current state are ignored and yield nothing.

use horizon_tabbar_core::Point;
use horizon_tabbar_core::logging::targets;

/// The phase of a press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressPhase {
    /// The press started.
    Began,
    /// The pointer moved while pressed.
    Changed,
    /// The press finished, or was cancelled.
    Ended,
}

/// A press notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressEvent {
    /// Lifecycle phase.
    pub phase: PressPhase,
    /// The visible slot the press began on.
    pub slot: usize,
    /// Pointer location for this event.
    pub location: Point,
    /// True when an `Ended` event comes from a cancellation.
    pub cancelled: bool,
}

impl PressEvent {
    fn new(phase: PressPhase, context: PressContext) -> Self {
        Self {
            phase,
            slot: context.slot,
            location: context.last_location,
            cancelled: false,
        }
    }

    /// Returns true if this event completes a press normally.
    pub fn is_completed(&self) -> bool {
        self.phase == PressPhase::Ended && !self.cancelled
    }
}

/// The press in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressContext {
    /// The visible slot the press began on.
    pub slot: usize,
    /// The most recent pointer location.
    pub last_location: Point,
}

/// Press state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PressState {
    /// No press in progress.
    #[default]
    Idle,
    /// A press is in progress.
    Pressing(PressContext),
}

/// Tracks the press lifecycle. Never selects anything itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PressTracker {
    state: PressState,
}

impl PressTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PressState {
        self.state
    }

    /// The press in progress, if any.
    pub fn context(&self) -> Option<PressContext> {
        match self.state {
            PressState::Idle => None,
            PressState::Pressing(context) => Some(context),
        }
    }

    /// Returns true while a press is in progress.
    pub fn is_pressing(&self) -> bool {
        matches!(self.state, PressState::Pressing(_))
    }

    /// Start a press on `slot`.
    ///
    /// Ignored while another press is in progress or when `slot` is not a
    /// visible slot.
    pub fn begin(&mut self, slot: usize, location: Point, visible_len: usize) -> Option<PressEvent> {
        if self.is_pressing() {
            tracing::debug!(target: targets::PRESS, slot, "press already in progress");
            return None;
        }
        if slot >= visible_len {
            tracing::debug!(target: targets::PRESS, slot, visible_len, "press outside visible tabs");
            return None;
        }

        let context = PressContext {
            slot,
            last_location: location,
        };
        self.state = PressState::Pressing(context);
        tracing::trace!(target: targets::PRESS, slot, "press began");
        Some(PressEvent::new(PressPhase::Began, context))
    }

    /// Move the pointer of the press in progress.
    pub fn change(&mut self, location: Point) -> Option<PressEvent> {
        let PressState::Pressing(context) = &mut self.state else {
            return None;
        };
        context.last_location = location;
        Some(PressEvent::new(PressPhase::Changed, *context))
    }

    /// Finish the press in progress at `location`.
    pub fn end(&mut self, location: Point) -> Option<PressEvent> {
        let mut context = self.take()?;
        context.last_location = location;
        tracing::trace!(target: targets::PRESS, slot = context.slot, "press ended");
        Some(PressEvent::new(PressPhase::Ended, context))
    }

    /// Abandon the press in progress at its last known location.
    pub fn cancel(&mut self) -> Option<PressEvent> {
        let context = self.take()?;
        tracing::trace!(target: targets::PRESS, slot = context.slot, "press cancelled");
        Some(PressEvent {
            cancelled: true,
            ..PressEvent::new(PressPhase::Ended, context)
        })
    }

    fn take(&mut self) -> Option<PressContext> {
        match std::mem::take(&mut self.state) {
            PressState::Idle => None,
            PressState::Pressing(context) => Some(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_press_cycle() {
        let mut tracker = PressTracker::new();

        let began = tracker.begin(1, Point::new(10.0, 5.0), 3).unwrap();
        assert_eq!(began.phase, PressPhase::Began);
        assert_eq!(began.slot, 1);
        assert!(tracker.is_pressing());

        let changed = tracker.change(Point::new(12.0, 6.0)).unwrap();
        assert_eq!(changed.phase, PressPhase::Changed);
        assert_eq!(tracker.context().unwrap().last_location, Point::new(12.0, 6.0));

        let ended = tracker.end(Point::new(14.0, 7.0)).unwrap();
        assert_eq!(ended.phase, PressPhase::Ended);
        assert_eq!(ended.location, Point::new(14.0, 7.0));
        assert!(ended.is_completed());
        assert_eq!(tracker.state(), PressState::Idle);
    }

    #[test]
    fn test_events_ignored_while_idle() {
        let mut tracker = PressTracker::new();
        assert!(tracker.change(Point::ZERO).is_none());
        assert!(tracker.end(Point::ZERO).is_none());
        assert!(tracker.cancel().is_none());
        assert_eq!(tracker.state(), PressState::Idle);
    }

    #[test]
    fn test_second_begin_ignored() {
        let mut tracker = PressTracker::new();
        tracker.begin(0, Point::ZERO, 2).unwrap();
        assert!(tracker.begin(1, Point::ZERO, 2).is_none());
        assert_eq!(tracker.context().unwrap().slot, 0);
    }

    #[test]
    fn test_begin_outside_visible_slots_ignored() {
        let mut tracker = PressTracker::new();
        assert!(tracker.begin(2, Point::ZERO, 2).is_none());
        assert!(tracker.begin(0, Point::ZERO, 0).is_none());
        assert!(!tracker.is_pressing());
    }

    #[test]
    fn test_cancel_reports_last_location() {
        let mut tracker = PressTracker::new();
        tracker.begin(0, Point::new(1.0, 1.0), 1).unwrap();
        tracker.change(Point::new(4.0, 2.0)).unwrap();

        let cancelled = tracker.cancel().unwrap();
        assert_eq!(cancelled.phase, PressPhase::Ended);
        assert_eq!(cancelled.location, Point::new(4.0, 2.0));
        assert!(cancelled.cancelled);
        assert!(!cancelled.is_completed());
        assert!(!tracker.is_pressing());
    }
}
