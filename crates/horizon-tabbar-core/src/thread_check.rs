//! Thread and re-entrancy checks for Horizon TabBar.
//!
//! The tab bar is an interactive control driven by one event-dispatch
//! thread. Two checks keep that model honest:
//!
//! - [`ThreadAffinity`] records the thread a control was created on and
//!   asserts (in debug builds) that later calls come from the same thread.
//! - [`ReentrancyGuard`] marks a section that must not be entered again while
//!   it is running, e.g. an items update whose notifications try to start
//!   another items update.
//!
//! # Example
//!
//! ```
//! use horizon_tabbar_core::thread_check::{ReentrancyGuard, ThreadAffinity};
//!
//! struct Control {
//!     affinity: ThreadAffinity,
//!     updating: ReentrancyGuard,
//! }
//!
//! impl Control {
//!     fn update(&self) -> bool {
//!         self.affinity.debug_assert_same_thread();
//!         let Some(_token) = self.updating.enter() else {
//!             return false;
//!         };
//!         // ... apply the update ...
//!         true
//!     }
//! }
//!
//! let control = Control {
//!     affinity: ThreadAffinity::current(),
//!     updating: ReentrancyGuard::new(),
//! };
//! assert!(control.update());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

/// Thread affinity tracker for controls.
///
/// Records the thread on which a control was created and provides methods to
/// verify that subsequent operations occur on the same thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// This always runs (debug and release builds).
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("tab bar accessed from wrong thread")
    }

    /// Assert that we are on the same thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the same thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {msg}\n\
            \n\
            Control was created on thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {current_id:?})\n\
            \n\
            Tab bar state (items, selection, press tracking) must only be\n\
            driven from the event-dispatch thread that created the control.\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id
        )
    }
}

/// Flags a section of code that must not be re-entered while it runs.
///
/// [`enter`](Self::enter) returns a [`ReentrancyToken`] while the section is
/// free and `None` while it is already held. The section is released when the
/// token is dropped, including during unwinding.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    active: AtomicBool,
}

impl ReentrancyGuard {
    /// Create a guard in the released state.
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    /// Enter the guarded section.
    ///
    /// Returns `None` if the section is already entered.
    #[must_use]
    pub fn enter(&self) -> Option<ReentrancyToken<'_>> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ReentrancyToken { guard: self })
    }

    /// Returns true while a token is alive.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Proof of being inside a [`ReentrancyGuard`] section.
#[derive(Debug)]
pub struct ReentrancyToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for ReentrancyToken<'_> {
    fn drop(&mut self) {
        self.guard.active.store(false, Ordering::Release);
    }
}
