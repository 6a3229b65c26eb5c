//! Key detector - the single-key detection state machine.
//!
//! A [`KeyDetector`] watches a [`KeyStateSource`] one tick at a time.
//! When a key transitions to pressed it is checked against the
//! detector's [`InputFilter`]; accepted keys update the latest-key
//! state and fan out to listeners, rejected keys fan out to the
//! rejected listeners only. In single-shot mode the detector turns
//! itself off after the first accepted key.
//!
//! Every operation takes `&self`: state lives behind `Cell`/`RefCell`
//! so callbacks may re-enter the detector mid-dispatch (stop it, re-arm
//! it, edit the filter, add or remove listeners) without panics or
//! double fires. Dispatch always iterates a snapshot taken before the
//! first callback runs.
//!
//! # Example
//!
//! ```
//! use spark_keybind::{Key, KeyDetector, ManualSource};
//!
//! let detector = KeyDetector::new();
//! detector.begin_once(|key| println!("rebound jump to {key:?}"));
//!
//! let mut source = ManualSource::new();
//! source.press(Key::J);
//! detector.tick(&source);
//!
//! assert!(!detector.is_running()); // single shot turned itself off
//! assert_eq!(detector.last_key(), Some(Key::J));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bitflags::bitflags;
use log::{debug, trace};
use spark_signals::{Signal, signal};

use crate::filter::InputFilter;
use crate::listener::{ListenerId, ListenerSet};
use crate::source::KeyStateSource;
use crate::types::Key;

// =============================================================================
// DETECTOR FLAGS
// =============================================================================

bitflags! {
    /// Packed run-state of a detector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct Flags: u8 {
        /// Sampling input on tick.
        const RUNNING = 1 << 0;
        /// Deactivate after the next accepted key.
        const SINGLE_SHOT = 1 << 1;
    }
}

// =============================================================================
// CANDIDATE SELECTION
// =============================================================================

/// Pick the tick's candidate from the source's transition list.
///
/// Scans the key table front to back and keeps overwriting, so when
/// several keys land on the same tick the entry latest in the table
/// wins. Which key wins a two-keys-one-tick race is observable
/// downstream; flipping this to first-match changes binding outcomes.
fn latest_candidate(pressed: &[Key]) -> Option<Key> {
    if pressed.is_empty() {
        return None;
    }
    let mut found = None;
    for key in Key::ALL {
        if pressed.contains(key) {
            found = Some(*key);
        }
    }
    found
}

// =============================================================================
// KeyDetector
// =============================================================================

/// Single-key detection engine. See the module docs for the model.
pub struct KeyDetector {
    flags: Cell<Flags>,
    filter: RefCell<InputFilter>,
    accepted: RefCell<ListenerSet>,
    rejected: RefCell<ListenerSet>,
    pending_once: RefCell<Option<Box<dyn FnOnce(Key)>>>,
    last_key: Signal<Option<Key>>,
}

impl KeyDetector {
    /// Create an idle detector with an empty (inactive) filter.
    pub fn new() -> Self {
        Self {
            flags: Cell::new(Flags::empty()),
            filter: RefCell::new(InputFilter::new()),
            accepted: RefCell::new(ListenerSet::new()),
            rejected: RefCell::new(ListenerSet::new()),
            pending_once: RefCell::new(None),
            last_key: signal(None),
        }
    }

    /// Create an idle detector with filtering already configured.
    pub fn with_filter(filter: InputFilter) -> Self {
        let detector = Self::new();
        *detector.filter.borrow_mut() = filter;
        detector
    }

    // -------------------------------------------------------------------------
    // Run state
    // -------------------------------------------------------------------------

    /// Whether the detector is currently sampling input.
    pub fn is_running(&self) -> bool {
        self.flags.get().contains(Flags::RUNNING)
    }

    /// Detect exactly one key, then turn off.
    ///
    /// `action` runs once, after the continuous listeners, when the
    /// next valid key is accepted. Calling this again before a key
    /// arrives replaces the previous action.
    pub fn begin_once(&self, action: impl FnOnce(Key) + 'static) {
        *self.pending_once.borrow_mut() = Some(Box::new(action));
        self.flags.set(Flags::RUNNING | Flags::SINGLE_SHOT);
        debug!("detection started (single shot)");
    }

    /// Detect every valid key until told to stop.
    ///
    /// `action` joins the continuous listener set and also remains
    /// registered after [`KeyDetector::stop`]; use the returned id to
    /// take it out again. A pending single-shot action is dropped.
    pub fn begin_continuous(&self, action: impl Fn(Key) + 'static) -> ListenerId {
        let id = self.accepted.borrow_mut().add(Rc::new(action));
        self.pending_once.borrow_mut().take();
        self.flags.set(Flags::RUNNING);
        debug!("detection started (continuous)");
        id
    }

    /// Cancel detection: drop the pending single-shot action and stop
    /// sampling. Continuous listeners stay registered.
    pub fn stop(&self) {
        self.pending_once.borrow_mut().take();
        self.flags.set(Flags::empty());
        debug!("detection cancelled");
    }

    /// Suppress sampling without cancelling anything. The pending
    /// single-shot action and the mode survive a pause.
    pub fn pause(&self) {
        let mut flags = self.flags.get();
        flags.remove(Flags::RUNNING);
        self.flags.set(flags);
        debug!("detection paused");
    }

    /// Resume sampling after [`KeyDetector::pause`].
    pub fn resume(&self) {
        let mut flags = self.flags.get();
        flags.insert(Flags::RUNNING);
        self.flags.set(flags);
        debug!("detection resumed");
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a callback for every accepted key.
    ///
    /// Registration alone does not start the detector; pair with
    /// [`KeyDetector::resume`] or use [`KeyDetector::begin_continuous`].
    pub fn on_key_accepted(&self, callback: impl Fn(Key) + 'static) -> ListenerId {
        self.accepted.borrow_mut().add(Rc::new(callback))
    }

    /// Register a callback for keys the filter rejects.
    pub fn on_key_rejected(&self, callback: impl Fn(Key) + 'static) -> ListenerId {
        self.rejected.borrow_mut().add(Rc::new(callback))
    }

    /// Remove an accepted-key listener. Returns false if the id is not
    /// (or no longer) registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.accepted.borrow_mut().remove(id)
    }

    /// Remove a rejected-key listener.
    pub fn remove_rejected_listener(&self, id: ListenerId) -> bool {
        self.rejected.borrow_mut().remove(id)
    }

    /// Drop every accepted-key listener. The pending single-shot action
    /// and the rejected-key listeners are untouched.
    pub fn remove_all_listeners(&self) {
        self.accepted.borrow_mut().clear();
    }

    // -------------------------------------------------------------------------
    // Filter
    // -------------------------------------------------------------------------

    /// Replace the filter wholesale.
    pub fn set_filter(&self, filter: InputFilter) {
        *self.filter.borrow_mut() = filter;
    }

    /// Mutate (or inspect) the filter in place.
    pub fn edit_filter<R>(&self, edit: impl FnOnce(&mut InputFilter) -> R) -> R {
        let mut filter = self.filter.borrow_mut();
        edit(&mut filter)
    }

    /// Deactivate filtering by emptying the key set.
    pub fn clear_filter(&self) {
        self.filter.borrow_mut().clear();
    }

    // -------------------------------------------------------------------------
    // Latest key
    // -------------------------------------------------------------------------

    /// The most recently accepted key, if any. Persists across stop,
    /// pause, and single-shot deactivation.
    pub fn last_key(&self) -> Option<Key> {
        self.last_key.get()
    }

    /// Reactive handle on the latest accepted key.
    pub fn last_key_signal(&self) -> Signal<Option<Key>> {
        self.last_key.clone()
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Process one tick of input. No-op unless running.
    ///
    /// At most one key is processed per tick. Callbacks run
    /// synchronously, in registration order, before this returns; the
    /// single-shot action (if armed) runs last. A single-shot detector
    /// is already idle by the time its callbacks see the key, so a
    /// callback that re-arms it cannot be clobbered and nothing can
    /// fire twice.
    pub fn tick(&self, source: &dyn KeyStateSource) {
        if !self.flags.get().contains(Flags::RUNNING) {
            return;
        }
        if !source.has_any_transition() {
            return;
        }
        let pressed = source.pressed_keys_this_tick();
        let Some(key) = latest_candidate(&pressed) else {
            return;
        };

        let valid = self.filter.borrow().is_valid(key);
        if !valid {
            trace!("rejected {key:?}");
            let snapshot = self.rejected.borrow().snapshot();
            for callback in snapshot {
                callback(key);
            }
            return;
        }

        trace!("accepted {key:?}");
        self.last_key.set(Some(key));

        let pending = if self.flags.get().contains(Flags::SINGLE_SHOT) {
            // Back to idle before any callback runs.
            self.flags.set(Flags::empty());
            self.pending_once.borrow_mut().take()
        } else {
            None
        };

        let snapshot = self.accepted.borrow().snapshot();
        for callback in snapshot {
            callback(key);
        }
        if let Some(action) = pending {
            action(key);
        }
    }
}

impl Default for KeyDetector {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
