//! Key state sources - where per-tick transitions come from.
//!
//! The detector never polls a platform API itself; it is handed a
//! [`KeyStateSource`] each tick. [`TerminalSource`] backs it with
//! crossterm events, [`ManualSource`] is driven by hand for tests and
//! for hosts that already track their own transitions.

mod terminal;

pub use terminal::TerminalSource;

use crate::types::Key;

// =============================================================================
// KeyStateSource
// =============================================================================

/// Per-tick view of key-down transitions.
///
/// A transition is a key going from released to pressed during the
/// current tick. Held keys and releases are not transitions.
pub trait KeyStateSource {
    /// Cheap probe: did any tracked key transition this tick?
    fn has_any_transition(&self) -> bool;

    /// Every key that transitioned this tick. Order is not significant;
    /// the detector resolves same-tick ties itself.
    fn pressed_keys_this_tick(&self) -> Vec<Key>;
}

// =============================================================================
// ManualSource
// =============================================================================

/// A source driven by the caller.
///
/// # Example
///
/// ```
/// use spark_keybind::{Key, KeyDetector, ManualSource};
///
/// let detector = KeyDetector::new();
/// detector.begin_once(|key| println!("bound {key:?}"));
///
/// let mut source = ManualSource::new();
/// source.press(Key::Space);
/// detector.tick(&source);
/// assert_eq!(detector.last_key(), Some(Key::Space));
/// ```
#[derive(Debug, Default)]
pub struct ManualSource {
    pressed: Vec<Key>,
}

impl ManualSource {
    /// Create a source with no pending transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down transition for the current tick.
    pub fn press(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
    }

    /// Record several transitions for the current tick.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Forget the current tick's transitions.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

impl KeyStateSource for ManualSource {
    fn has_any_transition(&self) -> bool {
        !self.pressed.is_empty()
    }

    fn pressed_keys_this_tick(&self) -> Vec<Key> {
        self.pressed.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_source_starts_quiet() {
        let source = ManualSource::new();
        assert!(!source.has_any_transition());
        assert!(source.pressed_keys_this_tick().is_empty());
    }

    #[test]
    fn test_press_and_clear() {
        let mut source = ManualSource::new();
        source.press(Key::A);
        source.press_all([Key::B, Key::C]);
        assert!(source.has_any_transition());
        assert_eq!(
            source.pressed_keys_this_tick(),
            vec![Key::A, Key::B, Key::C]
        );

        source.clear();
        assert!(!source.has_any_transition());
    }

    #[test]
    fn test_double_press_collapses() {
        let mut source = ManualSource::new();
        source.press(Key::A);
        source.press(Key::A);
        assert_eq!(source.pressed_keys_this_tick(), vec![Key::A]);
    }
}
