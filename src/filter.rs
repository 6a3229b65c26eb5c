//! Input filter - decides which keys a detector accepts.
//!
//! A filter is a key set plus a polarity. Filtering is opt-in by
//! non-emptiness: a filter with no keys admits everything, so there is
//! no separate enabled flag to fall out of sync with the set. Disabling
//! filtering and clearing the set are the same operation.
//!
//! # Example
//!
//! ```
//! use spark_keybind::{FilterMode, InputFilter, Key};
//!
//! let mut filter = InputFilter::new();
//! assert!(filter.is_valid(Key::Q)); // empty filter admits everything
//!
//! filter.add_keys([Key::A, Key::B]);
//! assert!(filter.is_valid(Key::A));
//! assert!(!filter.is_valid(Key::Q));
//!
//! filter.set_mode(FilterMode::Deny);
//! assert!(!filter.is_valid(Key::A));
//! assert!(filter.is_valid(Key::Q));
//! ```

use std::collections::HashSet;

use crate::types::Key;

// =============================================================================
// FilterMode
// =============================================================================

/// Polarity of an [`InputFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// A key is valid only if it is in the key set (whitelist).
    #[default]
    Allow,
    /// A key is valid only if it is NOT in the key set (blacklist).
    Deny,
}

// =============================================================================
// InputFilter
// =============================================================================

/// Allow/deny key filter with activity derived from non-emptiness.
#[derive(Debug, Clone, Default)]
pub struct InputFilter {
    mode: FilterMode,
    keys: HashSet<Key>,
}

impl InputFilter {
    /// Create an empty, inactive filter (admits every key).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter pre-populated with keys.
    ///
    /// Active iff `keys` yields at least one key.
    pub fn with_keys(mode: FilterMode, keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            mode,
            keys: keys.into_iter().collect(),
        }
    }

    /// The filter's polarity.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Change the polarity. The key set is untouched.
    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// The current key set.
    pub fn keys(&self) -> &HashSet<Key> {
        &self.keys
    }

    /// Whether filtering is in effect. True iff the key set is non-empty.
    pub fn is_active(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Replace the key set wholesale.
    pub fn set_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys = keys.into_iter().collect();
    }

    /// Add one key to the set.
    pub fn add_key(&mut self, key: Key) {
        self.keys.insert(key);
    }

    /// Add several keys to the set.
    pub fn add_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys.extend(keys);
    }

    /// Remove one key from the set. Removing an absent key is a no-op.
    pub fn remove_key(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    /// Remove several keys from the set.
    pub fn remove_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.keys.remove(&key);
        }
    }

    /// Empty the key set, deactivating the filter.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Verdict for a candidate key.
    ///
    /// An inactive filter admits every key. An active one checks set
    /// membership with the polarity given by [`InputFilter::mode`].
    pub fn is_valid(&self, key: Key) -> bool {
        if !self.is_active() {
            return true;
        }
        match self.mode {
            FilterMode::Allow => self.keys.contains(&key),
            FilterMode::Deny => !self.keys.contains(&key),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_filter_is_inactive() {
        let filter = InputFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.mode(), FilterMode::Allow);
        assert!(filter.keys().is_empty());
    }

    #[test]
    fn test_empty_filter_admits_everything() {
        let filter = InputFilter::new();
        for key in Key::ALL {
            assert!(filter.is_valid(*key));
        }

        let deny = InputFilter::with_keys(FilterMode::Deny, []);
        assert!(!deny.is_active());
        assert!(deny.is_valid(Key::Z));
    }

    #[test]
    fn test_activity_follows_every_mutation() {
        let mut filter = InputFilter::new();

        filter.add_key(Key::A);
        assert!(filter.is_active());

        filter.remove_key(Key::A);
        assert!(!filter.is_active());

        filter.set_keys([Key::B, Key::C]);
        assert!(filter.is_active());

        filter.remove_keys([Key::B, Key::C]);
        assert!(!filter.is_active());

        filter.add_keys([Key::D]);
        filter.clear();
        assert!(!filter.is_active());
    }

    #[test]
    fn test_allow_mode_admits_members_only() {
        let filter = InputFilter::with_keys(FilterMode::Allow, [Key::A, Key::B]);
        assert!(filter.is_valid(Key::A));
        assert!(filter.is_valid(Key::B));
        assert!(!filter.is_valid(Key::C));
    }

    #[test]
    fn test_deny_mode_rejects_members_only() {
        let filter = InputFilter::with_keys(FilterMode::Deny, [Key::A, Key::B]);
        assert!(!filter.is_valid(Key::A));
        assert!(!filter.is_valid(Key::B));
        assert!(filter.is_valid(Key::C));
    }

    #[test]
    fn test_duplicate_adds_collapse() {
        let mut filter = InputFilter::new();
        filter.add_key(Key::A);
        filter.add_key(Key::A);
        filter.add_keys([Key::A, Key::A]);
        assert_eq!(filter.keys().len(), 1);
    }

    #[test]
    fn test_removing_absent_key_is_noop() {
        let mut filter = InputFilter::with_keys(FilterMode::Allow, [Key::A]);
        filter.remove_key(Key::Z);
        assert!(filter.is_active());
        assert_eq!(filter.keys().len(), 1);
    }

    #[test]
    fn test_set_keys_replaces_wholesale() {
        let mut filter = InputFilter::with_keys(FilterMode::Allow, [Key::A, Key::B]);
        filter.set_keys([Key::C]);
        assert!(!filter.is_valid(Key::A));
        assert!(filter.is_valid(Key::C));
    }

    fn arb_key() -> impl Strategy<Value = Key> {
        (0..Key::ALL.len()).prop_map(|index| Key::ALL[index])
    }

    proptest! {
        #[test]
        fn activity_equals_non_emptiness(keys in proptest::collection::vec(arb_key(), 0..16)) {
            let mut filter = InputFilter::new();
            filter.set_keys(keys.clone());
            prop_assert_eq!(filter.is_active(), !keys.is_empty());

            filter.remove_keys(keys);
            prop_assert!(!filter.is_active());
        }

        #[test]
        fn allow_and_deny_are_complements(
            keys in proptest::collection::vec(arb_key(), 1..16),
            probe in arb_key(),
        ) {
            let allow = InputFilter::with_keys(FilterMode::Allow, keys.clone());
            let deny = InputFilter::with_keys(FilterMode::Deny, keys);
            prop_assert_eq!(allow.is_valid(probe), !deny.is_valid(probe));
        }
    }
}
