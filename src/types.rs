//! Core types for spark-keybind.
//!
//! [`Key`] is the identifier everything else trades in: the detector
//! reports it, the filter classifies it, sources enumerate it. It covers
//! the digital key space only - letters, digits, function keys,
//! navigation, modifier keys as keys in their own right, punctuation,
//! and mouse buttons. No analog axes, no scan codes.

// =============================================================================
// Key
// =============================================================================

/// A physical key or mouse button.
///
/// Equality and hashing are by identity. The declaration order below is
/// load-bearing: [`Key::ALL`] lists the variants in this order, and that
/// table order decides which key wins when several transition on the
/// same tick (see `KeyDetector`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    // Digits (top row)
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    // Whitespace and control
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    // Editing and navigation
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    // Arrows
    Up,
    Down,
    Left,
    Right,
    // Modifier keys
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    CapsLock,
    // Punctuation
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Grave,
    Comma,
    Period,
    Slash,
    // Mouse buttons
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

impl Key {
    /// Every key, in the fixed enumeration order of the key space.
    ///
    /// Candidate selection scans this table front to back; the entry
    /// latest in the table wins a same-tick tie.
    pub const ALL: &'static [Key] = &[
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::Digit0,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
        Key::Space,
        Key::Enter,
        Key::Escape,
        Key::Tab,
        Key::Backspace,
        Key::Insert,
        Key::Delete,
        Key::Home,
        Key::End,
        Key::PageUp,
        Key::PageDown,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::LeftShift,
        Key::RightShift,
        Key::LeftCtrl,
        Key::RightCtrl,
        Key::LeftAlt,
        Key::RightAlt,
        Key::CapsLock,
        Key::Minus,
        Key::Equals,
        Key::LeftBracket,
        Key::RightBracket,
        Key::Backslash,
        Key::Semicolon,
        Key::Apostrophe,
        Key::Grave,
        Key::Comma,
        Key::Period,
        Key::Slash,
        Key::MouseLeft,
        Key::MouseRight,
        Key::MouseMiddle,
    ];

    /// Map a printable character to its key, case-insensitively.
    ///
    /// Characters outside the tracked key space return `None`.
    pub fn from_char(c: char) -> Option<Key> {
        let key = match c.to_ascii_lowercase() {
            'a' => Key::A,
            'b' => Key::B,
            'c' => Key::C,
            'd' => Key::D,
            'e' => Key::E,
            'f' => Key::F,
            'g' => Key::G,
            'h' => Key::H,
            'i' => Key::I,
            'j' => Key::J,
            'k' => Key::K,
            'l' => Key::L,
            'm' => Key::M,
            'n' => Key::N,
            'o' => Key::O,
            'p' => Key::P,
            'q' => Key::Q,
            'r' => Key::R,
            's' => Key::S,
            't' => Key::T,
            'u' => Key::U,
            'v' => Key::V,
            'w' => Key::W,
            'x' => Key::X,
            'y' => Key::Y,
            'z' => Key::Z,
            '0' => Key::Digit0,
            '1' => Key::Digit1,
            '2' => Key::Digit2,
            '3' => Key::Digit3,
            '4' => Key::Digit4,
            '5' => Key::Digit5,
            '6' => Key::Digit6,
            '7' => Key::Digit7,
            '8' => Key::Digit8,
            '9' => Key::Digit9,
            ' ' => Key::Space,
            '-' => Key::Minus,
            '=' => Key::Equals,
            '[' => Key::LeftBracket,
            ']' => Key::RightBracket,
            '\\' => Key::Backslash,
            ';' => Key::Semicolon,
            '\'' => Key::Apostrophe,
            '`' => Key::Grave,
            ',' => Key::Comma,
            '.' => Key::Period,
            '/' => Key::Slash,
            _ => return None,
        };
        Some(key)
    }

    /// Check if this key is a mouse button.
    #[inline]
    pub const fn is_mouse_button(&self) -> bool {
        matches!(self, Key::MouseLeft | Key::MouseRight | Key::MouseMiddle)
    }

    /// Position of this key in the enumeration table.
    #[inline]
    pub fn table_index(&self) -> usize {
        Key::ALL.iter().position(|key| key == self).unwrap_or(0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_covers_every_key_once() {
        let unique: HashSet<Key> = Key::ALL.iter().copied().collect();
        assert_eq!(unique.len(), Key::ALL.len());
    }

    #[test]
    fn test_table_index_matches_position() {
        for (index, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.table_index(), index);
        }
    }

    #[test]
    fn test_from_char_letters_case_insensitive() {
        assert_eq!(Key::from_char('a'), Some(Key::A));
        assert_eq!(Key::from_char('A'), Some(Key::A));
        assert_eq!(Key::from_char('z'), Some(Key::Z));
        assert_eq!(Key::from_char('Z'), Some(Key::Z));
    }

    #[test]
    fn test_from_char_digits_and_punctuation() {
        assert_eq!(Key::from_char('0'), Some(Key::Digit0));
        assert_eq!(Key::from_char('9'), Some(Key::Digit9));
        assert_eq!(Key::from_char(' '), Some(Key::Space));
        assert_eq!(Key::from_char(';'), Some(Key::Semicolon));
        assert_eq!(Key::from_char('/'), Some(Key::Slash));
    }

    #[test]
    fn test_from_char_outside_key_space() {
        assert_eq!(Key::from_char('€'), None);
        assert_eq!(Key::from_char('\n'), None);
        assert_eq!(Key::from_char('!'), None);
    }

    #[test]
    fn test_mouse_buttons() {
        assert!(Key::MouseLeft.is_mouse_button());
        assert!(Key::MouseMiddle.is_mouse_button());
        assert!(!Key::A.is_mouse_button());
        assert!(!Key::Escape.is_mouse_button());
    }
}
