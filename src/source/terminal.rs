//! Terminal source - crossterm-backed key state.
//!
//! Bridges crossterm's event stream into per-tick transitions. The host
//! loop calls [`TerminalSource::pump`] once per tick to drain whatever
//! events are pending, then hands the source to the detector.
//!
//! Only `Press` key events and mouse button `Down` events count as
//! transitions; repeats and releases are ignored, as are key codes
//! outside the tracked key space.
//!
//! # Example
//!
//! ```no_run
//! use spark_keybind::{KeyDetector, TerminalSource};
//!
//! let detector = KeyDetector::new();
//! detector.begin_continuous(|key| println!("{key:?}"));
//!
//! let mut source = TerminalSource::new();
//! loop {
//!     source.pump()?;
//!     detector.tick(&source);
//!     std::thread::sleep(std::time::Duration::from_millis(16));
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, ModifierKeyCode, MouseButton, MouseEventKind,
};
use log::trace;

use super::KeyStateSource;
use crate::types::Key;

// =============================================================================
// TerminalSource
// =============================================================================

/// Key state source fed by crossterm terminal events.
#[derive(Debug, Default)]
pub struct TerminalSource {
    pressed: Vec<Key>,
}

impl TerminalSource {
    /// Create a source with no pending transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain pending terminal events into this tick's transition list.
    ///
    /// Call once per tick, before the detector's tick. Never blocks:
    /// events are read only while one is already available.
    pub fn pump(&mut self) -> io::Result<()> {
        self.pressed.clear();
        while event::poll(Duration::ZERO)? {
            let terminal_event = event::read()?;
            self.apply_event(&terminal_event);
        }
        Ok(())
    }

    fn apply_event(&mut self, terminal_event: &Event) {
        match terminal_event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                if let Some(key) = convert_key_code(key_event.code) {
                    self.record(key);
                }
            }
            Event::Mouse(mouse_event) => {
                if let MouseEventKind::Down(button) = mouse_event.kind {
                    self.record(convert_mouse_button(button));
                }
            }
            _ => {}
        }
    }

    fn record(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            trace!("transition: {key:?}");
            self.pressed.push(key);
        }
    }
}

impl KeyStateSource for TerminalSource {
    fn has_any_transition(&self) -> bool {
        !self.pressed.is_empty()
    }

    fn pressed_keys_this_tick(&self) -> Vec<Key> {
        self.pressed.clone()
    }
}

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert a crossterm key code into our key space.
///
/// Codes with no counterpart (media keys, exotic modifiers) map to
/// `None` and are dropped by the pump.
pub fn convert_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Key::from_char(c),
        KeyCode::F(n) => convert_function_key(n),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::Tab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::CapsLock => Some(Key::CapsLock),
        KeyCode::Modifier(modifier) => convert_modifier_key(modifier),
        _ => None,
    }
}

fn convert_function_key(n: u8) -> Option<Key> {
    let key = match n {
        1 => Key::F1,
        2 => Key::F2,
        3 => Key::F3,
        4 => Key::F4,
        5 => Key::F5,
        6 => Key::F6,
        7 => Key::F7,
        8 => Key::F8,
        9 => Key::F9,
        10 => Key::F10,
        11 => Key::F11,
        12 => Key::F12,
        _ => return None,
    };
    Some(key)
}

fn convert_modifier_key(modifier: ModifierKeyCode) -> Option<Key> {
    let key = match modifier {
        ModifierKeyCode::LeftShift => Key::LeftShift,
        ModifierKeyCode::RightShift => Key::RightShift,
        ModifierKeyCode::LeftControl => Key::LeftCtrl,
        ModifierKeyCode::RightControl => Key::RightCtrl,
        ModifierKeyCode::LeftAlt => Key::LeftAlt,
        ModifierKeyCode::RightAlt => Key::RightAlt,
        _ => return None,
    };
    Some(key)
}

/// Convert a crossterm mouse button into our key space.
pub fn convert_mouse_button(button: MouseButton) -> Key {
    match button {
        MouseButton::Left => Key::MouseLeft,
        MouseButton::Right => Key::MouseRight,
        MouseButton::Middle => Key::MouseMiddle,
    }
}

// =============================================================================
// TESTS
// =============================================================================
