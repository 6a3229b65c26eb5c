//! Rebind Demo - bind an action key at runtime, then watch it fire.
//!
//! Phase one waits for a single key (Escape is reserved and will be
//! rejected), phase two echoes every key until Escape quits.
//!
//! Run with: cargo run --example rebind

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::terminal;
use spark_keybind::{FilterMode, Key, KeyDetector, KeyStateSource, TerminalSource};

const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    env_logger::init();

    terminal::enable_raw_mode()?;
    let outcome = run();
    terminal::disable_raw_mode()?;
    outcome
}

fn run() -> Result<()> {
    let mut source = TerminalSource::new();
    let detector = Rc::new(KeyDetector::new());

    // Escape cancels things around here, so it cannot be bound.
    detector.edit_filter(|filter| {
        filter.set_mode(FilterMode::Deny);
        filter.add_key(Key::Escape);
    });
    detector.on_key_rejected(|key| {
        print!("{key:?} is reserved, pick another key\r\n");
    });

    print!("press a key to bind the action (Escape is reserved)\r\n");
    let bound = Rc::new(Cell::new(None));
    let bound_clone = bound.clone();
    detector.begin_once(move |key| {
        bound_clone.set(Some(key));
        print!("action bound to {key:?}\r\n");
    });

    while bound.get().is_none() {
        source.pump()?;
        detector.tick(&source);
        thread::sleep(TICK);
    }
    let Some(action_key) = bound.get() else {
        return Ok(());
    };

    print!("now mash keys - Escape quits\r\n");
    detector.clear_filter();
    detector.begin_continuous(move |key| {
        if key == action_key {
            print!("action fired ({key:?})\r\n");
        } else {
            print!("{key:?} is not bound\r\n");
        }
    });

    loop {
        source.pump()?;
        if source.pressed_keys_this_tick().contains(&Key::Escape) {
            break;
        }
        detector.tick(&source);
        thread::sleep(TICK);
    }
    Ok(())
}
