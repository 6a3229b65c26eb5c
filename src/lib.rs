//! # spark-keybind
//!
//! Single-key detection and key-binding for tick-driven applications.
//!
//! Built beside [spark-signals](https://github.com/RLabs-Inc/spark-signals):
//! the latest accepted key is reactive state.
//!
//! ## Architecture
//!
//! The host loop owns the cadence. Each tick it refreshes a key state
//! source and hands it to the detector:
//!
//! ```text
//! KeyStateSource → tick → candidate → InputFilter → listeners
//! ```
//!
//! The detector is a plain object: construct it, inject a source per
//! tick, compose as many as you need. One key is processed per tick;
//! callbacks run synchronously before `tick` returns, and the detector
//! is safe to re-enter from inside its own callbacks.
//!
//! ## Modules
//!
//! - [`types`] - The [`Key`] space and its fixed enumeration table
//! - [`filter`] - Allow/deny filtering, active iff non-empty
//! - [`detector`] - The detection state machine
//! - [`listener`] - Ordered listener registry with id-based removal
//! - [`source`] - The source capability, terminal and manual backends

pub mod detector;
pub mod filter;
pub mod listener;
pub mod source;
pub mod types;

// Re-export the working surface
pub use detector::KeyDetector;
pub use filter::{FilterMode, InputFilter};
pub use listener::ListenerId;
pub use source::{KeyStateSource, ManualSource, TerminalSource};
pub use types::Key;
