//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameCommand`]. Every
//! command is discrete: one key press (or terminal repeat), one command.

pub mod map;

pub use synaptetris_types as types;

pub use map::{handle_key_event, should_quit};
