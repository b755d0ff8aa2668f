//! Terminal renderer for Synaptetris.
//!
//! Rendering is split in two: [`game_view`] turns a
//! [`GameSnapshot`](synaptetris_core::GameSnapshot) into a framebuffer with no
//! I/O, and [`renderer`] flushes framebuffers to the terminal as diffs.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use synaptetris_core as core;
pub use synaptetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{chemical_color, power_up_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
