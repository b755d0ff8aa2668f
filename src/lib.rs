//! Synaptetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `synaptetris::{core,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use synaptetris_core as core;
pub use synaptetris_input as input;
pub use synaptetris_term as term;
pub use synaptetris_types as types;
