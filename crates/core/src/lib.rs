//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every game rule and the session state machine. It has
//! no dependencies on terminals or I/O, so it is:
//!
//! - **Deterministic**: one seeded RNG drives every random decision
//! - **Testable**: each rule is a small function or type with unit tests
//! - **Portable**: any front end can drive it through commands and ticks
//!
//! # Module Structure
//!
//! - [`shapes`]: vesicle shapes per neurotransmitter and matrix rotation
//! - [`board`]: 10x20 grid, collision, line clearing, congestion
//! - [`piece`]: the active piece, movement and wall-kicked rotation
//! - [`neuro`]: chemical levels, mood axes, choices, homeostasis
//! - [`powerup`]: power-up effects and timed effect countdowns
//! - [`difficulty`]: drop interval formula and the drop timer
//! - [`scoring`]: line clear points and the mood score multiplier
//! - [`session`]: the state machine tying it all together
//! - [`config`]: init-time tuning and its validation
//!
//! # Example
//!
//! ```
//! use synaptetris_core::GameSession;
//! use synaptetris_core::types::{ChoiceSlot, GameCommand, GameEvent};
//!
//! let mut session = GameSession::new(12345);
//! assert!(session.choices().is_some());
//!
//! session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
//! session.apply_command(GameCommand::MoveRight);
//! session.apply_command(GameCommand::HardDrop);
//!
//! let locked = session
//!     .drain_events()
//!     .any(|e| matches!(e, GameEvent::PieceLocked { .. }));
//! assert!(locked);
//! assert_eq!(session.board().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with the
//! elapsed time. Gravity fires once per drop interval; timed effects count down
//! on the same clock.

pub mod board;
pub mod config;
pub mod difficulty;
pub mod neuro;
pub mod piece;
pub mod powerup;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use synaptetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use difficulty::{compute_drop_interval, DifficultyController, DropInputs};
pub use neuro::{NeuroSystem, ReleaseOutcome};
pub use piece::ActivePiece;
pub use powerup::{EffectTimers, PowerUpOutcome, PowerUpSystem};
pub use rng::SimpleRng;
pub use scoring::{line_clear_score, score_multiplier};
pub use session::{GameSession, Phase, Resume};
pub use shapes::{spawn_shape, vesicle_shape, Shape};
pub use snapshot::{GameSnapshot, PhaseView};
