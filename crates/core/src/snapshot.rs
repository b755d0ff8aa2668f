//! Snapshot module - read-only view of a session for presentation
//!
//! A [`GameSnapshot`] is a plain copy: rendering it never touches the
//! session, and serializing it gives camelCase field names.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::piece::ActivePiece;
use crate::powerup::EFFECT_COUNT;
use crate::types::{
    BrainState, Cell, MoodDescriptor, Neurotransmitter, TimedEffect, BOARD_HEIGHT, BOARD_WIDTH,
    CHOICE_COUNT,
};

/// Coarse session state for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseView {
    AwaitingChoice,
    Active,
    Paused,
    GameOver,
}

/// Read-only view of a session, rebuilt on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActivePiece>,
    pub ghost_y: Option<i8>,
    pub phase: PhaseView,
    pub help_open: bool,
    pub choices: Option<[Neurotransmitter; CHOICE_COUNT]>,
    pub seed: u32,
    pub score: u32,
    pub lines: u32,
    pub congestion: f32,
    pub drop_interval_ms: u32,
    pub levels: [u8; 7],
    pub mood: [u8; 7],
    pub descriptor: MoodDescriptor,
    pub brain_state: BrainState,
    pub effects: ArrayVec<(TimedEffect, u32), EFFECT_COUNT>,
    pub memory_boost_uses: u8,
    pub pending_homeostasis: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == PhaseView::Active && !self.help_open
    }

    pub fn game_over(&self) -> bool {
        self.phase == PhaseView::GameOver
    }

    pub fn paused(&self) -> bool {
        self.phase == PhaseView::Paused
    }
}
