//! Power-up module - effect resolution and timed effect countdowns
//!
//! A power-up is a 1x1 piece that never writes the board. When it locks its
//! effect resolves at once: a board mutation, points, a multi-use score boost,
//! or a timed flag. Timed flags live in [`EffectTimers`], a fixed array of
//! named countdowns that the drop-interval formula reads.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::types::{
    Block, Neurotransmitter, PowerUpKind, TimedEffect, MAO_INHIBITOR_POINTS, MEMORY_BOOST_USES,
    MYELIN_COLUMNS, NEUROTROPHIC_POINTS_PER_PAIR, PLASTICITY_ROWS, REUPTAKE_INHIBITOR_CELLS,
};

/// Number of distinct timed effects
pub const EFFECT_COUNT: usize = TimedEffect::ALL.len();

/// Remaining milliseconds per timed effect; zero means inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectTimers {
    remaining_ms: [u32; EFFECT_COUNT],
}

impl EffectTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or refresh `effect` for its full duration.
    pub fn activate(&mut self, effect: TimedEffect) {
        self.remaining_ms[effect.index()] = effect.duration_ms();
    }

    pub fn is_active(&self, effect: TimedEffect) -> bool {
        self.remaining_ms[effect.index()] > 0
    }

    pub fn remaining_ms(&self, effect: TimedEffect) -> u32 {
        self.remaining_ms[effect.index()]
    }

    /// Active effects with their remaining time, in declaration order.
    pub fn active(&self) -> ArrayVec<(TimedEffect, u32), EFFECT_COUNT> {
        TimedEffect::ALL
            .into_iter()
            .filter(|e| self.is_active(*e))
            .map(|e| (e, self.remaining_ms(e)))
            .collect()
    }

    /// Count every active effect down. Returns the effects that just ran out.
    pub fn tick(&mut self, elapsed_ms: u32) -> ArrayVec<TimedEffect, EFFECT_COUNT> {
        let mut expired = ArrayVec::new();
        for effect in TimedEffect::ALL {
            let slot = &mut self.remaining_ms[effect.index()];
            if *slot == 0 {
                continue;
            }
            *slot = slot.saturating_sub(elapsed_ms);
            if *slot == 0 {
                expired.push(effect);
            }
        }
        expired
    }
}

/// Result of resolving a power-up on lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerUpOutcome {
    /// Points awarded directly by the effect
    pub points: u32,
    /// Blocks removed from the board
    pub cells_cleared: usize,
    /// Timed flag started or refreshed
    pub timed: Option<TimedEffect>,
}

/// Power-up state carried across pieces
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PowerUpSystem {
    timers: EffectTimers,
    memory_boost_uses: u8,
}

impl PowerUpSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timers(&self) -> &EffectTimers {
        &self.timers
    }

    pub fn is_active(&self, effect: TimedEffect) -> bool {
        self.timers.is_active(effect)
    }

    pub fn memory_boost_uses(&self) -> u8 {
        self.memory_boost_uses
    }

    /// Use one memory boost if any are left.
    pub fn consume_memory_boost(&mut self) -> bool {
        if self.memory_boost_uses == 0 {
            return false;
        }
        self.memory_boost_uses -= 1;
        true
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> ArrayVec<TimedEffect, EFFECT_COUNT> {
        self.timers.tick(elapsed_ms)
    }

    /// Uniformly random power-up
    pub fn random_kind(rng: &mut SimpleRng) -> PowerUpKind {
        rng.pick(&PowerUpKind::ALL)
            .unwrap_or(PowerUpKind::AstrocyteSupport)
    }

    /// Apply the effect of `kind` to the board and session flags.
    pub fn resolve(
        &mut self,
        kind: PowerUpKind,
        board: &mut Board,
        rng: &mut SimpleRng,
    ) -> PowerUpOutcome {
        let mut outcome = PowerUpOutcome::default();

        match kind {
            PowerUpKind::ReuptakeInhibitor => {
                outcome.cells_cleared = board.clear_random_cells(REUPTAKE_INHIBITOR_CELLS, rng);
            }
            PowerUpKind::SynapticPlasticity => {
                board.reorganize_bottom_rows(PLASTICITY_ROWS, rng);
            }
            PowerUpKind::NeurotrophicFactor => {
                outcome.points = board.vertical_pairs() * NEUROTROPHIC_POINTS_PER_PAIR;
            }
            PowerUpKind::MyelinBooster => {
                let columns = board.random_columns(MYELIN_COLUMNS, rng);
                outcome.cells_cleared = board.clear_columns(&columns);
            }
            PowerUpKind::AstrocyteSupport => {
                outcome.cells_cleared = board.empty_row(board.height() as usize - 1);
            }
            PowerUpKind::MicrogliaActivation => {
                outcome.cells_cleared = board.clear_matching(|b| b == Block::Damaged);
            }
            PowerUpKind::CholinesteraseInhibitor => {
                self.memory_boost_uses = MEMORY_BOOST_USES;
            }
            PowerUpKind::NmdaModulator => {
                outcome.cells_cleared = board
                    .clear_matching(|b| b == Block::Vesicle(Neurotransmitter::Glutamate));
            }
            PowerUpKind::MaoInhibitor => {
                outcome.points = MAO_INHIBITOR_POINTS;
            }
            PowerUpKind::NeuralStimulant
            | PowerUpKind::GabaEnhancer
            | PowerUpKind::CalciumChannelBlocker
            | PowerUpKind::BloodBrainBarrier
            | PowerUpKind::AdenosineAntagonist => {}
        }

        if let Some(effect) = kind.timed_effect() {
            self.timers.activate(effect);
            outcome.timed = Some(effect);
        }

        outcome
    }
}
