//! Neuro module - neurotransmitter levels, mood axes, and the choice cycle
//!
//! Every spawn releases the piece's chemical at x1; a line clear with a
//! chemical piece releases it again at x5 (a surge). A release raises the
//! chemical, decays every other chemical, and pushes the mood axes along the
//! chemical's effect vector. All values clamp to [0, 100].
//!
//! Mood is read three ways:
//!
//! | Reading | Used by |
//! |---------|---------|
//! | [`NeuroSystem::descriptor`] | player-facing label, mood-change events |
//! | [`NeuroSystem::brain_state`] | drop interval multiplier |
//! | [`NeuroSystem::is_balanced`] | homeostasis bonus, both of the above |
//!
//! # Example
//!
//! ```
//! use synaptetris_core::NeuroSystem;
//! use synaptetris_core::types::{MoodAxis, Neurotransmitter};
//!
//! let mut neuro = NeuroSystem::new();
//! neuro.apply_release(Neurotransmitter::Dopamine, 5, false);
//! assert_eq!(neuro.level(Neurotransmitter::Dopamine), 100);
//! assert_eq!(neuro.level(Neurotransmitter::Gaba), 48);
//! assert_eq!(neuro.mood(MoodAxis::Motivation), 65);
//! ```

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{
    BrainState, MoodAxis, MoodDescriptor, Neurotransmitter, BALANCED_MAX, BALANCED_MIN,
    CHOICE_COUNT, HOMEOSTASIS_BONUS, MOOD_HIGH, MOOD_LOW, NEUTRAL_LEVEL, RELEASE_DECAY,
    RELEASE_LEVEL_GAIN,
};

const LEVEL_MAX: i16 = 100;

/// What a single release changed, beyond the raw values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseOutcome {
    /// Descriptor before and after, when it changed
    pub mood_change: Option<(MoodDescriptor, MoodDescriptor)>,
    /// The release moved the mood from unbalanced to balanced
    pub homeostasis: bool,
}

/// Chemical levels and mood state
#[derive(Debug, Clone, PartialEq)]
pub struct NeuroSystem {
    levels: [u8; 7],
    mood: [u8; 7],
    /// Points banked by homeostasis, paid on the next chemical line clear
    pending_homeostasis: u32,
    homeostasis_bonus: u32,
    was_balanced: bool,
}

impl NeuroSystem {
    pub fn new() -> Self {
        Self::with_homeostasis_bonus(HOMEOSTASIS_BONUS)
    }

    pub fn with_homeostasis_bonus(bonus: u32) -> Self {
        Self {
            levels: [NEUTRAL_LEVEL; 7],
            mood: [NEUTRAL_LEVEL; 7],
            pending_homeostasis: 0,
            homeostasis_bonus: bonus,
            // Every axis starts at 50, so a new game is already balanced.
            was_balanced: true,
        }
    }

    pub fn level(&self, nt: Neurotransmitter) -> u8 {
        self.levels[nt.index()]
    }

    pub fn levels(&self) -> [u8; 7] {
        self.levels
    }

    pub fn mood(&self, axis: MoodAxis) -> u8 {
        self.mood[axis.index()]
    }

    pub fn moods(&self) -> [u8; 7] {
        self.mood
    }

    /// Overwrite one mood axis (fixtures and tests). Clamped to 100.
    pub fn set_mood(&mut self, axis: MoodAxis, value: u8) {
        self.mood[axis.index()] = value.min(LEVEL_MAX as u8);
        self.was_balanced = self.is_balanced();
    }

    /// Overwrite one chemical level (fixtures and tests). Clamped to 100.
    pub fn set_level(&mut self, nt: Neurotransmitter, value: u8) {
        self.levels[nt.index()] = value.min(LEVEL_MAX as u8);
    }

    pub fn pending_homeostasis(&self) -> u32 {
        self.pending_homeostasis
    }

    /// Pay out and reset the homeostasis accumulator.
    pub fn take_homeostasis(&mut self) -> u32 {
        std::mem::take(&mut self.pending_homeostasis)
    }

    /// Three distinct chemicals: the one with the lowest level plus two random
    /// others, in random order.
    pub fn generate_choices(&self, rng: &mut SimpleRng) -> [Neurotransmitter; CHOICE_COUNT] {
        // `min_by_key` keeps the first of equal minima, i.e. enumeration order.
        let lowest = Neurotransmitter::ALL
            .into_iter()
            .min_by_key(|nt| self.level(*nt))
            .unwrap_or(Neurotransmitter::Dopamine);

        let mut rest: ArrayVec<Neurotransmitter, 7> = Neurotransmitter::ALL
            .into_iter()
            .filter(|nt| *nt != lowest)
            .collect();
        rng.shuffle(&mut rest);

        let mut choices = [lowest, rest[0], rest[1]];
        rng.shuffle(&mut choices);
        choices
    }

    /// Release `nt` at `multiplier`.
    ///
    /// With `preserve_monoamines`, the decay of every other chemical skips
    /// dopamine, serotonin and norepinephrine.
    pub fn apply_release(
        &mut self,
        nt: Neurotransmitter,
        multiplier: u8,
        preserve_monoamines: bool,
    ) -> ReleaseOutcome {
        let before = self.descriptor();
        let m = multiplier as i16;

        for other in Neurotransmitter::ALL {
            let slot = &mut self.levels[other.index()];
            if other == nt {
                *slot = clamp_level(*slot as i16 + RELEASE_LEVEL_GAIN as i16 * m);
            } else if !(preserve_monoamines && other.is_monoamine()) {
                *slot = clamp_level(*slot as i16 - RELEASE_DECAY as i16);
            }
        }

        for (axis, delta) in nt.mood_effects() {
            let slot = &mut self.mood[axis.index()];
            *slot = clamp_level(*slot as i16 + delta as i16 * m);
        }

        let after = self.descriptor();
        let balanced = self.is_balanced();
        let homeostasis = balanced && !self.was_balanced;
        if homeostasis {
            self.pending_homeostasis += self.homeostasis_bonus;
        }
        self.was_balanced = balanced;

        ReleaseOutcome {
            mood_change: (before != after).then_some((before, after)),
            homeostasis,
        }
    }

    /// All six primary axes within [40, 60]
    pub fn is_balanced(&self) -> bool {
        MoodAxis::PRIMARY
            .iter()
            .all(|axis| (BALANCED_MIN..=BALANCED_MAX).contains(&self.mood(*axis)))
    }

    fn high(&self, axis: MoodAxis) -> bool {
        self.mood(axis) > MOOD_HIGH
    }

    fn low(&self, axis: MoodAxis) -> bool {
        self.mood(axis) < MOOD_LOW
    }

    /// Player-facing mood label, first match wins.
    pub fn descriptor(&self) -> MoodDescriptor {
        use MoodAxis::*;

        if self.is_balanced() {
            MoodDescriptor::OptimalNeuralState
        } else if self.high(Pleasure) {
            MoodDescriptor::DopamineRush
        } else if self.high(Alertness) {
            MoodDescriptor::HyperfocusedState
        } else if self.high(Calmness) {
            MoodDescriptor::OverSedated
        } else if self.high(Motivation) {
            MoodDescriptor::PeakMotivation
        } else if self.high(Focus) {
            MoodDescriptor::LaserFocus
        } else if self.low(Happiness) {
            MoodDescriptor::NeuralDepression
        } else if self.low(Calmness) {
            MoodDescriptor::AnxietySpike
        } else if self.low(Alertness) {
            MoodDescriptor::NeuralFatigue
        } else {
            MoodDescriptor::ChemicalChaos
        }
    }

    /// Brain state driving the drop interval, first match wins.
    pub fn brain_state(&self) -> BrainState {
        use MoodAxis::*;

        if self.is_balanced() {
            BrainState::Balanced
        } else if self.high(Alertness) {
            BrainState::Hyperalert
        } else if self.low(Alertness) {
            BrainState::Drowsy
        } else if self.high(Calmness) {
            BrainState::Oversedated
        } else if self.low(Calmness) {
            BrainState::Anxious
        } else if self.high(Motivation) {
            BrainState::Motivated
        } else if self.high(Focus) {
            BrainState::Hyperfocused
        } else if self.high(Pleasure) {
            BrainState::Euphoric
        } else if self.low(Happiness) {
            BrainState::Melancholic
        } else {
            BrainState::Imbalanced
        }
    }
}

impl Default for NeuroSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_level(v: i16) -> u8 {
    v.clamp(0, LEVEL_MAX) as u8
}
