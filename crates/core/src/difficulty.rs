//! Difficulty module - drop interval formula and the single drop timer
//!
//! The interval grows with congestion (a crowded board falls slower), shrinks
//! with cleared lines, and is scaled by the brain state and timed effects:
//!
//! ```text
//! c   = congestion * congestion_weight
//! c  *= 0.3 (speed boost), 0.5 (calming), 0.1 (alertness boost)
//! raw = (base + c - lines * line_speedup) * brain_multiplier
//! raw *= 1.5 (slow fall)
//! interval = max(min_drop, round(raw))
//! ```

use tracing::trace;

use crate::config::GameConfig;
use crate::powerup::EffectTimers;
use crate::types::{BrainState, TimedEffect};

/// Inputs to the drop interval, gathered after each lock
#[derive(Debug, Clone, Copy)]
pub struct DropInputs<'a> {
    pub congestion: f32,
    pub lines: u32,
    pub brain: BrainState,
    pub effects: &'a EffectTimers,
}

/// Drop interval in milliseconds.
pub fn compute_drop_interval(config: &GameConfig, inputs: DropInputs<'_>) -> u32 {
    let mut congestion_ms = inputs.congestion * config.congestion_weight_ms as f32;
    if inputs.effects.is_active(TimedEffect::SpeedBoost) {
        congestion_ms *= 0.3;
    }
    if inputs.effects.is_active(TimedEffect::Calming) {
        congestion_ms *= 0.5;
    }
    if inputs.effects.is_active(TimedEffect::AlertnessBoost) {
        congestion_ms *= 0.1;
    }

    let line_speedup = inputs.lines as f32 * config.line_speedup_ms as f32;
    let mut raw = (config.base_drop_ms as f32 + congestion_ms - line_speedup)
        * inputs.brain.drop_multiplier();
    if inputs.effects.is_active(TimedEffect::SlowFall) {
        raw *= 1.5;
    }

    let floor = config.min_drop_ms as f32;
    raw.round().max(floor) as u32
}

/// Owner of the one gravity timer.
///
/// `restart` replaces whatever schedule was running; the generation counter
/// lets a caller notice that a drop it was processing belonged to an older
/// schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyController {
    interval_ms: u32,
    elapsed_ms: u32,
    running: bool,
    generation: u32,
}

impl DifficultyController {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            running: false,
            generation: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Time accumulated toward the next drop
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Start a fresh schedule at `interval_ms`.
    pub fn restart(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.elapsed_ms = 0;
        self.running = true;
        self.generation = self.generation.wrapping_add(1);
        trace!(
            interval_ms = self.interval_ms,
            generation = self.generation,
            "drop timer restarted"
        );
    }

    /// Record a new interval. A running timer moves to a new schedule but
    /// keeps the time already accumulated toward the next drop.
    pub fn retune(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        if self.running {
            self.generation = self.generation.wrapping_add(1);
            trace!(
                interval_ms = self.interval_ms,
                elapsed_ms = self.elapsed_ms,
                "drop timer retuned"
            );
        }
    }

    /// Idle until the next restart.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Add elapsed time and return how many drops are due.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let due = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        due
    }
}
