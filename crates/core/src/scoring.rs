//! Scoring module - line clear points scaled by mood
//!
//! A clear of `n` lines is worth `n² × 100`, scaled by a multiplier read from
//! the mood before the surge of that same clear is applied. A memory boost
//! doubles the result.

use crate::neuro::NeuroSystem;
use crate::types::{MoodAxis, LINE_CLEAR_POINTS, MOOD_HIGH, MOOD_LOW};

/// Mood score multiplier, first match wins.
///
/// | Mood | Multiplier |
/// |------|------------|
/// | balanced | 1.5 |
/// | motivation > 80 | 1.4 |
/// | focus > 80 | 1.3 |
/// | pleasure > 80 | 1.2 |
/// | alertness > 80 | 1.25 |
/// | happiness < 30 | 0.7 |
/// | alertness < 30 | 0.8 |
/// | calmness > 80 | 0.9 |
/// | otherwise | 1.0 |
pub fn score_multiplier(neuro: &NeuroSystem) -> f32 {
    let high = |axis| neuro.mood(axis) > MOOD_HIGH;
    let low = |axis| neuro.mood(axis) < MOOD_LOW;

    if neuro.is_balanced() {
        1.5
    } else if high(MoodAxis::Motivation) {
        1.4
    } else if high(MoodAxis::Focus) {
        1.3
    } else if high(MoodAxis::Pleasure) {
        1.2
    } else if high(MoodAxis::Alertness) {
        1.25
    } else if low(MoodAxis::Happiness) {
        0.7
    } else if low(MoodAxis::Alertness) {
        0.8
    } else if high(MoodAxis::Calmness) {
        0.9
    } else {
        1.0
    }
}

/// Points for clearing `lines` rows at once.
pub fn line_clear_score(lines: u32, multiplier: f32, memory_boost: bool) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = lines * lines * LINE_CLEAR_POINTS;
    let mut points = (base as f32 * multiplier).round() as u32;
    if memory_boost {
        points = points.saturating_mul(2);
    }
    points
}
