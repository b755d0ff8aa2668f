//! Neurotransmitter tests - clamping, balance boundaries, score multiplier

use synaptetris::core::{score_multiplier, NeuroSystem};
use synaptetris::types::{MoodAxis, MoodDescriptor, Neurotransmitter, SURGE_MULTIPLIER};

#[test]
fn test_repeated_surges_clamp_at_100() {
    let mut neuro = NeuroSystem::new();
    for _ in 0..10 {
        neuro.apply_release(Neurotransmitter::Dopamine, SURGE_MULTIPLIER, false);
    }
    assert_eq!(neuro.level(Neurotransmitter::Dopamine), 100);
    assert_eq!(neuro.mood(MoodAxis::Motivation), 100);
    assert_eq!(neuro.mood(MoodAxis::Pleasure), 100);
    // 50 - 10 * 2
    assert_eq!(neuro.level(Neurotransmitter::Endorphin), 30);
}

#[test]
fn test_repeated_decay_clamps_at_0() {
    let mut neuro = NeuroSystem::new();
    for _ in 0..40 {
        neuro.apply_release(Neurotransmitter::Gaba, SURGE_MULTIPLIER, false);
    }
    assert_eq!(neuro.level(Neurotransmitter::Gaba), 100);
    assert!(Neurotransmitter::ALL
        .into_iter()
        .filter(|nt| *nt != Neurotransmitter::Gaba)
        .all(|nt| neuro.level(nt) == 0));
    assert_eq!(neuro.mood(MoodAxis::Alertness), 0);
    assert_eq!(neuro.mood(MoodAxis::Calmness), 100);
    assert!(neuro.moods().iter().all(|&v| v <= 100));
}

#[test]
fn test_balance_boundaries_on_every_primary_axis() {
    for axis in MoodAxis::PRIMARY {
        let mut neuro = NeuroSystem::new();
        for (value, balanced) in [(39, false), (40, true), (60, true), (61, false)] {
            neuro.set_mood(axis, value);
            assert_eq!(neuro.is_balanced(), balanced, "{:?} = {}", axis, value);
        }
    }
}

#[test]
fn test_learning_does_not_affect_balance() {
    let mut neuro = NeuroSystem::new();
    neuro.set_mood(MoodAxis::Learning, 100);
    assert!(neuro.is_balanced());
    assert_eq!(neuro.descriptor(), MoodDescriptor::OptimalNeuralState);
}

#[test]
fn test_score_multiplier_priority() {
    let mut neuro = NeuroSystem::new();
    assert_eq!(score_multiplier(&neuro), 1.5);

    neuro.set_mood(MoodAxis::Focus, 81);
    neuro.set_mood(MoodAxis::Motivation, 81);
    assert_eq!(score_multiplier(&neuro), 1.4);

    neuro.set_mood(MoodAxis::Motivation, 50);
    assert_eq!(score_multiplier(&neuro), 1.3);

    neuro.set_mood(MoodAxis::Focus, 50);
    neuro.set_mood(MoodAxis::Happiness, 29);
    assert_eq!(score_multiplier(&neuro), 0.7);

    neuro.set_mood(MoodAxis::Happiness, 35);
    assert_eq!(score_multiplier(&neuro), 1.0);
}

#[test]
fn test_homeostasis_bonus_is_configurable() {
    let mut neuro = NeuroSystem::with_homeostasis_bonus(120);
    neuro.set_mood(MoodAxis::Calmness, 38);
    neuro.apply_release(Neurotransmitter::Gaba, 1, false);
    assert_eq!(neuro.take_homeostasis(), 120);
    assert_eq!(neuro.pending_homeostasis(), 0);
}
