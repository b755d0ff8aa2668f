//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable from the
//! core simulation, the terminal front end, and any recorder that serializes
//! snapshots or events.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (`BOARD_WIDTH / 2 - 1`, 0)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Front-end frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Drop interval before any modifiers |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Absolute minimum drop interval |
//! | `CONGESTION_WEIGHT_MS` | 1500 | Slowdown added at congestion 1.0 |
//! | `LINE_SPEEDUP_MS` | 10 | Speedup per cleared line |
//!
//! # Examples
//!
//! ```
//! use synaptetris_types::{GameCommand, MoodAxis, Neurotransmitter, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let nt = Neurotransmitter::from_str("gaba").unwrap();
//! assert_eq!(nt, Neurotransmitter::Gaba);
//! assert_eq!(nt.mood_effects()[0], (MoodAxis::Calmness, 4));
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop interval before congestion, lines and mood are applied
pub const BASE_DROP_MS: u32 = 1000;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Drop-interval slowdown at congestion 1.0
pub const CONGESTION_WEIGHT_MS: u32 = 1500;

/// Drop-interval speedup per cleared line
pub const LINE_SPEEDUP_MS: u32 = 10;

/// Congestion level above which a warning is raised
pub const CONGESTION_WARNING: f32 = 0.6;

/// Chance (percent) that a lock is followed by a power-up instead of a choice
pub const POWER_UP_CHANCE_PERCENT: u32 = 12;

/// Lines that must be cleared before power-ups can appear
pub const POWER_UP_MIN_LINES: u32 = 3;

/// Chance (percent) of a reuptake failure after a line clear
pub const REUPTAKE_FAILURE_PERCENT: u32 = 25;

/// Reuptake failure chance while the Blood-Brain Barrier is up
pub const REUPTAKE_FAILURE_SHIELDED_PERCENT: u32 = 10;

/// Bottom rows scanned for a reuptake failure
pub const REUPTAKE_SCAN_ROWS: u8 = 5;

/// Points banked when the mood becomes balanced
pub const HOMEOSTASIS_BONUS: u32 = 50;

/// Release multiplier applied on spawn
pub const BASE_RELEASE: u8 = 1;

/// Release multiplier applied on a line clear
pub const SURGE_MULTIPLIER: u8 = 5;

/// Level gained by a chemical per unit of release
pub const RELEASE_LEVEL_GAIN: u8 = 10;

/// Level lost by every other chemical on each release
pub const RELEASE_DECAY: u8 = 2;

/// Starting value for every chemical level and mood axis
pub const NEUTRAL_LEVEL: u8 = 50;

/// Inclusive range of every mood axis for a balanced state
pub const BALANCED_MIN: u8 = 40;
pub const BALANCED_MAX: u8 = 60;

/// Mood thresholds used by descriptors and multipliers
pub const MOOD_HIGH: u8 = 80;
pub const MOOD_LOW: u8 = 30;

/// Line clears boosted by a Cholinesterase Inhibitor
pub const MEMORY_BOOST_USES: u8 = 5;

/// Cells removed by a Reuptake Inhibitor
pub const REUPTAKE_INHIBITOR_CELLS: usize = 6;

/// Columns removed by a Myelin Booster
pub const MYELIN_COLUMNS: usize = 2;

/// Bottom rows reorganized by Synaptic Plasticity
pub const PLASTICITY_ROWS: u8 = 3;

/// Points per vertically adjacent pair for a Neurotrophic Factor
pub const NEUROTROPHIC_POINTS_PER_PAIR: u32 = 50;

/// Immediate points for a Monoamine Oxidase Inhibitor
pub const MAO_INHIBITOR_POINTS: u32 = 500;

/// Points per line before the line count is squared
pub const LINE_CLEAR_POINTS: u32 = 100;

/// A choice set always has three entries
pub const CHOICE_COUNT: usize = 3;

/// The seven neurotransmitters, one per vesicle shape.
///
/// The declaration order is the fixed enumeration order used to break ties
/// when picking the balancing choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Neurotransmitter {
    Dopamine,
    Serotonin,
    Gaba,
    Glutamate,
    Acetylcholine,
    Norepinephrine,
    Endorphin,
}

impl Neurotransmitter {
    pub const ALL: [Neurotransmitter; 7] = [
        Neurotransmitter::Dopamine,
        Neurotransmitter::Serotonin,
        Neurotransmitter::Gaba,
        Neurotransmitter::Glutamate,
        Neurotransmitter::Acetylcholine,
        Neurotransmitter::Norepinephrine,
        Neurotransmitter::Endorphin,
    ];

    /// Position in [`Neurotransmitter::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mood-effect vector released at multiplier 1.
    pub fn mood_effects(self) -> [(MoodAxis, i8); 2] {
        match self {
            Neurotransmitter::Dopamine => [(MoodAxis::Motivation, 3), (MoodAxis::Pleasure, 2)],
            Neurotransmitter::Serotonin => [(MoodAxis::Happiness, 4), (MoodAxis::Calmness, 1)],
            Neurotransmitter::Gaba => [(MoodAxis::Calmness, 4), (MoodAxis::Alertness, -2)],
            Neurotransmitter::Glutamate => [(MoodAxis::Alertness, 3), (MoodAxis::Learning, 2)],
            Neurotransmitter::Acetylcholine => [(MoodAxis::Focus, 3), (MoodAxis::Learning, 2)],
            Neurotransmitter::Norepinephrine => {
                [(MoodAxis::Alertness, 4), (MoodAxis::Motivation, 2)]
            }
            Neurotransmitter::Endorphin => [(MoodAxis::Pleasure, 4), (MoodAxis::Happiness, 2)],
        }
    }

    /// Dopamine, serotonin and norepinephrine.
    pub fn is_monoamine(self) -> bool {
        matches!(
            self,
            Neurotransmitter::Dopamine
                | Neurotransmitter::Serotonin
                | Neurotransmitter::Norepinephrine
        )
    }

    /// Parse from string (case-insensitive)
    ///
    /// ```
    /// use synaptetris_types::Neurotransmitter;
    ///
    /// assert_eq!(Neurotransmitter::from_str("Dopamine"), Some(Neurotransmitter::Dopamine));
    /// assert_eq!(Neurotransmitter::from_str("GABA"), Some(Neurotransmitter::Gaba));
    /// assert_eq!(Neurotransmitter::from_str("caffeine"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dopamine" => Some(Neurotransmitter::Dopamine),
            "serotonin" => Some(Neurotransmitter::Serotonin),
            "gaba" => Some(Neurotransmitter::Gaba),
            "glutamate" => Some(Neurotransmitter::Glutamate),
            "acetylcholine" => Some(Neurotransmitter::Acetylcholine),
            "norepinephrine" => Some(Neurotransmitter::Norepinephrine),
            "endorphin" => Some(Neurotransmitter::Endorphin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Neurotransmitter::Dopamine => "dopamine",
            Neurotransmitter::Serotonin => "serotonin",
            Neurotransmitter::Gaba => "gaba",
            Neurotransmitter::Glutamate => "glutamate",
            Neurotransmitter::Acetylcholine => "acetylcholine",
            Neurotransmitter::Norepinephrine => "norepinephrine",
            Neurotransmitter::Endorphin => "endorphin",
        }
    }
}

/// Mood axes driven by neurotransmitter release.
///
/// `Learning` is tracked but takes no part in descriptors, balance, or
/// multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoodAxis {
    Happiness,
    Calmness,
    Alertness,
    Motivation,
    Focus,
    Pleasure,
    Learning,
}

impl MoodAxis {
    pub const ALL: [MoodAxis; 7] = [
        MoodAxis::Happiness,
        MoodAxis::Calmness,
        MoodAxis::Alertness,
        MoodAxis::Motivation,
        MoodAxis::Focus,
        MoodAxis::Pleasure,
        MoodAxis::Learning,
    ];

    /// The six axes that define the player-facing mood.
    pub const PRIMARY: [MoodAxis; 6] = [
        MoodAxis::Happiness,
        MoodAxis::Calmness,
        MoodAxis::Alertness,
        MoodAxis::Motivation,
        MoodAxis::Focus,
        MoodAxis::Pleasure,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodAxis::Happiness => "happiness",
            MoodAxis::Calmness => "calmness",
            MoodAxis::Alertness => "alertness",
            MoodAxis::Motivation => "motivation",
            MoodAxis::Focus => "focus",
            MoodAxis::Pleasure => "pleasure",
            MoodAxis::Learning => "learning",
        }
    }
}

/// Timed session flags set by power-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimedEffect {
    /// Neural Stimulant: congestion term x0.3
    SpeedBoost,
    /// GABA Enhancer: congestion term x0.5
    Calming,
    /// Calcium Channel Blocker: drop interval x1.5
    SlowFall,
    /// Adenosine Receptor Antagonist: congestion term x0.1
    AlertnessBoost,
    /// Blood-Brain Barrier: lowers the reuptake failure chance
    FailureShield,
    /// MAO Inhibitor: monoamines do not decay
    MonoaminePreservation,
}

impl TimedEffect {
    pub const ALL: [TimedEffect; 6] = [
        TimedEffect::SpeedBoost,
        TimedEffect::Calming,
        TimedEffect::SlowFall,
        TimedEffect::AlertnessBoost,
        TimedEffect::FailureShield,
        TimedEffect::MonoaminePreservation,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn duration_ms(self) -> u32 {
        match self {
            TimedEffect::SpeedBoost => 10_000,
            TimedEffect::Calming => 8_000,
            TimedEffect::SlowFall => 15_000,
            TimedEffect::AlertnessBoost => 15_000,
            TimedEffect::FailureShield => 30_000,
            TimedEffect::MonoaminePreservation => 20_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimedEffect::SpeedBoost => "speedBoost",
            TimedEffect::Calming => "calming",
            TimedEffect::SlowFall => "slowFall",
            TimedEffect::AlertnessBoost => "alertnessBoost",
            TimedEffect::FailureShield => "failureShield",
            TimedEffect::MonoaminePreservation => "monoaminePreservation",
        }
    }
}

/// The fourteen power-up pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    ReuptakeInhibitor,
    NeuralStimulant,
    GabaEnhancer,
    SynapticPlasticity,
    NeurotrophicFactor,
    CalciumChannelBlocker,
    MyelinBooster,
    AstrocyteSupport,
    MicrogliaActivation,
    BloodBrainBarrier,
    CholinesteraseInhibitor,
    NmdaModulator,
    AdenosineAntagonist,
    MaoInhibitor,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 14] = [
        PowerUpKind::ReuptakeInhibitor,
        PowerUpKind::NeuralStimulant,
        PowerUpKind::GabaEnhancer,
        PowerUpKind::SynapticPlasticity,
        PowerUpKind::NeurotrophicFactor,
        PowerUpKind::CalciumChannelBlocker,
        PowerUpKind::MyelinBooster,
        PowerUpKind::AstrocyteSupport,
        PowerUpKind::MicrogliaActivation,
        PowerUpKind::BloodBrainBarrier,
        PowerUpKind::CholinesteraseInhibitor,
        PowerUpKind::NmdaModulator,
        PowerUpKind::AdenosineAntagonist,
        PowerUpKind::MaoInhibitor,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::ReuptakeInhibitor => "Reuptake Inhibitor",
            PowerUpKind::NeuralStimulant => "Neural Stimulant",
            PowerUpKind::GabaEnhancer => "GABA Enhancer",
            PowerUpKind::SynapticPlasticity => "Synaptic Plasticity",
            PowerUpKind::NeurotrophicFactor => "Neurotrophic Factor",
            PowerUpKind::CalciumChannelBlocker => "Calcium Channel Blocker",
            PowerUpKind::MyelinBooster => "Myelin Booster",
            PowerUpKind::AstrocyteSupport => "Astrocyte Support",
            PowerUpKind::MicrogliaActivation => "Microglia Activation",
            PowerUpKind::BloodBrainBarrier => "Blood-Brain Barrier",
            PowerUpKind::CholinesteraseInhibitor => "Cholinesterase Inhibitor",
            PowerUpKind::NmdaModulator => "NMDA Receptor Modulator",
            PowerUpKind::AdenosineAntagonist => "Adenosine Receptor Antagonist",
            PowerUpKind::MaoInhibitor => "Monoamine Oxidase Inhibitor",
        }
    }

    /// Stable effect identifier.
    pub fn effect_id(&self) -> &'static str {
        match self {
            PowerUpKind::ReuptakeInhibitor => "clearRandom",
            PowerUpKind::NeuralStimulant => "speedBoost",
            PowerUpKind::GabaEnhancer => "calmSystem",
            PowerUpKind::SynapticPlasticity => "reorganize",
            PowerUpKind::NeurotrophicFactor => "bonusPoints",
            PowerUpKind::CalciumChannelBlocker => "slowDown",
            PowerUpKind::MyelinBooster => "clearColumns",
            PowerUpKind::AstrocyteSupport => "clearBottom",
            PowerUpKind::MicrogliaActivation => "clearDamaged",
            PowerUpKind::BloodBrainBarrier => "protection",
            PowerUpKind::CholinesteraseInhibitor => "enhanceMemory",
            PowerUpKind::NmdaModulator => "modulateGlutamate",
            PowerUpKind::AdenosineAntagonist => "increaseAlertness",
            PowerUpKind::MaoInhibitor => "preserveMonoamines",
        }
    }

    /// Timed flag started by this power-up, if any.
    pub fn timed_effect(&self) -> Option<TimedEffect> {
        match self {
            PowerUpKind::NeuralStimulant => Some(TimedEffect::SpeedBoost),
            PowerUpKind::GabaEnhancer => Some(TimedEffect::Calming),
            PowerUpKind::CalciumChannelBlocker => Some(TimedEffect::SlowFall),
            PowerUpKind::BloodBrainBarrier => Some(TimedEffect::FailureShield),
            PowerUpKind::AdenosineAntagonist => Some(TimedEffect::AlertnessBoost),
            PowerUpKind::MaoInhibitor => Some(TimedEffect::MonoaminePreservation),
            _ => None,
        }
    }
}

/// Identity of a falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "id")]
pub enum PieceKind {
    /// A regular vesicle carrying a neurotransmitter
    Vesicle(Neurotransmitter),
    /// A 1x1 power-up that resolves on lock
    PowerUp(PowerUpKind),
}

impl PieceKind {
    pub fn is_power_up(&self) -> bool {
        matches!(self, PieceKind::PowerUp(_))
    }

    /// Chemical carried by the piece; power-ups carry none ("Mixed").
    pub fn chemical(&self) -> Option<Neurotransmitter> {
        match self {
            PieceKind::Vesicle(nt) => Some(*nt),
            PieceKind::PowerUp(_) => None,
        }
    }
}

/// A locked block on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Block {
    /// Normal locked vesicle block
    Vesicle(Neurotransmitter),
    /// Stuck block left by a reuptake failure
    Damaged,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Occupied cell
pub type Cell = Option<Block>;

/// One of the three offered choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceSlot {
    First,
    Second,
    Third,
}

impl ChoiceSlot {
    pub const ALL: [ChoiceSlot; 3] = [ChoiceSlot::First, ChoiceSlot::Second, ChoiceSlot::Third];

    /// Convert a zero-based index; anything past 2 is rejected.
    ///
    /// ```
    /// use synaptetris_types::ChoiceSlot;
    ///
    /// assert_eq!(ChoiceSlot::from_index(2), Some(ChoiceSlot::Third));
    /// assert_eq!(ChoiceSlot::from_index(3), None);
    /// ```
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Commands sent from the presentation layer to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise with a one-column wall kick
    Rotate,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Toggle pause state
    TogglePause,
    /// Open or close the help overlay
    ToggleHelp,
    /// Pick one of the offered neurotransmitters
    SelectChoice(ChoiceSlot),
    /// Start a new game
    Restart,
}

impl GameCommand {
    /// Parse command from string
    ///
    /// Choice selection is written `selectChoice0`, `selectChoice1`, `selectChoice2`.
    ///
    /// ```
    /// use synaptetris_types::{ChoiceSlot, GameCommand};
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("selectChoice1"), Some(GameCommand::SelectChoice(ChoiceSlot::Second)));
    /// assert_eq!(GameCommand::from_str("selectChoice3"), None);
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotate" => Some(GameCommand::Rotate),
            "harddrop" => Some(GameCommand::HardDrop),
            "togglepause" => Some(GameCommand::TogglePause),
            "togglehelp" => Some(GameCommand::ToggleHelp),
            "restart" => Some(GameCommand::Restart),
            "selectchoice0" => Some(GameCommand::SelectChoice(ChoiceSlot::First)),
            "selectchoice1" => Some(GameCommand::SelectChoice(ChoiceSlot::Second)),
            "selectchoice2" => Some(GameCommand::SelectChoice(ChoiceSlot::Third)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::Rotate => "rotate",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::TogglePause => "togglePause",
            GameCommand::ToggleHelp => "toggleHelp",
            GameCommand::SelectChoice(ChoiceSlot::First) => "selectChoice0",
            GameCommand::SelectChoice(ChoiceSlot::Second) => "selectChoice1",
            GameCommand::SelectChoice(ChoiceSlot::Third) => "selectChoice2",
            GameCommand::Restart => "restart",
        }
    }
}

/// Player-facing mood descriptor, evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoodDescriptor {
    OptimalNeuralState,
    DopamineRush,
    HyperfocusedState,
    OverSedated,
    PeakMotivation,
    LaserFocus,
    NeuralDepression,
    AnxietySpike,
    NeuralFatigue,
    ChemicalChaos,
}

impl MoodDescriptor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodDescriptor::OptimalNeuralState => "Optimal Neural State",
            MoodDescriptor::DopamineRush => "Dopamine Rush",
            MoodDescriptor::HyperfocusedState => "Hyperfocused State",
            MoodDescriptor::OverSedated => "Over-Sedated",
            MoodDescriptor::PeakMotivation => "Peak Motivation",
            MoodDescriptor::LaserFocus => "Laser Focus",
            MoodDescriptor::NeuralDepression => "Neural Depression",
            MoodDescriptor::AnxietySpike => "Anxiety Spike",
            MoodDescriptor::NeuralFatigue => "Neural Fatigue",
            MoodDescriptor::ChemicalChaos => "Chemical Chaos",
        }
    }
}

/// Brain state that scales the drop interval.
///
/// | State | Multiplier |
/// |-------|------------|
/// | Balanced | 0.8 |
/// | Hyperalert | 0.4 |
/// | Drowsy | 2.5 |
/// | Oversedated | 1.8 |
/// | Anxious | 0.7 |
/// | Motivated | 0.6 |
/// | Hyperfocused | 0.7 |
/// | Euphoric | 0.9 |
/// | Melancholic | 1.4 |
/// | Imbalanced | 1.2 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrainState {
    Balanced,
    Hyperalert,
    Drowsy,
    Oversedated,
    Anxious,
    Motivated,
    Hyperfocused,
    Euphoric,
    Melancholic,
    Imbalanced,
}

impl BrainState {
    pub fn drop_multiplier(&self) -> f32 {
        match self {
            BrainState::Balanced => 0.8,
            BrainState::Hyperalert => 0.4,
            BrainState::Drowsy => 2.5,
            BrainState::Oversedated => 1.8,
            BrainState::Anxious => 0.7,
            BrainState::Motivated => 0.6,
            BrainState::Hyperfocused => 0.7,
            BrainState::Euphoric => 0.9,
            BrainState::Melancholic => 1.4,
            BrainState::Imbalanced => 1.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrainState::Balanced => "balanced",
            BrainState::Hyperalert => "hyperalert",
            BrainState::Drowsy => "drowsy",
            BrainState::Oversedated => "sedated",
            BrainState::Anxious => "anxious",
            BrainState::Motivated => "motivated",
            BrainState::Hyperfocused => "focused",
            BrainState::Euphoric => "euphoric",
            BrainState::Melancholic => "melancholic",
            BrainState::Imbalanced => "imbalanced",
        }
    }
}

/// Rows removed by a single lock, in original (pre-clear) indices, bottom to top.
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Core-to-presentation notification.
///
/// Events are queued by the session and drained by the front end; they never
/// feed back into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum GameEvent {
    ChoicesOffered {
        choices: [Neurotransmitter; CHOICE_COUNT],
    },
    PieceSpawned {
        piece: PieceKind,
    },
    PieceMoved {
        x: i8,
        y: i8,
    },
    PieceRotated,
    PieceLocked {
        piece: PieceKind,
        x: i8,
        y: i8,
    },
    LinesCleared {
        rows: ClearedRows,
        count: u32,
        points: u32,
    },
    PowerUpActivated {
        power_up: PowerUpKind,
        effect: String,
    },
    EffectExpired {
        effect: TimedEffect,
    },
    ReuptakeFailure {
        x: i8,
        y: i8,
    },
    CongestionWarning {
        congestion: f32,
    },
    ChemicalSurge {
        chemical: Neurotransmitter,
    },
    MoodChanged {
        from: MoodDescriptor,
        to: MoodDescriptor,
    },
    HomeostasisAchieved {
        bonus: u32,
    },
    PauseChanged {
        paused: bool,
    },
    HelpToggled {
        open: bool,
    },
    GameOver {
        score: u32,
        lines: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_constants() {
        assert_eq!(SURGE_MULTIPLIER, 5);
        assert_eq!(RELEASE_LEVEL_GAIN, 10);
        assert_eq!(RELEASE_DECAY, 2);
        assert_eq!(HOMEOSTASIS_BONUS, 50);
        assert_eq!(BALANCED_MIN, 40);
        assert_eq!(BALANCED_MAX, 60);
    }

    #[test]
    fn indices_follow_declaration_order() {
        for (i, nt) in Neurotransmitter::ALL.iter().enumerate() {
            assert_eq!(nt.index(), i);
        }
        for (i, axis) in MoodAxis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
        for (i, effect) in TimedEffect::ALL.iter().enumerate() {
            assert_eq!(effect.index(), i);
        }
    }

    #[test]
    fn command_strings_round_trip() {
        let commands = [
            GameCommand::MoveLeft,
            GameCommand::MoveRight,
            GameCommand::SoftDrop,
            GameCommand::Rotate,
            GameCommand::HardDrop,
            GameCommand::TogglePause,
            GameCommand::ToggleHelp,
            GameCommand::SelectChoice(ChoiceSlot::First),
            GameCommand::SelectChoice(ChoiceSlot::Second),
            GameCommand::SelectChoice(ChoiceSlot::Third),
            GameCommand::Restart,
        ];
        for cmd in commands {
            assert_eq!(GameCommand::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn primary_axes_exclude_learning() {
        assert!(!MoodAxis::PRIMARY.contains(&MoodAxis::Learning));
        assert_eq!(MoodAxis::PRIMARY.len(), 6);
    }

    #[test]
    fn timed_power_ups_map_to_distinct_effects() {
        let effects: Vec<TimedEffect> = PowerUpKind::ALL
            .iter()
            .filter_map(|p| p.timed_effect())
            .collect();
        assert_eq!(effects.len(), TimedEffect::ALL.len());
        for effect in TimedEffect::ALL {
            assert!(effects.contains(&effect));
        }
    }

    #[test]
    fn event_serializes_with_tag() {
        let ev = GameEvent::PieceSpawned {
            piece: PieceKind::Vesicle(Neurotransmitter::Gaba),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "pieceSpawned");
        assert_eq!(json["piece"]["type"], "vesicle");
        assert_eq!(json["piece"]["id"], "gaba");
    }
}
