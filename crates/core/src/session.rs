//! Session module - the game state machine
//!
//! A [`GameSession`] owns every piece of game state and exposes two mutators:
//! [`apply_command`](GameSession::apply_command) for discrete player input and
//! [`tick`](GameSession::tick) for elapsed time. The front end reads a
//! [`GameSnapshot`] and drains [`GameEvent`]s; nothing flows back.
//!
//! # States
//!
//! | Phase | Accepts |
//! |-------|---------|
//! | `AwaitingChoice` | choice selection, pause, help |
//! | `Active` | movement, rotation, drops, pause, help |
//! | `Paused` | pause, help |
//! | `GameOver` | restart |
//!
//! The help overlay is a modal on top of any phase except `GameOver`: it
//! pauses the session and, on close, restores whatever pause status it found.
//! While it is open only the help toggle is accepted.
//!
//! # Lock cycle
//!
//! Locking consumes the active piece. A vesicle writes its cells; a power-up
//! resolves its effect instead. Full rows are then cleared and scored, the
//! chemical surges, a reuptake failure may leave a damaged block, congestion
//! and the drop interval are recomputed, and the next cycle starts: either
//! three choices or, by chance once enough lines are cleared, a random
//! power-up that spawns at once.

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::difficulty::{compute_drop_interval, DifficultyController, DropInputs};
use crate::neuro::NeuroSystem;
use crate::piece::ActivePiece;
use crate::powerup::PowerUpSystem;
use crate::rng::SimpleRng;
use crate::scoring::{line_clear_score, score_multiplier};
use crate::snapshot::{GameSnapshot, PhaseView};
use crate::types::{
    Block, ChoiceSlot, ClearedRows, GameCommand, GameEvent, Neurotransmitter, PieceKind,
    PowerUpKind, TimedEffect, BASE_RELEASE, BOARD_HEIGHT, BOARD_WIDTH, CHOICE_COUNT,
    CONGESTION_WARNING, SURGE_MULTIPLIER,
};

/// Where a pause returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resume {
    AwaitingChoice,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No piece; waiting for one of the offered choices
    AwaitingChoice,
    /// A piece is falling
    Active,
    Paused { resume: Resume },
    GameOver,
}

impl From<Resume> for Phase {
    fn from(value: Resume) -> Self {
        match value {
            Resume::AwaitingChoice => Phase::AwaitingChoice,
            Resume::Active => Phase::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HelpModal {
    /// Pause status found when the overlay opened
    was_paused: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    rng: SimpleRng,
    board: Board,
    active: Option<ActivePiece>,
    choices: Option<[Neurotransmitter; CHOICE_COUNT]>,
    phase: Phase,
    help: Option<HelpModal>,
    neuro: NeuroSystem,
    powerups: PowerUpSystem,
    timer: DifficultyController,
    score: u32,
    lines: u32,
    congestion: f32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New session with default tuning and the given seed
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::with_seed(seed))
    }

    /// New session with custom tuning. Invalid configs are rejected.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let neuro = NeuroSystem::with_homeostasis_bonus(config.homeostasis_bonus);
        let mut session = Self {
            rng: SimpleRng::new(config.seed),
            board: Board::new(),
            active: None,
            choices: None,
            phase: Phase::AwaitingChoice,
            help: None,
            neuro,
            powerups: PowerUpSystem::new(),
            timer: DifficultyController::new(config.base_drop_ms),
            score: 0,
            lines: 0,
            congestion: 0.0,
            events: Vec::new(),
            config,
        };
        let interval = session.compute_interval();
        session.timer.retune(interval);
        session.offer_choices();
        debug!(seed = session.config.seed, "session started");
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn help_open(&self) -> bool {
        self.help.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn congestion(&self) -> f32 {
        self.congestion
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.timer.interval_ms()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn choices(&self) -> Option<[Neurotransmitter; CHOICE_COUNT]> {
        self.choices
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access (fixtures and tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn neuro(&self) -> &NeuroSystem {
        &self.neuro
    }

    /// Direct mood access (fixtures and tests)
    pub fn neuro_mut(&mut self) -> &mut NeuroSystem {
        &mut self.neuro
    }

    pub fn powerups(&self) -> &PowerUpSystem {
        &self.powerups
    }

    pub fn timer(&self) -> &DifficultyController {
        &self.timer
    }

    /// Take every queued notification, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Slot holding `nt` in the current choice set
    pub fn choice_slot(&self, nt: Neurotransmitter) -> Option<ChoiceSlot> {
        let choices = self.choices?;
        let i = choices.iter().position(|c| *c == nt)?;
        ChoiceSlot::from_index(i)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (dst, src) in board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }

        let phase = match self.phase {
            Phase::AwaitingChoice => PhaseView::AwaitingChoice,
            Phase::Active => PhaseView::Active,
            Phase::Paused { .. } => PhaseView::Paused,
            Phase::GameOver => PhaseView::GameOver,
        };

        GameSnapshot {
            board,
            active: self.active,
            ghost_y: self.active.map(|p| p.ghost_y(&self.board)),
            phase,
            help_open: self.help.is_some(),
            choices: self.choices,
            seed: self.config.seed,
            score: self.score,
            lines: self.lines,
            congestion: self.congestion,
            drop_interval_ms: self.timer.interval_ms(),
            levels: self.neuro.levels(),
            mood: self.neuro.moods(),
            descriptor: self.neuro.descriptor(),
            brain_state: self.neuro.brain_state(),
            effects: self.powerups.timers().active(),
            memory_boost_uses: self.powerups.memory_boost_uses(),
            pending_homeostasis: self.neuro.pending_homeostasis(),
        }
    }

    /// Apply a player command. Returns false when the command does not apply
    /// to the current state.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        if self.help.is_some() {
            return command == GameCommand::ToggleHelp && self.toggle_help();
        }

        match (self.phase, command) {
            (_, GameCommand::ToggleHelp) => self.toggle_help(),
            (Phase::GameOver, GameCommand::Restart) => {
                self.restart();
                true
            }
            (Phase::GameOver, _) => false,
            (_, GameCommand::TogglePause) => self.toggle_pause(),
            (Phase::AwaitingChoice, GameCommand::SelectChoice(slot)) => self.select_choice(slot),
            (Phase::Active, GameCommand::MoveLeft) => self.move_active(-1, 0),
            (Phase::Active, GameCommand::MoveRight) => self.move_active(1, 0),
            (Phase::Active, GameCommand::SoftDrop) => self.move_active(0, 1),
            (Phase::Active, GameCommand::Rotate) => self.rotate_active(),
            (Phase::Active, GameCommand::HardDrop) => self.hard_drop(),
            _ => false,
        }
    }

    /// Advance time. Counts timed effects down and runs due gravity steps.
    ///
    /// Nothing advances while paused, in the help overlay, or after game over.
    /// Returns true if anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.help.is_some() || matches!(self.phase, Phase::Paused { .. } | Phase::GameOver) {
            return false;
        }

        let expired = self.powerups.tick(elapsed_ms);
        for effect in &expired {
            debug!(effect = effect.as_str(), "effect expired");
            self.events.push(GameEvent::EffectExpired { effect: *effect });
        }
        if !expired.is_empty() {
            let interval = self.compute_interval();
            self.timer.retune(interval);
        }

        let generation = self.timer.generation();
        let due = self.timer.advance(elapsed_ms);
        for _ in 0..due {
            // A lock replaces the schedule; drops owed to the old one are void.
            if self.timer.generation() != generation {
                break;
            }
            self.soft_drop_tick();
        }

        due > 0 || !expired.is_empty()
    }

    /// Start a new game with the same tuning and seed.
    ///
    /// Undrained events of the old game stay queued ahead of the new one's.
    pub fn restart(&mut self) {
        info!(score = self.score, lines = self.lines, "restart");
        let mut events = std::mem::take(&mut self.events);
        *self = Self::build(self.config.clone());
        events.append(&mut self.events);
        self.events = events;
    }

    fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::AwaitingChoice => Phase::Paused {
                resume: Resume::AwaitingChoice,
            },
            Phase::Active => Phase::Paused {
                resume: Resume::Active,
            },
            Phase::Paused { resume } => resume.into(),
            Phase::GameOver => return false,
        };
        self.events.push(GameEvent::PauseChanged {
            paused: self.is_paused(),
        });
        true
    }

    fn toggle_help(&mut self) -> bool {
        match self.help.take() {
            Some(modal) => {
                if let (false, Phase::Paused { resume }) = (modal.was_paused, self.phase) {
                    self.phase = resume.into();
                }
                self.events.push(GameEvent::HelpToggled { open: false });
            }
            None => {
                let was_paused = match self.phase {
                    Phase::GameOver => return false,
                    Phase::Paused { .. } => true,
                    Phase::AwaitingChoice => {
                        self.phase = Phase::Paused {
                            resume: Resume::AwaitingChoice,
                        };
                        false
                    }
                    Phase::Active => {
                        self.phase = Phase::Paused {
                            resume: Resume::Active,
                        };
                        false
                    }
                };
                self.help = Some(HelpModal { was_paused });
                self.events.push(GameEvent::HelpToggled { open: true });
            }
        }
        true
    }

    fn select_choice(&mut self, slot: ChoiceSlot) -> bool {
        let Some(choices) = self.choices.take() else {
            return false;
        };
        self.spawn(PieceKind::Vesicle(choices[slot.index()]));
        true
    }

    fn move_active(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.try_move(&self.board, dx, dy) {
            return false;
        }
        let (x, y) = (piece.x, piece.y);
        self.events.push(GameEvent::PieceMoved { x, y });
        true
    }

    fn rotate_active(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.try_rotate(&self.board) {
            return false;
        }
        self.events.push(GameEvent::PieceRotated);
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(mut piece) = self.active.take() else {
            return false;
        };
        piece.drop_to_floor(&self.board);
        self.lock_piece(piece);
        true
    }

    /// One gravity step: fall a row, or lock if the piece cannot.
    fn soft_drop_tick(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };
        if piece.try_move(&self.board, 0, 1) {
            self.active = Some(piece);
            self.events.push(GameEvent::PieceMoved {
                x: piece.x,
                y: piece.y,
            });
        } else {
            self.lock_piece(piece);
        }
    }

    fn spawn(&mut self, kind: PieceKind) {
        let piece = ActivePiece::new(kind);
        if piece.collides(&self.board) {
            debug!(?kind, "spawn blocked");
            self.enter_game_over();
            return;
        }

        debug!(?kind, "spawn");
        self.active = Some(piece);
        self.phase = Phase::Active;
        self.events.push(GameEvent::PieceSpawned { piece: kind });

        if let PieceKind::Vesicle(nt) = kind {
            self.release(nt, BASE_RELEASE);
        }
        let interval = self.compute_interval();
        self.timer.restart(interval);
    }

    fn lock_piece(&mut self, piece: ActivePiece) {
        self.timer.stop();
        self.events.push(GameEvent::PieceLocked {
            piece: piece.kind,
            x: piece.x,
            y: piece.y,
        });

        match piece.kind {
            PieceKind::Vesicle(nt) => {
                self.board
                    .lock_shape(piece.x, piece.y, &piece.shape, Block::Vesicle(nt));
            }
            PieceKind::PowerUp(kind) => self.activate_power_up(kind),
        }
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, "lock");

        // Only the clear made by the piece itself surges its chemical.
        let mut chemical = piece.kind.chemical();
        loop {
            let cleared = self.board.clear_lines();
            if cleared.is_empty() {
                break;
            }
            self.score_lines(cleared, chemical.take());
            // A damaged block can complete a row; keep clearing until stable.
            if !self.roll_reuptake_failure() {
                break;
            }
        }

        self.update_congestion();
        let interval = self.compute_interval();
        self.timer.retune(interval);
        self.start_cycle();
    }

    fn activate_power_up(&mut self, kind: PowerUpKind) {
        let outcome = self.powerups.resolve(kind, &mut self.board, &mut self.rng);
        self.score = self.score.saturating_add(outcome.points);
        debug!(
            power_up = kind.name(),
            points = outcome.points,
            cleared = outcome.cells_cleared,
            "power-up resolved"
        );
        self.events.push(GameEvent::PowerUpActivated {
            power_up: kind,
            effect: kind.effect_id().to_string(),
        });
    }

    fn score_lines(&mut self, rows: ClearedRows, chemical: Option<Neurotransmitter>) {
        let count = rows.len() as u32;
        self.lines += count;

        let multiplier = score_multiplier(&self.neuro);
        let boosted = self.powerups.consume_memory_boost();
        let points = line_clear_score(count, multiplier, boosted);
        self.score = self.score.saturating_add(points);
        debug!(count, points, boosted, "lines cleared");
        self.events
            .push(GameEvent::LinesCleared { rows, count, points });

        if let Some(nt) = chemical {
            self.events.push(GameEvent::ChemicalSurge { chemical: nt });
            self.release(nt, SURGE_MULTIPLIER);
            let bonus = self.neuro.take_homeostasis();
            self.score = self.score.saturating_add(bonus);
        }
    }

    /// Maybe leave a damaged block. Returns true if one was placed.
    fn roll_reuptake_failure(&mut self) -> bool {
        let percent = if self.powerups.is_active(TimedEffect::FailureShield) {
            self.config.reuptake_failure_shielded_percent
        } else {
            self.config.reuptake_failure_percent
        };
        if !self.rng.chance_percent(percent) {
            return false;
        }
        match self.board.reuptake_failure(&mut self.rng) {
            Some((x, y)) => {
                debug!(x, y, "reuptake failure");
                self.events.push(GameEvent::ReuptakeFailure { x, y });
                true
            }
            None => false,
        }
    }

    fn release(&mut self, nt: Neurotransmitter, multiplier: u8) {
        let preserve = self
            .powerups
            .is_active(TimedEffect::MonoaminePreservation);
        let outcome = self.neuro.apply_release(nt, multiplier, preserve);

        if let Some((from, to)) = outcome.mood_change {
            info!(from = from.as_str(), to = to.as_str(), "mood changed");
            self.events.push(GameEvent::MoodChanged { from, to });
        }
        if outcome.homeostasis {
            info!(bonus = self.config.homeostasis_bonus, "homeostasis achieved");
            self.events.push(GameEvent::HomeostasisAchieved {
                bonus: self.config.homeostasis_bonus,
            });
        }
    }

    fn update_congestion(&mut self) {
        let previous = self.congestion;
        self.congestion = self.board.congestion();
        if previous <= CONGESTION_WARNING && self.congestion > CONGESTION_WARNING {
            debug!(congestion = self.congestion, "congestion warning");
            self.events.push(GameEvent::CongestionWarning {
                congestion: self.congestion,
            });
        }
    }

    fn compute_interval(&self) -> u32 {
        compute_drop_interval(
            &self.config,
            DropInputs {
                congestion: self.congestion,
                lines: self.lines,
                brain: self.neuro.brain_state(),
                effects: self.powerups.timers(),
            },
        )
    }

    fn start_cycle(&mut self) {
        let power_up_due = self.lines >= self.config.power_up_min_lines
            && self.rng.chance_percent(self.config.power_up_chance_percent);
        if power_up_due {
            let kind = PowerUpSystem::random_kind(&mut self.rng);
            self.spawn(PieceKind::PowerUp(kind));
        } else {
            self.offer_choices();
        }
    }

    fn offer_choices(&mut self) {
        let choices = self.neuro.generate_choices(&mut self.rng);
        self.choices = Some(choices);
        self.phase = Phase::AwaitingChoice;
        self.events.push(GameEvent::ChoicesOffered { choices });
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.active = None;
        self.choices = None;
        self.timer.stop();
        info!(score = self.score, lines = self.lines, "game over");
        self.events.push(GameEvent::GameOver {
            score: self.score,
            lines: self.lines,
        });
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoodDescriptor;

    fn select(session: &mut GameSession, nt: Neurotransmitter) -> bool {
        match session.choice_slot(nt) {
            Some(slot) => session.apply_command(GameCommand::SelectChoice(slot)),
            None => false,
        }
    }

    fn first_choice(session: &mut GameSession) -> Neurotransmitter {
        let choices = session.choices().unwrap();
        assert!(session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First)));
        choices[0]
    }

    #[test]
    fn test_new_session_offers_choices() {
        let mut session = GameSession::new(12345);
        assert_eq!(session.phase(), Phase::AwaitingChoice);
        assert!(session.active().is_none());

        let events: Vec<_> = session.drain_events().collect();
        assert!(matches!(events[0], GameEvent::ChoicesOffered { .. }));
        // The lowest level on a fresh game is the first in enumeration order.
        assert!(session
            .choices()
            .unwrap()
            .contains(&Neurotransmitter::Dopamine));
    }

    #[test]
    fn test_piece_commands_ignored_while_awaiting_choice() {
        let mut session = GameSession::new(1);
        assert!(!session.apply_command(GameCommand::MoveLeft));
        assert!(!session.apply_command(GameCommand::HardDrop));
        assert!(!session.tick(5_000));
    }

    #[test]
    fn test_select_spawns_and_releases() {
        let mut session = GameSession::new(7);
        let nt = first_choice(&mut session);

        assert_eq!(session.phase(), Phase::Active);
        let piece = session.active().unwrap();
        assert_eq!(piece.kind, PieceKind::Vesicle(nt));
        assert_eq!((piece.x, piece.y), (4, 0));
        assert_eq!(session.neuro().level(nt), 60);
        assert!(session.timer().is_running());
        // No second selection while a piece falls.
        assert!(!session.apply_command(GameCommand::SelectChoice(ChoiceSlot::Second)));
    }

    #[test]
    fn test_gravity_moves_then_locks() {
        let mut session = GameSession::new(7);
        select(&mut session, Neurotransmitter::Dopamine);
        session.drain_events().for_each(drop);

        let interval = session.drop_interval_ms();
        assert!(session.tick(interval));
        assert_eq!(session.active().unwrap().y, 1);

        // 18 more rows to the floor, then one step that cannot move.
        for _ in 0..18 {
            session.tick(session.drop_interval_ms());
        }
        assert_eq!(session.active().unwrap().y, 19);
        session.tick(session.drop_interval_ms());

        assert!(session.active().is_none());
        assert_eq!(session.phase(), Phase::AwaitingChoice);
        assert_eq!(session.board().occupied_count(), 4);
        assert!(!session.timer().is_running());
    }

    #[test]
    fn test_soft_drop_command_never_locks() {
        let mut session = GameSession::new(7);
        select(&mut session, Neurotransmitter::Glutamate);
        let mut moves = 0;
        while session.apply_command(GameCommand::SoftDrop) {
            moves += 1;
        }
        assert_eq!(moves, 18);
        assert!(session.active().is_some());
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn test_hard_drop_locks_and_offers_choices() {
        let mut session = GameSession::new(3);
        first_choice(&mut session);
        assert!(session.apply_command(GameCommand::HardDrop));

        assert_eq!(session.phase(), Phase::AwaitingChoice);
        assert_eq!(session.board().occupied_count(), 4);
        let events: Vec<_> = session.drain_events().collect();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::PieceLocked { .. })));
        assert!(matches!(
            events.last(),
            Some(GameEvent::ChoicesOffered { .. })
        ));
    }

    #[test]
    fn test_line_clear_scores_and_surges() {
        let mut session = GameSession::new(5);
        // Leave a four-wide gap at columns 4..=7 of the bottom row.
        for x in (0..4).chain(8..10) {
            session.board_mut().set(x, 19, Some(Block::Damaged));
        }
        assert!(select(&mut session, Neurotransmitter::Dopamine));
        session.apply_command(GameCommand::HardDrop);

        assert_eq!(session.lines(), 1);
        // Spawn release at x1 left the mood at motivation 53 / pleasure 52:
        // still balanced, so 1 x 1 x 100 x 1.5.
        assert_eq!(session.score(), 150);
        // Surge: 60 + 50 capped at 100.
        assert_eq!(session.neuro().level(Neurotransmitter::Dopamine), 100);

        let events: Vec<_> = session.drain_events().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::LinesCleared { count: 1, points: 150, .. }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::ChemicalSurge {
                chemical: Neurotransmitter::Dopamine
            }
        )));
    }

    #[test]
    fn test_pause_round_trip() {
        let mut session = GameSession::new(9);
        first_choice(&mut session);

        assert!(session.apply_command(GameCommand::TogglePause));
        assert!(session.is_paused());
        assert!(!session.apply_command(GameCommand::MoveLeft));
        assert!(!session.tick(10_000));

        assert!(session.apply_command(GameCommand::TogglePause));
        assert_eq!(session.phase(), Phase::Active);
    }

    #[test]
    fn test_pause_remembers_awaiting_choice() {
        let mut session = GameSession::new(9);
        session.apply_command(GameCommand::TogglePause);
        assert!(!session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First)));
        session.apply_command(GameCommand::TogglePause);
        assert_eq!(session.phase(), Phase::AwaitingChoice);
    }

    #[test]
    fn test_help_restores_prior_pause_status() {
        let mut session = GameSession::new(9);
        first_choice(&mut session);

        // Opened while running: closes back to running.
        assert!(session.apply_command(GameCommand::ToggleHelp));
        assert!(session.is_paused());
        assert!(!session.apply_command(GameCommand::TogglePause));
        assert!(!session.apply_command(GameCommand::Restart));
        assert!(session.apply_command(GameCommand::ToggleHelp));
        assert_eq!(session.phase(), Phase::Active);

        // Opened while paused: closes back to paused.
        session.apply_command(GameCommand::TogglePause);
        session.apply_command(GameCommand::ToggleHelp);
        session.apply_command(GameCommand::ToggleHelp);
        assert!(session.is_paused());
    }

    #[test]
    fn test_effects_do_not_count_down_while_paused() {
        let mut session = GameSession::new(9);
        session.powerups.resolve(
            PowerUpKind::GabaEnhancer,
            &mut session.board,
            &mut session.rng,
        );
        session.apply_command(GameCommand::TogglePause);
        session.tick(60_000);
        assert!(session.powerups().is_active(TimedEffect::Calming));

        session.apply_command(GameCommand::TogglePause);
        session.tick(8_000);
        assert!(!session.powerups().is_active(TimedEffect::Calming));
        assert!(session
            .drain_events()
            .any(|e| e == GameEvent::EffectExpired {
                effect: TimedEffect::Calming
            }));
    }

    #[test]
    fn test_spawn_collision_is_game_over() {
        let mut session = GameSession::new(4);
        for x in 0..10 {
            session.board_mut().set(x, 0, Some(Block::Damaged));
        }
        assert!(session.apply_command(GameCommand::SelectChoice(ChoiceSlot::Third)));

        assert!(session.is_game_over());
        assert!(session.active().is_none());
        assert!(!session.timer().is_running());
        assert!(!session.tick(60_000));
        assert!(!session.apply_command(GameCommand::TogglePause));
        assert!(!session.apply_command(GameCommand::ToggleHelp));
        // Spawn collision precedes the release.
        assert!(session.neuro().levels().iter().all(|&v| v == 50));

        assert!(session.apply_command(GameCommand::Restart));
        assert_eq!(session.phase(), Phase::AwaitingChoice);
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn test_restart_ignored_outside_game_over() {
        let mut session = GameSession::new(5);
        assert!(!session.apply_command(GameCommand::Restart));

        select(&mut session, Neurotransmitter::Dopamine);
        assert!(!session.apply_command(GameCommand::Restart));
        session.apply_command(GameCommand::HardDrop);

        session.apply_command(GameCommand::TogglePause);
        let board = session.board().clone();
        assert!(!session.apply_command(GameCommand::Restart));
        assert!(session.is_paused());
        assert_eq!(session.board(), &board);
        assert_eq!(session.board().occupied_count(), 4);
    }

    #[test]
    fn test_restart_keeps_undrained_events() {
        let mut session = GameSession::new(4);
        for x in 0..10 {
            session.board_mut().set(x, 0, Some(Block::Damaged));
        }
        session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
        assert!(session.apply_command(GameCommand::Restart));

        let events: Vec<_> = session.drain_events().collect();
        let game_over = events
            .iter()
            .position(|e| matches!(e, GameEvent::GameOver { .. }))
            .unwrap();
        // The new game's first offer comes after the old game's end.
        assert!(matches!(
            events.last(),
            Some(GameEvent::ChoicesOffered { .. })
        ));
        assert!(game_over < events.len() - 1);
    }

    fn quiet_session(seed: u32) -> GameSession {
        let config = GameConfig {
            power_up_chance_percent: 0,
            reuptake_failure_percent: 0,
            ..GameConfig::with_seed(seed)
        };
        GameSession::with_config(config).unwrap()
    }

    #[test]
    fn test_memory_boost_doubles_line_score() {
        let mut session = quiet_session(5);
        session.powerups.resolve(
            PowerUpKind::CholinesteraseInhibitor,
            &mut session.board,
            &mut session.rng,
        );
        assert_eq!(session.powerups().memory_boost_uses(), 5);
        for x in (0..4).chain(8..10) {
            session.board_mut().set(x, 19, Some(Block::Damaged));
        }
        assert!(select(&mut session, Neurotransmitter::Dopamine));
        session.apply_command(GameCommand::HardDrop);

        // 1 x 1 x 100 x 1.5, doubled
        assert_eq!(session.score(), 300);
        assert_eq!(session.powerups().memory_boost_uses(), 4);
    }

    #[test]
    fn test_monoamine_preservation_skips_decay() {
        let mut session = quiet_session(5);
        session.powerups.resolve(
            PowerUpKind::MaoInhibitor,
            &mut session.board,
            &mut session.rng,
        );
        assert!(select(&mut session, Neurotransmitter::Dopamine));

        let neuro = session.neuro();
        assert_eq!(neuro.level(Neurotransmitter::Dopamine), 60);
        assert_eq!(neuro.level(Neurotransmitter::Serotonin), 50);
        assert_eq!(neuro.level(Neurotransmitter::Norepinephrine), 50);
        assert!(neuro.level(Neurotransmitter::Gaba) < 50);

        // Without the effect the same release decays every other chemical.
        let mut plain = quiet_session(5);
        select(&mut plain, Neurotransmitter::Dopamine);
        assert!(plain.neuro().level(Neurotransmitter::Serotonin) < 50);
    }

    #[test]
    fn test_power_up_interrupt() {
        let config = GameConfig {
            power_up_chance_percent: 100,
            power_up_min_lines: 0,
            reuptake_failure_percent: 0,
            reuptake_failure_shielded_percent: 0,
            ..GameConfig::with_seed(21)
        };
        let mut session = GameSession::with_config(config).unwrap();
        first_choice(&mut session);
        session.apply_command(GameCommand::HardDrop);

        // The lock rolled a power-up instead of choices.
        assert_eq!(session.phase(), Phase::Active);
        assert!(session.choices().is_none());
        let piece = session.active().unwrap();
        assert!(piece.kind.is_power_up());
        assert!(!session.apply_command(GameCommand::Rotate));

        // Locking it never writes a cell.
        let before = session.board().occupied_count();
        session.apply_command(GameCommand::HardDrop);
        assert!(session.board().occupied_count() <= before);
        assert!(session
            .drain_events()
            .any(|e| matches!(e, GameEvent::PowerUpActivated { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            reuptake_failure_percent: 150,
            ..GameConfig::default()
        };
        assert!(GameSession::with_config(config).is_err());
    }

    #[test]
    fn test_mood_change_event_on_surge() {
        let mut session = GameSession::new(5);
        for x in (0..4).chain(8..10) {
            session.board_mut().set(x, 19, Some(Block::Damaged));
        }
        select(&mut session, Neurotransmitter::Dopamine);
        session.drain_events().for_each(drop);
        session.apply_command(GameCommand::HardDrop);

        // Surge x5 lifts motivation to 68: balanced no more.
        assert!(session.drain_events().any(|e| e
            == GameEvent::MoodChanged {
                from: MoodDescriptor::OptimalNeuralState,
                to: MoodDescriptor::ChemicalChaos,
            }));
    }
}
