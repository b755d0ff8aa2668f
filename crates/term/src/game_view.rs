//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Block, Neurotransmitter, PieceKind, PowerUpKind, TimedEffect, BOARD_HEIGHT, BOARD_WIDTH,
};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const DAMAGED: Rgb = Rgb::from_hex(0x888888);

/// Width of a chemical level bar in the side panel
const LEVEL_BAR_W: u16 = 10;

const HELP_LINES: [&str; 10] = [
    "CONTROLS",
    "<- ->  move",
    "up     rotate",
    "down   soft drop",
    "space  hard drop",
    "1 2 3  choose",
    "p esc  pause",
    "? F1   this help",
    "r      new game",
    "q      quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board frame placement inside the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for a game session.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(
            fb,
            frame,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(block) => {
                        let (fg, ch) = block_glyph(*block);
                        let style = CellStyle::new(fg, BOARD_BG).bold();
                        self.fill_cell(fb, frame, x as i8, y as i8, ch, style);
                    }
                    None => {
                        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
                        self.fill_cell(fb, frame, x as i8, y as i8, '·', style);
                    }
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
            for (dx, dy) in active.shape.cells() {
                self.fill_cell(fb, frame, active.x + dx, ghost_y + dy, '░', style);
            }
        }

        if let Some(active) = snap.active {
            let (fg, ch) = piece_glyph(active.kind);
            let style = CellStyle::new(fg, BOARD_BG).bold();
            for (x, y) in active.cells() {
                self.fill_cell(fb, frame, x, y, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.help_open {
            draw_help(fb, frame);
        } else if snap.game_over() {
            draw_overlay_text(fb, frame, "GAME OVER");
        } else if snap.paused() {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.choices.is_some() {
            draw_overlay_text(fb, frame, "CHOOSE 1-3");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Fill one board cell; cells off the board (spawning above the top) are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 16 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x + 8, y, snap.score, value);
        y += 1;
        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x + 8, y, snap.lines, value);
        y += 2;

        fb.put_str(panel_x, y, "MOOD", label);
        y += 1;
        fb.put_str(panel_x, y, snap.descriptor.as_str(), value);
        y += 1;
        let x = fb.put_str(panel_x, y, snap.brain_state.as_str(), dim);
        let x = fb.put_u32(x + 1, y, snap.drop_interval_ms, dim);
        fb.put_str(x, y, "ms", dim);
        y += 1;
        let congestion = (snap.congestion * 100.0).round() as u32;
        let x = fb.put_str(panel_x, y, "congestion ", dim);
        let x = fb.put_u32(x, y, congestion, dim);
        fb.put_char(x, y, '%', dim);
        y += 2;

        fb.put_str(panel_x, y, "CHEMICALS", label);
        y += 1;
        for nt in Neurotransmitter::ALL {
            let level = snap.levels[nt.index()];
            fb.put_str(panel_x, y, abbreviation(nt), value);
            let filled = (level as u16 * LEVEL_BAR_W + 50) / 100;
            let bar = CellStyle::new(chemical_color(nt), PANEL_BG);
            for i in 0..LEVEL_BAR_W {
                let ch = if i < filled { '█' } else { '░' };
                fb.put_char(panel_x + 5 + i, y, ch, if i < filled { bar } else { dim });
            }
            fb.put_u32(panel_x + 6 + LEVEL_BAR_W, y, level as u32, dim);
            y += 1;
        }
        y += 1;

        if let Some(choices) = snap.choices {
            fb.put_str(panel_x, y, "CHOOSE", label);
            y += 1;
            for (i, nt) in choices.iter().enumerate() {
                fb.put_u32(panel_x, y, i as u32 + 1, value);
                let style = CellStyle::new(chemical_color(*nt), PANEL_BG).bold();
                fb.put_str(panel_x + 2, y, chemical_name(*nt), style);
                y += 1;
            }
            y += 1;
        } else if let Some(PieceKind::PowerUp(kind)) = snap.active.map(|p| p.kind) {
            fb.put_str(panel_x, y, "POWER-UP", label);
            y += 1;
            let style = CellStyle::new(power_up_color(kind), PANEL_BG).bold();
            fb.put_str(panel_x, y, kind.name(), style);
            y += 2;
        }

        if snap.effects.is_empty() && snap.memory_boost_uses == 0 {
            return;
        }
        fb.put_str(panel_x, y, "EFFECTS", label);
        y += 1;
        for &(effect, remaining_ms) in &snap.effects {
            let x = fb.put_str(panel_x, y, effect_label(effect), value);
            let x = fb.put_u32(x + 1, y, remaining_ms.div_ceil(1000), dim);
            fb.put_char(x, y, 's', dim);
            y += 1;
        }
        if snap.memory_boost_uses > 0 {
            let x = fb.put_str(panel_x, y, "memory x2 ", value);
            fb.put_u32(x, y, snap.memory_boost_uses as u32, dim);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}

fn draw_help(fb: &mut FrameBuffer, frame: Frame) {
    let style = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);
    let inner_w = frame.w.saturating_sub(2);
    let top = frame
        .y
        .saturating_add(frame.h.saturating_sub(HELP_LINES.len() as u16) / 2);

    fb.fill_rect(frame.x + 1, top, inner_w, HELP_LINES.len() as u16, ' ', style);
    for (i, line) in HELP_LINES.iter().enumerate() {
        let line_style = if i == 0 { style.bold() } else { style };
        fb.put_str(frame.x + 2, top + i as u16, line, line_style);
    }
}

fn block_glyph(block: Block) -> (Rgb, char) {
    match block {
        Block::Vesicle(nt) => (chemical_color(nt), '█'),
        Block::Damaged => (DAMAGED, '▒'),
    }
}

fn piece_glyph(kind: PieceKind) -> (Rgb, char) {
    match kind {
        PieceKind::Vesicle(nt) => (chemical_color(nt), '█'),
        PieceKind::PowerUp(p) => (power_up_color(p), '◆'),
    }
}

pub fn chemical_color(nt: Neurotransmitter) -> Rgb {
    match nt {
        Neurotransmitter::Dopamine => Rgb::from_hex(0x00bcd4),
        Neurotransmitter::Serotonin => Rgb::from_hex(0xffeb3b),
        Neurotransmitter::Gaba => Rgb::from_hex(0x8bc34a),
        Neurotransmitter::Glutamate => Rgb::from_hex(0xf44336),
        Neurotransmitter::Acetylcholine => Rgb::from_hex(0xff9800),
        Neurotransmitter::Norepinephrine => Rgb::from_hex(0x9c27b0),
        Neurotransmitter::Endorphin => Rgb::from_hex(0x3f51b5),
    }
}

pub fn power_up_color(kind: PowerUpKind) -> Rgb {
    let hex = match kind {
        PowerUpKind::ReuptakeInhibitor => 0xffffff,
        PowerUpKind::NeuralStimulant => 0xff1744,
        PowerUpKind::GabaEnhancer => 0x4caf50,
        PowerUpKind::SynapticPlasticity => 0x9c27b0,
        PowerUpKind::NeurotrophicFactor => 0xff9800,
        PowerUpKind::CalciumChannelBlocker => 0x00e676,
        PowerUpKind::MyelinBooster => 0x2196f3,
        PowerUpKind::AstrocyteSupport => 0xe91e63,
        PowerUpKind::MicrogliaActivation => 0x795548,
        PowerUpKind::BloodBrainBarrier => 0x607d8b,
        PowerUpKind::CholinesteraseInhibitor => 0xffc107,
        PowerUpKind::NmdaModulator => 0x3f51b5,
        PowerUpKind::AdenosineAntagonist => 0x8bc34a,
        PowerUpKind::MaoInhibitor => 0xff5722,
    };
    Rgb::from_hex(hex)
}

fn chemical_name(nt: Neurotransmitter) -> &'static str {
    match nt {
        Neurotransmitter::Dopamine => "Dopamine",
        Neurotransmitter::Serotonin => "Serotonin",
        Neurotransmitter::Gaba => "GABA",
        Neurotransmitter::Glutamate => "Glutamate",
        Neurotransmitter::Acetylcholine => "Acetylcholine",
        Neurotransmitter::Norepinephrine => "Norepinephrine",
        Neurotransmitter::Endorphin => "Endorphin",
    }
}

fn abbreviation(nt: Neurotransmitter) -> &'static str {
    match nt {
        Neurotransmitter::Dopamine => "DA",
        Neurotransmitter::Serotonin => "5-HT",
        Neurotransmitter::Gaba => "GABA",
        Neurotransmitter::Glutamate => "GLU",
        Neurotransmitter::Acetylcholine => "ACh",
        Neurotransmitter::Norepinephrine => "NE",
        Neurotransmitter::Endorphin => "END",
    }
}

fn effect_label(effect: TimedEffect) -> &'static str {
    match effect {
        TimedEffect::SpeedBoost => "speed boost",
        TimedEffect::Calming => "calming",
        TimedEffect::SlowFall => "slow fall",
        TimedEffect::AlertnessBoost => "alertness",
        TimedEffect::FailureShield => "barrier",
        TimedEffect::MonoaminePreservation => "MAO block",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;
    use crate::types::{ChoiceSlot, GameCommand};

    #[test]
    fn test_choice_overlay_lists_slots() {
        let session = GameSession::new(7);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(80, 30));
        assert!(fb.contains_text("CHOOSE 1-3"));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("1 "));
    }

    #[test]
    fn test_active_piece_uses_chemical_color() {
        let mut session = GameSession::new(7);
        session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
        let snap = session.snapshot();
        let Some(active) = snap.active else {
            panic!("expected an active piece");
        };
        let PieceKind::Vesicle(nt) = active.kind else {
            panic!("expected a vesicle");
        };

        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        let color = chemical_color(nt);
        let painted = fb
            .cells()
            .iter()
            .filter(|c| c.ch == '█' && c.style.fg == color && c.style.bg == BOARD_BG)
            .count();
        // 4 board cells, 2 columns each
        assert_eq!(painted, 8);
    }

    #[test]
    fn test_help_overlay_lists_its_own_key() {
        let mut session = GameSession::new(7);
        session.apply_command(GameCommand::ToggleHelp);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(80, 30));
        assert!(fb.contains_text("CONTROLS"));
        assert!(fb.contains_text("? F1   this help"));
        assert!(!fb.contains_text("CHOOSE 1-3"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let session = GameSession::new(1);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
