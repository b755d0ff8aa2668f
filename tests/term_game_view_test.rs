use synaptetris::core::GameSession;
use synaptetris::term::{chemical_color, AnchorY, GameView, Rgb, Viewport};
use synaptetris::types::{Block, ChoiceSlot, GameCommand, Neurotransmitter};

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the board is 20x20, plus border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cells_two_chars_wide() {
    let mut snap = GameSession::new(1).snapshot();
    snap.board[19][0] = Some(Block::Vesicle(Neurotransmitter::Serotonin));
    snap.board[19][1] = Some(Block::Damaged);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let y0 = 1 + 19;
    for x in [1, 2] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, chemical_color(Neurotransmitter::Serotonin));
    }
    for x in [3, 4] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '▒');
        assert_eq!(cell.style.fg, Rgb::from_hex(0x888888));
    }
}

#[test]
fn term_view_draws_ghost_under_active_piece() {
    let mut session = GameSession::new(3);
    session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
    let snap = session.snapshot();
    let active = snap.active.unwrap();
    let ghost_y = snap.ghost_y.unwrap();
    assert!(ghost_y > active.y);

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(22, 22));
    let ghost_cells = fb.cells().iter().filter(|c| c.ch == '░').count();
    assert_eq!(ghost_cells, 8);
}

#[test]
fn term_view_overlays_follow_phase() {
    let mut session = GameSession::new(5);
    let view = GameView::default();
    let vp = Viewport::new(80, 30);

    assert!(view.render(&session.snapshot(), vp).contains_text("CHOOSE 1-3"));

    session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
    let fb = view.render(&session.snapshot(), vp);
    assert!(!fb.contains_text("CHOOSE 1-3"));

    session.apply_command(GameCommand::TogglePause);
    assert!(view.render(&session.snapshot(), vp).contains_text("PAUSED"));

    session.apply_command(GameCommand::ToggleHelp);
    let fb = view.render(&session.snapshot(), vp);
    assert!(fb.contains_text("CONTROLS"));
    assert!(!fb.contains_text("PAUSED"));
}

#[test]
fn term_view_game_over_overlay() {
    let mut session = GameSession::new(5);
    for x in 0..10 {
        session.board_mut().set(x, 0, Some(Block::Damaged));
    }
    session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
    let fb = GameView::default().render(&session.snapshot(), Viewport::new(80, 30));
    assert!(fb.contains_text("GAME OVER"));
}

#[test]
fn term_view_side_panel_shows_mood_and_chemicals() {
    let session = GameSession::new(8);
    let fb = GameView::default().render(&session.snapshot(), Viewport::new(80, 30));

    assert!(fb.contains_text("Optimal Neural State"));
    assert!(fb.contains_text("balanced 800ms"));
    assert!(fb.contains_text("congestion 0%"));
    assert!(fb.contains_text("DA"));
    assert!(fb.contains_text("5-HT"));
    assert!(!fb.contains_text("EFFECTS"));
}
