use criterion::{black_box, criterion_group, criterion_main, Criterion};
use synaptetris::core::{Board, GameSession, NeuroSystem, PowerUpSystem, SimpleRng};
use synaptetris::term::{FrameBuffer, GameView, Viewport};
use synaptetris::types::{Block, ChoiceSlot, GameCommand, Neurotransmitter, PowerUpKind};

fn active_session() -> GameSession {
    let mut session = GameSession::new(12345);
    session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
    session
}

fn bench_tick(c: &mut Criterion) {
    let mut session = active_session();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.apply_command(GameCommand::Restart);
            }
            if session.choices().is_some() {
                session.apply_command(GameCommand::SelectChoice(ChoiceSlot::First));
            }
            session.tick(black_box(16));
            session.drain_events().for_each(drop);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(Block::Vesicle(Neurotransmitter::Gaba)));
                }
            }
            black_box(board.clear_lines());
        })
    });
}

fn bench_congestion(c: &mut Criterion) {
    let mut board = Board::new();
    for y in 8..20i8 {
        for x in (y % 3)..10 {
            board.set(x, y, Some(Block::Damaged));
        }
    }

    c.bench_function("congestion", |b| b.iter(|| black_box(board.congestion())));
}

fn bench_release(c: &mut Criterion) {
    let mut neuro = NeuroSystem::new();
    let mut i = 0;

    c.bench_function("apply_release", |b| {
        b.iter(|| {
            let nt = Neurotransmitter::ALL[i % 7];
            i += 1;
            black_box(neuro.apply_release(nt, 1, false));
        })
    });
}

fn bench_power_up(c: &mut Criterion) {
    let mut rng = SimpleRng::new(9);
    let mut system = PowerUpSystem::new();

    c.bench_function("resolve_reuptake_inhibitor", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 10..20 {
                for x in 0..9 {
                    board.set(x, y, Some(Block::Damaged));
                }
            }
            black_box(system.resolve(PowerUpKind::ReuptakeInhibitor, &mut board, &mut rng));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let session = active_session();
    let snap = session.snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(80, 30);

    c.bench_function("render_into_80x30", |b| {
        b.iter(|| view.render_into(black_box(&snap), Viewport::new(80, 30), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_congestion,
    bench_release,
    bench_power_up,
    bench_render
);
criterion_main!(benches);
