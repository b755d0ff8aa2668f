//! Synaptetris terminal runner.
//!
//! crossterm for input, the framebuffer renderer for output, and a fixed
//! frame clock driving `GameSession::tick`.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use synaptetris::core::GameSession;
use synaptetris::input::{handle_key_event, should_quit};
use synaptetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use synaptetris::types::TICK_MS;

const SEED_ENV: &str = "SYNAPTETRIS_SEED";
const LOG_FILE: &str = "synaptetris.log";

fn main() -> Result<()> {
    init_logging()?;

    let seed = seed_from_env_or_clock();
    info!(seed, "starting session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        error!(?err, "failed to restore terminal");
    }
    result
}

/// Logs go to a file, and only when `RUST_LOG` is set: stdout is the game.
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn seed_from_env_or_clock() -> u32 {
    if let Some(seed) = std::env::var(SEED_ENV).ok().and_then(|s| s.trim().parse().ok()) {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut session = GameSession::new(seed);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&session.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        dirty |= session.apply_command(command);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            dirty |= session.tick(elapsed.as_millis() as u32);
            // Effect countdowns are shown in whole seconds.
            dirty |= !session.powerups().timers().active().is_empty();
        }

        for event in session.drain_events() {
            debug!(?event, "game event");
            dirty = true;
        }
    }
}
