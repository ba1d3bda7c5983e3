//! Terminal Tetris runner (default binary).
//!
//! Reads its configuration from the environment, fetches the high score in
//! the background and runs the game loop: render, wait for input until the
//! next tick is due, tick.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use hiscore_tetris::core::{GameConfig, GameSnapshot};
use hiscore_tetris::engine::Controller;
use hiscore_tetris::input::{handle_key_event, should_quit};
use hiscore_tetris::logging::init_game_logging;
use hiscore_tetris::score::{MemoryScoreStore, RemoteScoreStore, ScoreClient, ScoreStoreConfig, ScoreSync};
use hiscore_tetris::term::{FrameBuffer, GameView, ScoreBoardView, TerminalRenderer, ViewConfig, Viewport};

/// How long quitting waits for a pending high-score write.
const EXIT_FLUSH: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let deferred_log = init_game_logging()?;

    let config = GameConfig::from_env();
    let seed = config.seed.unwrap_or_else(rand::random);
    let client = score_client(&ScoreStoreConfig::from_env())?;
    let view = GameView::new(ViewConfig::from_env());
    info!(
        "[Game] board {}x{}, tick {}ms, seed {}",
        config.width, config.height, config.tick_ms, seed
    );

    let mut controller = Controller::new(config, seed, client, Instant::now());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut controller, &view);

    // Always try to restore terminal state.
    let _ = term.exit();
    controller.flush(EXIT_FLUSH);
    if let Some(log) = deferred_log {
        log.replay_to(&mut std::io::stderr())?;
    }
    result
}

fn score_client(config: &ScoreStoreConfig) -> Result<Box<dyn ScoreClient>> {
    if config.disabled {
        info!("[ScoreStore] remote store disabled, high score kept in memory");
        return Ok(Box::new(ScoreSync::new(MemoryScoreStore::default())?));
    }

    let store = RemoteScoreStore::new(config);
    info!("[ScoreStore] using score server at {}", store.address());
    Ok(Box::new(ScoreSync::new(store)?))
}

fn run(term: &mut TerminalRenderer, controller: &mut Controller, view: &GameView) -> Result<()> {
    let grid = controller.session().grid();
    let mut snap = GameSnapshot::new(grid.width(), grid.height());
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        controller.poll_score_events();

        // Render.
        controller.session().snapshot_into(&mut snap);
        let scores = ScoreBoardView {
            high_score: controller.high_score(),
            new_record: controller.last_game_over().is_some_and(|g| g.new_record),
            saving: controller.pending_persists() > 0,
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &scores, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = controller.time_until_tick(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        controller.apply_action(action, Instant::now());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        controller.update(Instant::now());
    }
}
