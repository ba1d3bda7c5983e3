//! Session controller - game session plus high-score bookkeeping
//!
//! The controller owns the [`GameSession`], the local high score and a
//! [`ScoreClient`]. Score requests are fire-and-forget; their results are
//! folded in by [`Controller::poll_score_events`] once per frame, so a slow
//! or dead store never holds up a tick.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use hiscore_tetris_core::{GameConfig, GameSession, SessionSummary, TickOutcome};
use hiscore_tetris_score::{ScoreClient, ScoreEvent};
use hiscore_tetris_types::GameAction;

use crate::schedule::TickSchedule;

/// What the game-over screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub session: SessionSummary,
    /// High score after this session was taken into account.
    pub high_score: u64,
    pub previous_high_score: u64,
    pub new_record: bool,
}

pub struct Controller {
    session: GameSession,
    client: Box<dyn ScoreClient>,
    high_score: u64,
    last_game_over: Option<GameOverSummary>,
    pending_persists: usize,
    schedule: TickSchedule,
}

impl Controller {
    /// Create an idle controller and request the stored high score.
    pub fn new(config: GameConfig, seed: u32, mut client: Box<dyn ScoreClient>, now: Instant) -> Self {
        client.request_fetch();
        Self {
            schedule: TickSchedule::from_millis(config.tick_ms, now),
            session: GameSession::with_config(config, seed),
            client,
            high_score: 0,
            last_game_over: None,
            pending_persists: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn last_game_over(&self) -> Option<GameOverSummary> {
        self.last_game_over
    }

    /// Persist requests sent but not yet acknowledged.
    pub fn pending_persists(&self) -> usize {
        self.pending_persists
    }

    /// Time left before the next scheduled tick.
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.schedule.time_until(now)
    }

    /// Begin a new session, dropping any tick still pending from the old one.
    pub fn start(&mut self, now: Instant) {
        self.session.start();
        self.last_game_over = None;
        self.schedule.restart(now);
        debug!("[Controller] session {} started", self.session.session_id());
    }

    /// Apply a player action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction, now: Instant) -> bool {
        match action {
            GameAction::Start => {
                self.start(now);
                true
            }
            other => self.session.apply_action(other),
        }
    }

    /// Run one tick if the schedule says one is due.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.schedule.due(now) {
            return None;
        }
        Some(self.tick())
    }

    /// Advance the session one tick unconditionally.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        if let TickOutcome::GameOver(summary) = outcome {
            self.finish_session(summary);
        }
        outcome
    }

    fn finish_session(&mut self, session: SessionSummary) {
        let previous = self.high_score;
        let new_record = session.score > previous;
        if new_record {
            self.high_score = session.score;
            self.client.request_persist(session.score);
            self.pending_persists += 1;
            info!(
                "[ScoreStore] new high score {} (was {}), persisting",
                session.score, previous
            );
        }

        self.last_game_over = Some(GameOverSummary {
            session,
            high_score: self.high_score,
            previous_high_score: previous,
            new_record,
        });
    }

    /// Fold completed score requests into local state.
    pub fn poll_score_events(&mut self) {
        while let Some(event) = self.client.try_recv() {
            self.handle_score_event(event);
        }
    }

    fn handle_score_event(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::Fetched(Ok(value)) => {
                // A record set while the fetch was in flight wins.
                self.high_score = self.high_score.max(value);
                info!("[ScoreStore] fetched high score {}", value);
            }
            ScoreEvent::Fetched(Err(e)) => {
                warn!("[ScoreStore] failed to fetch high score: {}", e);
            }
            ScoreEvent::Persisted { value, result } => {
                self.pending_persists = self.pending_persists.saturating_sub(1);
                match result {
                    Ok(()) => info!("[ScoreStore] persisted high score {}", value),
                    Err(e) => warn!("[ScoreStore] failed to persist high score {}: {}", value, e),
                }
            }
        }
    }

    /// Wait up to `timeout` for outstanding persists. Used on quit.
    pub fn flush(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while self.pending_persists > 0 {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                warn!(
                    "[ScoreStore] {} persist request(s) still in flight at exit",
                    self.pending_persists
                );
                return;
            }
            match self.client.wait_event(left) {
                Some(event) => self.handle_score_event(event),
                // Clients without a blocking wait return at once; avoid spinning.
                None => std::thread::sleep(left.min(Duration::from_millis(1))),
            }
        }
    }
}
