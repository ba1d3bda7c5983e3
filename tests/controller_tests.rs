//! Session controller against real score backends.
//!
//! These run on plain threads: `ScoreSync` owns its own tokio runtime and
//! must not be created inside another one.

use std::cell::Cell;
use std::net::SocketAddr;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use hiscore_tetris::core::{GameConfig, PieceFactory, TickOutcome};
use hiscore_tetris::engine::Controller;
use hiscore_tetris::score::{
    run_score_server, MemoryScoreStore, RemoteScoreStore, ScoreClient, ScoreEvent, ScoreStore,
    ScoreStoreConfig, ScoreStoreError, ScoreSync,
};
use hiscore_tetris::types::PieceKind;

/// Store that is always down.
struct UnreachableStore;

impl ScoreStore for UnreachableStore {
    async fn get_high_score(&self) -> Result<u64, ScoreStoreError> {
        Err(ScoreStoreError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }

    async fn set_high_score(&self, _value: u64) -> Result<(), ScoreStoreError> {
        Err(ScoreStoreError::Closed)
    }
}

/// Forwards to the wrapped client and counts delivered events.
struct Counting<C> {
    inner: C,
    delivered: Rc<Cell<usize>>,
}

impl<C: ScoreClient> ScoreClient for Counting<C> {
    fn request_fetch(&mut self) {
        self.inner.request_fetch();
    }

    fn request_persist(&mut self, value: u64) {
        self.inner.request_persist(value);
    }

    fn try_recv(&mut self) -> Option<ScoreEvent> {
        let event = self.inner.try_recv();
        if event.is_some() {
            self.delivered.set(self.delivered.get() + 1);
        }
        event
    }

    fn wait_event(&mut self, timeout: Duration) -> Option<ScoreEvent> {
        let event = self.inner.wait_event(timeout);
        if event.is_some() {
            self.delivered.set(self.delivered.get() + 1);
        }
        event
    }
}

fn counting<C: ScoreClient + 'static>(inner: C) -> (Box<dyn ScoreClient>, Rc<Cell<usize>>) {
    let delivered = Rc::new(Cell::new(0));
    (
        Box::new(Counting {
            inner,
            delivered: Rc::clone(&delivered),
        }),
        delivered,
    )
}

fn poll_until(controller: &mut Controller, done: impl Fn(&Controller) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(3);
    while !done(controller) {
        assert!(Instant::now() < deadline, "timed out waiting for score events");
        controller.poll_score_events();
        std::thread::sleep(Duration::from_millis(2));
    }
}

/// 4x2 board, 150 points per line, opening bar then a two-row piece: the
/// session scores exactly 150 and ends on the second piece.
fn scoring_config() -> (GameConfig, u32) {
    let config = GameConfig {
        width: 4,
        height: 2,
        score_per_line: 150,
        ..GameConfig::default()
    };
    let seed = (1..10_000)
        .find(|&seed| {
            let mut factory = PieceFactory::new(seed, 4);
            factory.create_piece().kind == PieceKind::I && factory.create_piece().kind != PieceKind::I
        })
        .expect("no seed found");
    (config, seed)
}

fn play_to_game_over(controller: &mut Controller) -> u64 {
    controller.start(Instant::now());
    for _ in 0..100 {
        if let TickOutcome::GameOver(summary) = controller.tick() {
            return summary.score;
        }
    }
    panic!("session never ended");
}

#[test]
fn fetch_failure_keeps_default_high_score() {
    let sync = ScoreSync::new(UnreachableStore).unwrap();
    let (client, delivered) = counting(sync);
    let mut controller = Controller::new(GameConfig::default(), 1, client, Instant::now());

    poll_until(&mut controller, |_| delivered.get() == 1);
    assert_eq!(controller.high_score(), 0);

    // Play continues normally.
    controller.start(Instant::now());
    assert_eq!(controller.tick(), TickOutcome::Moved);
}

#[test]
fn persist_failure_does_not_block_restart() {
    let (config, seed) = scoring_config();
    let sync = ScoreSync::new(UnreachableStore).unwrap();
    let (client, delivered) = counting(sync);
    let mut controller = Controller::new(config, seed, client, Instant::now());
    poll_until(&mut controller, |_| delivered.get() == 1);

    assert_eq!(play_to_game_over(&mut controller), 150);
    assert_eq!(controller.high_score(), 150);

    controller.flush(Duration::from_secs(2));
    assert_eq!(controller.pending_persists(), 0);
    assert_eq!(controller.high_score(), 150);

    controller.start(Instant::now());
    assert!(controller.session().is_running());
}

#[test]
fn beating_stored_score_persists_once_and_updates_immediately() {
    let (config, seed) = scoring_config();
    let store = MemoryScoreStore::new(100);
    let sync = ScoreSync::new(store.clone()).unwrap();
    let mut controller = Controller::new(config, seed, Box::new(sync), Instant::now());
    poll_until(&mut controller, |c| c.high_score() == 100);

    assert_eq!(play_to_game_over(&mut controller), 150);
    // Local value updates before the write completes.
    assert_eq!(controller.high_score(), 150);
    let over = controller.last_game_over().unwrap();
    assert!(over.new_record);
    assert_eq!(over.previous_high_score, 100);

    controller.flush(Duration::from_secs(2));
    assert_eq!(store.write_count(), 1);
    assert_eq!(tokio_test::block_on(store.get_high_score()).unwrap(), 150);
}

#[test]
fn lower_score_is_not_persisted() {
    let (config, seed) = scoring_config();
    let store = MemoryScoreStore::new(1000);
    let sync = ScoreSync::new(store.clone()).unwrap();
    let mut controller = Controller::new(config, seed, Box::new(sync), Instant::now());
    poll_until(&mut controller, |c| c.high_score() == 1000);

    assert_eq!(play_to_game_over(&mut controller), 150);
    assert_eq!(controller.high_score(), 1000);
    assert_eq!(controller.pending_persists(), 0);
    controller.flush(Duration::from_millis(50));
    assert_eq!(store.write_count(), 0);
}

/// Run a score server on its own thread; returns the bound address.
fn spawn_score_server(store: MemoryScoreStore) -> SocketAddr {
    let (addr_tx, addr_rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let config = ScoreStoreConfig {
                port: 0,
                ..ScoreStoreConfig::default()
            };
            let (ready_tx, ready_rx) = oneshot::channel();
            tokio::spawn(run_score_server(config, Arc::new(store), Some(ready_tx)));
            addr_tx.send(ready_rx.await.unwrap()).unwrap();
            std::future::pending::<()>().await;
        });
    });
    addr_rx.recv_timeout(Duration::from_secs(2)).unwrap()
}

#[test]
fn new_record_reaches_remote_store_over_tcp() {
    let backend = MemoryScoreStore::new(100);
    let addr = spawn_score_server(backend.clone());

    let remote = RemoteScoreStore::new(&ScoreStoreConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        ..ScoreStoreConfig::default()
    });
    let (config, seed) = scoring_config();
    let sync = ScoreSync::new(remote).unwrap();
    let mut controller = Controller::new(config, seed, Box::new(sync), Instant::now());
    poll_until(&mut controller, |c| c.high_score() == 100);

    assert_eq!(play_to_game_over(&mut controller), 150);
    controller.flush(Duration::from_secs(2));
    assert_eq!(controller.pending_persists(), 0);
    assert_eq!(backend.write_count(), 1);
    assert_eq!(tokio_test::block_on(backend.get_high_score()).unwrap(), 150);
}
