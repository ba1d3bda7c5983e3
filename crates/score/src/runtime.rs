//! Score runtime integration.
//!
//! Bridges the sync game loop with async score store calls. Requests are
//! spawned onto an owned tokio runtime; their results come back as
//! [`ScoreEvent`]s on a channel the game loop drains.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::error::ScoreStoreError;
use crate::store::ScoreStore;

/// Completion of a fetch or persist request.
#[derive(Debug)]
pub enum ScoreEvent {
    Fetched(Result<u64, ScoreStoreError>),
    Persisted {
        value: u64,
        result: Result<(), ScoreStoreError>,
    },
}

/// What the game loop needs from the score layer. Requests never block.
pub trait ScoreClient {
    /// Start reading the stored high score.
    fn request_fetch(&mut self);

    /// Start writing `value` as the stored high score.
    fn request_persist(&mut self, value: u64);

    /// Next completed request, if any.
    fn try_recv(&mut self) -> Option<ScoreEvent>;

    /// Wait up to `timeout` for the next completed request.
    /// The default does not block.
    fn wait_event(&mut self, _timeout: Duration) -> Option<ScoreEvent> {
        self.try_recv()
    }
}

/// Running score bridge for a store backend.
pub struct ScoreSync<S: ScoreStore> {
    rt: Runtime,
    store: Arc<S>,
    event_tx: mpsc::UnboundedSender<ScoreEvent>,
    event_rx: mpsc::UnboundedReceiver<ScoreEvent>,
}

impl<S: ScoreStore> ScoreSync<S> {
    pub fn new(store: S) -> std::io::Result<Self> {
        let rt = Runtime::new()?;
        let (event_tx, event_rx) = mpsc::unbounded_channel::<ScoreEvent>();
        Ok(Self {
            rt,
            store: Arc::new(store),
            event_tx,
            event_rx,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ScoreStore> ScoreClient for ScoreSync<S> {
    fn request_fetch(&mut self) {
        let store = Arc::clone(&self.store);
        let tx = self.event_tx.clone();
        self.rt.spawn(async move {
            let result = store.get_high_score().await;
            let _ = tx.send(ScoreEvent::Fetched(result));
        });
    }

    fn request_persist(&mut self, value: u64) {
        let store = Arc::clone(&self.store);
        let tx = self.event_tx.clone();
        self.rt.spawn(async move {
            let result = store.set_high_score(value).await;
            let _ = tx.send(ScoreEvent::Persisted { value, result });
        });
    }

    fn try_recv(&mut self) -> Option<ScoreEvent> {
        self.event_rx.try_recv().ok()
    }

    fn wait_event(&mut self, timeout: Duration) -> Option<ScoreEvent> {
        let rx = &mut self.event_rx;
        self.rt
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await })
            .ok()
            .flatten()
    }
}
