//! Terminal Tetris with a remote high-score store (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `hiscore_tetris::{core,engine,input,score,term,types}`
//! and hosts the two binaries.

pub use hiscore_tetris_core as core;
pub use hiscore_tetris_engine as engine;
pub use hiscore_tetris_input as input;
pub use hiscore_tetris_score as score;
pub use hiscore_tetris_term as term;
pub use hiscore_tetris_types as types;

pub mod logging {
    //! `env_logger` setup shared by the binaries.

    use std::fs::OpenOptions;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex, MutexGuard};

    use env_logger::{Builder, Env, Target};

    /// Log output held in memory until the terminal is usable again.
    #[derive(Debug, Clone, Default)]
    pub struct DeferredLog {
        buf: Arc<Mutex<Vec<u8>>>,
    }

    impl DeferredLog {
        fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
            self.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Write everything buffered so far to `out` and empty the buffer.
        pub fn replay_to(&self, out: &mut impl Write) -> io::Result<()> {
            let pending = std::mem::take(&mut *self.lock());
            out.write_all(&pending)?;
            out.flush()
        }
    }

    impl Write for DeferredLog {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.lock().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Logging for the terminal game.
    ///
    /// The game owns the alternate screen, so nothing may reach stderr during
    /// play. With `TETRIS_LOG_PATH` set, records are appended to that file
    /// (default level `info`). Otherwise they are buffered (default level
    /// `warn`) and the returned [`DeferredLog`] replays them once the
    /// terminal is restored. `RUST_LOG` overrides the level either way.
    pub fn init_game_logging() -> anyhow::Result<Option<DeferredLog>> {
        let path = std::env::var("TETRIS_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        match path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(&path)?;
                Builder::from_env(Env::default().default_filter_or("info"))
                    .target(Target::Pipe(Box::new(file)))
                    .try_init()?;
                Ok(None)
            }
            None => {
                let deferred = DeferredLog::default();
                Builder::from_env(Env::default().default_filter_or("warn"))
                    .target(Target::Pipe(Box::new(deferred.clone())))
                    .try_init()?;
                Ok(Some(deferred))
            }
        }
    }

    /// Logging for the score server: stderr, `info` unless `RUST_LOG` says otherwise.
    pub fn init_server_logging() -> anyhow::Result<()> {
        Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Stderr)
            .try_init()?;
        Ok(())
    }

}
