//! TCP server for the score store
//!
//! Serves any [`ScoreStore`] over the line protocol in [`crate::protocol`].
//! Each connection gets its own task and may send any number of requests.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::config::ScoreStoreConfig;
use crate::protocol::{encode_line, parse_request, ScoreRequest, ScoreResponse};
use crate::store::ScoreStore;

/// Start the TCP server. Runs until the listener fails.
///
/// The bound address is sent on `ready_tx` once the socket is listening,
/// which lets tests bind port 0.
pub async fn run_score_server<S: ScoreStore>(
    config: ScoreStoreConfig,
    store: Arc<S>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    let bound = listener.local_addr()?;
    info!("[ScoreServer] listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!("[ScoreServer] client {} connected from {}", client_id, addr);

        let store = Arc::clone(&store);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, store).await {
                warn!("[ScoreServer] client {} error: {}", client_id, e);
            }
            info!("[ScoreServer] client {} disconnected", client_id);
        });
    }
}

async fn handle_client<S: ScoreStore>(
    socket: TcpStream,
    client_id: usize,
    store: Arc<S>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        let response = match parse_request(&line) {
            Ok(req) => serve(client_id, req, store.as_ref()).await,
            Err(e) => {
                warn!("[ScoreServer] client {} sent invalid request: {}", client_id, e);
                ScoreResponse::Error {
                    message: format!("invalid request: {}", e),
                }
            }
        };

        writer.write_all(encode_line(&response)?.as_bytes()).await?;
        writer.flush().await?;
    }
}

async fn serve<S: ScoreStore>(client_id: usize, req: ScoreRequest, store: &S) -> ScoreResponse {
    match req {
        ScoreRequest::GetHighScore => match store.get_high_score().await {
            Ok(value) => ScoreResponse::HighScore { value },
            Err(e) => ScoreResponse::Error {
                message: e.to_string(),
            },
        },
        // Unconditional replace; callers only send improvements.
        ScoreRequest::SetHighScore { value } => match store.set_high_score(value).await {
            Ok(()) => {
                info!("[ScoreServer] client {} set high score to {}", client_id, value);
                ScoreResponse::Ok
            }
            Err(e) => {
                warn!("[ScoreServer] client {} failed to store {}: {}", client_id, value, e);
                ScoreResponse::Error {
                    message: e.to_string(),
                }
            }
        },
    }
}
