//! WebSocket chat relay. Clients join a room through the URL path
//! (`ws://host:8787/nba`) and only see that room's messages; a client on `/`
//! sees every room. Frames that are not chat messages are dropped.

#[path = "../wire.rs"]
mod wire;

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use std::env;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tracing_subscriber::EnvFilter;
use wire::ChatWireMessage;

const BACKLOG: usize = 512;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    let addr = env::var("HOOPS_CHAT_BIND").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    let listener = TcpListener::bind(&addr).await?;
    let (tx, _rx) = broadcast::channel::<ChatWireMessage>(BACKLOG);

    info!("Chat relay listening on {addr}");

    loop {
        let (stream, peer) = listener.accept().await?;
        let tx = tx.clone();
        let rx = tx.subscribe();
        tokio::spawn(async move {
            match relay_client(stream, tx, rx).await {
                Ok(room) => info!("Client {peer} left {}", room.as_deref().unwrap_or("the lobby")),
                Err(e) => warn!("Client {peer} disconnected: {e}"),
            }
        });
    }
}

/// Room named by a URL path: `/nba` joins `nba`, `/` listens to every room.
fn room_from_path(path: &str) -> Option<String> {
    let room = path.trim_matches('/');
    (!room.is_empty()).then(|| room.to_string())
}

/// Whether a client in `joined` should receive `msg`.
fn delivers(joined: Option<&str>, msg: &ChatWireMessage) -> bool {
    joined.is_none_or(|room| room == msg.room)
}

/// An inbound frame as a message for the relay to pass on. Malformed frames
/// and posts to a room other than the one joined are refused.
fn accept_frame(joined: Option<&str>, text: &str) -> Result<ChatWireMessage, String> {
    let msg = serde_json::from_str::<ChatWireMessage>(text).map_err(|e| format!("bad frame: {e}"))?;
    if !delivers(joined, &msg) {
        return Err(format!("post to {} from outside the room", msg.room));
    }
    Ok(msg)
}

async fn relay_client(
    stream: TcpStream,
    tx: broadcast::Sender<ChatWireMessage>,
    mut rx: broadcast::Receiver<ChatWireMessage>,
) -> anyhow::Result<Option<String>> {
    let mut path = String::new();
    let ws = accept_hdr_async(stream, |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        path = req.uri().path().to_string();
        Ok(resp)
    })
    .await?;
    let room = room_from_path(&path);
    info!("Client joined {}", room.as_deref().unwrap_or("the lobby"));
    let (mut write, mut read) = ws.split();

    loop {
        tokio::select! {
            inbound = read.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => match accept_frame(room.as_deref(), &text) {
                        Ok(msg) => {
                            debug!("{} in {}: {}", msg.author, msg.room, msg.body);
                            let _ = tx.send(msg);
                        }
                        Err(e) => warn!("Dropping frame: {e}"),
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
            outbound = rx.recv() => {
                match outbound {
                    Ok(msg) if delivers(room.as_deref(), &msg) => {
                        let text = serde_json::to_string(&msg)?;
                        write.send(Message::Text(text.into())).await?;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Client fell behind, {skipped} messages dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    Ok(room)
}
