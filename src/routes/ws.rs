//! WebSocket upgrade + message pump. Each connection gets its own
//! `SessionDriver`; this module only moves JSON between the socket and the
//! driver's channels.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::mpsc;
use tracing::{info, error, instrument, debug};

use crate::driver::SessionDriver;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

const INBOUND_CAPACITY: usize = 32;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "sentence_builder", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "sentence_builder", "WebSocket connected");
  let (in_tx, in_rx) = mpsc::channel::<ClientWsMessage>(INBOUND_CAPACITY);
  let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ServerWsMessage>();
  let driver = tokio::spawn(SessionDriver::new(state, out_tx).run(in_rx));

  loop {
    tokio::select! {
      incoming = socket.recv() => match incoming {
        Some(Ok(Message::Text(txt))) => match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(msg) => {
            debug!(target: "sentence_builder", "WS received: {:?}", &msg);
            if in_tx.send(msg).await.is_err() {
              break;
            }
          }
          Err(e) => {
            let reply = ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) };
            if !send_json(&mut socket, &reply).await {
              break;
            }
          }
        },
        Some(Ok(Message::Ping(payload))) => { let _ = socket.send(Message::Pong(payload)).await; }
        Some(Ok(Message::Close(_))) | None => break,
        Some(Err(e)) => {
          error!(target: "sentence_builder", error = %e, "WS receive error");
          break;
        }
        Some(Ok(_)) => {}
      },
      outgoing = out_rx.recv() => match outgoing {
        Some(msg) => {
          if !send_json(&mut socket, &msg).await {
            break;
          }
        }
        None => break,
      },
    }
  }

  // Closing the inbound side ends the driver loop.
  drop(in_tx);
  drop(out_rx);
  if let Err(e) = driver.await {
    error!(target: "sentence_builder", error = %e, "Session driver task failed");
  }
  info!(target: "sentence_builder", "WebSocket disconnected");
}

async fn send_json(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });

  match socket.send(Message::Text(out)).await {
    Ok(()) => true,
    Err(e) => {
      error!(target: "sentence_builder", error = %e, "WS send error");
      false
    }
  }
}
