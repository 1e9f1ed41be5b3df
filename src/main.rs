//! Sentence Builder · Word-Order Trainer Backend
//!
//! - Axum HTTP + WebSocket API (one game session per socket)
//! - Optional OpenAI text-to-speech for prompts (via environment variables)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   GAME_CONFIG_PATH  : path to TOML config (timings, scoring, extra levels)
//!   OPENAI_API_KEY    : enables speech if present
//!   OPENAI_BASE_URL   : default "https://api.openai.com/v1"
//!   OPENAI_TTS_MODEL  : default "gpt-4o-mini-tts"
//!   OPENAI_TTS_VOICE  : default "alloy"
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use sentence_builder::routes::build_router;
use sentence_builder::state::AppState;
use sentence_builder::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared read-only state (corpus, settings, speech client).
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "sentence_builder", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if tokio::signal::ctrl_c().await.is_ok() {
    info!(target: "sentence_builder", "Shutdown signal received");
  }
}
