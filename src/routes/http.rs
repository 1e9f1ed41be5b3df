//! HTTP endpoint handlers. These are thin wrappers that forward to shared logic.
//! Game sessions themselves only live on the WebSocket.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::domain::LevelInfo;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_levels(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let levels = list_levels(&state);
  info!(target: "sentence_builder", count = levels.len(), "HTTP levels served");
  Json(LevelsOut { levels })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_level(
  State(state): State<Arc<AppState>>,
  Path(level): Path<u32>,
) -> Result<Json<LevelInfo>, StatusCode> {
  level_info(&state, level).map(Json).ok_or(StatusCode::NOT_FOUND)
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len(), lang = ?body.lang))]
pub async fn http_post_speech(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SpeechIn>,
) -> Result<Json<SpeechOut>, (StatusCode, Json<NoticeOut>)> {
  match do_speak(&state, &body.text, body.lang.as_deref()).await {
    Ok(out) => Ok(Json(out)),
    Err(message) => Err((StatusCode::SERVICE_UNAVAILABLE, Json(NoticeOut { message }))),
  }
}
