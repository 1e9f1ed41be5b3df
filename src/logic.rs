//! Behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Level listing for the selection screen
//!   - Reading a prompt aloud (speech is optional; failures become a notice)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, error, instrument, warn};

use crate::domain::LevelInfo;
use crate::protocol::SpeechOut;
use crate::speech::SPEECH_UNAVAILABLE;
use crate::state::AppState;

pub fn list_levels(state: &AppState) -> Vec<LevelInfo> {
  state.corpus.levels()
}

pub fn level_info(state: &AppState, level: u32) -> Option<LevelInfo> {
  state.corpus.level_info(level)
}

/// Synthesize `text`. `Err` carries the user-facing notice; game state is
/// never involved.
#[instrument(level = "info", skip_all, fields(text_len = text.len(), lang = lang.unwrap_or("default")))]
pub async fn do_speak(state: &AppState, text: &str, lang: Option<&str>) -> Result<SpeechOut, String> {
  let text = text.trim();
  if text.is_empty() {
    debug!(target: "speech", "Nothing to read aloud.");
    return Err(SPEECH_UNAVAILABLE.into());
  }
  let lang = lang.unwrap_or(state.settings.speech_lang.as_str());

  let Some(speech) = &state.speech else {
    warn!(target: "speech", "Speech requested but not configured.");
    return Err(SPEECH_UNAVAILABLE.into());
  };

  match speech.synthesize(text, lang).await {
    Ok(audio) => Ok(SpeechOut { mime: audio.mime, audio_base64: STANDARD.encode(&audio.bytes) }),
    Err(e) => {
      error!(target: "speech", error = %e, "Speech synthesis failed; reporting notice.");
      Err(SPEECH_UNAVAILABLE.into())
    }
  }
}
