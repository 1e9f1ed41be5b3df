//! Minimal OpenAI text-to-speech client used to read prompts aloud.
//!
//! We only call `audio/speech` and get back MP3 bytes. Calls are instrumented
//! and log model, voice, latency and audio size (never the text itself).
//!
//! NOTE: We never log the API key.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Notice shown when prompts cannot be read aloud.
pub const SPEECH_UNAVAILABLE: &str = "抱歉，目前無法使用語音朗讀功能。";

/// Slightly slower than normal, for learners.
const SPEECH_RATE: f32 = 0.9;

#[derive(Clone)]
pub struct Speech {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub voice: String,
}

/// Synthesized audio ready to ship to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechAudio {
  pub mime: String,
  pub bytes: Vec<u8>,
}

impl Speech {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model =
      std::env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "gpt-4o-mini-tts".into());
    let voice =
      std::env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model, voice })
  }

  /// Read `text` aloud in the language named by the BCP 47 tag `lang`.
  #[instrument(level = "info", skip(self, text, lang), fields(model = %self.model, voice = %self.voice, %lang, text_len = text.len()))]
  pub async fn synthesize(&self, text: &str, lang: &str) -> Result<SpeechAudio, String> {
    let url = format!("{}/audio/speech", self.base_url);
    let req = SpeechRequest {
      model: self.model.clone(),
      input: text.to_string(),
      voice: self.voice.clone(),
      instructions: Some(voice_instructions(lang)),
      response_format: "mp3".into(),
      speed: SPEECH_RATE,
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "sentence-builder/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or(body);
      error!(target: "speech", %status, elapsed = ?start.elapsed(), "Speech synthesis failed");
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let mime = res
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .unwrap_or("audio/mpeg")
      .to_string();
    let bytes = res.bytes().await.map_err(|e| e.to_string())?.to_vec();
    info!(target: "speech", elapsed = ?start.elapsed(), audio_bytes = bytes.len(), "Speech synthesized");
    Ok(SpeechAudio { mime, bytes })
  }
}

fn voice_instructions(lang: &str) -> String {
  let accent = match lang {
    "zh-TW" => "Mandarin Chinese as spoken in Taiwan",
    "zh-CN" => "Mandarin Chinese as spoken in mainland China",
    l if l.starts_with("en") => "clear standard English",
    _ => "the language of the text",
  };
  format!("Read the text exactly as written, in {accent} ({lang}). Speak calmly and clearly for a language learner.")
}

// --- DTOs ---

#[derive(Serialize)]
struct SpeechRequest {
  model: String,
  input: String,
  voice: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  instructions: Option<String>,
  response_format: String,
  speed: f32,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
