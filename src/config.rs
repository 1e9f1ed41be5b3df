//! Loading game configuration (timings, scoring, extra levels) from TOML.
//!
//! Expected schema (every field optional):
//!
//! ```toml
//! [game]
//! points_per_correct = 10
//! feedback_ms = 2000
//! reveal_ms = 3000
//! tick_ms = 1000
//! speech_lang = "zh-TW"
//!
//! [[levels]]
//! level = 4
//! [[levels.sentences]]
//! chinese = "我們明天要去海邊。"
//! hint = "Future plan with 'be going to'."
//! words = ["We", "are", "going", "to", "the", "beach", "tomorrow."]
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Corpus, SentenceRecord};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)]
  pub game: GameSettings,
  #[serde(default)]
  pub levels: Vec<LevelCfg>,
}

/// Level entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct LevelCfg {
  pub level: u32,
  #[serde(default)]
  pub sentences: Vec<SentenceRecord>,
}

/// Scoring and timing knobs for every session.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
  pub points_per_correct: u32,
  pub feedback_ms: u64,
  pub reveal_ms: u64,
  pub tick_ms: u64,
  pub speech_lang: String,
}

impl Default for GameSettings {
  fn default() -> Self {
    Self {
      points_per_correct: 10,
      feedback_ms: 2000,
      reveal_ms: 3000,
      tick_ms: 1000,
      speech_lang: "zh-TW".into(),
    }
  }
}

impl GameSettings {
  pub fn feedback_window(&self) -> Duration {
    Duration::from_millis(self.feedback_ms)
  }

  pub fn reveal_window(&self) -> Duration {
    Duration::from_millis(self.reveal_ms)
  }

  pub fn tick_interval(&self) -> Duration {
    // A zero period would make tokio's interval panic.
    Duration::from_millis(self.tick_ms.max(1))
  }
}

impl GameConfig {
  /// Overlay configured levels on top of `base`. A configured level replaces
  /// the base level with the same number; unusable entries are skipped.
  pub fn apply_levels(&self, base: &mut Corpus) {
    for lc in &self.levels {
      if lc.level == 0 {
        error!(target: "sentence_builder", "Skipping level 0: levels start at 1.");
        continue;
      }
      let sentences: Vec<SentenceRecord> = lc
        .sentences
        .iter()
        .filter(|s| {
          let usable = !s.words.is_empty();
          if !usable {
            error!(target: "sentence_builder", level = lc.level, chinese = %s.chinese, "Skipping sentence: missing words.");
          }
          usable
        })
        .cloned()
        .collect();
      info!(target: "sentence_builder", level = lc.level, sentences = sentences.len(), "Level loaded from config");
      base.insert_level(lc.level, sentences);
    }
  }
}

pub fn parse_game_config(s: &str) -> Result<GameConfig, toml::de::Error> {
  toml::from_str::<GameConfig>(s)
}

/// Attempt to load `GameConfig` from GAME_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_game_config_from_env() -> Option<GameConfig> {
  let path = std::env::var("GAME_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_game_config(&s) {
      Ok(cfg) => {
        info!(target: "sentence_builder", %path, "Loaded game config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "sentence_builder", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "sentence_builder", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
