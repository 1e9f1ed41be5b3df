//! Application state: the sentence corpus, game settings and the optional speech client.
//!
//! Everything here is read-only after startup. Per-learner mutable state
//! lives in each connection's `GameSession`, never in `AppState`.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{load_game_config_from_env, GameSettings};
use crate::domain::Corpus;
use crate::seeds::seed_corpus;
use crate::session::GameSession;
use crate::shuffle::Shuffler;
use crate::speech::Speech;

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
    pub settings: GameSettings,
    pub speech: Option<Speech>,
}

impl AppState {
    /// Build state from env: load config, merge levels over the seeds, init speech.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg_opt = load_game_config_from_env();
        let settings = cfg_opt
            .as_ref()
            .map(|c| c.game.clone())
            .unwrap_or_default();

        let mut corpus = seed_corpus();
        if let Some(cfg) = &cfg_opt {
            cfg.apply_levels(&mut corpus);
        }

        for lvl in corpus.levels() {
            info!(target: "sentence_builder", level = lvl.level, sentences = lvl.sentences, label = lvl.label, "Startup level inventory");
        }

        let speech = Speech::from_env();
        if let Some(sp) = &speech {
            info!(target: "sentence_builder", base_url = %sp.base_url, model = %sp.model, voice = %sp.voice, "Speech enabled.");
        } else {
            info!(target: "sentence_builder", "Speech disabled (no OPENAI_API_KEY). Prompts cannot be read aloud.");
        }

        Self::from_parts(corpus, settings, speech)
    }

    pub fn from_parts(corpus: Corpus, settings: GameSettings, speech: Option<Speech>) -> Self {
        Self { corpus: Arc::new(corpus), settings, speech }
    }

    /// Fresh session in level selection, sharing the corpus.
    pub fn new_session(&self) -> GameSession {
        GameSession::new(self.corpus.clone(), self.settings.clone(), Shuffler::from_entropy())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
