//! Domain models: sentence records, word tiles, the leveled corpus and level listing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One exercise: a Chinese prompt, a hint, and the English words in target order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
  pub chinese: String,
  #[serde(default)] pub hint: String,
  pub words: Vec<String>,
}

impl SentenceRecord {
  pub fn new(chinese: &str, hint: &str, words: &[&str]) -> Self {
    Self {
      chinese: chinese.into(),
      hint: hint.into(),
      words: words.iter().map(|w| w.to_string()).collect(),
    }
  }

  /// The exact answer string: words joined by a single space.
  pub fn expected(&self) -> String {
    self.words.join(" ")
  }
}

/// Opaque identity of a word tile. Two tiles with equal text never share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(Uuid);

impl TileId {
  pub fn fresh() -> Self {
    Self(Uuid::new_v4())
  }
}

impl fmt::Display for TileId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A word instance on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
  pub id: TileId,
  pub text: String,
}

/// Read-only table of sentences keyed by level.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
  levels: BTreeMap<u32, Vec<SentenceRecord>>,
}

impl Corpus {
  pub fn new(levels: BTreeMap<u32, Vec<SentenceRecord>>) -> Self {
    Self { levels }
  }

  /// Sentences of a level; unknown levels have none.
  pub fn sentences(&self, level: u32) -> &[SentenceRecord] {
    self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn contains(&self, level: u32) -> bool {
    self.levels.contains_key(&level)
  }

  /// Replace (or add) a whole level.
  pub fn insert_level(&mut self, level: u32, sentences: Vec<SentenceRecord>) {
    self.levels.insert(level, sentences);
  }

  pub fn levels(&self) -> Vec<LevelInfo> {
    self.levels
      .iter()
      .map(|(level, sentences)| LevelInfo::new(*level, sentences.len()))
      .collect()
  }

  pub fn level_info(&self, level: u32) -> Option<LevelInfo> {
    self.levels.get(&level).map(|s| LevelInfo::new(level, s.len()))
  }
}

/// Entry of the level selection screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
  pub level: u32,
  pub sentences: usize,
  pub label: &'static str,
}

impl LevelInfo {
  fn new(level: u32, sentences: usize) -> Self {
    Self { level, sentences, label: difficulty_label(level) }
  }
}

/// Difficulty wording shown under each level button.
pub fn difficulty_label(level: u32) -> &'static str {
  match level {
    1 => "新手",
    2 => "簡單",
    3 => "中級",
    4 => "困難",
    5 => "進階",
    _ => "專家",
  }
}
