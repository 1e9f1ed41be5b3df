//! Word tiles of one sentence, split between the pool and the answer area.
//!
//! Every tile lives in exactly one of `available` / `chosen`; together they
//! always hold the loaded sentence's words. Membership is decided by tile id,
//! never by text, so repeated words stay individually movable.

use crate::domain::{SentenceRecord, Tile, TileId};
use crate::shuffle::Shuffler;

#[derive(Debug, Clone)]
pub struct TileBoard {
  available: Vec<Tile>,
  chosen: Vec<Tile>,
}

impl TileBoard {
  pub fn load(sentence: &SentenceRecord, shuffler: &mut Shuffler) -> Self {
    Self { available: shuffler.tag_words(&sentence.words), chosen: Vec::new() }
  }

  /// Start the same sentence over with a fresh shuffle.
  pub fn reset(&mut self, sentence: &SentenceRecord, shuffler: &mut Shuffler) {
    *self = Self::load(sentence, shuffler);
  }

  /// Move a tile to the end of the answer. Returns `false` if it is not available.
  pub fn select(&mut self, id: TileId) -> bool {
    move_tile(&mut self.available, &mut self.chosen, id)
  }

  /// Move a tile back to the end of the pool. Returns `false` if it was not chosen.
  pub fn deselect(&mut self, id: TileId) -> bool {
    move_tile(&mut self.chosen, &mut self.available, id)
  }

  pub fn rendered_answer(&self) -> String {
    self.chosen.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
  }

  pub fn available(&self) -> &[Tile] {
    &self.available
  }

  pub fn chosen(&self) -> &[Tile] {
    &self.chosen
  }

  pub fn len(&self) -> usize {
    self.available.len() + self.chosen.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

fn move_tile(from: &mut Vec<Tile>, to: &mut Vec<Tile>, id: TileId) -> bool {
  match from.iter().position(|t| t.id == id) {
    Some(pos) => {
      to.push(from.remove(pos));
      true
    }
    None => false,
  }
}
