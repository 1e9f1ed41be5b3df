//! Random orderings for sentences and word tiles.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::{Tile, TileId};

/// Produces unbiased permutations. Seedable so tests can pin an ordering.
#[derive(Debug, Clone)]
pub struct Shuffler {
  rng: StdRng,
}

impl Shuffler {
  pub fn from_entropy() -> Self {
    Self { rng: StdRng::from_entropy() }
  }

  pub fn seeded(seed: u64) -> Self {
    Self { rng: StdRng::seed_from_u64(seed) }
  }

  /// Fisher–Yates over a copy; the input is left untouched.
  pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(&mut self.rng);
    out
  }

  /// Give every word its own identity, then scramble the tiles.
  pub fn tag_words(&mut self, words: &[String]) -> Vec<Tile> {
    let tiles: Vec<Tile> = words
      .iter()
      .map(|w| Tile { id: TileId::fresh(), text: w.clone() })
      .collect();
    self.shuffle(&tiles)
  }
}

impl Default for Shuffler {
  fn default() -> Self {
    Self::from_entropy()
  }
}
