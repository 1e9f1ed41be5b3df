//! Per-session working order of a level's sentences.

use crate::domain::{Corpus, SentenceRecord};
use crate::shuffle::Shuffler;

#[derive(Debug, Clone)]
pub struct SentencePool {
  level: u32,
  order: Vec<SentenceRecord>,
  cursor: usize,
}

impl SentencePool {
  /// Shuffle the level's sentences once. Unknown levels give an empty pool.
  pub fn start(level: u32, corpus: &Corpus, shuffler: &mut Shuffler) -> Self {
    Self { level, order: shuffler.shuffle(corpus.sentences(level)), cursor: 0 }
  }

  pub fn level(&self) -> u32 {
    self.level
  }

  pub fn current(&self) -> Option<&SentenceRecord> {
    self.order.get(self.cursor)
  }

  /// Move to the next sentence. `false` means the level is exhausted.
  pub fn advance(&mut self) -> bool {
    if self.cursor < self.order.len() {
      self.cursor += 1;
    }
    self.cursor < self.order.len()
  }

  pub fn size(&self) -> usize {
    self.order.len()
  }

  pub fn index(&self) -> usize {
    self.cursor
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn corpus() -> Corpus {
    let mut c = Corpus::default();
    c.insert_level(1, vec![
      SentenceRecord::new("一", "", &["One"]),
      SentenceRecord::new("二", "", &["Two"]),
      SentenceRecord::new("三", "", &["Three"]),
    ]);
    c
  }

  #[test]
  fn walks_every_sentence_once() {
    let c = corpus();
    let mut pool = SentencePool::start(1, &c, &mut Shuffler::seeded(9));
    assert_eq!(pool.size(), 3);
    let mut seen = vec![pool.current().unwrap().chinese.clone()];
    while pool.advance() {
      seen.push(pool.current().unwrap().chinese.clone());
    }
    seen.sort();
    assert_eq!(seen, vec!["一", "三", "二"]);
    assert!(pool.current().is_none());
    assert_eq!(pool.index(), 3);
  }

  #[test]
  fn advance_past_end_stays_put() {
    let c = corpus();
    let mut pool = SentencePool::start(1, &c, &mut Shuffler::seeded(1));
    while pool.advance() {}
    assert!(!pool.advance());
    assert_eq!(pool.index(), pool.size());
  }

  #[test]
  fn missing_level_is_empty_not_an_error() {
    let c = corpus();
    let mut pool = SentencePool::start(99, &c, &mut Shuffler::seeded(1));
    assert_eq!(pool.size(), 0);
    assert!(pool.current().is_none());
    assert!(!pool.advance());
    assert_eq!(pool.index(), 0);
  }
}
