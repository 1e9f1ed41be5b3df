//! The game session state machine.
//!
//! One `GameSession` per learner. It owns the sentence pool, the tile board
//! and the clock, and is the only thing that mutates them. Timed effects
//! (feedback window, answer reveal) are handed to the host as [`Deferred`]
//! requests carrying a [`Ticket`]; when the host reports one back, the session
//! applies it only if it is still waiting on that exact ticket. Any transition
//! that leaves the session or loads another sentence forgets outstanding
//! tickets, so a late timer cannot touch a superseded state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::board::TileBoard;
use crate::clock::{format_elapsed, SessionClock};
use crate::config::GameSettings;
use crate::domain::{Corpus, SentenceRecord, Tile, TileId};
use crate::pinyin::to_pinyin_diacritics;
use crate::pool::SentencePool;
use crate::shuffle::Shuffler;

/// Identifies one scheduled effect.
pub type Ticket = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  SelectingLevel,
  Playing,
  AwaitingFeedback { correct: bool, ticket: Ticket },
  Completed,
}

impl Phase {
  pub fn kind(&self) -> PhaseKind {
    match self {
      Phase::SelectingLevel => PhaseKind::SelectingLevel,
      Phase::Playing => PhaseKind::Playing,
      Phase::AwaitingFeedback { .. } => PhaseKind::AwaitingFeedback,
      Phase::Completed => PhaseKind::Completed,
    }
  }
}

/// Phase without payload, as shown to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
  SelectingLevel,
  Playing,
  AwaitingFeedback,
  Completed,
}

impl fmt::Display for PhaseKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      PhaseKind::SelectingLevel => "selecting_level",
      PhaseKind::Playing => "playing",
      PhaseKind::AwaitingFeedback => "awaiting_feedback",
      PhaseKind::Completed => "completed",
    };
    f.write_str(s)
  }
}

/// Rejected events. None of them change state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
  /// Tile id not in the collection the event moves it from.
  InvalidTileReference(TileId),
  /// Submit with an empty answer area.
  PrematureSubmit,
  WrongPhase { event: &'static str, phase: PhaseKind },
  /// A timer fired for an effect the session no longer waits on.
  StaleTicket(Ticket),
}

impl fmt::Display for SessionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SessionError::InvalidTileReference(id) => write!(f, "tile {id} is not where the event expects it"),
      SessionError::PrematureSubmit => f.write_str("nothing chosen yet"),
      SessionError::WrongPhase { event, phase } => write!(f, "{event} is not allowed while {phase}"),
      SessionError::StaleTicket(t) => write!(f, "ticket {t} is no longer pending"),
    }
  }
}

impl std::error::Error for SessionError {}

/// Something the host must call back after `after` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deferred {
  pub ticket: Ticket,
  pub after: Duration,
}

/// Result of a submission, returned alongside the feedback timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
  pub correct: bool,
  pub feedback: Deferred,
}

#[derive(Debug, Clone)]
struct Round {
  pool: SentencePool,
  // None once the pool is exhausted (or was empty to begin with).
  board: Option<TileBoard>,
}

pub struct GameSession {
  corpus: Arc<Corpus>,
  settings: GameSettings,
  shuffler: Shuffler,
  phase: Phase,
  round: Option<Round>,
  score: u32,
  clock: SessionClock,
  reveal: Option<Ticket>,
  next_ticket: Ticket,
}

impl GameSession {
  pub fn new(corpus: Arc<Corpus>, settings: GameSettings, shuffler: Shuffler) -> Self {
    Self {
      corpus,
      settings,
      shuffler,
      phase: Phase::SelectingLevel,
      round: None,
      score: 0,
      clock: SessionClock::default(),
      reveal: None,
      next_ticket: 1,
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn score(&self) -> u32 {
    self.score
  }

  pub fn level(&self) -> Option<u32> {
    self.round.as_ref().map(|r| r.pool.level())
  }

  pub fn elapsed_seconds(&self) -> u64 {
    self.clock.elapsed_seconds()
  }

  pub fn clock_armed(&self) -> bool {
    self.clock.is_armed()
  }

  pub fn board(&self) -> Option<&TileBoard> {
    self.round.as_ref().and_then(|r| r.board.as_ref())
  }

  pub fn current_sentence(&self) -> Option<&SentenceRecord> {
    self.round.as_ref().filter(|r| r.board.is_some()).and_then(|r| r.pool.current())
  }

  pub fn pending_feedback(&self) -> Option<Ticket> {
    match self.phase {
      Phase::AwaitingFeedback { ticket, .. } => Some(ticket),
      _ => None,
    }
  }

  pub fn pending_reveal(&self) -> Option<Ticket> {
    self.reveal
  }

  pub fn settings(&self) -> &GameSettings {
    &self.settings
  }

  /// Start a level: fresh sentence order, score and clock. A level with no
  /// sentences completes immediately.
  #[instrument(level = "debug", skip(self))]
  pub fn choose_level(&mut self, level: u32) -> Result<(), SessionError> {
    self.expect_phase("choose_level", &[PhaseKind::SelectingLevel])?;

    let pool = SentencePool::start(level, &self.corpus, &mut self.shuffler);
    let board = pool.current().map(|s| TileBoard::load(s, &mut self.shuffler));
    self.score = 0;
    self.reveal = None;
    self.clock.reset();

    if board.is_some() {
      self.clock.arm();
      self.phase = Phase::Playing;
      info!(target: "game", level, sentences = pool.size(), "Level started");
    } else {
      self.phase = Phase::Completed;
      info!(target: "game", level, "Level has no sentences; completed immediately");
    }
    self.round = Some(Round { pool, board });
    Ok(())
  }

  pub fn select_tile(&mut self, id: TileId) -> Result<(), SessionError> {
    self.expect_phase("select_tile", &[PhaseKind::Playing])?;
    let moved = self.round.as_mut().and_then(|r| r.board.as_mut()).is_some_and(|b| b.select(id));
    if moved { Ok(()) } else { Err(SessionError::InvalidTileReference(id)) }
  }

  pub fn deselect_tile(&mut self, id: TileId) -> Result<(), SessionError> {
    self.expect_phase("deselect_tile", &[PhaseKind::Playing])?;
    let moved = self.round.as_mut().and_then(|r| r.board.as_mut()).is_some_and(|b| b.deselect(id));
    if moved { Ok(()) } else { Err(SessionError::InvalidTileReference(id)) }
  }

  /// Compare the answer area against the sentence, word for word, and open
  /// the feedback window. Wrong answers leave the board as it is.
  #[instrument(level = "debug", skip(self))]
  pub fn submit_answer(&mut self) -> Result<Verdict, SessionError> {
    self.expect_phase("submit_answer", &[PhaseKind::Playing])?;
    let (answer, expected) = match self.round.as_ref() {
      Some(Round { pool, board: Some(board) }) if !board.chosen().is_empty() => {
        let expected = pool.current().map(SentenceRecord::expected).unwrap_or_default();
        (board.rendered_answer(), expected)
      }
      _ => return Err(SessionError::PrematureSubmit),
    };

    let correct = answer == expected;
    if correct {
      self.score = self.score.saturating_add(self.settings.points_per_correct);
    }
    let ticket = self.issue_ticket();
    self.phase = Phase::AwaitingFeedback { correct, ticket };
    info!(target: "game", %correct, score = self.score, "Answer evaluated");

    Ok(Verdict { correct, feedback: Deferred { ticket, after: self.settings.feedback_window() } })
  }

  /// The feedback window closed. A correct answer moves on to the next
  /// sentence (or completes the level); a wrong one goes back to playing.
  #[instrument(level = "debug", skip(self))]
  pub fn feedback_elapsed(&mut self, ticket: Ticket) -> Result<(), SessionError> {
    match self.phase {
      Phase::AwaitingFeedback { correct, ticket: pending } if pending == ticket => {
        if correct {
          self.advance();
        } else {
          self.phase = Phase::Playing;
        }
        Ok(())
      }
      _ => Err(SessionError::StaleTicket(ticket)),
    }
  }

  /// Start the current sentence over: every tile back in a reshuffled pool.
  pub fn request_reset(&mut self) -> Result<(), SessionError> {
    self.expect_phase("request_reset", &[PhaseKind::Playing])?;
    if let Some(Round { pool, board: Some(board) }) = self.round.as_mut() {
      if let Some(sentence) = pool.current() {
        board.reset(sentence, &mut self.shuffler);
      }
    }
    self.reveal = None;
    debug!(target: "game", "Sentence reset");
    Ok(())
  }

  /// Show the correct order for a while. Does not touch score or board.
  pub fn reveal_answer(&mut self) -> Result<Deferred, SessionError> {
    self.expect_phase("reveal_answer", &[PhaseKind::Playing])?;
    let ticket = self.issue_ticket();
    self.reveal = Some(ticket);
    Ok(Deferred { ticket, after: self.settings.reveal_window() })
  }

  pub fn reveal_elapsed(&mut self, ticket: Ticket) -> Result<(), SessionError> {
    if self.reveal == Some(ticket) {
      self.reveal = None;
      Ok(())
    } else {
      Err(SessionError::StaleTicket(ticket))
    }
  }

  /// Drop the level and go back to the level list.
  #[instrument(level = "debug", skip(self))]
  pub fn return_to_level_select(&mut self) -> Result<(), SessionError> {
    self.expect_phase(
      "return_to_level_select",
      &[PhaseKind::Playing, PhaseKind::AwaitingFeedback, PhaseKind::Completed],
    )?;
    self.clock.reset();
    self.round = None;
    self.reveal = None;
    self.score = 0;
    self.phase = Phase::SelectingLevel;
    info!(target: "game", "Returned to level selection");
    Ok(())
  }

  /// Replay the current level from scratch.
  pub fn restart(&mut self) -> Result<(), SessionError> {
    let phase = self.phase.kind();
    let level = self.level().ok_or(SessionError::WrongPhase { event: "restart", phase })?;
    self.return_to_level_select()?;
    self.choose_level(level)
  }

  /// One clock period passed. Returns whether the elapsed time changed.
  pub fn tick(&mut self) -> bool {
    self.clock.tick()
  }

  pub fn snapshot(&self) -> Snapshot {
    let (progress, board) = match &self.round {
      Some(r) => (Progress::of(&r.pool), r.board.as_ref()),
      None => (Progress::default(), None),
    };
    let sentence = self.current_sentence();
    let feedback = match self.phase {
      Phase::AwaitingFeedback { correct, .. } => Some(FeedbackView { shown: true, correct }),
      _ => None,
    };
    let reveal_open = self.reveal.is_some();

    Snapshot {
      phase: self.phase.kind(),
      level: self.level(),
      progress,
      score: self.score,
      elapsed_seconds: self.clock.elapsed_seconds(),
      elapsed_display: format_elapsed(self.clock.elapsed_seconds()),
      prompt: sentence.map(|s| PromptView {
        chinese: s.chinese.clone(),
        hint: s.hint.clone(),
        pinyin: to_pinyin_diacritics(&s.chinese),
      }),
      available: board.map(|b| b.available().to_vec()).unwrap_or_default(),
      chosen: board.map(|b| b.chosen().to_vec()).unwrap_or_default(),
      feedback,
      reveal_open,
      revealed_words: sentence.filter(|_| reveal_open).map(|s| s.words.clone()),
      can_submit: self.phase == Phase::Playing && board.is_some_and(|b| !b.chosen().is_empty()),
    }
  }

  fn advance(&mut self) {
    self.reveal = None;
    let Some(round) = self.round.as_mut() else {
      self.phase = Phase::Completed;
      return;
    };
    if round.pool.advance() {
      round.board = round.pool.current().map(|s| TileBoard::load(s, &mut self.shuffler));
      self.phase = Phase::Playing;
      debug!(target: "game", index = round.pool.index(), size = round.pool.size(), "Next sentence");
    } else {
      round.board = None;
      self.clock.disarm();
      self.phase = Phase::Completed;
      info!(target: "game", level = round.pool.level(), score = self.score, elapsed = self.clock.elapsed_seconds(), "Level completed");
    }
  }

  fn issue_ticket(&mut self) -> Ticket {
    let t = self.next_ticket;
    self.next_ticket += 1;
    t
  }

  fn expect_phase(&self, event: &'static str, allowed: &[PhaseKind]) -> Result<(), SessionError> {
    let phase = self.phase.kind();
    if allowed.contains(&phase) {
      Ok(())
    } else {
      Err(SessionError::WrongPhase { event, phase })
    }
  }
}

/// Read-only view handed to the renderer after every transition.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
  pub phase: PhaseKind,
  pub level: Option<u32>,
  pub progress: Progress,
  pub score: u32,
  pub elapsed_seconds: u64,
  pub elapsed_display: String,
  pub prompt: Option<PromptView>,
  pub available: Vec<Tile>,
  pub chosen: Vec<Tile>,
  pub feedback: Option<FeedbackView>,
  pub reveal_open: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub revealed_words: Option<Vec<String>>,
  pub can_submit: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
  pub index: usize,
  pub size: usize,
}

impl Progress {
  /// `index` stays on the last sentence once the pool is exhausted.
  fn of(pool: &SentencePool) -> Self {
    let size = pool.size();
    Self { index: pool.index().min(size.saturating_sub(1)), size }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PromptView {
  pub chinese: String,
  pub hint: String,
  pub pinyin: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
  pub shown: bool,
  pub correct: bool,
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::BTreeMap;

  fn corpus() -> Arc<Corpus> {
    let mut levels = BTreeMap::new();
    levels.insert(1, vec![SentenceRecord::new("我很開心。", "be + adj", &["I", "am", "happy"])]);
    levels.insert(2, vec![
      SentenceRecord::new("一", "", &["one", "two"]),
      SentenceRecord::new("二", "", &["three", "four"]),
      SentenceRecord::new("三", "", &["five", "six"]),
    ]);
    levels.insert(3, vec![SentenceRecord::new("貓", "", &["the", "cat", "saw", "the", "dog"])]);
    Arc::new(Corpus::new(levels))
  }

  fn session() -> GameSession {
    GameSession::new(corpus(), GameSettings::default(), Shuffler::seeded(17))
  }

  fn pick(s: &mut GameSession, words: &[&str]) {
    for w in words {
      let id = s.board().unwrap().available().iter().find(|t| t.text == *w).unwrap().id;
      s.select_tile(id).unwrap();
    }
  }

  fn solve(s: &mut GameSession) -> Verdict {
    let words = s.current_sentence().unwrap().words.clone();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    pick(s, &refs);
    s.submit_answer().unwrap()
  }

  #[test]
  fn starts_in_level_selection() {
    let s = session();
    assert_eq!(s.phase(), Phase::SelectingLevel);
    let snap = s.snapshot();
    assert_eq!(snap.phase, PhaseKind::SelectingLevel);
    assert!(snap.level.is_none());
    assert!(snap.prompt.is_none());
    assert!(!snap.can_submit);
  }

  #[test]
  fn choose_level_loads_first_sentence_and_arms_clock() {
    let mut s = session();
    s.choose_level(1).unwrap();
    assert_eq!(s.phase(), Phase::Playing);
    assert!(s.clock_armed());
    assert_eq!(s.score(), 0);
    let snap = s.snapshot();
    assert_eq!(snap.level, Some(1));
    assert_eq!(snap.progress, Progress { index: 0, size: 1 });
    assert_eq!(snap.available.len(), 3);
    assert_eq!(snap.prompt.unwrap().hint, "be + adj");
  }

  #[test]
  fn correct_answer_scores_and_completes_after_feedback() {
    let mut s = session();
    s.choose_level(1).unwrap();
    pick(&mut s, &["I", "am", "happy"]);
    let verdict = s.submit_answer().unwrap();
    assert!(verdict.correct);
    assert_eq!(verdict.feedback.after, Duration::from_secs(2));
    assert_eq!(s.score(), 10);
    assert_eq!(s.snapshot().feedback, Some(FeedbackView { shown: true, correct: true }));

    s.feedback_elapsed(verdict.feedback.ticket).unwrap();
    assert_eq!(s.phase(), Phase::Completed);
    assert!(!s.clock_armed());
    assert_eq!(s.score(), 10);
  }

  #[test]
  fn reordered_answer_is_wrong_and_board_survives() {
    let mut s = session();
    s.choose_level(1).unwrap();
    pick(&mut s, &["am", "I", "happy"]);
    let verdict = s.submit_answer().unwrap();
    assert!(!verdict.correct);
    assert_eq!(s.score(), 0);

    s.feedback_elapsed(verdict.feedback.ticket).unwrap();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.board().unwrap().rendered_answer(), "am I happy");
  }

  #[test]
  fn wrong_attempts_never_change_score() {
    let mut s = session();
    s.choose_level(1).unwrap();
    pick(&mut s, &["happy"]);
    for _ in 0..5 {
      let v = s.submit_answer().unwrap();
      assert!(!v.correct);
      s.feedback_elapsed(v.feedback.ticket).unwrap();
      assert_eq!(s.score(), 0);
    }
  }

  #[test]
  fn empty_submit_is_rejected_without_side_effects() {
    let mut s = session();
    s.choose_level(1).unwrap();
    assert!(!s.snapshot().can_submit);
    assert_eq!(s.submit_answer(), Err(SessionError::PrematureSubmit));
    assert_eq!(s.phase(), Phase::Playing);
    assert!(s.snapshot().feedback.is_none());
  }

  #[test]
  fn n_correct_answers_complete_a_level_of_n() {
    let mut s = session();
    s.choose_level(2).unwrap();
    for i in 0..3 {
      assert_eq!(s.snapshot().progress.index, i);
      let v = solve(&mut s);
      assert!(v.correct);
      assert_eq!(s.score(), 10 * (i as u32 + 1));
      s.feedback_elapsed(v.feedback.ticket).unwrap();
    }
    assert_eq!(s.phase(), Phase::Completed);
    assert!(!s.clock_armed());
    assert_eq!(s.score(), 30);
    assert!(s.snapshot().prompt.is_none());
  }

  #[test]
  fn absent_level_completes_immediately() {
    let mut s = session();
    s.choose_level(99).unwrap();
    assert_eq!(s.phase(), Phase::Completed);
    assert_eq!(s.score(), 0);
    assert_eq!(s.elapsed_seconds(), 0);
    assert!(!s.clock_armed());
    assert!(!s.tick());
    assert_eq!(s.snapshot().progress, Progress { index: 0, size: 0 });
  }

  #[test]
  fn reset_restores_full_pool() {
    let mut s = session();
    s.choose_level(3).unwrap();
    pick(&mut s, &["the", "cat"]);
    s.request_reset().unwrap();
    let board = s.board().unwrap();
    assert!(board.chosen().is_empty());
    assert_eq!(board.available().len(), 5);
  }

  #[test]
  fn reveal_opens_and_closes_by_ticket() {
    let mut s = session();
    s.choose_level(1).unwrap();
    let first = s.reveal_answer().unwrap();
    assert_eq!(first.after, Duration::from_secs(3));
    let second = s.reveal_answer().unwrap();
    let snap = s.snapshot();
    assert!(snap.reveal_open);
    assert_eq!(snap.revealed_words, Some(vec!["I".to_string(), "am".into(), "happy".into()]));

    assert_eq!(s.reveal_elapsed(first.ticket), Err(SessionError::StaleTicket(first.ticket)));
    assert!(s.snapshot().reveal_open);
    s.reveal_elapsed(second.ticket).unwrap();
    assert!(!s.snapshot().reveal_open);
    assert!(s.snapshot().revealed_words.is_none());
    assert_eq!(s.score(), 0);
  }

  #[test]
  fn reset_closes_reveal() {
    let mut s = session();
    s.choose_level(1).unwrap();
    let r = s.reveal_answer().unwrap();
    s.request_reset().unwrap();
    assert!(s.pending_reveal().is_none());
    assert!(s.reveal_elapsed(r.ticket).is_err());
  }

  #[test]
  fn next_sentence_closes_reveal() {
    let mut s = session();
    s.choose_level(2).unwrap();
    let r = s.reveal_answer().unwrap();
    let v = solve(&mut s);
    assert!(v.correct);
    s.feedback_elapsed(v.feedback.ticket).unwrap();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.snapshot().progress.index, 1);
    assert!(s.pending_reveal().is_none());
    assert!(!s.snapshot().reveal_open);
    assert_eq!(s.reveal_elapsed(r.ticket), Err(SessionError::StaleTicket(r.ticket)));
  }

  #[test]
  fn completed_progress_points_at_last_sentence() {
    let mut s = session();
    s.choose_level(2).unwrap();
    for _ in 0..3 {
      let v = solve(&mut s);
      s.feedback_elapsed(v.feedback.ticket).unwrap();
    }
    assert_eq!(s.phase(), Phase::Completed);
    assert_eq!(s.snapshot().progress, Progress { index: 2, size: 3 });
  }

  #[test]
  fn stale_feedback_after_leaving_is_ignored() {
    let mut s = session();
    s.choose_level(1).unwrap();
    pick(&mut s, &["I", "am", "happy"]);
    let v = s.submit_answer().unwrap();
    s.return_to_level_select().unwrap();
    assert_eq!(s.feedback_elapsed(v.feedback.ticket), Err(SessionError::StaleTicket(v.feedback.ticket)));
    assert_eq!(s.phase(), Phase::SelectingLevel);
    assert_eq!(s.elapsed_seconds(), 0);
    assert!(!s.clock_armed());
    assert!(s.board().is_none());
  }

  #[test]
  fn events_outside_their_phase_are_rejected() {
    let mut s = session();
    assert!(matches!(s.submit_answer(), Err(SessionError::WrongPhase { .. })));
    assert!(matches!(s.return_to_level_select(), Err(SessionError::WrongPhase { .. })));
    assert!(matches!(s.restart(), Err(SessionError::WrongPhase { .. })));

    s.choose_level(1).unwrap();
    assert!(matches!(s.choose_level(2), Err(SessionError::WrongPhase { .. })));
    pick(&mut s, &["I"]);
    let v = s.submit_answer().unwrap();
    let id = s.board().unwrap().chosen()[0].id;
    assert!(matches!(s.deselect_tile(id), Err(SessionError::WrongPhase { .. })));
    assert!(matches!(s.reveal_answer(), Err(SessionError::WrongPhase { .. })));
    assert!(matches!(s.request_reset(), Err(SessionError::WrongPhase { .. })));
    s.feedback_elapsed(v.feedback.ticket).unwrap();
    assert!(s.deselect_tile(id).is_ok());
  }

  #[test]
  fn invalid_tile_references_are_rejected() {
    let mut s = session();
    s.choose_level(1).unwrap();
    let id = s.board().unwrap().available()[0].id;
    assert_eq!(s.deselect_tile(id), Err(SessionError::InvalidTileReference(id)));
    let bogus = TileId::fresh();
    assert_eq!(s.select_tile(bogus), Err(SessionError::InvalidTileReference(bogus)));
    assert_eq!(s.board().unwrap().available().len(), 3);
  }

  #[test]
  fn clock_runs_through_feedback_and_stops_on_completion() {
    let mut s = session();
    s.choose_level(1).unwrap();
    assert!(s.tick());
    pick(&mut s, &["I", "am", "happy"]);
    let v = s.submit_answer().unwrap();
    assert!(s.tick());
    s.feedback_elapsed(v.feedback.ticket).unwrap();
    assert!(!s.tick());
    assert_eq!(s.elapsed_seconds(), 2);
    assert_eq!(s.snapshot().elapsed_display, "00:02");
  }

  #[test]
  fn restart_replays_same_level() {
    let mut s = session();
    s.choose_level(2).unwrap();
    let v = solve(&mut s);
    s.feedback_elapsed(v.feedback.ticket).unwrap();
    s.tick();
    s.restart().unwrap();
    assert_eq!(s.level(), Some(2));
    assert_eq!(s.score(), 0);
    assert_eq!(s.elapsed_seconds(), 0);
    assert_eq!(s.snapshot().progress.index, 0);
    assert!(s.clock_armed());
  }

  #[test]
  fn snapshot_serializes_camel_case() {
    let mut s = session();
    s.choose_level(1).unwrap();
    let v = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(v["phase"], "playing");
    assert_eq!(v["elapsedSeconds"], 0);
    assert_eq!(v["elapsedDisplay"], "00:00");
    assert_eq!(v["revealOpen"], false);
    assert_eq!(v["canSubmit"], false);
    assert!(v.get("revealedWords").is_none());
    assert!(v["available"][0]["id"].is_string());
    assert!(v["prompt"]["pinyin"].as_str().unwrap().starts_with("wǒ hěn"));
  }
}
