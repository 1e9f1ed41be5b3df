//! Per-connection event loop around one `GameSession`.
//!
//! A single task multiplexes client events, the clock tick, the feedback
//! deadline and the reveal deadline, so transitions never overlap. A snapshot
//! goes out after every transition. Deadlines are kept next to the ticket
//! they belong to and dropped as soon as the session stops waiting on that
//! ticket; the session also refuses stale tickets on its own.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use crate::logic::{do_speak, list_levels};
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::session::{Deferred, GameSession, SessionError, Ticket};
use crate::speech::SPEECH_UNAVAILABLE;
use crate::state::AppState;

type Due = Option<(Ticket, Instant)>;

pub struct SessionDriver {
  state: Arc<AppState>,
  session: GameSession,
  outbound: mpsc::UnboundedSender<ServerWsMessage>,
  feedback_due: Due,
  reveal_due: Due,
}

impl SessionDriver {
  pub fn new(state: Arc<AppState>, outbound: mpsc::UnboundedSender<ServerWsMessage>) -> Self {
    let session = state.new_session();
    Self::with_session(state, session, outbound)
  }

  /// Drive a prepared session (tests pin the shuffle this way).
  pub fn with_session(
    state: Arc<AppState>,
    session: GameSession,
    outbound: mpsc::UnboundedSender<ServerWsMessage>,
  ) -> Self {
    Self { state, session, outbound, feedback_due: None, reveal_due: None }
  }

  /// Run until the inbound channel closes or nobody listens anymore.
  #[instrument(level = "info", skip_all)]
  pub async fn run(mut self, mut inbound: mpsc::Receiver<ClientWsMessage>) {
    let period = self.session.settings().tick_interval();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    self.publish();
    loop {
      let was_armed = self.session.clock_armed();
      let mut restart_clock = false;

      tokio::select! {
        msg = inbound.recv() => match msg {
          Some(msg) => restart_clock = self.handle(msg),
          None => break,
        },
        ticket = sleep_until_due(self.feedback_due) => self.on_feedback_due(ticket),
        ticket = sleep_until_due(self.reveal_due) => self.on_reveal_due(ticket),
        _ = ticker.tick(), if was_armed => {
          if self.session.tick() {
            self.publish();
          }
        }
      }

      // First tick lands one full period after the clock (re)starts.
      if self.session.clock_armed() && (restart_clock || !was_armed) {
        ticker.reset();
      }
      self.cancel_stale_deadlines();

      if self.outbound.is_closed() {
        break;
      }
    }
    info!(target: "game", "Session ended");
  }

  pub fn session(&self) -> &GameSession {
    &self.session
  }

  /// Apply one client event. Returns true when a level was (re)entered.
  fn handle(&mut self, msg: ClientWsMessage) -> bool {
    let enters_level = matches!(msg, ClientWsMessage::ChooseLevel { .. } | ClientWsMessage::Restart);
    let outcome: Result<(), SessionError> = match msg {
      ClientWsMessage::Ping => {
        self.send(ServerWsMessage::Pong);
        return false;
      }
      ClientWsMessage::ListLevels => {
        self.send(ServerWsMessage::Levels { levels: list_levels(&self.state) });
        return false;
      }
      ClientWsMessage::Speak { text } => {
        self.speak(text);
        return false;
      }
      ClientWsMessage::ChooseLevel { level } => self.session.choose_level(level),
      ClientWsMessage::SelectTile { tile_id } => self.session.select_tile(tile_id),
      ClientWsMessage::DeselectTile { tile_id } => self.session.deselect_tile(tile_id),
      ClientWsMessage::SubmitAnswer => self
        .session
        .submit_answer()
        .map(|v| self.feedback_due = Some(due_at(v.feedback))),
      ClientWsMessage::RequestReset => self.session.request_reset(),
      ClientWsMessage::RevealAnswer => self
        .session
        .reveal_answer()
        .map(|d| self.reveal_due = Some(due_at(d))),
      ClientWsMessage::ReturnToLevelSelect => self.session.return_to_level_select(),
      ClientWsMessage::Restart => self.session.restart(),
    };

    let accepted = match outcome {
      Ok(()) => true,
      Err(e) => {
        debug!(target: "game", error = %e, "Event rejected");
        false
      }
    };
    // Rejected events still resync the client.
    self.publish();
    enters_level && accepted
  }

  fn on_feedback_due(&mut self, ticket: Ticket) {
    self.feedback_due = None;
    match self.session.feedback_elapsed(ticket) {
      Ok(()) => self.publish(),
      Err(e) => debug!(target: "game", error = %e, "Feedback timer ignored"),
    }
  }

  fn on_reveal_due(&mut self, ticket: Ticket) {
    self.reveal_due = None;
    match self.session.reveal_elapsed(ticket) {
      Ok(()) => self.publish(),
      Err(e) => debug!(target: "game", error = %e, "Reveal timer ignored"),
    }
  }

  fn cancel_stale_deadlines(&mut self) {
    let feedback = self.session.pending_feedback();
    if self.feedback_due.is_some_and(|(t, _)| feedback != Some(t)) {
      debug!(target: "game", "Feedback timer cancelled");
      self.feedback_due = None;
    }
    let reveal = self.session.pending_reveal();
    if self.reveal_due.is_some_and(|(t, _)| reveal != Some(t)) {
      debug!(target: "game", "Reveal timer cancelled");
      self.reveal_due = None;
    }
  }

  /// Fire-and-forget: synthesis runs on its own task and answers directly
  /// on the outbound channel, so timers keep running meanwhile.
  fn speak(&self, text: Option<String>) {
    let text = text.or_else(|| self.session.current_sentence().map(|s| s.chinese.clone()));
    let Some(text) = text else {
      self.send(ServerWsMessage::SpeechUnavailable { message: SPEECH_UNAVAILABLE.into() });
      return;
    };

    let state = self.state.clone();
    let outbound = self.outbound.clone();
    tokio::spawn(async move {
      let reply = match do_speak(&state, &text, None).await {
        Ok(out) => ServerWsMessage::SpeechAudio { mime: out.mime, audio_base64: out.audio_base64 },
        Err(message) => ServerWsMessage::SpeechUnavailable { message },
      };
      let _ = outbound.send(reply);
    });
  }

  fn publish(&self) {
    self.send(ServerWsMessage::State { snapshot: self.session.snapshot() });
  }

  fn send(&self, msg: ServerWsMessage) {
    if self.outbound.send(msg).is_err() {
      debug!(target: "game", "Outbound channel closed; dropping message");
    }
  }
}

fn due_at(d: Deferred) -> (Ticket, Instant) {
  (d.ticket, Instant::now() + d.after)
}

async fn sleep_until_due(due: Due) -> Ticket {
  match due {
    Some((ticket, at)) => {
      time::sleep_until(at).await;
      ticket
    }
    None => std::future::pending().await,
  }
}
