//! Elapsed-time counter advanced by an external one-second tick.

#[derive(Debug, Clone, Default)]
pub struct SessionClock {
  elapsed_seconds: u64,
  armed: bool,
}

impl SessionClock {
  pub fn arm(&mut self) {
    self.armed = true;
  }

  pub fn disarm(&mut self) {
    self.armed = false;
  }

  /// Count one second if armed. Returns whether the counter moved.
  pub fn tick(&mut self) -> bool {
    if self.armed {
      self.elapsed_seconds += 1;
    }
    self.armed
  }

  pub fn reset(&mut self) {
    self.elapsed_seconds = 0;
    self.armed = false;
  }

  pub fn elapsed_seconds(&self) -> u64 {
    self.elapsed_seconds
  }

  pub fn is_armed(&self) -> bool {
    self.armed
  }
}

/// `MM:SS`; minutes keep growing past 59.
pub fn format_elapsed(total_seconds: u64) -> String {
  format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
