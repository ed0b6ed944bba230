use std::{
  fmt,
  time::{Duration, Instant},
};

use twenty48_lib::utils::format_elapsed;

/// Elapsed time of the current game.
///
/// Starts with the first accepted move, freezes when the game ends and goes
/// back to zero on a new game.
#[derive(Debug, Default)]
pub struct Stopwatch {
  started: Option<Instant>,
  frozen: Duration,
}

impl Stopwatch {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn start(&mut self) {
    if self.started.is_none() {
      self.started = Some(Instant::now());
      self.frozen = Duration::ZERO;
    }
  }

  pub fn stop(&mut self) {
    if let Some(started) = self.started.take() {
      self.frozen = started.elapsed();
    }
  }

  pub fn reset(&mut self) {
    *self = Self::new();
  }

  pub fn is_running(&self) -> bool {
    self.started.is_some()
  }

  pub fn elapsed(&self) -> Duration {
    self
      .started
      .map_or(self.frozen, |started| started.elapsed())
  }
}

impl fmt::Display for Stopwatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", format_elapsed(self.elapsed()))
  }
}

#[cfg(test)]
mod tests {
  use std::thread::sleep;

  use super::*;

  #[test]
  fn test_idle_stopwatch() {
    let stopwatch = Stopwatch::new();

    assert!(!stopwatch.is_running());
    assert_eq!(stopwatch.elapsed(), Duration::ZERO);
    assert_eq!(stopwatch.to_string(), "00:00");
  }

  #[test]
  fn test_stop_freezes_time() {
    let mut stopwatch = Stopwatch::new();

    stopwatch.start();
    sleep(Duration::from_millis(5));
    stopwatch.stop();

    let elapsed = stopwatch.elapsed();
    assert!(elapsed >= Duration::from_millis(5));

    sleep(Duration::from_millis(5));
    assert_eq!(stopwatch.elapsed(), elapsed);
    assert!(!stopwatch.is_running());

    stopwatch.reset();
    assert_eq!(stopwatch.elapsed(), Duration::ZERO);
  }

  #[test]
  fn test_start_is_idempotent() {
    let mut stopwatch = Stopwatch::new();

    stopwatch.start();
    sleep(Duration::from_millis(5));
    stopwatch.start();

    assert!(stopwatch.elapsed() >= Duration::from_millis(5));
  }
}
