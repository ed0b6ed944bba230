use std::{
  fmt,
  ops::{Add, AddAssign},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{utils::format_number, Score};

/// Counters collected while playing.
///
/// Stats of several games can be summed up, `best_score` keeps the maximum.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stats {
  pub games: u32,
  pub moves: u32,
  pub merges: u32,
  pub spawned: u32,
  pub points: u64,
  pub best_score: Score,
}
impl Stats {
  pub fn new() -> Stats {
    Stats::default()
  }

  pub fn record_move(&mut self, merges: u32, gained: Score) {
    self.moves += 1;
    self.merges += merges;
    self.points += u64::from(gained);
  }

  pub fn record_spawn(&mut self) {
    self.spawned += 1;
  }

  /// Close the stats of a single game with its final score.
  #[must_use]
  pub fn finished(mut self, score: Score) -> Stats {
    self.games = 1;
    self.best_score = score;
    self
  }
}
impl fmt::Display for Stats {
  #[allow(clippy::cast_precision_loss)]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Games played: {}", self.games)?;
    writeln!(
      f,
      "Moves made: {} ({})",
      self.moves,
      format_number(self.moves as f32)
    )?;
    writeln!(
      f,
      "Merges: {} ({})",
      self.merges,
      format_number(self.merges as f32)
    )?;
    writeln!(f, "Tiles spawned: {}", self.spawned)?;
    writeln!(
      f,
      "Points: {} ({})",
      self.points,
      format_number(self.points as f32)
    )?;
    write!(f, "Best score: {}", self.best_score)
  }
}
impl Add for Stats {
  type Output = Stats;

  fn add(self, other: Stats) -> Self::Output {
    Stats {
      games: self.games + other.games,
      moves: self.moves + other.moves,
      merges: self.merges + other.merges,
      spawned: self.spawned + other.spawned,
      points: self.points + other.points,
      best_score: self.best_score.max(other.best_score),
    }
  }
}
impl AddAssign for Stats {
  fn add_assign(&mut self, other: Stats) {
    *self = *self + other;
  }
}
