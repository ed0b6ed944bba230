use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of a single game.
///
/// `Won` and `Lost` are terminal, the engine accepts no more moves in them.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
  #[default]
  NotStarted,
  InProgress,
  Won,
  Lost,
}
impl GameStatus {
  pub fn is_end(self) -> bool {
    matches!(self, Self::Won | Self::Lost)
  }

  pub fn is_won(self) -> bool {
    matches!(self, Self::Won)
  }

  pub fn is_in_progress(self) -> bool {
    matches!(self, Self::InProgress)
  }
}

impl fmt::Display for GameStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Self::NotStarted => "Not started",
        Self::InProgress => "In progress",
        Self::Won => "Won",
        Self::Lost => "Lost",
      }
    )
  }
}
