use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction the tiles slide toward.
#[derive(Clone, PartialEq, Eq, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
  Left,
  Right,
  Up,
  Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(String);

impl Direction {
  pub const ALL: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
  ];

  pub fn index(self) -> usize {
    match self {
      Direction::Left => 0,
      Direction::Right => 1,
      Direction::Up => 2,
      Direction::Down => 3,
    }
  }

  /// Map a single key to a direction.
  ///
  /// Accepts `wasd` and vim-style `hjkl`, in either case.
  pub fn from_key(c: char) -> Option<Self> {
    match c.to_ascii_lowercase() {
      'a' | 'h' => Some(Direction::Left),
      'd' | 'l' => Some(Direction::Right),
      'w' | 'k' => Some(Direction::Up),
      's' | 'j' => Some(Direction::Down),
      _ => None,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Direction::Left => "left",
      Direction::Right => "right",
      Direction::Up => "up",
      Direction::Down => "down",
    }
  }
}
impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}
impl FromStr for Direction {
  type Err = ParseDirectionError;

  /// Parse a direction from its name or from a single key, see [`Direction::from_key`].
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();

    if let Some(direction) = Direction::ALL
      .into_iter()
      .find(|direction| direction.name().eq_ignore_ascii_case(trimmed))
    {
      return Ok(direction);
    }

    let mut chars = trimmed.chars();

    let direction = match (chars.next(), chars.next()) {
      (Some(c), None) => Direction::from_key(c),
      _ => None,
    };

    direction.ok_or_else(|| ParseDirectionError(s.to_owned()))
  }
}
