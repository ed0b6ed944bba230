use thiserror::Error;

use crate::{MAX_VALUE, SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("board has {rows} rows, but {expected} were expected", expected = SIZE)]
  WrongSize { rows: usize },
  #[error(
    "board is not a square: line {line} is {width} tiles wide, but {expected} was expected",
    expected = SIZE
  )]
  NotSquare { line: usize, width: usize },
  #[error(
    "invalid tile on line {line}: {value:?} is not a power of two between 2 and {max}",
    max = MAX_VALUE
  )]
  InvalidValue { line: usize, value: String },
  #[error("malformed board notation: {0}")]
  Format(&'static str),
}
