use super::{Line, Lines};
use crate::{Direction, SIZE};

/// Create `Line` representing given row, from left to right
fn make_row(y: usize) -> Line {
  std::array::from_fn(|x| x + y * SIZE)
}

/// Create `Line` representing given column, from top to bottom
fn make_col(x: usize) -> Line {
  std::array::from_fn(|y| x + y * SIZE)
}

/// Flip the orientation of a line
fn reversed(mut line: Line) -> Line {
  line.reverse();
  line
}

/// Generate the lines a move in the given direction slides along.
///
/// The first index of every line is the tile closest to the wall the tiles
/// move toward.
pub fn generate(direction: Direction) -> Lines {
  match direction {
    Direction::Left => std::array::from_fn(make_row),
    Direction::Right => std::array::from_fn(|y| reversed(make_row(y))),
    Direction::Up => std::array::from_fn(make_col),
    Direction::Down => std::array::from_fn(|x| reversed(make_col(x))),
  }
}
