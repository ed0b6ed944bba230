mod error;
mod lines;

use std::{fmt, str::FromStr};

pub use error::Error;
use once_cell::sync::Lazy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Direction, MAX_VALUE, SIZE};

/// Numeric value of an occupied tile. Always a power of two, at least 2.
pub type Value = u32;

/// Represents a tile on the board.
///
/// Some(value) indicates that the tile is occupied.
/// None indicates that the tile is empty.
pub type Tile = Option<Value>;

/// Indices of the tiles forming one line, ordered from the wall the tiles
/// move toward.
pub type Line = [usize; SIZE];

/// All lines a move in one direction slides along.
pub type Lines = [Line; SIZE];

/// Represents a pointer to a tile on the board.
///
/// `x` is the column, `y` is the row, both counted from the top left corner.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TilePointer {
  /// x coordinate
  pub x: u8,
  /// y coordinate
  pub y: u8,
}
impl fmt::Debug for TilePointer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}
impl fmt::Display for TilePointer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{self:?}")
  }
}

/// Cached lines for every direction, indexed by [`Direction::index`]
static LINES: Lazy<[Lines; 4]> = Lazy::new(|| Direction::ALL.map(lines::generate));

/// Check that a tile value is allowed on the board
///
/// Capping at [`MAX_VALUE`] keeps every merge result within `Value`.
fn is_valid_value(value: Value) -> bool {
  (2..=MAX_VALUE).contains(&value) && value.is_power_of_two()
}

/// A 2048 board.
///
/// The board is always `SIZE`x`SIZE` and every occupied tile holds a power of
/// two.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
  data: [Tile; SIZE * SIZE],
}

impl Board {
  /// Create a new board from a 2D vector of tiles.
  ///
  /// # Errors
  /// Returns an error if the board is not `SIZE`x`SIZE` or holds a value that
  /// isn't a power of two.
  pub fn new(data: Vec<Vec<Tile>>) -> Result<Board, Error> {
    if data.len() != SIZE {
      return Err(Error::WrongSize { rows: data.len() });
    }

    let mut board = Board::new_empty();

    for (y, row) in data.into_iter().enumerate() {
      if row.len() != SIZE {
        return Err(Error::NotSquare {
          line: y + 1,
          width: row.len(),
        });
      }

      for (x, tile) in row.into_iter().enumerate() {
        if let Some(value) = tile.filter(|&value| !is_valid_value(value)) {
          return Err(Error::InvalidValue {
            line: y + 1,
            value: value.to_string(),
          });
        }

        board.data[y * SIZE + x] = tile;
      }
    }

    Ok(board)
  }

  /// Create a board from raw values, where `0` marks an empty tile.
  ///
  /// # Errors
  /// Returns an error if any non-zero value isn't a power of two.
  pub fn from_values(rows: [[Value; SIZE]; SIZE]) -> Result<Board, Error> {
    let data = rows
      .iter()
      .map(|row| row.iter().map(|&value| (value != 0).then_some(value)).collect())
      .collect();

    Board::new(data)
  }

  /// Create an empty board.
  pub fn new_empty() -> Board {
    Board {
      data: [None; SIZE * SIZE],
    }
  }

  /// Get the lines a move in `direction` slides along.
  pub fn lines(direction: Direction) -> &'static Lines {
    &LINES[direction.index()]
  }

  /// Read the tiles of a line, in the line's order.
  pub fn line(&self, line: &Line) -> [Tile; SIZE] {
    line.map(|index| self.data[index])
  }

  /// Overwrite the tiles of a line, in the line's order.
  pub fn set_line(&mut self, line: &Line, tiles: [Tile; SIZE]) {
    for (&index, tile) in line.iter().zip(tiles) {
      self.data[index] = tile;
    }
  }

  /// Get iterator over all empty tiles in the board.
  pub fn pointers_to_empty_tiles(&self) -> impl Iterator<Item = TilePointer> + '_ {
    self
      .data
      .iter()
      .enumerate()
      .filter(|(.., tile)| tile.is_none())
      .map(|(index, ..)| Self::get_ptr_from_index(index))
  }

  /// Get reference to slice of all tiles in the board, row by row.
  pub fn tiles(&self) -> &[Tile] {
    &self.data
  }

  /// Get iterator over the rows of the board, top to bottom.
  pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
    self.data.chunks(SIZE)
  }

  /// Convert a raw index to `TilePointer`.
  pub fn get_ptr_from_index(index: usize) -> TilePointer {
    let x = (index % SIZE) as u8;
    let y = (index / SIZE) as u8;

    TilePointer { x, y }
  }

  fn get_index(ptr: TilePointer) -> usize {
    SIZE * usize::from(ptr.y) + usize::from(ptr.x)
  }

  /// Get value of a tile at the given pointer.
  ///
  /// # Panics
  /// Panics if the pointer is out of bounds.
  pub fn get_tile(&self, ptr: TilePointer) -> Tile {
    let index = Self::get_index(ptr);

    *self
      .data
      .get(index)
      .unwrap_or_else(|| panic!("Tile out of bounds: {ptr}"))
  }

  /// Place a new tile on an empty spot.
  ///
  /// # Panics
  /// Panics at attempt to overwrite an already occupied tile or to place a
  /// value that isn't a power of two.
  pub fn place_tile(&mut self, ptr: TilePointer, value: Value) {
    let tile = self.get_tile(ptr);

    assert!(
      tile.is_none() && is_valid_value(value),
      "attempted to place {value} on tile {ptr} ({tile:?}) at board \n{self}"
    );

    self.data[Self::get_index(ptr)] = Some(value);
  }

  /// Check whether every tile is occupied.
  pub fn is_full(&self) -> bool {
    self.data.iter().all(Option::is_some)
  }

  /// Check whether any tile holds exactly `value`.
  pub fn contains(&self, value: Value) -> bool {
    self.data.contains(&Some(value))
  }

  /// Highest value on the board, 0 for an empty board.
  pub fn max_tile(&self) -> Value {
    self.data.iter().flatten().copied().max().unwrap_or(0)
  }

  /// Check whether two neighbouring tiles share a value.
  ///
  /// Only the right and the lower neighbour of every tile are compared, which
  /// covers every adjacent pair exactly once. Empty tiles never match.
  pub fn has_adjacent_pair(&self) -> bool {
    (0..SIZE * SIZE).any(|index| {
      let Some(value) = self.data[index] else {
        return false;
      };

      let right = index % SIZE + 1 < SIZE && self.data[index + 1] == Some(value);
      let below = index + SIZE < SIZE * SIZE && self.data[index + SIZE] == Some(value);

      right || below
    })
  }
}

impl FromStr for Board {
  type Err = Error;

  /// Parse a string into a board.
  ///
  /// Expects one row per line with tiles separated by whitespace, where `-`,
  /// `.` or `0` mark an empty tile. Blank lines are skipped. This is the same
  /// format produced by [`Board::to_string`].
  ///
  /// # Errors
  /// Returns an error if the board is not `SIZE`x`SIZE` or contains anything
  /// but powers of two.
  fn from_str(input_string: &str) -> Result<Board, Self::Err> {
    let parsed_data = input_string
      .lines()
      .filter(|row| !row.trim().is_empty())
      .enumerate()
      .map(|(y, row)| {
        row
          .split_whitespace()
          .map(|tile| parse_tile(tile, y + 1))
          .collect::<Result<Vec<Tile>, _>>()
      })
      .collect::<Result<Vec<_>, _>>()?;

    Board::new(parsed_data)
  }
}

/// Parse a single tile token
pub(crate) fn parse_tile(token: &str, line: usize) -> Result<Tile, Error> {
  match token {
    "-" | "." | "0" => Ok(None),
    _ => token
      .parse()
      .ok()
      .filter(|&value| is_valid_value(value))
      .map(Some)
      .ok_or_else(|| Error::InvalidValue {
        line,
        value: token.to_owned(),
      }),
  }
}

impl fmt::Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let width = self.max_tile().max(2).to_string().len();

    for row in self.rows() {
      let cells = row
        .iter()
        .map(|tile| match tile {
          Some(value) => format!("{value:>width$}"),
          None => format!("{:>width$}", '-'),
        })
        .collect::<Vec<_>>();

      writeln!(f, "{}", cells.join(" "))?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BOARD_DATA: &str = "\
   2    4  - -
   -    - 16 -
   2 2048  - -
   8    8  8 8";

  #[test]
  fn test_from_string() {
    let board = Board::from_str(BOARD_DATA).unwrap();

    assert_eq!(board.get_tile(TilePointer { x: 1, y: 2 }), Some(2048));
    assert_eq!(board.get_tile(TilePointer { x: 3, y: 0 }), None);
    assert_eq!(board.pointers_to_empty_tiles().count(), 7);
  }

  #[test]
  fn test_display_round_trip() {
    let board = Board::from_str(BOARD_DATA).unwrap();

    assert_eq!(Board::from_str(&board.to_string()).unwrap(), board);
  }

  #[test]
  fn test_rejects_malformed_boards() {
    assert_eq!(
      Board::from_str("2 2 2 2\n2 2 2 2"),
      Err(Error::WrongSize { rows: 2 })
    );
    assert_eq!(
      Board::from_str("2 2 2 2\n2 2 2\n- - - -\n- - - -"),
      Err(Error::NotSquare { line: 2, width: 3 })
    );
    assert_eq!(
      Board::from_str("2 2 2 2\n2 2 2 2\n- 3 - -\n- - - -"),
      Err(Error::InvalidValue {
        line: 3,
        value: "3".to_owned()
      })
    );
    assert!(Board::from_values([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
  }

  #[test]
  fn test_rejects_values_above_max() {
    let max = Board::from_values([[MAX_VALUE, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    assert!(max.is_ok());

    for value in [MAX_VALUE * 2, 1 << 31] {
      assert_eq!(
        Board::from_str(&format!("{value} {value} - -\n- - - -\n- - - -\n- - - -")),
        Err(Error::InvalidValue {
          line: 1,
          value: value.to_string()
        })
      );
    }
  }

  #[test]
  fn test_get_index() {
    let ptr = TilePointer { x: 2, y: 3 };
    let index = Board::get_index(ptr);

    assert_eq!(index, 14);
    assert_eq!(Board::get_ptr_from_index(index), ptr);
  }

  #[test]
  fn test_place_tile() {
    let mut board = Board::new_empty();
    let ptr = TilePointer { x: 1, y: 3 };

    board.place_tile(ptr, 4);

    assert_eq!(board.get_tile(ptr), Some(4));
    assert_eq!(board.pointers_to_empty_tiles().count(), SIZE * SIZE - 1);
  }

  #[test]
  #[should_panic(expected = "attempted to place")]
  fn test_place_tile_on_occupied() {
    let mut board = Board::from_values([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();

    board.place_tile(TilePointer { x: 0, y: 0 }, 2);
  }

  #[test]
  fn test_adjacent_pairs() {
    let distinct = Board::from_values([
      [2, 4, 2, 4],
      [4, 2, 4, 2],
      [2, 4, 2, 4],
      [4, 2, 4, 2],
    ])
    .unwrap();
    assert!(!distinct.has_adjacent_pair());

    let horizontal = Board::from_values([
      [2, 4, 2, 4],
      [4, 2, 4, 2],
      [2, 4, 2, 4],
      [4, 2, 2, 8],
    ])
    .unwrap();
    assert!(horizontal.has_adjacent_pair());

    let vertical = Board::from_values([
      [2, 4, 2, 4],
      [4, 2, 4, 8],
      [2, 4, 2, 8],
      [4, 2, 4, 2],
    ])
    .unwrap();
    assert!(vertical.has_adjacent_pair());

    // pairs must not wrap around the row end
    let wrapping = Board::from_values([
      [2, 4, 2, 4],
      [4, 2, 4, 2],
      [2, 4, 2, 4],
      [4, 8, 16, 32],
    ])
    .unwrap();
    assert!(!wrapping.has_adjacent_pair());
  }

  #[test]
  fn test_queries() {
    let board = Board::from_str(BOARD_DATA).unwrap();

    assert!(board.contains(2048));
    assert!(!board.contains(4096));
    assert_eq!(board.max_tile(), 2048);
    assert!(!board.is_full());
    assert_eq!(Board::new_empty().max_tile(), 0);
  }
}
