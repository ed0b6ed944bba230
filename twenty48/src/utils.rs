use std::time::Duration;

/// Format a number into a readable string with SI suffix.
///
/// # Examples
/// ```rust
/// # use twenty48_lib::utils::format_number;
///
/// assert_eq!(format_number(0.0), "0");
/// assert_eq!(format_number(1.1), "1.1");
/// assert_eq!(format_number(1000.0), "1k");
/// assert_eq!(format_number(50000.0), "50k");
/// assert_eq!(format_number(1250000.0), "1.25M");
/// assert_eq!(format_number(2500000000.0), "2.5G");
///
/// // T is the largest suffix
/// assert_eq!(format_number(1e15), "1000T");
/// ```
#[allow(
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss,
  clippy::cast_precision_loss
)]
pub fn format_number(input: f32) -> String {
  let (number, i) = if input < 1.0 {
    (input, 0.0)
  } else {
    let base = 1000.0_f32;
    let i = input.log(base).floor().min(4.0);
    (input / base.powi(i as i32), i)
  };

  let string = format!("{number:.2}")
    .trim_end_matches('0')
    .trim_end_matches('.')
    .to_owned();

  if i >= 1.0 {
    let sizes = ['-', 'k', 'M', 'G', 'T'];
    format!("{string}{}", sizes[i as usize])
  } else {
    string
  }
}

/// Format elapsed time as a `mm:ss` clock.
///
/// Minutes are not wrapped into hours.
///
/// ```rust
/// # use std::time::Duration;
/// # use twenty48_lib::utils::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::ZERO), "00:00");
/// assert_eq!(format_elapsed(Duration::from_millis(61_900)), "01:01");
/// assert_eq!(format_elapsed(Duration::from_secs(6000)), "100:00");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
  let seconds = elapsed.as_secs();

  format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(feature = "notation")]
pub use notation::{parse_notation, to_notation};

#[cfg(feature = "notation")]
mod notation {
  use once_cell::sync::Lazy;
  use regex::{Captures, Regex};

  use crate::{
    board::{parse_tile, Error},
    Board, Tile, SIZE,
  };

  /// A run of empty tiles, `-` alone or `-<count>`
  static EMPTY_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-(\d*)$").expect("the regex is valid"));

  /// Several consecutive single empty tiles in a row string
  static EMPTY_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-(?:,-)+").expect("the regex is valid"));

  fn parse_row(row: &str, line: usize) -> Result<Vec<Tile>, Error> {
    let mut tiles = Vec::with_capacity(SIZE);

    for token in row.split(',').map(str::trim).filter(|token| !token.is_empty()) {
      if let Some(captures) = EMPTY_RUN.captures(token) {
        let count = match &captures[1] {
          "" => 1,
          digits => digits
            .parse()
            .map_err(|_| Error::Format("empty run is too long"))?,
        };

        if count == 0 {
          return Err(Error::Format("empty run of length zero"));
        }

        tiles.extend(std::iter::repeat(None).take(count.min(SIZE + 1)));
      } else {
        tiles.push(parse_tile(token, line)?);
      }
    }

    if tiles.len() > SIZE {
      return Err(Error::NotSquare {
        line,
        width: tiles.len(),
      });
    }

    tiles.resize(SIZE, None);

    Ok(tiles)
  }

  /// Parse a board from the compact one-line notation.
  ///
  /// Rows are separated by `/` and tiles by `,`. `-` is an empty tile and
  /// `-<n>` stands for `n` empty tiles. Missing tiles at the end of a row are
  /// empty, so `2,2/-/-/` is a board with two 2s in the top left corner.
  ///
  /// # Errors
  /// Returns an error if the row count or a row length is wrong, or a tile
  /// isn't a power of two.
  pub fn parse_notation(input: &str) -> Result<Board, Error> {
    let rows: Vec<_> = input.trim().split('/').collect();

    if rows.len() != SIZE {
      return Err(Error::WrongSize { rows: rows.len() });
    }

    let data = rows
      .into_iter()
      .enumerate()
      .map(|(y, row)| parse_row(row, y + 1))
      .collect::<Result<Vec<_>, _>>()?;

    Board::new(data)
  }

  /// Convert a board to the compact one-line notation.
  ///
  /// Trailing empty tiles of every row are left out and runs of empty tiles
  /// are shortened to `-<n>`.
  #[must_use]
  pub fn to_notation(board: &Board) -> String {
    let replace_function = |captures: &Captures| format!("-{}", captures[0].len() / 2 + 1);

    let compress_row = |row: &[Tile]| -> String {
      let len = row.iter().rposition(Option::is_some).map_or(0, |last| last + 1);

      let row = row[..len]
        .iter()
        .map(|tile| tile.map_or_else(|| "-".to_owned(), |value| value.to_string()))
        .collect::<Vec<_>>()
        .join(",");

      EMPTY_SEQUENCE.replace_all(&row, replace_function).to_string()
    };

    board.rows().map(compress_row).collect::<Vec<_>>().join("/")
  }
}
