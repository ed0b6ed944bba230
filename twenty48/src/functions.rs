use tracing::trace;

use crate::{Score, Tile, SIZE};

/// Result of sliding a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
  /// The line after the slide, front first
  pub line: [Tile; SIZE],
  /// Sum of the values created by merges
  pub gained: Score,
  /// Number of merges performed
  pub merges: u32,
}

impl Slide {
  /// Whether the slide moved or merged any tile.
  pub fn changed(&self, original: &[Tile; SIZE]) -> bool {
    self.line != *original
  }
}

/// Slide a line toward its front, merging equal neighbours.
///
/// Empty tiles are dropped first, then the dense prefix is scanned front to
/// back exactly once. Two equal neighbours merge into one tile of double
/// value, and the merged tile doesn't merge again during the same slide. The
/// result is padded with empty tiles at the back.
///
/// ```rust
/// # use twenty48_lib::slide_line;
/// let slide = slide_line([Some(2), Some(2), Some(2), None]);
///
/// assert_eq!(slide.line, [Some(4), Some(2), None, None]);
/// assert_eq!(slide.gained, 4);
/// ```
pub fn slide_line(line: [Tile; SIZE]) -> Slide {
  let mut compacted = line.iter().flatten().copied().peekable();

  let mut result = [None; SIZE];
  let mut gained = 0;
  let mut merges = 0;

  for slot in &mut result {
    let Some(value) = compacted.next() else {
      break;
    };

    // a merged tile skips its partner, so it can't be merged a second time
    if compacted.next_if_eq(&value).is_some() {
      *slot = Some(value * 2);
      gained += value * 2;
      merges += 1;
    } else {
      *slot = Some(value);
    }
  }

  trace!(?line, ?result, gained, "slid line");

  Slide {
    line: result,
    gained,
    merges,
  }
}
