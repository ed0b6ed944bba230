//! Rules engine for the 2048 sliding-tile puzzle.
//!
//! The engine owns the board, the score and the game status. It is driven one
//! [`Direction`] at a time through [`Game::play`], which slides and merges the
//! tiles, spawns a new tile and checks for a win or a loss.

mod board;
mod direction;
mod functions;
mod game;
mod state;
mod stats;
pub mod utils;

pub use board::{Board, Error as BoardError, Line, Lines, Tile, TilePointer, Value};
pub use direction::{Direction, ParseDirectionError};
pub use functions::{slide_line, Slide};
pub use game::{Game, MoveOutcome, Turn};
use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
pub use state::GameStatus;
pub use stats::Stats;
use tracing::info;

/// Side length of the board.
pub const SIZE: usize = 4;

/// Reaching a tile of this value wins the game.
pub const WIN_VALUE: Value = 2048;

/// Largest value a 4x4 board can reach, 2^(cells + 1).
pub const MAX_VALUE: Value = 1 << (SIZE * SIZE + 1);

/// Probability that a spawned tile is a 4 instead of a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Tiles spawned at the start of every game.
pub const INITIAL_TILES: usize = 2;

/// Points collected by merging tiles.
pub type Score = u32;

/// Play `games` games with uniformly random legal moves and collect the stats.
///
/// Every game runs until it is won or lost. The random source is seeded with
/// `seed`, so the result is reproducible.
pub fn simulate(games: u32, seed: u64) -> Stats {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut total = Stats::new();

  for _ in 0..games {
    let mut game = Game::new(StdRng::seed_from_u64(rng.random()));

    while !game.status().is_end() {
      let legal = game.legal_moves();

      // a board without legal moves is always caught by the loss check
      let Some(&direction) = legal.choose(&mut rng) else {
        break;
      };

      game.play(direction);
    }

    info!(
      status = %game.status(),
      score = game.score(),
      max_tile = game.board().max_tile(),
      "simulated game finished"
    );

    total += game.stats().finished(game.score());
  }

  total
}
