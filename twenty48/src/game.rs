use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::{
  functions::slide_line, Board, Direction, GameStatus, Score, Stats, TilePointer, Value,
  FOUR_PROBABILITY, INITIAL_TILES, WIN_VALUE,
};

/// Summary of sliding the whole board in one direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
  /// Whether any tile moved or merged
  pub changed: bool,
  /// Points gained by the merges
  pub gained: Score,
  /// Number of merges performed
  pub merges: u32,
}

/// Result of one player turn, see [`Game::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
  /// Whether the move was accepted. A rejected move changes nothing.
  pub changed: bool,
  /// Points gained by the merges
  pub gained: Score,
  /// Position and value of the tile spawned after the move
  pub spawned: Option<(TilePointer, Value)>,
  /// Status after the turn
  pub status: GameStatus,
}

/// Slide every line of the board toward `direction`.
fn slide_board(board: &Board, direction: Direction) -> (Board, MoveOutcome) {
  let mut next = *board;
  let mut outcome = MoveOutcome::default();

  for line in Board::lines(direction) {
    let tiles = board.line(line);
    let slide = slide_line(tiles);

    if slide.changed(&tiles) {
      next.set_line(line, slide.line);
      outcome.changed = true;
    }

    outcome.gained += slide.gained;
    outcome.merges += slide.merges;
  }

  (next, outcome)
}

/// A single game of 2048.
///
/// Owns the board, the score, the status and the random source used to spawn
/// new tiles. Pass a seeded generator for reproducible games.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
  board: Board,
  score: Score,
  status: GameStatus,
  stats: Stats,
  rng: R,
}

impl Game<StdRng> {
  /// Create a game with a random source seeded from `seed`.
  pub fn seeded(seed: u64) -> Self {
    Game::new(StdRng::seed_from_u64(seed))
  }

  /// Create a game with a random source seeded by the operating system.
  pub fn from_entropy() -> Self {
    Game::new(StdRng::from_os_rng())
  }
}

impl<R: Rng> Game<R> {
  /// Start a fresh game with the initial tiles spawned.
  pub fn new(rng: R) -> Self {
    let mut game = Game::from_board(Board::new_empty(), rng);
    game.reset();
    game
  }

  /// Start a game from an explicit position.
  ///
  /// No tiles are spawned, the score is 0 and the game hasn't started yet.
  pub fn from_board(board: Board, rng: R) -> Self {
    Game {
      board,
      score: 0,
      status: GameStatus::NotStarted,
      stats: Stats::new(),
      rng,
    }
  }

  /// Throw the current game away and start a new one.
  ///
  /// Allowed in every status, including after the game has ended.
  pub fn reset(&mut self) {
    self.board = Board::new_empty();
    self.score = 0;
    self.status = GameStatus::NotStarted;
    self.stats = Stats::new();

    for _ in 0..INITIAL_TILES {
      self.spawn_random_tile();
    }

    debug!(board = %self.board, "new game");
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn score(&self) -> Score {
    self.score
  }

  pub fn status(&self) -> GameStatus {
    self.status
  }

  pub fn stats(&self) -> &Stats {
    &self.stats
  }

  /// Slide and merge all tiles toward `direction`.
  ///
  /// Adds the merged values to the score. Doesn't spawn a tile and doesn't
  /// touch the status, see [`Game::play`] for a full turn. Does nothing once
  /// the game has ended.
  pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
    if self.status.is_end() {
      return MoveOutcome::default();
    }

    let (board, outcome) = slide_board(&self.board, direction);

    if outcome.changed {
      self.board = board;
      self.score += outcome.gained;
      self.stats.record_move(outcome.merges, outcome.gained);
    }

    debug!(
      %direction,
      changed = outcome.changed,
      gained = outcome.gained,
      "applied move"
    );

    outcome
  }

  /// Put a 2 (or a 4 with [`FOUR_PROBABILITY`]) on a random empty tile.
  ///
  /// Returns the new tile, or `None` when the board is full.
  pub fn spawn_random_tile(&mut self) -> Option<(TilePointer, Value)> {
    let empty_tiles: Vec<_> = self.board.pointers_to_empty_tiles().collect();

    if empty_tiles.is_empty() {
      return None;
    }

    let ptr = empty_tiles[self.rng.random_range(0..empty_tiles.len())];
    let value = if self.rng.random_bool(FOUR_PROBABILITY) {
      4
    } else {
      2
    };

    self.board.place_tile(ptr, value);
    self.stats.record_spawn();

    debug!(%ptr, value, "spawned tile");

    Some((ptr, value))
  }

  /// Check whether any tile has reached [`WIN_VALUE`].
  pub fn has_won(&self) -> bool {
    self.board.contains(WIN_VALUE)
  }

  /// Check whether no move can change the board anymore.
  ///
  /// That is the case only when the board is full and no two neighbours share
  /// a value.
  pub fn is_terminal(&self) -> bool {
    self.board.is_full() && !self.board.has_adjacent_pair()
  }

  /// Whether a move toward `direction` would be accepted.
  pub fn can_move(&self, direction: Direction) -> bool {
    !self.status.is_end() && slide_board(&self.board, direction).1.changed
  }

  /// All directions that would change the board.
  pub fn legal_moves(&self) -> Vec<Direction> {
    Direction::ALL
      .into_iter()
      .filter(|&direction| self.can_move(direction))
      .collect()
  }

  /// Play one turn.
  ///
  /// A move that changes nothing is rejected without side effects. Otherwise
  /// the game starts (if it hasn't yet), a random tile is spawned and the win
  /// is checked before the loss.
  pub fn play(&mut self, direction: Direction) -> Turn {
    let outcome = self.apply_move(direction);

    if !outcome.changed {
      return Turn {
        changed: false,
        gained: 0,
        spawned: None,
        status: self.status,
      };
    }

    if self.status == GameStatus::NotStarted {
      self.set_status(GameStatus::InProgress);
    }

    let spawned = self.spawn_random_tile();

    if self.has_won() {
      self.set_status(GameStatus::Won);
    } else if self.is_terminal() {
      self.set_status(GameStatus::Lost);
    }

    Turn {
      changed: true,
      gained: outcome.gained,
      spawned,
      status: self.status,
    }
  }

  fn set_status(&mut self, status: GameStatus) {
    debug!(from = %self.status, to = %status, "status changed");

    self.status = status;

    if status.is_end() {
      info!(
        %status,
        score = self.score,
        max_tile = self.board.max_tile(),
        moves = self.stats.moves,
        "game ended"
      );
    }
  }
}
