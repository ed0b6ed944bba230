//! Property tests over whole games driven by seeded random play.

use proptest::prelude::*;
use twenty48_lib::{Direction, Game, GameStatus};

fn directions() -> impl Strategy<Value = Vec<Direction>> {
  prop::collection::vec(prop::sample::select(Direction::ALL.to_vec()), 1..300)
}

fn status_rank(status: GameStatus) -> u8 {
  match status {
    GameStatus::NotStarted => 0,
    GameStatus::InProgress => 1,
    GameStatus::Won | GameStatus::Lost => 2,
  }
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn random_play_keeps_invariants(seed in any::<u64>(), moves in directions()) {
    let mut game = Game::seeded(seed);

    for direction in moves {
      let score = game.score();
      let status = game.status();
      let board = *game.board();
      let occupied = board.tiles().iter().flatten().count();

      let turn = game.play(direction);

      prop_assert!(game.score() >= score);
      prop_assert_eq!(game.score() - score, turn.gained);
      prop_assert!(status_rank(game.status()) >= status_rank(status));
      prop_assert_eq!(turn.status, game.status());

      if status.is_end() || !turn.changed {
        // rejected moves leave everything untouched
        prop_assert!(!turn.changed);
        prop_assert_eq!(game.board(), &board);
        prop_assert_eq!(game.status(), status);
        continue;
      }

      prop_assert_ne!(game.status(), GameStatus::NotStarted);

      // a changed board always has room for the new tile
      let (ptr, value) = turn.spawned.expect("a tile is spawned after every accepted move");
      prop_assert_eq!(game.board().get_tile(ptr), Some(value));

      let now_occupied = game.board().tiles().iter().flatten().count();
      prop_assert!(now_occupied <= occupied + 1);

      for value in game.board().tiles().iter().flatten() {
        prop_assert!(*value >= 2 && value.is_power_of_two());
      }

      match game.status() {
        GameStatus::Won => prop_assert!(game.has_won()),
        GameStatus::Lost => {
          prop_assert!(!game.has_won());
          prop_assert!(game.is_terminal());
          prop_assert!(game.legal_moves().is_empty());
        }
        _ => prop_assert!(!game.is_terminal()),
      }
    }
  }

  #[test]
  fn terminal_check_agrees_with_legal_moves(seed in any::<u64>(), moves in directions()) {
    let mut game = Game::seeded(seed);

    for direction in moves {
      game.play(direction);

      if !game.status().is_end() {
        prop_assert_eq!(game.is_terminal(), game.legal_moves().is_empty());
      }
    }
  }
}
