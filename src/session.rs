use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;
use serde_json::json;
use tracing::debug;
use twenty48_lib::{Direction, Game, WIN_VALUE};

use crate::timer::Stopwatch;

const HELP: &str = "\
moves:    left/right/up/down, wasd or hjkl
new game: n, new
quit:     q, quit, $
help:     ?, help";

/// A line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
  Move(Direction),
  NewGame,
  Quit,
  Help,
}

impl Command {
  fn parse(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
      "q" | "quit" | "exit" | "$" => Some(Command::Quit),
      "n" | "new" | "restart" => Some(Command::NewGame),
      "?" | "help" => Some(Command::Help),
      other => other.parse().ok().map(Command::Move),
    }
  }
}

/// Interactive play on a terminal.
///
/// Holds the input for the whole session, so there is exactly one reader of
/// player commands. It is released together with the session.
pub struct Session<R, I, W> {
  game: Game<R>,
  stopwatch: Stopwatch,
  input: I,
  output: W,
  json: bool,
}

impl<R: Rng, I: BufRead, W: Write> Session<R, I, W> {
  pub fn new(game: Game<R>, input: I, output: W, json: bool) -> Self {
    debug!("session opened");

    Session {
      game,
      stopwatch: Stopwatch::new(),
      input,
      output,
      json,
    }
  }

  /// Read and execute commands until the player quits or the input ends.
  ///
  /// # Errors
  /// Returns an error if reading the input or writing the output fails.
  pub fn run(&mut self) -> Result<()> {
    self.render()?;

    while let Some(line) = self.next_line()? {
      match Command::parse(&line) {
        Some(Command::Move(direction)) => self.turn(direction)?,
        Some(Command::NewGame) => self.new_game()?,
        Some(Command::Help) => writeln!(self.output, "{HELP}")?,
        Some(Command::Quit) => break,
        None if line.trim().is_empty() => {}
        None => writeln!(self.output, "Invalid input: {:?}", line.trim())?,
      }
    }

    Ok(())
  }

  fn next_line(&mut self) -> Result<Option<String>> {
    let mut line = String::new();

    let read = self
      .input
      .read_line(&mut line)
      .context("failed to read player input")?;

    Ok((read > 0).then_some(line))
  }

  fn turn(&mut self, direction: Direction) -> Result<()> {
    if self.game.status().is_end() {
      writeln!(self.output, "The game has ended, type `new` to play again")?;
      return Ok(());
    }

    let turn = self.game.play(direction);

    if !turn.changed {
      debug!(%direction, "nothing moved");
      return Ok(());
    }

    // the clock runs from the first accepted move
    self.stopwatch.start();

    self.render()?;

    if turn.status.is_end() {
      self.stopwatch.stop();
      self.show_outcome()?;
    }

    Ok(())
  }

  fn new_game(&mut self) -> Result<()> {
    if self.game.status().is_in_progress() {
      write!(self.output, "Abandon the current game? [y/N] ")?;
      self.output.flush()?;

      let answer = self.next_line()?.unwrap_or_default();

      if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        return Ok(());
      }
    }

    self.game.reset();
    self.stopwatch.reset();

    self.render()
  }

  fn render(&mut self) -> Result<()> {
    if self.json {
      let rows: Vec<Vec<u32>> = self
        .game
        .board()
        .rows()
        .map(|row| row.iter().map(|tile| tile.unwrap_or(0)).collect())
        .collect();

      let snapshot = json!({
        "board": rows,
        "score": self.game.score(),
        "status": self.game.status(),
        "elapsed": self.stopwatch.to_string(),
      });

      writeln!(self.output, "{snapshot}")?;
    } else {
      writeln!(
        self.output,
        "score: {}  time: {}\n{}",
        self.game.score(),
        self.stopwatch,
        self.game.board()
      )?;
    }

    Ok(())
  }

  fn show_outcome(&mut self) -> Result<()> {
    let (title, message) = if self.game.status().is_won() {
      (
        "Congratulations!",
        format!("You reached {WIN_VALUE}! Amazing job!"),
      )
    } else {
      (
        "Game Over!",
        "No more moves available. Try again!".to_owned(),
      )
    };

    if self.json {
      let outcome = json!({
        "outcome": self.game.status(),
        "score": self.game.score(),
        "elapsed": self.stopwatch.to_string(),
        "stats": self.game.stats().finished(self.game.score()),
      });

      writeln!(self.output, "{outcome}")?;
    } else {
      writeln!(self.output, "{title}\n{message}")?;
      writeln!(self.output, "Final score: {}", self.game.score())?;
      writeln!(self.output, "Time: {}", self.stopwatch)?;
      writeln!(
        self.output,
        "{}",
        self.game.stats().finished(self.game.score())
      )?;
      writeln!(self.output, "Type `new` to play again or `quit` to leave.")?;
    }

    Ok(())
  }
}

impl<R, I, W> Drop for Session<R, I, W> {
  fn drop(&mut self) {
    debug!(elapsed = %self.stopwatch, "session closed");
  }
}
