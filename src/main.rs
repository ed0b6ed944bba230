#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod session;
mod timer;

use std::{
  fs, io,
  path::{Path, PathBuf},
  process::ExitCode,
  time::Instant,
};

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::{rngs::StdRng, SeedableRng};
use session::Session;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twenty48_lib::{utils, Board, Game};

fn main() -> ExitCode {
  let matches = Command::new("2048")
    .version("1.0")
    .about("Slide the tiles, merge equal ones and reach 2048")
    .arg(
      Arg::new("seed")
        .short('s')
        .long("seed")
        .help("Seed of the random tile spawns, random if not given")
        .takes_value(true)
        .value_parser(value_parser!(u64)),
    )
    .arg(
      Arg::new("board")
        .short('b')
        .long("board")
        .value_name("FILE")
        .help("Start from a board stored in FILE, either as a grid or in notation")
        .takes_value(true)
        .value_parser(value_parser!(PathBuf)),
    )
    .arg(
      Arg::new("simulate")
        .long("simulate")
        .value_name("GAMES")
        .conflicts_with("board")
        .help("Play GAMES games with random moves and print statistics")
        .takes_value(true)
        .value_parser(value_parser!(u32)),
    )
    .arg(
      Arg::new("json")
        .long("json")
        .help("Print the game state as JSON after every move")
        .action(ArgAction::SetTrue),
    )
    .arg(
      Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Log engine events to stderr")
        .action(ArgAction::SetTrue),
    )
    .get_matches();

  init_logging(flag(&matches, "verbose"));

  match run(&matches) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
  matches.get_one::<bool>(id).copied().unwrap_or(false)
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
  let seed = matches.get_one::<u64>("seed").copied();

  if let Some(&games) = matches.get_one::<u32>("simulate") {
    run_simulation(games, seed.unwrap_or_else(rand::random));
    return Ok(());
  }

  let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

  let game = match matches.get_one::<PathBuf>("board") {
    Some(path) => {
      let board = load_board(path)?;
      println!("Loaded board from {}", path.display());
      Game::from_board(board, rng)
    }
    None => Game::new(rng),
  };

  info!(?seed, "starting session");

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut session = Session::new(game, stdin.lock(), stdout.lock(), flag(matches, "json"));

  session.run()
}

/// Load a board from a file, either a grid with one row per line or a single
/// line of notation.
fn load_board(path: &Path) -> Result<Board> {
  let input = fs::read_to_string(path)
    .with_context(|| format!("failed to read board file {}", path.display()))?;

  let board = if input.trim().contains('/') {
    utils::parse_notation(&input)
  } else {
    input.parse()
  };

  board.with_context(|| format!("invalid board in {}", path.display()))
}

#[allow(clippy::cast_precision_loss)]
fn run_simulation(games: u32, seed: u64) {
  println!("Simulating {games} games with seed {seed}\n");

  let start = Instant::now();
  let stats = twenty48_lib::simulate(games, seed);
  let run_time = start.elapsed().as_micros();

  println!("{stats}");
  println!();

  let per_second = f64::from(stats.moves) * 1_000_000.0 / (run_time.max(1) as f64);
  println!(
    "moves/s = {} ({})",
    per_second.round(),
    utils::format_number(per_second as f32)
  );

  print_runtime(run_time);
}

fn print_runtime(run_time: u128) {
  if run_time < 10_000 {
    println!("Time: {run_time} \u{03bc}s");
  } else if run_time < 10_000_000 {
    println!("Time: {} ms", run_time / 1000);
  } else {
    println!("Time: {} s", run_time / 1_000_000);
  }
}
