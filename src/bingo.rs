// src/bingo.rs
//
// Terminal bingo card: a 5x5 grid of phrases around a free space.
//
// Interactive Controls:
// - Arrows / hjkl: move the cursor
// - ENTER / SPACE: mark the cell under the cursor
// - F5 / r: deal a new card
// - t: start or stop the 5 minute countdown
// - ESC / q: exit
//
// CLI Options:
// - --phrases: JSON file with the phrase list
// - --seed: deal reproducible cards
// - --timer: start with the countdown running
// - --print: print one card and exit (add --json for a JSON snapshot)
// - --config: configuration file (default conf/bingo.conf)

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use phrasebingo::defs::Coord;
use phrasebingo::config::{BingoConfig, DEFAULT_CONFIG_PATH};
use phrasebingo::game::{Game, GameEvent, MarkOutcome};
use phrasebingo::logging::{self, log_error_stderr, log_info, LogSink};
use phrasebingo::phrases::PhrasePool;
use phrasebingo::score::Line;
use phrasebingo::terminal::{self, KeyAction, RawTerminal};

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Phrase Bingo - Mark phrases as you hear them and shout BINGO")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// JSON file with the list of phrases (at least 24)
    #[arg(long)]
    phrases: Option<PathBuf>,

    /// Seed for reproducible cards
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the countdown running
    #[arg(long)]
    timer: bool,

    /// Print a card and exit (no interactive loop)
    #[arg(long)]
    print: bool,

    /// With --print, output the card as JSON
    #[arg(long, requires = "print")]
    json: bool,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn load_pool(args: &Args, config: &BingoConfig) -> Result<PhrasePool, Box<dyn Error>> {
    let pool = match args.phrases.as_ref().or(config.phrases_file.as_ref()) {
        Some(path) => PhrasePool::from_file(path)?,
        None => PhrasePool::builtin()?,
    };
    Ok(pool)
}

fn bingo_message(lines: &[Line]) -> String {
    let lines: Vec<String> = lines.iter().map(Line::to_string).collect();
    format!("BINGO on {}! Press F5 for a new card.", lines.join(", "))
}

/// Applies one key from the reader. Returns false when the loop must end:
/// on a quit key, or when the reader thread is gone and no key can ever
/// arrive again.
fn apply_key(game: &mut Game, cursor: &mut Coord, message: &mut Option<String>, key: Option<KeyEvent>) -> bool {
    let Some(key) = key else {
        return false;
    };
    match terminal::key_action(key, *cursor) {
        KeyAction::Quit => return false,
        KeyAction::MoveCursor(moved) => *cursor = moved,
        KeyAction::Game(GameEvent::Mark(cell)) => {
            if let MarkOutcome::Bingo(lines) = game.mark(cell) {
                *message = Some(bingo_message(&lines));
            }
        }
        KeyAction::Game(event) => {
            *message = None;
            game.handle_event(event);
        }
        KeyAction::Nothing => {}
    }
    true
}

async fn run_card(mut game: Game, start_timer: bool) -> Result<(), Box<dyn Error>> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (key_tx, mut key_rx) = mpsc::unbounded_channel();

    game = game.with_scheduler(event_tx);
    if start_timer {
        game.toggle_timer();
    }

    let _raw = RawTerminal::enter()?;
    terminal::spawn_key_reader(key_tx);

    let mut cursor: Coord = (0, 0);
    let mut message: Option<String> = None;

    loop {
        terminal::show_on_terminal(&game, cursor, message.as_deref())?;

        tokio::select! {
            key = key_rx.recv() => {
                if !apply_key(&mut game, &mut cursor, &mut message, key) {
                    break;
                }
            }
            Some(event) = event_rx.recv() => {
                let was_running = game.countdown().is_active();
                game.handle_event(event);
                if was_running && game.countdown().remaining() == 0 {
                    message = Some("Time is up!".to_string());
                }
            }
            else => break,
        }
    }

    log_info(&format!("Leaving {}", game.game_info()));
    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = BingoConfig::load_or_default(&args.config);

    // The card owns stdout from here on.
    match &config.log_file {
        Some(path) => logging::log_to_file(path)?,
        None => logging::set_sink(LogSink::Off),
    }

    let pool = load_pool(&args, &config)?;
    let game = match args.seed.or(config.seed) {
        Some(seed) => Game::with_seed(pool, seed)?,
        None => Game::new(pool)?,
    };

    if args.print {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
        } else {
            terminal::print_card(&game);
        }
        return Ok(());
    }

    run_card(game, args.timer).await?;
    println!("Exiting the game.");
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        log_error_stderr(&format!("{e}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["bingo", "--seed", "9", "--timer"]).unwrap();
        assert_eq!(args.seed, Some(9));
        assert!(args.timer);
        assert!(!args.print);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_json_requires_print() {
        assert!(Args::try_parse_from(["bingo", "--json"]).is_err());
        assert!(Args::try_parse_from(["bingo", "--print", "--json"]).is_ok());
    }

    #[test]
    fn test_phrases_flag_wins_over_config() {
        let args = Args::try_parse_from(["bingo", "--phrases", "missing.json"]).unwrap();
        let config = BingoConfig::default();
        let err = load_pool(&args, &config).unwrap_err();
        assert!(err.to_string().contains("missing.json"));

        let args = Args::try_parse_from(["bingo"]).unwrap();
        assert!(load_pool(&args, &config).is_ok());
    }

    fn test_game() -> Game {
        Game::with_seed(PhrasePool::builtin().unwrap(), 5).unwrap()
    }

    #[test]
    fn test_closed_key_reader_ends_loop() {
        let mut game = test_game();
        let mut cursor = (0, 0);
        let mut message = None;
        assert!(!apply_key(&mut game, &mut cursor, &mut message, None));
    }

    #[test]
    fn test_apply_key() {
        let mut game = test_game();
        let mut cursor = (0, 0);
        let mut message = None;
        let press = |code| Some(KeyEvent::new(code, KeyModifiers::NONE));

        assert!(apply_key(&mut game, &mut cursor, &mut message, press(KeyCode::Down)));
        assert_eq!(cursor, (1, 0));
        assert!(apply_key(&mut game, &mut cursor, &mut message, press(KeyCode::Enter)));
        assert!(game.board().is_marked((1, 0)));

        for col in 1..5 {
            cursor = (1, col);
            assert!(apply_key(&mut game, &mut cursor, &mut message, press(KeyCode::Enter)));
        }
        assert_eq!(message.as_deref(), Some("BINGO on row 2! Press F5 for a new card."));

        assert!(apply_key(&mut game, &mut cursor, &mut message, press(KeyCode::F(5))));
        assert_eq!(message, None);
        assert!(!game.is_won());

        assert!(!apply_key(&mut game, &mut cursor, &mut message, press(KeyCode::Esc)));
    }

    #[test]
    fn test_bingo_message() {
        let message = bingo_message(&[Line::Row(0), Line::Diagonal]);
        assert_eq!(message, "BINGO on row 1, diagonal! Press F5 for a new card.");
    }
}
