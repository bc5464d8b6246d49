// src/terminal.rs
// This module handles terminal input/output for the bingo card.

use std::io::{self, Write};
use std::thread;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::defs::{Coord, CENTER, GRIDCONFIG};
use crate::game::{Game, GameEvent};
use crate::score::WinState;

const CELL_WIDTH: usize = 16;
const CELL_LINES: usize = 3;

const GREEN: &str = "\x1b[32m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const BOLD_YELLOW: &str = "\x1b[1;33m";
const BLINK_YELLOW: &str = "\x1b[1;5;33m";
const GREY: &str = "\x1b[2m";
const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(GameEvent),
    MoveCursor(Coord),
    Quit,
    Nothing,
}

/// Moves the cursor one cell with arrows or hjkl, stopping at the card edges.
pub fn move_cursor((row, col): Coord, code: KeyCode) -> Coord {
    let last_row = GRIDCONFIG.rows - 1;
    let last_col = GRIDCONFIG.cols - 1;
    match code {
        KeyCode::Up | KeyCode::Char('k') => (row.saturating_sub(1), col),
        KeyCode::Down | KeyCode::Char('j') => ((row + 1).min(last_row), col),
        KeyCode::Left | KeyCode::Char('h') => (row, col.saturating_sub(1)),
        KeyCode::Right | KeyCode::Char('l') => (row, (col + 1).min(last_col)),
        _ => (row, col),
    }
}

pub fn key_action(key: KeyEvent, cursor: Coord) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Nothing;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Game(GameEvent::Mark(cursor)),
        KeyCode::F(5) | KeyCode::Char('r') => KeyAction::Game(GameEvent::Refresh),
        KeyCode::Char('t') => KeyAction::Game(GameEvent::ToggleTimer),
        code => {
            let moved = move_cursor(cursor, code);
            if moved == cursor {
                KeyAction::Nothing
            } else {
                KeyAction::MoveCursor(moved)
            }
        }
    }
}

/// Word-wraps `text` into at most `lines` lines of `width` columns,
/// cutting the last line with '~' when the phrase does not fit.
pub fn wrap(text: &str, width: usize, lines: usize) -> Vec<String> {
    let mut wrapped: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word: String = word.chars().take(width).collect();
        let needed = if current.is_empty() { word.chars().count() } else { current.chars().count() + 1 + word.chars().count() };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        } else {
            wrapped.push(std::mem::take(&mut current));
            current = word;
        }
    }
    if !current.is_empty() {
        wrapped.push(current);
    }

    if wrapped.len() > lines {
        wrapped.truncate(lines);
        if let Some(last) = wrapped.last_mut() {
            let mut cut: String = last.chars().take(width - 1).collect();
            cut.push('~');
            *last = cut;
        }
    }
    wrapped
}

fn center_pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = (width - len.min(width)) / 2;
    let right = width - len.min(width) - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn cell_style(game: &Game, state: &WinState, cell: Coord) -> &'static str {
    let marked = game.board().is_marked(cell);
    if state.is_bingo() {
        if state.is_winning_cell(cell) { BOLD_GREEN } else { GREY }
    } else if marked {
        GREEN
    } else {
        ""
    }
}

/// Builds the full screen for the current state of `game`.
/// Lines end in "\r\n" since the terminal is in raw mode.
pub fn render(game: &Game, cursor: Coord, message: Option<&str>) -> String {
    let state = game.win_state();
    let won = state.is_bingo();
    let border = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(GRIDCONFIG.cols));
    let mut out = String::new();

    out.push_str("Dev Download\r\n");
    if won {
        out.push_str(&format!("{BLINK_YELLOW}BINGO!!!{RESET}\r\n\r\n"));
    } else {
        out.push_str(&format!("{BOLD_YELLOW}BINGO{RESET}\r\n\r\n"));
    }

    out.push_str(&border);
    out.push_str("\r\n");
    for (r, row) in game.card().rows().iter().enumerate() {
        let texts: Vec<Vec<String>> = row
            .iter()
            .map(|cell| wrap(cell.text(), CELL_WIDTH - 2, CELL_LINES))
            .collect();

        for line in 0..CELL_LINES {
            out.push('|');
            for (c, lines) in texts.iter().enumerate() {
                // Vertically center the wrapped phrase in the cell.
                let offset = (CELL_LINES - lines.len()) / 2;
                let text = line
                    .checked_sub(offset)
                    .and_then(|i| lines.get(i))
                    .map(String::as_str)
                    .unwrap_or("");
                let mut style = cell_style(game, &state, (r, c)).to_string();
                if (r, c) == cursor {
                    style.push_str(REVERSE);
                }
                let padded = center_pad(text, CELL_WIDTH);
                if style.is_empty() {
                    out.push_str(&padded);
                } else {
                    out.push_str(&format!("{style}{padded}{RESET}"));
                }
                out.push('|');
            }
            out.push_str("\r\n");
        }
        out.push_str(&border);
        out.push_str("\r\n");
    }

    let countdown = game.countdown();
    out.push_str(&format!(
        "\r\nTimer: {}{}\r\n",
        countdown.display(),
        if countdown.is_active() { " (running)" } else { "" },
    ));
    if let Some(message) = message {
        out.push_str(&format!("{BOLD_YELLOW}{message}{RESET}\r\n"));
    }
    out.push_str("\r\nArrows: move  ENTER: mark  F5/r: new card  t: timer  ESC/q: exit\r\n");
    out
}

/// Clears the screen and draws the card.
pub fn show_on_terminal(game: &Game, cursor: Coord, message: Option<&str>) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    stdout.write_all(render(game, cursor, message).as_bytes())?;
    stdout.flush()
}

/// Prints a card once, outside raw mode.
pub fn print_card(game: &Game) {
    print!("{}", render(game, CENTER, None).replace("\r\n", "\n"));
}

/// Raw mode with a hidden cursor for as long as the guard lives.
pub struct RawTerminal;

impl RawTerminal {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = disable_raw_mode();
    }
}

/// Reads key presses on a dedicated thread and forwards them to `keys`.
/// The thread ends when the receiving side is gone or input fails.
pub fn spawn_key_reader(keys: UnboundedSender<KeyEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key_event)) => {
                    if key_event.kind == KeyEventKind::Press && keys.send(key_event).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    })
}
