// src/game.rs
// This module provides the Game struct: the single bingo session that owns the
// card, the marks and the countdown, and applies every player action to them.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::board::Board;
use crate::card::{Card, CardGenerator};
use crate::defs::{in_range, Coord};
use crate::error::BingoError;
use crate::logging::{log_error, log_info, log_warning};
use crate::phrases::PhrasePool;
use crate::score::{check_bingo, Line, WinState};
use crate::timer::{Countdown, Ticker};

/// Everything that can happen to a session, one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Mark(Coord),
    Refresh,
    ToggleTimer,
    /// A second elapsed on the ticker with the given generation.
    Tick(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
}

/// Why a mark request left the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredInput {
    OutOfRange,
    AlreadyMarked,
    /// The card already has a bingo, marks are frozen until refresh.
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    /// The mark completed at least one line.
    Bingo(Vec<Line>),
    Ignored(IgnoredInput),
}

/// Serializable view of the session, for printing and debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: String,
    pub card_id: String,
    pub created_at: String,
    pub cells: Vec<Vec<String>>,
    pub marked: Board,
    pub status: GameStatus,
    pub lines: Vec<Line>,
    pub winning_cells: Vec<Coord>,
    pub timer: Countdown,
}

pub struct Game {
    id: String,
    created_at: DateTime<Local>,
    pool: PhrasePool,
    generator: CardGenerator,
    rng: StdRng,
    card: Card,
    board: Board,
    countdown: Countdown,
    ticker: Option<Ticker>,
    ticker_count: u64,
    events: Option<UnboundedSender<GameEvent>>,
}

impl Game {
    /// New session with a randomly seeded generator and no ticker.
    pub fn new(pool: PhrasePool) -> Result<Self, BingoError> {
        Self::with_rng(pool, StdRng::seed_from_u64(rand::random()))
    }

    /// New session whose cards are reproducible from `seed`.
    pub fn with_seed(pool: PhrasePool, seed: u64) -> Result<Self, BingoError> {
        Self::with_rng(pool, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(pool: PhrasePool, mut rng: StdRng) -> Result<Self, BingoError> {
        let generator = CardGenerator::new();
        let card = generator.generate(&pool, &mut rng)?;
        let id = format!("game_{:08x}", rng.random::<u32>());
        log_info(&format!("Created {id} with card {:016X}", card.id()));

        Ok(Self {
            id,
            created_at: Local::now(),
            pool,
            generator,
            rng,
            card,
            board: Board::new(),
            countdown: Countdown::new(),
            ticker: None,
            ticker_count: 0,
            events: None,
        })
    }

    /// Lets the session spawn its own one-second ticker; ticks arrive on `events`
    /// and must be fed back through [`Game::handle_event`]. Needs a tokio runtime.
    pub fn with_scheduler(mut self, events: UnboundedSender<GameEvent>) -> Self {
        self.events = Some(events);
        self.sync_ticker(false);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at_string(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Recomputed from the marks on every call.
    pub fn win_state(&self) -> WinState {
        check_bingo(&self.board)
    }

    pub fn winning_cells(&self) -> Vec<Coord> {
        self.win_state().winning_cells()
    }

    pub fn status(&self) -> GameStatus {
        if self.win_state().is_bingo() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_won(&self) -> bool {
        self.status() == GameStatus::Won
    }

    /// Generation of the running ticker, if any.
    pub fn ticker_generation(&self) -> Option<u64> {
        self.ticker.as_ref().map(Ticker::generation)
    }

    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Mark(cell) => {
                self.mark(cell);
            }
            GameEvent::Refresh => {
                if let Err(e) = self.refresh() {
                    log_error(&format!("Failed to refresh {}: {e}", self.id));
                }
            }
            GameEvent::ToggleTimer => {
                self.toggle_timer();
            }
            GameEvent::Tick(generation) => self.tick_from(generation),
        }
    }

    pub fn mark(&mut self, cell: Coord) -> MarkOutcome {
        if self.is_won() {
            log_warning(&format!("Ignoring mark at {cell:?}: card already has a bingo"));
            return MarkOutcome::Ignored(IgnoredInput::Locked);
        }
        if !in_range(cell) {
            log_warning(&format!("Ignoring mark at {cell:?}: outside the card"));
            return MarkOutcome::Ignored(IgnoredInput::OutOfRange);
        }
        if !self.board.mark(cell) {
            return MarkOutcome::Ignored(IgnoredInput::AlreadyMarked);
        }

        let state = self.win_state();
        if !state.is_bingo() {
            return MarkOutcome::Marked;
        }

        let lines: Vec<String> = state.lines().iter().map(Line::to_string).collect();
        log_info(&format!("BINGO on {} with {}", self.id, lines.join(", ")));
        if self.countdown.is_active() {
            self.countdown.stop();
            log_info(&format!("Timer stopped at {}", self.countdown.display()));
        }
        self.sync_ticker(false);
        MarkOutcome::Bingo(state.lines().to_vec())
    }

    /// Deals a brand new card and clears the marks. A running timer starts over.
    pub fn refresh(&mut self) -> Result<(), BingoError> {
        let card = self.generator.generate(&self.pool, &mut self.rng)?;
        log_info(&format!("Refreshed {}: new card {:016X}", self.id, card.id()));
        self.card = card;
        self.board = Board::new();

        let restart = self.countdown.is_active();
        if restart {
            self.countdown.reset();
        }
        self.sync_ticker(restart);
        Ok(())
    }

    /// Returns whether the timer is running afterwards.
    pub fn toggle_timer(&mut self) -> bool {
        let active = self.countdown.toggle();
        if active {
            log_info(&format!("Timer started at {}", self.countdown.display()));
        } else {
            log_info(&format!("Timer stopped at {}", self.countdown.display()));
        }
        self.sync_ticker(false);
        active
    }

    /// One second elapsed.
    pub fn tick(&mut self) {
        if self.countdown.tick() {
            log_info(&format!("Time is up on {}", self.id));
        }
        self.sync_ticker(false);
    }

    /// A tick from a scheduled ticker. Ticks from a ticker that has since been
    /// cancelled or replaced are dropped.
    pub fn tick_from(&mut self, generation: u64) {
        if self.ticker_generation() != Some(generation) {
            return;
        }
        self.tick();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = self.win_state();
        GameSnapshot {
            game_id: self.id.clone(),
            card_id: format!("{:016X}", self.card.id()),
            created_at: self.created_at_string(),
            cells: self
                .card
                .rows()
                .iter()
                .map(|row| row.iter().map(|cell| cell.text().to_string()).collect())
                .collect(),
            marked: self.board.clone(),
            status: self.status(),
            lines: state.lines().to_vec(),
            winning_cells: state.winning_cells(),
            timer: self.countdown,
        }
    }

    pub fn game_info(&self) -> String {
        format!(
            "Game[id={}, created={}, card={:016X}, marked={}, status={:?}, timer={}{}]",
            self.id,
            self.created_at_string(),
            self.card.id(),
            self.board.marked_count(),
            self.status(),
            self.countdown.display(),
            if self.countdown.is_active() { " running" } else { "" },
        )
    }

    // Keeps the ticker task in line with the countdown: one ticker while the
    // countdown runs, none otherwise. `restart` replaces a running ticker.
    fn sync_ticker(&mut self, restart: bool) {
        if !self.countdown.is_active() || restart {
            self.ticker = None;
        }
        if !self.countdown.is_active() || self.ticker.is_some() {
            return;
        }
        if let Some(events) = &self.events {
            self.ticker_count += 1;
            self.ticker = Some(Ticker::spawn(self.ticker_count, events.clone()));
        }
    }
}
