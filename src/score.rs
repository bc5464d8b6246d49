// src/score.rs
// This module handles bingo detection: which lines of the board are complete
// and which cells they cover.

use crate::board::Board;
use crate::defs::{Coord, GRID_SIZE};
use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Line {
    Row(usize),
    Column(usize),
    /// (0,0) to (4,4)
    Diagonal,
    /// (0,4) to (4,0)
    AntiDiagonal,
}

impl Line {
    /// Every line in checking order: rows, columns, diagonal, anti-diagonal.
    pub fn all() -> Vec<Line> {
        let mut lines = Vec::with_capacity(2 * GRID_SIZE + 2);
        lines.extend((0..GRID_SIZE).map(Line::Row));
        lines.extend((0..GRID_SIZE).map(Line::Column));
        lines.push(Line::Diagonal);
        lines.push(Line::AntiDiagonal);
        lines
    }

    pub fn cells(&self) -> [Coord; GRID_SIZE] {
        std::array::from_fn(|i| match *self {
            Line::Row(r) => (r, i),
            Line::Column(c) => (i, c),
            Line::Diagonal => (i, i),
            Line::AntiDiagonal => (i, GRID_SIZE - 1 - i),
        })
    }

    pub fn is_complete(&self, board: &Board) -> bool {
        self.cells().iter().all(|&cell| board.is_marked(cell))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(r) => write!(f, "row {}", r + 1),
            Line::Column(c) => write!(f, "column {}", c + 1),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// The lines currently completed on a board. Empty means the game is still on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinState {
    lines: Vec<Line>,
}

impl WinState {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_bingo(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Union of the cells of every completed line, row-major, each cell once.
    pub fn winning_cells(&self) -> Vec<Coord> {
        self.lines
            .iter()
            .flat_map(|line| line.cells())
            .collect::<BTreeSet<Coord>>()
            .into_iter()
            .collect()
    }

    pub fn is_winning_cell(&self, cell: Coord) -> bool {
        self.lines.iter().any(|line| line.cells().contains(&cell))
    }
}

/// Checks every line of the board and reports all the complete ones.
pub fn check_bingo(board: &Board) -> WinState {
    let lines = Line::all()
        .into_iter()
        .filter(|line| line.is_complete(board))
        .collect();
    WinState { lines }
}
