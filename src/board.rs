// src/board.rs
// This module holds the mark matrix of the bingo card.

use crate::defs::{in_range, Coord, CENTER, GRID_SIZE};
use serde::{Deserialize, Serialize};

// This struct represents which cells the player has marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board([[bool; GRID_SIZE]; GRID_SIZE]);

impl Board {
    /// A fresh board with only the free space marked.
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.0[CENTER.0][CENTER.1] = true;
        board
    }

    /// A board with nothing marked, not even the free space.
    pub fn empty() -> Self {
        Board([[false; GRID_SIZE]; GRID_SIZE])
    }

    pub fn from_rows(rows: [[bool; GRID_SIZE]; GRID_SIZE]) -> Self {
        Board(rows)
    }

    pub fn is_marked(&self, (row, col): Coord) -> bool {
        in_range((row, col)) && self.0[row][col]
    }

    /// Marks a cell. Returns false if the cell is off the card or already marked.
    pub fn mark(&mut self, (row, col): Coord) -> bool {
        if !in_range((row, col)) || self.0[row][col] {
            return false;
        }
        self.0[row][col] = true;
        true
    }

    pub fn rows(&self) -> &[[bool; GRID_SIZE]; GRID_SIZE] {
        &self.0
    }

    pub fn marked_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&marked| marked).count()
    }

    pub fn get_marked_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for (r, row) in self.0.iter().enumerate() {
            for (c, &marked) in row.iter().enumerate() {
                if marked {
                    cells.push((r, c));
                }
            }
        }
        cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
