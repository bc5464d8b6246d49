// src/defs.rs
// Shared constants and basic types for the bingo card.

pub struct GridStruct {
    pub rows: usize,
    pub cols: usize,
    pub center_row: usize,
    pub center_col: usize,
}

pub const GRIDCONFIG: GridStruct = GridStruct {
    rows: 5,       // number of rows in the card
    cols: 5,       // number of columns in the card
    center_row: 2, // row of the free space
    center_col: 2, // column of the free space
};

/// A cell position on the card as (row, column).
pub type Coord = (usize, usize);

pub const GRID_SIZE: usize = GRIDCONFIG.rows;
pub const CENTER: Coord = (GRIDCONFIG.center_row, GRIDCONFIG.center_col);
pub const CELLSPERCARD: usize = GRIDCONFIG.rows * GRIDCONFIG.cols;
pub const PHRASESPERCARD: usize = CELLSPERCARD - 1;
pub const FREE_SPACE: &str = "FREE SPACE";

/// Countdown length in seconds.
pub const TIMER_SECONDS: u32 = 300;

/// Returns true if the coordinate lies on the card.
pub fn in_range((row, col): Coord) -> bool {
    row < GRIDCONFIG.rows && col < GRIDCONFIG.cols
}
