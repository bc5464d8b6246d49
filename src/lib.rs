// lib.rs
// Library modules for the phrase bingo card

pub mod defs;
pub mod error;
pub mod logging;
pub mod config;
pub mod phrases;
pub mod shuffle;
pub mod card;
pub mod board;
pub mod score;
pub mod timer;
pub mod game;
pub mod terminal;
