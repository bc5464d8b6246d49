// src/card.rs
// Builds bingo cards: 24 shuffled phrases around a fixed free space.

use crate::defs::{Coord, CENTER, FREE_SPACE, GRIDCONFIG, PHRASESPERCARD};
use crate::error::BingoError;
use crate::phrases::PhrasePool;
use crate::shuffle::shuffle;

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Phrase(String),
    FreeSpace,
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Phrase(phrase) => phrase,
            Cell::FreeSpace => FREE_SPACE,
        }
    }

    pub fn is_free_space(&self) -> bool {
        matches!(self, Cell::FreeSpace)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A built card. Rows of cells, never modified after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: u64,
    cells: Vec<Vec<Cell>>,
}

impl Card {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, (row, col): Coord) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// All phrases on the card in row-major order, free space excluded.
    pub fn phrases(&self) -> Vec<&str> {
        self.cells
            .iter()
            .flatten()
            .filter_map(|cell| match cell {
                Cell::Phrase(phrase) => Some(phrase.as_str()),
                Cell::FreeSpace => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardGenerator;

impl CardGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Shuffles the pool and lays the first 24 phrases out row by row,
    /// skipping the center which always holds the free space.
    pub fn generate<R: Rng>(&self, pool: &PhrasePool, rng: &mut R) -> Result<Card, BingoError> {
        if pool.len() < PHRASESPERCARD {
            return Err(BingoError::NotEnoughPhrases {
                required: PHRASESPERCARD,
                found: pool.len(),
            });
        }

        let mut shuffled = shuffle(pool.phrases(), rng).into_iter();
        let mut cells = Vec::with_capacity(GRIDCONFIG.rows);

        for row in 0..GRIDCONFIG.rows {
            let mut row_cells = Vec::with_capacity(GRIDCONFIG.cols);
            for col in 0..GRIDCONFIG.cols {
                if (row, col) == CENTER {
                    row_cells.push(Cell::FreeSpace);
                } else {
                    // Length was checked above, the iterator cannot run dry here.
                    let phrase = shuffled.next().ok_or(BingoError::NotEnoughPhrases {
                        required: PHRASESPERCARD,
                        found: pool.len(),
                    })?;
                    row_cells.push(Cell::Phrase(phrase));
                }
            }
            cells.push(row_cells);
        }

        let id = self.generate_card_id(&cells);
        Ok(Card { id, cells })
    }

    fn generate_card_id(&self, cells: &[Vec<Cell>]) -> u64 {
        let mut hasher = DefaultHasher::new();
        for row in cells {
            for cell in row {
                cell.hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool(count: usize) -> PhrasePool {
        PhrasePool::new((1..=count).map(|i| format!("Phrase {i}")).collect()).unwrap()
    }

    fn validate_card(card: &Card, pool: &PhrasePool) {
        assert_eq!(card.rows().len(), GRIDCONFIG.rows);
        for row in card.rows() {
            assert_eq!(row.len(), GRIDCONFIG.cols);
        }

        let free: Vec<_> = card
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| ((r, c), cell)))
            .filter(|(_, cell)| cell.is_free_space())
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(free, vec![CENTER]);

        let phrases = card.phrases();
        assert_eq!(phrases.len(), PHRASESPERCARD);
        let unique: HashSet<_> = phrases.iter().collect();
        assert_eq!(unique.len(), PHRASESPERCARD);
        assert!(phrases.iter().all(|p| pool.contains(p)));
    }

    #[test]
    fn test_generated_cards_are_valid() {
        let generator = CardGenerator::new();
        let mut rng = StdRng::seed_from_u64(11);
        for size in [24, 25, 40] {
            let pool = pool(size);
            for _ in 0..50 {
                let card = generator.generate(&pool, &mut rng).unwrap();
                validate_card(&card, &pool);
            }
        }
    }

    #[test]
    fn test_builtin_pool_card() {
        let pool = PhrasePool::builtin().unwrap();
        let card = CardGenerator::new().generate(&pool, &mut rand::rng()).unwrap();
        validate_card(&card, &pool);
        assert_eq!(card.cell(CENTER), Some(&Cell::FreeSpace));
        assert_eq!(card.cell(CENTER).unwrap().text(), "FREE SPACE");
    }

    #[test]
    fn test_exact_pool_uses_every_phrase() {
        let pool = pool(24);
        let card = CardGenerator::new().generate(&pool, &mut StdRng::seed_from_u64(5)).unwrap();
        let mut on_card: Vec<&str> = card.phrases();
        on_card.sort();
        let mut all: Vec<&str> = pool.phrases().iter().map(String::as_str).collect();
        all.sort();
        assert_eq!(on_card, all);
    }

    #[test]
    fn test_card_id_follows_content() {
        let pool = pool(30);
        let generator = CardGenerator::new();
        let a = generator.generate(&pool, &mut StdRng::seed_from_u64(8)).unwrap();
        let b = generator.generate(&pool, &mut StdRng::seed_from_u64(8)).unwrap();
        let c = generator.generate(&pool, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_out_of_range_cell() {
        let pool = pool(24);
        let card = CardGenerator::new().generate(&pool, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(card.cell((5, 0)).is_none());
        assert!(card.cell((0, 5)).is_none());
    }
}
