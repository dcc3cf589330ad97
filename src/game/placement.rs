//! Scattering the letters of a word across the board
use crate::consts::{GRID_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::words::Word;
use rand::Rng;
use ratatui::layout::Position;
use std::collections::HashSet;
use thiserror::Error;

/// A letter lying on the board, waiting to be eaten
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Food {
    /// Index of the letter within the word it was placed for.  Together with
    /// `position`, this identifies the food item across ticks.
    pub(crate) index: usize,
    pub(crate) position: Position,
    pub(crate) letter: char,
}

/// Returned when there is no room left on the board to place a letter
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("could not find a free cell for letter {letter:?}")]
pub(crate) struct BoardExhausted {
    pub(crate) letter: char,
}

/// Place each letter of `word` on a random cell of the board.  No two letters
/// share a cell, and no letter is placed on any cell in `occupied`.
///
/// Cells are drawn by rejection sampling; if no free cell is found for a
/// letter within [`MAX_PLACEMENT_ATTEMPTS`] draws, placement is abandoned.
pub(crate) fn generate<R: Rng + ?Sized, I: IntoIterator<Item = Position>>(
    word: &Word,
    occupied: I,
    rng: &mut R,
) -> Result<Vec<Food>, BoardExhausted> {
    place(word, occupied, rng, MAX_PLACEMENT_ATTEMPTS)
}

fn place<R: Rng + ?Sized, I: IntoIterator<Item = Position>>(
    word: &Word,
    occupied: I,
    rng: &mut R,
    attempts: usize,
) -> Result<Vec<Food>, BoardExhausted> {
    let mut occupied = occupied.into_iter().collect::<HashSet<_>>();
    let mut food = Vec::with_capacity(word.len());
    for (index, &letter) in word.letters().iter().enumerate() {
        let position = std::iter::repeat_with(|| random_cell(rng))
            .take(attempts)
            .find(|p| !occupied.contains(p))
            .ok_or(BoardExhausted { letter })?;
        occupied.insert(position);
        food.push(Food {
            index,
            position,
            letter,
        });
    }
    Ok(food)
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Position {
    Position::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE))
}
