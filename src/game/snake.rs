use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) cells: VecDeque<Position>,

    /// The direction in which the snake is currently moving
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new snake of length
    /// [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH] with its head in
    /// the center of the board, facing north, with its body trailing south.
    pub(super) fn new() -> Snake {
        let x = consts::GRID_SIZE / 2;
        let y = consts::GRID_SIZE / 2;
        Snake {
            cells: (0..consts::INITIAL_SNAKE_LENGTH)
                .map(|i| Position::new(x, y + i))
                .collect(),
            direction: Direction::North,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        // The snake is never empty.
        self.cells.front().copied().unwrap_or_default()
    }

    /// Return the direction in which the snake is moving
    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Return the cells of the snake, head first
    pub(crate) fn cells(&self) -> &VecDeque<Position> {
        &self.cells
    }

    /// Return the cells of the snake other than its head
    pub(crate) fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().skip(1).copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Change the snake's direction to `direction`
    pub(super) fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Return the cell the head will move into on the next step, or `None` if
    /// that would take it off the board
    pub(super) fn next_head(&self) -> Option<Position> {
        self.direction.advance(self.head())
    }

    /// Add a new head to the front of the snake
    pub(super) fn push_head(&mut self, pos: Position) {
        self.cells.push_front(pos);
    }

    /// Remove the last cell of the snake's tail
    pub(super) fn drop_tail(&mut self) {
        let _ = self.cells.pop_back();
    }
}
