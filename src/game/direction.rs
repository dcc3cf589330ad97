use crate::consts::GRID_SIZE;
use ratatui::layout::Position;

/// A unit step on the board.  North is towards row 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that step would leave the board.
    pub(crate) fn advance(self, pos: Position) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = y.checked_sub(1)?,
            Direction::East => x = increment_in_bounds(x)?,
            Direction::South => y = increment_in_bounds(y)?,
            Direction::West => x = x.checked_sub(1)?,
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

fn increment_in_bounds(x: u16) -> Option<u16> {
    x.checked_add(1).filter(|&xx| xx < GRID_SIZE)
}
