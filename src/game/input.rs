use super::direction::Direction;
use crate::consts::INPUT_BUFFER_CAPACITY;
use std::collections::VecDeque;

/// Turns requested by the player that have not yet been applied to the snake.
///
/// At most one queued turn is consumed per tick, so a quick series of key
/// presses between two ticks is spread over the following ticks instead of
/// only the last one taking effect.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct InputBuffer {
    queue: VecDeque<Direction>,
}

impl InputBuffer {
    pub(crate) fn new() -> InputBuffer {
        InputBuffer::default()
    }

    /// Queue up a turn in `direction`.  `committed` is the direction in which
    /// the snake is currently moving.
    ///
    /// The turn is compared against the most recently queued turn (or
    /// `committed` if nothing is queued) and is dropped if it is the same
    /// direction or its reverse.  It is also dropped if the buffer is full.
    /// Returns `true` if the turn was queued.
    pub(crate) fn push(&mut self, direction: Direction, committed: Direction) -> bool {
        let reference = self.queue.back().copied().unwrap_or(committed);
        if direction == reference
            || direction == reference.reverse()
            || self.queue.len() >= INPUT_BUFFER_CAPACITY
        {
            return false;
        }
        self.queue.push_back(direction);
        true
    }

    /// Remove & return the oldest queued turn
    pub(crate) fn drain(&mut self) -> Option<Direction> {
        self.queue.pop_front()
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}
