use std::collections::VecDeque;

use log::debug;

use super::direction::Direction;
use super::position::GridPosition;
use crate::error::GameError;

/// The snake: an ordered body from head (front) to tail (back).
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<GridPosition>,
    length: usize,
    direction: Direction,
    previous_direction: Direction,
}

impl Snake {
    /// Lays out `length` cells contiguously behind `head`, opposite to
    /// `direction`. A length of zero is treated as one.
    pub fn new(head: GridPosition, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let back = direction.opposite();

        let mut body = VecDeque::with_capacity(length + 1);
        let mut cell = head;
        for _ in 0..length {
            body.push_back(cell);
            cell = cell.stepped(back);
        }

        Self {
            body,
            length,
            direction,
            previous_direction: direction,
        }
    }

    pub fn head(&self) -> GridPosition {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<GridPosition> {
        &self.body
    }

    /// Body cells behind the head.
    pub fn segments(&self) -> impl Iterator<Item = &GridPosition> {
        self.body.iter().skip(1)
    }

    /// Target length; the body catches up one move after growing.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn previous_direction(&self) -> Direction {
        self.previous_direction
    }

    pub fn occupies(&self, pos: GridPosition) -> bool {
        self.body.contains(&pos)
    }

    /// Advances the head one cell and drops the tail once the body is
    /// longer than the target length.
    pub fn move_forward(&mut self) {
        let new_head = self.head().stepped(self.direction);
        self.body.push_front(new_head);
        self.previous_direction = self.direction;

        while self.body.len() > self.length {
            self.body.pop_back();
        }
    }

    /// Changes heading unless the request repeats the current heading or
    /// reverses the heading committed by the last move. Rejected requests
    /// are silently ignored.
    pub fn update_direction(&mut self, requested: Direction) -> bool {
        if requested == self.direction || requested == self.previous_direction.opposite() {
            return false;
        }
        debug!("Direction {:?} -> {:?}", self.direction, requested);
        self.direction = requested;
        true
    }

    /// Numeric form of [`Snake::update_direction`] for policies that emit
    /// an index. Values outside `0..4` are rejected with an error.
    pub fn request_direction(&mut self, value: i32) -> Result<bool, GameError> {
        let requested = Direction::try_from(value)?;
        Ok(self.update_direction(requested))
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }
}
