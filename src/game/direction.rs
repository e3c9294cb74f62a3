use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Compass heading of the snake.
///
/// Variants are listed clockwise; `TryFrom<i32>` uses the same order
/// (Up=0, Right=1, Down=2, Left=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    /// The heading to the snake's right-hand side.
    pub fn turned_right(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// The heading to the snake's left-hand side.
    pub fn turned_left(&self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Rotation matrix taking a world-space offset into (forward, right)
    /// coordinates for a snake facing this direction.
    pub fn rotation(&self) -> [[i32; 2]; 2] {
        match self {
            Direction::Right => [[1, 0], [0, 1]],
            Direction::Down => [[0, 1], [-1, 0]],
            Direction::Left => [[-1, 0], [0, -1]],
            Direction::Up => [[0, -1], [1, 0]],
        }
    }

    /// Rotates a world-space offset into (forward, right).
    pub fn to_local(&self, dx: i32, dy: i32) -> (i32, i32) {
        let [[a, b], [c, d]] = self.rotation();
        (a * dx + b * dy, c * dx + d * dy)
    }
}

impl TryFrom<i32> for Direction {
    type Error = GameError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Left),
            other => Err(GameError::InvalidDirection(other)),
        }
    }
}
