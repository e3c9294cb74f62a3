use std::collections::HashSet;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use super::position::{BoardSize, GridPosition};
use super::snake::Snake;

/// Random draws tried before falling back to enumerating free cells.
const SAMPLE_ATTEMPTS: usize = 32;

/// A single piece of food. Replaced, never moved, once eaten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pos: GridPosition,
}

impl Food {
    pub fn new(pos: GridPosition) -> Self {
        Self { pos }
    }

    pub fn position(&self) -> GridPosition {
        self.pos
    }
}

/// Places food uniformly at random on a cell the snake does not occupy.
#[derive(Debug)]
pub struct FoodSpawner<R> {
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns `None` when every cell on the board is taken by the snake.
    ///
    /// A few random draws handle the common sparse board; a crowded board
    /// falls through to choosing among the enumerated free cells, which
    /// always terminates.
    pub fn spawn(&mut self, snake: &Snake, board: BoardSize) -> Option<Food> {
        if board.cell_count() == 0 {
            return None;
        }

        for _ in 0..SAMPLE_ATTEMPTS {
            let pos = GridPosition::new(
                self.rng.gen_range(0..board.width) as i32,
                self.rng.gen_range(0..board.height) as i32,
            );
            if !snake.occupies(pos) {
                debug!("Food placed at ({}, {})", pos.x, pos.y);
                return Some(Food::new(pos));
            }
        }

        let occupied: HashSet<GridPosition> = snake.body().iter().copied().collect();
        let free: Vec<GridPosition> = board.cells().filter(|c| !occupied.contains(c)).collect();

        match free.choose(&mut self.rng) {
            Some(&pos) => {
                debug!(
                    "Food placed at ({}, {}) from {} free cells",
                    pos.x,
                    pos.y,
                    free.len()
                );
                Some(Food::new(pos))
            }
            None => {
                warn!("No free cell left for food");
                None
            }
        }
    }
}
