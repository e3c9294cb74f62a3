use log::{debug, info};
use rand::Rng;

use super::collision::{check_terminal, food_collision, CollisionKind};
use super::config::GameConfig;
use super::direction::Direction;
use super::food::{Food, FoodSpawner};
use super::position::BoardSize;
use super::sensors::{read_sensors, SensorReadings};
use super::snake::Snake;
use crate::error::GameError;

/// Why a game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Collision(CollisionKind),
    /// No free cell is left for food
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Terminated(Termination),
}

/// Final numbers of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub reason: Termination,
    pub ticks: u64,
    pub length: usize,
}

/// Mutable state of one game: snake, food, score.
#[derive(Debug)]
pub struct GameSession<R> {
    board: BoardSize,
    snake: Snake,
    food: Food,
    spawner: FoodSpawner<R>,
    score: u32,
    ticks: u64,
    status: GameStatus,
}

impl<R: Rng> GameSession<R> {
    /// Start a game with the configured snake and a freshly spawned food.
    pub fn new(config: &GameConfig, rng: R) -> Result<Self, GameError> {
        let mut spawner = FoodSpawner::new(rng);
        let snake = config.starting_snake();
        let board = config.board();
        let food = spawner.spawn(&snake, board).ok_or(GameError::NoRoomForFood)?;
        Ok(Self::with_state(board, snake, food, spawner))
    }

    /// Start from an explicit snake and food placement.
    pub fn with_state(board: BoardSize, snake: Snake, food: Food, spawner: FoodSpawner<R>) -> Self {
        info!(
            "New game on {}x{} board, snake at ({}, {}) facing {:?}",
            board.width,
            board.height,
            snake.head().x,
            snake.head().y,
            snake.direction()
        );
        Self {
            board,
            snake,
            food,
            spawner,
            score: 0,
            ticks: 0,
            status: GameStatus::Running,
        }
    }

    pub fn board(&self) -> BoardSize {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn sensors(&self) -> SensorReadings {
        read_sensors(&self.snake, &self.food, self.board)
    }

    /// Feeds this tick's direction requests to the snake, oldest first.
    pub fn apply_requests<I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = Direction>,
    {
        for requested in requests {
            self.snake.update_direction(requested);
        }
    }

    /// Moves the snake one cell, then resolves food and collisions.
    /// A finished game is left untouched.
    pub fn advance(&mut self) -> GameStatus {
        if !self.is_running() {
            return self.status;
        }

        self.snake.move_forward();
        self.ticks += 1;

        if food_collision(&self.snake, &self.food) {
            self.score += 1;
            self.snake.grow();
            info!("Snake ate food, score {}", self.score);

            match self.spawner.spawn(&self.snake, self.board) {
                Some(food) => self.food = food,
                None => {
                    info!("No more space for food, you win!");
                    self.status = GameStatus::Terminated(Termination::Win);
                    return self.status;
                }
            }
        }

        if let Some(kind) = check_terminal(&self.snake, self.board) {
            debug!("Snake collided: {:?}", kind);
            self.status = GameStatus::Terminated(Termination::Collision(kind));
        }

        self.status
    }

    /// Summary of a finished game; `None` while it is still running.
    pub fn summary(&self) -> Option<GameSummary> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::Terminated(reason) => Some(GameSummary {
                score: self.score,
                reason,
                ticks: self.ticks,
                length: self.snake.length(),
            }),
        }
    }
}
