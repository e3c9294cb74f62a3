use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::position::{BoardSize, GridPosition};
use super::snake::Snake;
use crate::error::GameError;

/// An RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors used when drawing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub background: Rgb,
    pub body: Rgb,
    pub head: Rgb,
    pub food: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            body: Rgb(0, 0, 255),
            head: Rgb(0, 255, 0),
            food: Rgb(255, 0, 0),
        }
    }
}

/// Configuration for a run, fixed once the game starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: u16,
    /// Height of the game grid
    pub grid_height: u16,
    /// Terminal columns drawn per grid cell
    pub cell_scale: u16,
    pub colors: Palette,
    /// Simulation ticks per second in visual mode
    pub tick_rate: f64,
    /// Draw to the terminal; headless when false
    pub show_game: bool,
    /// Initial length of the snake
    pub initial_length: usize,
    pub initial_direction: Direction,
    /// Drive the snake from sensor readings instead of the keyboard
    pub agent: bool,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            cell_scale: 2,
            colors: Palette::default(),
            tick_rate: 10.0,
            show_game: true,
            initial_length: 5,
            initial_direction: Direction::Right,
            agent: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Headless configuration, as used by agent runs and tests
    pub fn headless(width: u16, height: u16) -> Self {
        Self {
            show_game: false,
            agent: true,
            ..Self::new(width, height)
        }
    }

    /// Reads a JSON config file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn board(&self) -> BoardSize {
        BoardSize::new(self.grid_width, self.grid_height)
    }

    /// Wall-clock time between ticks; fails when `tick_rate` maps to no
    /// representable duration.
    pub fn tick_interval(&self) -> Result<Duration, GameError> {
        Duration::try_from_secs_f64(1.0 / self.tick_rate).map_err(|_| {
            GameError::InvalidConfig(format!(
                "tick_rate {} gives no usable tick interval",
                self.tick_rate
            ))
        })
    }

    /// The snake every game starts with: head on the centre cell, body laid
    /// out behind it.
    pub fn starting_snake(&self) -> Snake {
        Snake::new(
            self.board().center(),
            self.initial_direction,
            self.initial_length,
        )
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: &str| Err(GameError::InvalidConfig(reason.to_string()));

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid("grid dimensions must be positive");
        }
        if self.cell_scale == 0 {
            return invalid("cell_scale must be positive");
        }
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return invalid("tick_rate must be a positive number");
        }
        self.tick_interval()?;
        if self.initial_length == 0 {
            return invalid("initial_length must be at least 1");
        }

        let board = self.board();
        let center = board.center();
        let (dx, dy) = self.initial_direction.delta();
        let reach = self.initial_length as i32 - 1;
        let tail = GridPosition::new(center.x - dx * reach, center.y - dy * reach);
        if !board.contains(tail) {
            return Err(GameError::InvalidConfig(format!(
                "initial snake of length {} facing {:?} does not fit a {}x{} board",
                self.initial_length, self.initial_direction, self.grid_width, self.grid_height
            )));
        }

        Ok(())
    }
}
