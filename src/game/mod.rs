//! Core game logic module for Snake
//!
//! Movement, collisions, food placement and sensor readings, plus the
//! fixed-step loop that ties them together. Rendering and input are reached
//! only through traits.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod position;
pub mod sensors;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use collision::CollisionKind;
pub use config::{GameConfig, Palette, Rgb};
pub use direction::Direction;
pub use engine::{Driver, GameLoop, RunOutcome};
pub use food::{Food, FoodSpawner};
pub use position::{BoardSize, GridPosition};
pub use sensors::{read_sensors, SensorReadings, SENSOR_COUNT};
pub use session::{GameSession, GameStatus, GameSummary, Termination};
pub use snake::Snake;
