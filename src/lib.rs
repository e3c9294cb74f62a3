//! sneksense - a grid Snake game with egocentric sensors for agents
//!
//! This library provides:
//! - Core game logic and the fixed-step game loop (game module)
//! - Keyboard input and the agent interface (input module)
//! - Terminal rendering behind a renderer trait (render module)

pub mod error;
pub mod game;
pub mod input;
pub mod render;

pub use error::GameError;
