//! Where a tick's steering comes from: the keyboard, or an agent reading
//! the snake's sensors.

pub mod agent;
pub mod handler;

use anyhow::Result;

use crate::game::Direction;

pub use agent::{Agent, IdleAgent};
pub use handler::{collect_actions, map_key, KeyAction, KeyboardInput};

/// Everything the player asked for during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Requested headings, oldest first
    pub directions: Vec<Direction>,
    pub quit: bool,
}

/// Polled once per tick for player input.
pub trait InputSource {
    fn poll(&mut self) -> Result<TickInput>;
}
