use std::fmt;

/// Errors raised by the game library.
///
/// Collisions and wins are normal outcomes of a run and never show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A numeric direction outside `0..4` was requested.
    InvalidDirection(i32),
    /// The configuration cannot describe a playable game.
    InvalidConfig(String),
    /// The starting snake covers the whole board, so no food can be placed.
    NoRoomForFood,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDirection(value) => {
                write!(f, "invalid direction {value}, expected 0, 1, 2 or 3")
            }
            GameError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            GameError::NoRoomForFood => write!(f, "no free cell left for the initial food"),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            GameError::InvalidDirection(7).to_string(),
            "invalid direction 7, expected 0, 1, 2 or 3"
        );
        assert_eq!(
            GameError::InvalidConfig("grid_width must be positive".into()).to_string(),
            "invalid configuration: grid_width must be positive"
        );
    }
}
