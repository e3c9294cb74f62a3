use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use super::{InputSource, TickInput};
use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Quit,
    None,
}

/// Maps a key press to a game action: arrows or WASD to steer, q/Esc/Ctrl+C
/// to quit.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            KeyAction::Turn(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            KeyAction::Turn(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Turn(Direction::Right)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

/// Folds a batch of key actions into one tick's input.
pub fn collect_actions<I>(actions: I) -> TickInput
where
    I: IntoIterator<Item = KeyAction>,
{
    let mut input = TickInput::default();
    for action in actions {
        match action {
            KeyAction::Turn(dir) => input.directions.push(dir),
            KeyAction::Quit => {
                input.quit = true;
                break;
            }
            KeyAction::None => {}
        }
    }
    input
}

/// Reads whatever key presses crossterm has queued since the last tick.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Result<TickInput> {
        let mut actions = Vec::new();
        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = map_key(key);
                debug!("Key {:?} -> {:?}", key.code, action);
                actions.push(action);
            }
        }
        Ok(collect_actions(actions))
    }
}
