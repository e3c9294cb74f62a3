//! Drawing frames. The game only talks to the [`Renderer`] trait; the
//! terminal implementation lives in [`terminal`].

pub mod terminal;

use anyhow::Result;

use crate::game::{Food, GridPosition, Palette, Rgb, Snake};

pub use terminal::TerminalRenderer;

/// Sink for one frame at a time.
pub trait Renderer {
    /// Start a new frame filled with the background.
    fn clear(&mut self);
    fn draw_cell(&mut self, pos: GridPosition, color: Rgb);
    /// Show the frame built since the last `clear`.
    fn present(&mut self) -> Result<()>;
}

/// Draws food, body and head (head last, so it is never hidden) and
/// presents the frame.
pub fn draw_scene(
    renderer: &mut dyn Renderer,
    snake: &Snake,
    food: &Food,
    palette: &Palette,
) -> Result<()> {
    renderer.clear();
    renderer.draw_cell(food.position(), palette.food);
    for &cell in snake.segments() {
        renderer.draw_cell(cell, palette.body);
    }
    renderer.draw_cell(snake.head(), palette.head);
    renderer.present()
}
