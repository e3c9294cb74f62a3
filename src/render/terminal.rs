use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

use super::Renderer;
use crate::game::{BoardSize, GameConfig, GridPosition, Rgb};

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Runs `undo` when a half-finished setup step failed.
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// One frame's worth of colored grid cells, each `scale` columns wide.
#[derive(Debug)]
struct Arena<'a> {
    board: BoardSize,
    scale: u16,
    background: Rgb,
    cells: &'a [(GridPosition, Rgb)],
}

impl Arena<'_> {
    fn paint(&self, buf: &mut Buffer, area: Rect, pos: GridPosition, color: Color) {
        if !self.board.contains(pos) {
            return;
        }
        // Wide boards overflow u16 columns, so positions are computed in u32
        let y = u32::from(area.y) + pos.y as u32;
        if y >= u32::from(area.bottom()) {
            return;
        }
        let left = u32::from(area.x) + pos.x as u32 * u32::from(self.scale);
        for col in 0..u32::from(self.scale) {
            let x = left + col;
            if x >= u32::from(area.right()) {
                break;
            }
            buf[(x as u16, y as u16)].set_symbol(" ").set_bg(color);
        }
    }
}

impl Widget for &Arena<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = to_color(self.background);
        for pos in self.board.cells() {
            self.paint(buf, area, pos, background);
        }
        for &(pos, rgb) in self.cells {
            self.paint(buf, area, pos, to_color(rgb));
        }
    }
}

/// Full-screen crossterm terminal drawn with ratatui.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    board: BoardSize,
    scale: u16,
    background: Rgb,
    cells: Vec<(GridPosition, Rgb)>,
}

impl TerminalRenderer {
    /// Switches the terminal to raw mode on the alternate screen.
    pub fn enter(config: &GameConfig) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let terminal = undo_on_error(Self::open_screen(), || {
            // Best effort: the setup error is the one worth reporting
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        info!("Terminal ready for {}x{} board", config.grid_width, config.grid_height);

        Ok(Self {
            terminal,
            board: config.board(),
            scale: config.cell_scale,
            background: config.colors.background,
            cells: Vec::new(),
        })
    }

    fn open_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    /// Gives the terminal back to the shell.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self) {
        self.cells.clear();
    }

    fn draw_cell(&mut self, pos: GridPosition, color: Rgb) {
        self.cells.push((pos, color));
    }

    fn present(&mut self) -> Result<()> {
        let arena = Arena {
            board: self.board,
            scale: self.scale,
            background: self.background,
            cells: &self.cells,
        };
        let width = self.board.width.saturating_mul(self.scale).saturating_add(2);
        let height = self.board.height.saturating_add(2);

        self.terminal
            .draw(|frame| {
                let screen = frame.area();
                let outer = Rect::new(
                    screen.x,
                    screen.y,
                    width.min(screen.width),
                    height.min(screen.height),
                );
                let block = Block::default().title(" snek ").borders(Borders::ALL);
                let inner = block.inner(outer);
                frame.render_widget(block, outer);
                frame.render_widget(&arena, inner);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }
}
