use super::direction::Direction;

/// A cell on the grid. Origin is top-left, x grows right, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn stepped(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Offset from `origin` to `self`
    pub fn offset_from(&self, origin: GridPosition) -> (i32, i32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Fixed dimensions of the playing field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardSize {
    pub width: u16,
    pub height: u16,
}

impl BoardSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> GridPosition {
        GridPosition::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| GridPosition::new(x, y)))
    }
}
