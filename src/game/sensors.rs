//! Egocentric sensor readings for decision-making policies.
//!
//! Everything is measured in the snake's own frame: "forward" is the current
//! heading, "right" its clockwise neighbour. Distances count cells, so a
//! wall or body cell directly adjacent to the head reads as 1.

use super::direction::Direction;
use super::food::Food;
use super::position::BoardSize;
use super::snake::Snake;

/// Number of values produced by [`SensorReadings::to_array`].
pub const SENSOR_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReadings {
    pub food_forward: i32,
    pub food_right: i32,
    pub wall_front: i32,
    pub wall_left: i32,
    pub wall_right: i32,
    pub body_front: i32,
    pub body_left: i32,
    pub body_right: i32,
}

impl SensorReadings {
    /// Flattened in policy input order.
    pub fn to_array(&self) -> [f32; SENSOR_COUNT] {
        [
            self.food_forward as f32,
            self.food_right as f32,
            self.wall_front as f32,
            self.wall_left as f32,
            self.wall_right as f32,
            self.body_front as f32,
            self.body_left as f32,
            self.body_right as f32,
        ]
    }
}

/// Cells from the head to the wall in an absolute direction, counting the
/// head's own cell.
fn wall_distance(snake: &Snake, board: BoardSize, toward: Direction) -> i32 {
    let head = snake.head();
    match toward {
        Direction::Right => board.width as i32 - head.x,
        Direction::Down => board.height as i32 - head.y,
        Direction::Left => head.x + 1,
        Direction::Up => head.y + 1,
    }
}

/// Reads the environment around the head. Pure; callable at any time.
pub fn read_sensors(snake: &Snake, food: &Food, board: BoardSize) -> SensorReadings {
    let head = snake.head();
    let facing = snake.direction();

    let (food_dx, food_dy) = food.position().offset_from(head);
    let (food_forward, food_right) = facing.to_local(food_dx, food_dy);

    let wall_front = wall_distance(snake, board, facing);
    let wall_left = wall_distance(snake, board, facing.turned_left());
    let wall_right = wall_distance(snake, board, facing.turned_right());

    let mut body_front: Option<i32> = None;
    let mut body_left: Option<i32> = None;
    let mut body_right: Option<i32> = None;

    for cell in snake.segments() {
        let (dx, dy) = cell.offset_from(head);
        match facing.to_local(dx, dy) {
            (forward, 0) if forward > 0 => {
                body_front = Some(body_front.map_or(forward, |d| d.min(forward)));
            }
            (0, right) if right < 0 => {
                let dist = -right;
                body_left = Some(body_left.map_or(dist, |d| d.min(dist)));
            }
            (0, right) if right > 0 => {
                body_right = Some(body_right.map_or(right, |d| d.min(right)));
            }
            _ => {}
        }
    }

    SensorReadings {
        food_forward,
        food_right,
        wall_front,
        wall_left,
        wall_right,
        body_front: body_front.unwrap_or(wall_front),
        body_left: body_left.unwrap_or(wall_left),
        body_right: body_right.unwrap_or(wall_right),
    }
}
