//! Pure collision predicates. None of these mutate the snake; growing on
//! food is the caller's job.

use super::food::Food;
use super::position::BoardSize;
use super::snake::Snake;

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfBody,
}

pub fn self_collision(snake: &Snake) -> bool {
    let head = snake.head();
    snake.segments().any(|&cell| cell == head)
}

pub fn wall_collision(snake: &Snake, board: BoardSize) -> bool {
    !board.contains(snake.head())
}

pub fn terminal(snake: &Snake, board: BoardSize) -> bool {
    check_terminal(snake, board).is_some()
}

/// Like [`terminal`], but reports which collision happened.
pub fn check_terminal(snake: &Snake, board: BoardSize) -> Option<CollisionKind> {
    if self_collision(snake) {
        return Some(CollisionKind::SelfBody);
    }
    if wall_collision(snake, board) {
        return Some(CollisionKind::Wall);
    }
    None
}

pub fn food_collision(snake: &Snake, food: &Food) -> bool {
    snake.head() == food.position()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::position::GridPosition;

    #[test]
    fn test_no_collision_at_start() {
        let snake = Snake::new(GridPosition::new(5, 5), Direction::Right, 5);
        assert!(!self_collision(&snake));
        assert!(!wall_collision(&snake, BoardSize::new(10, 10)));
        assert_eq!(check_terminal(&snake, BoardSize::new(10, 10)), None);
    }

    #[test]
    fn test_wall_collision_each_side() {
        let board = BoardSize::new(10, 10);
        let cases = [
            (GridPosition::new(9, 5), Direction::Right),
            (GridPosition::new(0, 5), Direction::Left),
            (GridPosition::new(5, 0), Direction::Up),
            (GridPosition::new(5, 9), Direction::Down),
        ];

        for (head, dir) in cases {
            let mut snake = Snake::new(head, dir, 1);
            assert!(!wall_collision(&snake, board));
            snake.move_forward();
            assert!(wall_collision(&snake, board), "{dir:?}");
            assert!(terminal(&snake, board));
            assert_eq!(check_terminal(&snake, board), Some(CollisionKind::Wall));
        }
    }

    #[test]
    fn test_self_collision() {
        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let mut snake = Snake::new(GridPosition::new(5, 5), Direction::Right, 5);
        let board = BoardSize::new(10, 10);

        snake.update_direction(Direction::Down);
        snake.move_forward();
        snake.update_direction(Direction::Left);
        snake.move_forward();
        assert!(!self_collision(&snake));

        // Up from (4,6) lands on (4,5), still part of the body
        snake.update_direction(Direction::Up);
        snake.move_forward();
        assert!(self_collision(&snake));
        assert_eq!(check_terminal(&snake, board), Some(CollisionKind::SelfBody));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        // Square loop of length 4: the head takes the cell the tail leaves
        let mut snake = Snake::new(GridPosition::new(5, 5), Direction::Right, 4);
        for dir in [Direction::Down, Direction::Left, Direction::Up] {
            snake.update_direction(dir);
            snake.move_forward();
        }
        assert_eq!(snake.head(), GridPosition::new(4, 5));
        assert!(!self_collision(&snake));
    }

    #[test]
    fn test_food_collision() {
        let snake = Snake::new(GridPosition::new(5, 5), Direction::Right, 3);
        assert!(food_collision(&snake, &Food::new(GridPosition::new(5, 5))));
        assert!(!food_collision(&snake, &Food::new(GridPosition::new(4, 5))));
        assert_eq!(snake.length(), 3);
    }
}
