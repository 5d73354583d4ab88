use crate::Coords;
use crate::placement::Board;
use crate::snake::Snake;

/// True when `pos` is on or beyond the border.
pub fn hits_wall(pos: Coords, board: Board) -> bool {
    pos.0 == 0 || pos.0 >= board.width - 1 || pos.1 == 0 || pos.1 >= board.height - 1
}

/// Checks the whole current body, tail included, even though the tail
/// would be vacated by a non-growing move.
pub fn hits_self(pos: Coords, snake: &Snake) -> bool {
    snake.contains(pos)
}

pub fn hits_obstacle(pos: Coords, obstacles: &[Coords]) -> bool {
    obstacles.contains(&pos)
}

pub fn is_fatal(pos: Coords, board: Board, snake: &Snake, obstacles: &[Coords]) -> bool {
    hits_wall(pos, board) || hits_self(pos, snake) || hits_obstacle(pos, obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    const BOARD: Board = Board { width: 40, height: 20 };

    #[test]
    fn border_cells_are_walls() {
        assert!(hits_wall((0, 5), BOARD));
        assert!(hits_wall((39, 5), BOARD));
        assert!(hits_wall((5, 0), BOARD));
        assert!(hits_wall((5, 19), BOARD));
        assert!(hits_wall((45, 25), BOARD));
    }

    #[test]
    fn interior_is_not_a_wall() {
        assert!(!hits_wall((1, 1), BOARD));
        assert!(!hits_wall((38, 18), BOARD));
    }

    #[test]
    fn body_cells_are_fatal() {
        let snake = Snake::from_body(vec![(10, 10), (9, 10), (8, 10)], Right);
        assert!(hits_self((9, 10), &snake));
        assert!(!hits_self((11, 10), &snake));
    }

    #[test]
    fn tail_cell_is_fatal_even_if_about_to_move() {
        // A 2x2 loop: the head's next cell is the current tail.
        let snake = Snake::from_body(vec![(5, 5), (5, 6), (6, 6), (6, 5)], Right);
        assert_eq!(snake.next_head(), (6, 5));
        assert!(hits_self(snake.next_head(), &snake));
        assert!(is_fatal(snake.next_head(), BOARD, &snake, &[]));
    }

    #[test]
    fn obstacles_are_fatal() {
        let snake = Snake::from_body(vec![(10, 10)], Right);
        let obstacles = [(11, 10), (20, 3)];
        assert!(hits_obstacle((11, 10), &obstacles));
        assert!(is_fatal((11, 10), BOARD, &snake, &obstacles));
        assert!(!is_fatal((10, 11), BOARD, &snake, &obstacles));
    }
}
