use macroquad::rand::gen_range;

use super::grid::{Cell, Playfield};
use super::snake::Snake;

const MAX_RANDOM_TRIES: usize = 64;

/// Picks a random free cell: not on the snake, not on `other`.
/// Returns `None` when the board is full.
pub fn spawn_food(field: &Playfield, snake: &Snake, other: Option<Cell>) -> Option<Cell> {
    let is_free = |c: Cell| !snake.occupies(c) && Some(c) != other;

    for _ in 0..MAX_RANDOM_TRIES {
        let cell = Cell { x: gen_range(0, field.columns), y: gen_range(0, field.rows) };
        if is_free(cell) {
            return Some(cell);
        }
    }

    // crowded board, choose among what is left
    let free: Vec<Cell> = field.cells().filter(|c| is_free(*c)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[gen_range(0, free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_on_snake_or_other_food() {
        macroquad::rand::srand(7);
        let field = Playfield { columns: 4, rows: 4 };
        let mut snake = Snake::new(Cell::new(0, 0));
        for x in 1..4 {
            snake.push_head(Cell::new(x, 0));
        }
        let other = Some(Cell::new(0, 1));
        for _ in 0..500 {
            let c = spawn_food(&field, &snake, other).unwrap();
            assert!(field.contains(c));
            assert!(!snake.occupies(c));
            assert_ne!(Some(c), other);
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        macroquad::rand::srand(11);
        let field = Playfield { columns: 3, rows: 3 };
        let mut snake = Snake::new(Cell::new(0, 0));
        for c in field.cells().skip(1) {
            if c != Cell::new(2, 2) && c != Cell::new(1, 2) {
                snake.push_head(c);
            }
        }
        assert_eq!(spawn_food(&field, &snake, Some(Cell::new(1, 2))), Some(Cell::new(2, 2)));
    }

    #[test]
    fn full_board_has_no_room() {
        let field = Playfield { columns: 2, rows: 1 };
        let mut snake = Snake::new(Cell::new(0, 0));
        snake.push_head(Cell::new(1, 0));
        assert_eq!(spawn_food(&field, &snake, None), None);
    }
}
