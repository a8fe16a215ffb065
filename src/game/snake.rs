use std::collections::VecDeque;

use super::grid::{Cell, Direction};

/// Body cells, head first.
pub struct Snake {
    body: VecDeque<Cell>,
    heading: Option<Direction>,
    next_direction: Option<Direction>,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        Self { body: VecDeque::from([start]), heading: None, next_direction: None }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, c: Cell) -> bool {
        self.body.contains(&c)
    }

    /// The player has chosen a first direction.
    pub fn is_started(&self) -> bool {
        self.next_direction.is_some()
    }

    /// Only turns across the direction of the last move are accepted.
    pub fn turn(&mut self, dir: Direction) {
        match self.heading {
            Some(h) if !h.is_perpendicular(dir) => {}
            _ => self.next_direction = Some(dir),
        }
    }

    /// Commits the pending direction and returns where the head goes next.
    pub fn advance(&mut self) -> Option<Cell> {
        let dir = self.next_direction?;
        self.heading = Some(dir);
        Some(self.head().step(dir))
    }

    pub fn push_head(&mut self, c: Cell) {
        self.body.push_front(c);
    }

    /// Never removes the last remaining cell.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 { self.body.pop_back() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_steered() {
        let mut snake = Snake::new(Cell::new(5, 5));
        assert!(!snake.is_started());
        assert_eq!(snake.advance(), None);
        snake.turn(Direction::Up);
        assert!(snake.is_started());
        assert_eq!(snake.advance(), Some(Cell::new(5, 4)));
    }

    #[test]
    fn cannot_reverse() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.turn(Direction::Right);
        let next = snake.advance().unwrap();
        snake.push_head(next);
        snake.pop_tail();

        snake.turn(Direction::Left);
        assert_eq!(snake.advance(), Some(Cell::new(7, 5)));
    }

    #[test]
    fn last_turn_before_a_move_wins() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.turn(Direction::Right);
        snake.advance();
        snake.turn(Direction::Up);
        snake.turn(Direction::Down);
        assert_eq!(snake.advance(), Some(Cell::new(5, 6)));
    }

    #[test]
    fn tail_keeps_one_cell() {
        let mut snake = Snake::new(Cell::new(1, 1));
        snake.push_head(Cell::new(2, 1));
        assert_eq!(snake.pop_tail(), Some(Cell::new(1, 1)));
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(2, 1));
    }
}
