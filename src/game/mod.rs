pub mod food;
pub mod grid;
pub mod snake;
pub mod timestep;

use crate::config::{self, BANANA_LIFETIME, TICKS_PER_SECOND};

use food::spawn_food;
use grid::{Cell, Direction, Playfield};
use snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    /// A banana was eaten with nothing left to lose.
    Starved,
    BoardFull,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Idle,
    Moved,
    AteApple,
    AteBanana,
    Over(GameOverCause),
}

/// One round of play.
pub struct Game {
    pub snake: Snake,
    pub apple: Option<Cell>,
    pub banana: Option<Cell>,
    banana_lifetime: u32,
    pub score: u32,
    ticks: u64,
    pub speed: u32,
    move_delay: u64,
    field: Playfield,
    over: Option<GameOverCause>,
}

impl Game {
    pub fn new(speed: u32) -> Self {
        Self::with_field(Playfield::default(), speed)
    }

    pub fn with_field(field: Playfield, speed: u32) -> Self {
        let snake = Snake::new(field.center());
        let apple = spawn_food(&field, &snake, None);
        let banana = spawn_food(&field, &snake, apple);
        Self {
            snake,
            apple,
            banana,
            banana_lifetime: BANANA_LIFETIME,
            score: 0,
            ticks: 0,
            speed,
            move_delay: config::move_delay(speed) as u64,
            field,
            over: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.over.is_some()
    }

    pub fn over_cause(&self) -> Option<GameOverCause> {
        self.over
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    pub fn turn(&mut self, dir: Direction) {
        if !self.is_over() {
            self.snake.turn(dir);
        }
    }

    pub fn quit(&mut self) {
        self.over.get_or_insert(GameOverCause::Quit);
    }

    /// One fixed tick; the snake moves every `move_delay` ticks.
    pub fn tick(&mut self) -> Step {
        if self.is_over() {
            return Step::Idle;
        }
        let step = if self.ticks % self.move_delay == 0 { self.step() } else { Step::Idle };

        // the tick that ends the round still counts towards its time
        if self.snake.is_started() {
            self.ticks += 1;
        }
        if self.snake.is_started() && !self.is_over() {
            self.banana_lifetime = self.banana_lifetime.saturating_sub(1);
            if self.banana_lifetime == 0 {
                self.relocate_banana();
            }
        }
        step
    }

    fn end(&mut self, cause: GameOverCause) -> Step {
        self.over = Some(cause);
        Step::Over(cause)
    }

    fn step(&mut self) -> Step {
        let Some(new_head) = self.snake.advance() else {
            return Step::Idle;
        };

        if !self.field.contains(new_head) {
            return self.end(GameOverCause::Wall);
        }
        // the tail has not moved yet, so it still counts
        if self.snake.occupies(new_head) {
            return self.end(GameOverCause::SelfCollision);
        }
        self.snake.push_head(new_head);

        let mut result = Step::Moved;
        if Some(new_head) == self.apple {
            self.score += 1;
            self.apple = spawn_food(&self.field, &self.snake, self.banana);
            result = Step::AteApple;
            if self.apple.is_none() {
                return self.end(GameOverCause::BoardFull);
            }
        } else {
            self.snake.pop_tail();
        }

        if Some(new_head) == self.banana {
            self.snake.pop_tail();
            result = Step::AteBanana;
            if self.score == 0 {
                self.relocate_banana();
                return self.end(GameOverCause::Starved);
            }
            self.score -= 1;
            self.relocate_banana();
        }
        result
    }

    fn relocate_banana(&mut self) {
        self.banana = spawn_food(&self.field, &self.snake, self.apple);
        self.banana_lifetime = BANANA_LIFETIME;
    }
}
