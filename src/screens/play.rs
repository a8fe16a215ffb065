use macroquad::prelude::*;

use crate::config::{
    COLOR_APPLE, COLOR_BANANA, COLOR_GAME_BACKGROUND, COLOR_SNAKE_HEAD, COLOR_TEXT, COLOR_WINDOW_BACKGROUND,
    COLORS_SNAKE_TAIL, FONT_SIZE_CURRENT_SPEED, GAME_HEIGHT, GAME_WIDTH, GAME_X, GAME_Y, GRID, TICKS_PER_SECOND,
    TOPBAR_HEIGHT, WINDOW_WIDTH,
};
use crate::format::{format_time, thousands_separators};
use crate::game::Game;
use crate::game::grid::Direction;
use crate::game::timestep::FixedTimestep;
use crate::ui::{Ui, draw_tile};

pub struct PlayScreen {
    pub game: Game,
    timestep: FixedTimestep,
}

impl PlayScreen {
    pub fn new(speed: u32) -> Self {
        Self { game: Game::new(speed), timestep: FixedTimestep::new(TICKS_PER_SECOND) }
    }

    pub fn update(&mut self) {
        if is_key_pressed(KeyCode::Escape) {
            self.game.quit();
            return;
        }
        if let Some(dir) = held_direction() {
            self.game.turn(dir);
        }
        let ticks = self.timestep.advance(get_frame_time() as f64);
        for _ in 0..ticks {
            self.game.tick();
            if self.game.is_over() {
                break;
            }
        }
    }
}

// Held keys, first match wins
fn held_direction() -> Option<Direction> {
    if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
        Some(Direction::Left)
    } else if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
        Some(Direction::Right)
    } else if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) {
        Some(Direction::Up)
    } else if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Playfield, food, snake and both bars.
pub fn draw_game(ui: &Ui, game: &Game, highscore: u32) {
    clear_background(COLOR_WINDOW_BACKGROUND);
    draw_rectangle(
        GAME_X as f32,
        GAME_Y as f32,
        GAME_WIDTH as f32,
        GAME_HEIGHT as f32,
        COLOR_GAME_BACKGROUND,
    );

    // tail colors shift by one with every point
    let body: Vec<_> = game.snake.segments().skip(1).collect();
    for (i, cell) in body.iter().rev().enumerate() {
        let shade = (game.score as i64 - (i as i64 + 1)).rem_euclid(COLORS_SNAKE_TAIL.len() as i64);
        draw_tile(*cell, COLORS_SNAKE_TAIL[shade as usize]);
    }
    draw_tile(game.snake.head(), COLOR_SNAKE_HEAD);

    if let Some(apple) = game.apple {
        draw_tile(apple, COLOR_APPLE);
    }
    if let Some(banana) = game.banana {
        draw_tile(banana, COLOR_BANANA);
    }

    draw_top_bar(ui, game, highscore);

    let speed = format!("speed: {}", game.speed);
    let y = (GAME_Y + GAME_HEIGHT) as f32 + (GRID as f32 - FONT_SIZE_CURRENT_SPEED as f32) * 0.5;
    ui.text(&speed, 1.4 * GRID as f32, y, FONT_SIZE_CURRENT_SPEED, COLOR_TEXT);
}

fn draw_top_bar(ui: &Ui, game: &Game, highscore: u32) {
    let font_size = (1.04 * GRID as f32) as u16;
    let y = (TOPBAR_HEIGHT as f32 - font_size as f32) * 0.5;
    let inset = 1.4 * GRID as f32;

    let time = format!("time: {}", format_time(game.elapsed_seconds().floor(), false));
    ui.text(&time, inset, y, font_size, COLOR_TEXT);

    let score = format!("score: {}", thousands_separators(game.score));
    let w = ui.measure(&score, font_size).x;
    ui.text(&score, (WINDOW_WIDTH as f32 - w) * 0.5, y, font_size, COLOR_TEXT);

    let best = format!("highscore: {}", thousands_separators(highscore));
    let w = ui.measure(&best, font_size).x;
    ui.text(&best, WINDOW_WIDTH as f32 - inset - w, y, font_size, COLOR_TEXT);
}
