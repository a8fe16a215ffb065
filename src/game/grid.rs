use macroquad::prelude::*;

use crate::config::{GAME_COLUMNS, GAME_ROWS, GAME_X, GAME_Y, GRID, GRID_BORDER, TILE_WIDTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_perpendicular(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::Up => Cell { x: self.x, y: self.y - 1 },
            Direction::Down => Cell { x: self.x, y: self.y + 1 },
            Direction::Left => Cell { x: self.x - 1, y: self.y },
            Direction::Right => Cell { x: self.x + 1, y: self.y },
        }
    }

    /// Window rectangle of the tile drawn for this cell, border excluded.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            (GAME_X + self.x * GRID + GRID_BORDER) as f32,
            (GAME_Y + self.y * GRID + GRID_BORDER) as f32,
            TILE_WIDTH as f32,
            TILE_WIDTH as f32,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Playfield {
    pub columns: i32,
    pub rows: i32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self { columns: GAME_COLUMNS, rows: GAME_ROWS }
    }
}

impl Playfield {
    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.columns && c.y < self.rows
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.columns / 2, self.rows / 2)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Cell { x, y }))
    }
}
