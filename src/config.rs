use macroquad::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Layout (pixels)
pub const GRID: i32 = 25;
pub const GRID_BORDER: i32 = 2;
pub const WINDOW_WIDTH: i32 = GRID * 33;
pub const WINDOW_HEIGHT: i32 = GRID * 26;
pub const MARGIN: i32 = 12;
pub const TOPBAR_HEIGHT: i32 = 2 * GRID;
pub const GAME_X: i32 = GRID;
pub const GAME_Y: i32 = TOPBAR_HEIGHT;
pub const GAME_WIDTH: i32 = WINDOW_WIDTH - 2 * GRID; // odd multiple of GRID
pub const GAME_HEIGHT: i32 = WINDOW_HEIGHT - TOPBAR_HEIGHT - GRID; // odd multiple of GRID
pub const TILE_WIDTH: i32 = GRID - 2 * GRID_BORDER;
pub const GAME_COLUMNS: i32 = GAME_WIDTH / GRID;
pub const GAME_ROWS: i32 = GAME_HEIGHT / GRID;

pub const BUTTON_WIDTH: f32 = (GRID * 10) as f32;
pub const BUTTON_HEIGHT: f32 = (GRID * 4) as f32;
pub const BUTTON_FONT_SIZE: u16 = 35;

// Palette
pub const COLOR_WINDOW_BACKGROUND: Color = Color::new(1.0 / 255.0, 170.0 / 255.0, 64.0 / 255.0, 1.0);
pub const COLOR_GAME_BACKGROUND: Color = BLACK;
pub const COLOR_TEXT: Color = WHITE;
pub const COLOR_NEW_HIGHSCORE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const COLOR_GAME_OVER: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const COLOR_VERSION: Color = Color::new(215.0 / 255.0, 215.0 / 255.0, 215.0 / 255.0, 1.0);
pub const COLOR_ERROR_BACKGROUND: Color = Color::new(208.0 / 255.0, 26.0 / 255.0, 26.0 / 255.0, 1.0);
pub const COLOR_SNAKE_HEAD: Color = WHITE;
pub const COLORS_SNAKE_TAIL: [Color; 3] = [
    Color::new(3.0 / 255.0, 1.0, 3.0 / 255.0, 1.0),
    Color::new(2.0 / 255.0, 232.0 / 255.0, 2.0 / 255.0, 1.0),
    Color::new(1.0 / 255.0, 187.0 / 255.0, 0.0, 1.0),
];
pub const COLOR_APPLE: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const COLOR_BANANA: Color = Color::new(1.0, 1.0, 0.0, 1.0);

pub const FONT_SIZE_NEW_HIGHSCORE: u16 = 33;
pub const FONT_SIZE_LAST_SCORE: u16 = 27;
pub const FONT_SIZE_CURRENT_SPEED: u16 = 17;

// Timing
pub const TICKS_PER_SECOND: u32 = 120;
pub const DEFAULT_SPEED: u32 = 10; // moves per second
pub const SPEEDS: [u32; 5] = [5, 10, 15, 30, 60];
pub const BANANA_LIFETIME: u32 = TICKS_PER_SECOND * 10;
/// Game over screen time when the track length is unknown.
pub const GAME_OVER_HOLD_SECONDS: f64 = 4.0;

pub const LOG_FILES: usize = 4;
pub const DEFAULT_VOLUME: f32 = 0.9;

/// Ticks between two moves of the snake at the given speed.
pub fn move_delay(speed: u32) -> u32 {
    (TICKS_PER_SECOND / speed.max(1)).max(1)
}

pub fn is_known_speed(speed: u32) -> bool {
    SPEEDS.contains(&speed)
}

/// On-disk locations of everything the game reads or writes.
#[derive(Clone, Debug)]
pub struct Paths {
    pub game_dir: PathBuf,
    pub data: PathBuf,
    pub data_backup: PathBuf,
    pub version: PathBuf,
    pub log_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub bundled_assets_dir: Option<PathBuf>,
}

impl Paths {
    pub fn detect() -> Result<Self> {
        let home = home_dir().ok_or(Error::HomeNotFound)?;
        let game_dir = if cfg!(windows) {
            home.join("AppData").join("Roaming").join(".snake")
        } else {
            home.join(".snake")
        };
        let bundled = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")));
        let mut paths = Self::under(game_dir);
        paths.bundled_assets_dir = bundled;
        Ok(paths)
    }

    pub fn under(game_dir: PathBuf) -> Self {
        Self {
            data: game_dir.join("data"),
            data_backup: game_dir.join("data.backup"),
            version: game_dir.join("version"),
            log_dir: game_dir.join("logs"),
            assets_dir: game_dir.join("assets"),
            bundled_assets_dir: None,
            game_dir,
        }
    }

    pub fn check_directories(&self) -> Result<()> {
        for dir in [&self.game_dir, &self.log_dir] {
            if !dir.is_dir() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }

    pub fn log_files(&self) -> Vec<PathBuf> {
        (1..=LOG_FILES).map(|i| self.log_dir.join(format!("{i}.log"))).collect()
    }
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// A file that exists and is not empty.
pub fn is_good(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file() && m.len() > 0).unwrap_or(false)
}

#[cfg(test)]
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("snake-test-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playfield_is_odd_sized() {
        assert_eq!(GAME_COLUMNS, 31);
        assert_eq!(GAME_ROWS, 23);
        assert_eq!(GAME_COLUMNS % 2, 1);
        assert_eq!(GAME_ROWS % 2, 1);
    }

    #[test]
    fn move_delay_divides_tick_rate() {
        let delays: Vec<u32> = SPEEDS.iter().map(|s| move_delay(*s)).collect();
        assert_eq!(delays, vec![24, 12, 8, 4, 2]);
        assert_eq!(move_delay(0), TICKS_PER_SECOND);
    }

    #[test]
    fn paths_live_under_game_dir() {
        let paths = Paths::under(PathBuf::from("/tmp/x/.snake"));
        assert_eq!(paths.data, PathBuf::from("/tmp/x/.snake/data"));
        assert_eq!(paths.data_backup, PathBuf::from("/tmp/x/.snake/data.backup"));
        assert_eq!(paths.log_files().len(), LOG_FILES);
        assert!(paths.log_files()[0].ends_with("logs/1.log"));
    }

    #[test]
    fn check_directories_creates_logs() {
        let root = scratch_dir("dirs");
        let paths = Paths::under(root.join(".snake"));
        paths.check_directories().unwrap();
        assert!(paths.log_dir.is_dir());
        paths.check_directories().unwrap();
    }

    #[test]
    fn empty_files_are_not_good() {
        let root = scratch_dir("good");
        let file = root.join("f");
        assert!(!is_good(&file));
        fs::write(&file, "").unwrap();
        assert!(!is_good(&file));
        fs::write(&file, "x").unwrap();
        assert!(is_good(&file));
    }
}
