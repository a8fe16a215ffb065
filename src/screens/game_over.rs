use macroquad::prelude::*;

use crate::config::{
    COLOR_GAME_OVER, COLOR_NEW_HIGHSCORE, FONT_SIZE_NEW_HIGHSCORE, WINDOW_HEIGHT,
};
use crate::game::Game;
use crate::save::Record;
use crate::screens::play::draw_game;
use crate::ui::Ui;

const TITLE: &str = "GAME  OVER";
const TITLE_FONT_SIZE: u16 = 77;

/// The last frame of a round, frozen under the game over banner.
pub struct GameOverScreen {
    game: Game,
    new_highscore: Option<String>,
    shown_at: f64,
    /// Seconds until the game over track has finished.
    hold: f64,
}

impl GameOverScreen {
    pub fn new(game: Game, record: Record, now: f64, hold: f64) -> Self {
        Self { new_highscore: highscore_banner(&game, record), game, shown_at: now, hold }
    }

    fn music_done(&self, now: f64) -> bool {
        now - self.shown_at >= self.hold
    }

    /// `true` when it is time to go back to the menu.
    pub fn update(&self, now: f64) -> bool {
        self.music_done(now)
            || is_key_pressed(KeyCode::Space)
            || is_key_pressed(KeyCode::Escape)
    }

    pub fn draw(&self, ui: &Ui, highscore: u32) {
        draw_game(ui, &self.game, highscore);

        let title_y = (WINDOW_HEIGHT as f32 - TITLE_FONT_SIZE as f32) * 0.5;
        ui.text_centered(TITLE, title_y, TITLE_FONT_SIZE, COLOR_GAME_OVER);
        if let Some(banner) = &self.new_highscore {
            let y = title_y - TITLE_FONT_SIZE as f32 + FONT_SIZE_NEW_HIGHSCORE as f32 - 10.0;
            ui.text_centered(banner, y, FONT_SIZE_NEW_HIGHSCORE, COLOR_NEW_HIGHSCORE);
        }
    }
}

fn highscore_banner(game: &Game, record: Record) -> Option<String> {
    match record {
        Record::None => None,
        Record::Speed { .. } => Some(format!("new highscore: {} (speed {})", game.score, game.speed)),
        Record::Overall { .. } => Some(format!("new highscore: {}", game.score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_for_the_length_of_the_track() {
        let screen = GameOverScreen::new(Game::new(10), Record::None, 100.0, 6.5);
        assert!(!screen.music_done(100.0));
        assert!(!screen.music_done(106.4));
        assert!(screen.music_done(106.5));
    }

    #[test]
    fn banner_names_the_speed_only_for_speed_records() {
        let mut game = Game::new(15);
        game.score = 12;
        assert_eq!(highscore_banner(&game, Record::None), None);
        assert_eq!(
            highscore_banner(&game, Record::Speed { previous: 3 }).as_deref(),
            Some("new highscore: 12 (speed 15)")
        );
        assert_eq!(
            highscore_banner(&game, Record::Overall { previous: 9 }).as_deref(),
            Some("new highscore: 12")
        );
    }
}
