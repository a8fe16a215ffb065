use macroquad::prelude::*;

use crate::config::{BUTTON_WIDTH, COLOR_TEXT, COLOR_WINDOW_BACKGROUND, VERSION, WINDOW_WIDTH};
use crate::ui::{Button, LongText, Pointer, Ui};

pub struct AboutScreen {
    text: LongText,
    back: Button,
}

impl AboutScreen {
    pub fn new() -> Self {
        let text = format!(
            "Snake Game v{VERSION} \n \
             \n \
             Controls: \n \
             \t Arrows or WASD - steer the snake \n \
             \t Escape - end the game \n \
             \t Space - play \n \
             \t - and + - change the speed \n \
             \n \
             Red apples are worth a point, yellow bananas cost one. \
             Eating a banana with no points left ends the game. \n \
             \n \
             Music without bundled tracks is generated on first run. \n \
             \n \
             License: GNU General Public License version 3 (https://www.gnu.org/licenses/gpl-3.0.html)"
        );
        Self {
            text: LongText::new(&text, COLOR_TEXT, 24, 52),
            back: Button::new((WINDOW_WIDTH as f32 - BUTTON_WIDTH) * 0.5, 540.0, 200.0, 70.0, "Back", 30),
        }
    }

    /// `true` once the player wants the menu back.
    pub fn update(&self, pointer: Pointer) -> bool {
        self.back.clicked(pointer) || is_key_pressed(KeyCode::Escape)
    }

    pub fn draw(&self, ui: &Ui, pointer: Pointer) {
        clear_background(COLOR_WINDOW_BACKGROUND);
        let size = self.text.size(ui);
        self.text.draw(ui, (WINDOW_WIDTH as f32 - size.x) * 0.5, 55.0);
        self.back.draw(ui, pointer, false);
    }
}
