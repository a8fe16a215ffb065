use log::error;
use macroquad::prelude::*;

use crate::config::{
    BUTTON_FONT_SIZE, BUTTON_HEIGHT, BUTTON_WIDTH, COLOR_ERROR_BACKGROUND, COLOR_TEXT, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use crate::ui::{Button, LongText, Pointer, Ui};

const FONT_SIZE: u16 = 30;
const EXIT_CODE: i32 = 1;

/// Full-screen message; the only way out is quitting the game.
pub struct ErrorScreen {
    message: LongText,
    exit: Button,
}

impl ErrorScreen {
    pub fn new(message: &str, cause: &dyn std::error::Error) -> Self {
        error!("{message}: {cause}");
        error!("Error screen: {message}");
        Self {
            message: LongText::new(message, COLOR_TEXT, FONT_SIZE, 40),
            exit: Button::new(
                (WINDOW_WIDTH as f32 - BUTTON_WIDTH) * 0.5,
                500.0,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
                "Exit",
                BUTTON_FONT_SIZE,
            ),
        }
    }

    /// Draws one frame, exiting the process when asked to.
    pub fn frame(&self, ui: &Ui, pointer: Pointer) {
        if self.exit.clicked(pointer) || is_key_pressed(KeyCode::Escape) || is_quit_requested() {
            std::process::exit(EXIT_CODE);
        }

        clear_background(COLOR_ERROR_BACKGROUND);
        let size = self.message.size(ui);
        self.message.draw(
            ui,
            (WINDOW_WIDTH as f32 - size.x) * 0.5,
            (WINDOW_HEIGHT as f32 - size.y) * 0.5 - 60.0,
        );
        self.exit.draw(ui, pointer, false);
    }

    /// For failures before the game proper is running.
    pub async fn run(self, ui: &Ui) {
        loop {
            self.frame(ui, Pointer::current());
            next_frame().await;
        }
    }
}
