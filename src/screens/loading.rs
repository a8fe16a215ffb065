use macroquad::prelude::*;

use crate::assets::Worker;
use crate::config::{COLOR_TEXT, COLOR_WINDOW_BACKGROUND, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::Result;
use crate::ui::Ui;

const FONT_SIZE: u16 = 35;

/// Animates "Loading", "Loading.", ... until the worker is done.
pub async fn wait_for<T: Send + 'static>(ui: &Ui, mut worker: Worker<T>, label: &str) -> Result<T> {
    let started = get_time();
    loop {
        if let Some(result) = worker.poll() {
            return result;
        }

        let dots = ((get_time() - started) as usize) % 4;
        let text = format!("{label}{}", ".".repeat(dots));
        // keep the text anchored while the dots change
        let x = (WINDOW_WIDTH as f32 - ui.measure(label, FONT_SIZE).x) * 0.5;

        clear_background(COLOR_WINDOW_BACKGROUND);
        ui.text(&text, x, (WINDOW_HEIGHT as f32 - FONT_SIZE as f32) * 0.5, FONT_SIZE, COLOR_TEXT);
        next_frame().await;
    }
}
