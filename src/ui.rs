use macroquad::prelude::*;

use crate::config::{COLOR_TEXT, WINDOW_WIDTH};
use crate::game::grid::Cell;

const BUTTON_COLOR: Color = Color::new(254.0 / 255.0, 151.0 / 255.0, 12.0 / 255.0, 1.0);
const BUTTON_HOVER_COLOR: Color = Color::new(195.0 / 255.0, 122.0 / 255.0, 20.0 / 255.0, 1.0);
const TILE_RADIUS: f32 = 2.0;

/// Text rendering with the game font, or macroquad's own when none loaded.
pub struct Ui {
    font: Option<Font>,
}

impl Ui {
    pub fn new(font: Option<Font>) -> Self {
        Self { font }
    }

    pub fn measure(&self, text: &str, font_size: u16) -> Vec2 {
        let dims = measure_text(text, self.font.as_ref(), font_size, 1.0);
        vec2(dims.width, font_size as f32)
    }

    /// Draws with `(x, y)` as the top-left corner.
    pub fn text(&self, text: &str, x: f32, y: f32, font_size: u16, color: Color) {
        let dims = measure_text(text, self.font.as_ref(), font_size, 1.0);
        let baseline = y + (font_size as f32 + dims.offset_y) * 0.5;
        let params = TextParams { font: self.font.as_ref(), font_size, color, ..Default::default() };
        draw_text_ex(text, x, baseline, params);
    }

    pub fn text_centered(&self, text: &str, y: f32, font_size: u16, color: Color) {
        let size = self.measure(text, font_size);
        self.text(text, (WINDOW_WIDTH as f32 - size.x) * 0.5, y, font_size, color);
    }
}

/// Word wrap. A lone `\n` token breaks the line and a lone `\t` indents.
/// Words longer than a line get a line of their own, with no blank line before.
pub fn split_into_lines(text: &str, line_length: usize) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').collect();
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut i = 0;
    while i < words.len() {
        let word = words[i];
        let (line_len, word_len) = (line.chars().count(), word.chars().count());
        if word == "\n" {
            lines.push(std::mem::take(&mut line));
            i += 1;
        } else if word == "\t" {
            line.push_str("    ");
            i += 1;
        } else if line_len + 1 + word_len <= line_length {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
            i += 1;
        } else if word_len >= line_length {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.to_owned());
            i += 1;
        } else {
            lines.push(std::mem::take(&mut line));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub struct LongText {
    lines: Vec<String>,
    font_size: u16,
    color: Color,
    line_spacing: f32,
}

impl LongText {
    pub fn new(text: &str, color: Color, font_size: u16, line_length: usize) -> Self {
        Self { lines: split_into_lines(text, line_length), font_size, color, line_spacing: 1.0 }
    }

    pub fn size(&self, ui: &Ui) -> Vec2 {
        let width = self.lines.iter().map(|l| ui.measure(l, self.font_size).x).fold(0.0, f32::max);
        let n = self.lines.len() as f32;
        vec2(width, n * (self.font_size as f32 + self.line_spacing) - self.line_spacing)
    }

    pub fn draw(&self, ui: &Ui, x: f32, y: f32) {
        let step = self.font_size as f32 + self.line_spacing;
        for (i, line) in self.lines.iter().enumerate() {
            ui.text(line, x, y + i as f32 * step, self.font_size, self.color);
        }
    }
}

/// Mouse state sampled once per frame.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pointer {
    pub pos: Vec2,
    pub clicked: bool,
}

impl Pointer {
    pub fn current() -> Self {
        Self { pos: mouse_position().into(), clicked: is_mouse_button_pressed(MouseButton::Left) }
    }
}

pub struct Button {
    pub rect: Rect,
    label: String,
    font_size: u16,
    radius: f32,
}

impl Button {
    pub fn new(x: f32, y: f32, w: f32, h: f32, label: &str, font_size: u16) -> Self {
        Self { rect: Rect::new(x, y, w, h), label: label.to_owned(), font_size, radius: 9.0 }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Edges count as inside.
    pub fn is_pointed(&self, pos: Vec2) -> bool {
        let r = self.rect;
        r.x <= pos.x && pos.x <= r.x + r.w && r.y <= pos.y && pos.y <= r.y + r.h
    }

    pub fn clicked(&self, pointer: Pointer) -> bool {
        pointer.clicked && self.is_pointed(pointer.pos)
    }

    pub fn draw(&self, ui: &Ui, pointer: Pointer, selected: bool) {
        let highlighted = selected || self.is_pointed(pointer.pos);
        let color = if highlighted { BUTTON_HOVER_COLOR } else { BUTTON_COLOR };
        draw_rounded_rect(self.rect, self.radius, color);
        let size = ui.measure(&self.label, self.font_size);
        ui.text(
            &self.label,
            self.rect.x + (self.rect.w - size.x) * 0.5,
            self.rect.y + (self.rect.h - size.y) * 0.5,
            self.font_size,
            COLOR_TEXT,
        );
    }
}

pub fn draw_rounded_rect(r: Rect, radius: f32, color: Color) {
    let radius = radius.min(r.w * 0.5).min(r.h * 0.5).max(0.0);
    draw_rectangle(r.x + radius, r.y, r.w - 2.0 * radius, r.h, color);
    draw_rectangle(r.x, r.y + radius, r.w, r.h - 2.0 * radius, color);
    for (cx, cy) in [
        (r.x + radius, r.y + radius),
        (r.x + r.w - radius, r.y + radius),
        (r.x + radius, r.y + r.h - radius),
        (r.x + r.w - radius, r.y + r.h - radius),
    ] {
        draw_circle(cx, cy, radius, color);
    }
}

pub fn draw_tile(cell: Cell, color: Color) {
    draw_rounded_rect(cell.to_rect(), TILE_RADIUS, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = split_into_lines("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| l.len() < 10));
    }

    #[test]
    fn newline_and_tab_tokens() {
        let lines = split_into_lines("Credits: \n - Icon: \n \t made by someone \n \n end", 40);
        assert_eq!(lines, vec!["Credits:", "- Icon:", "     made by someone", "", "end"]);
    }

    #[test]
    fn long_words_get_their_own_line() {
        let lines = split_into_lines("see https://www.gnu.org/licenses/gpl-3.0.html now", 20);
        assert_eq!(lines, vec!["see", "https://www.gnu.org/licenses/gpl-3.0.html", "now"]);
    }

    #[test]
    fn long_word_on_an_empty_line_adds_no_blank() {
        let lines = split_into_lines("https://www.gnu.org/licenses/gpl-3.0.html https://www.gnu.org/ ok", 20);
        assert_eq!(lines, vec!["https://www.gnu.org/licenses/gpl-3.0.html", "https://www.gnu.org/", "ok"]);
    }

    #[test]
    fn button_hit_test_is_inclusive() {
        let button = Button::new(10.0, 10.0, 20.0, 5.0, "ok", 12);
        assert!(button.is_pointed(vec2(10.0, 10.0)));
        assert!(button.is_pointed(vec2(30.0, 15.0)));
        assert!(!button.is_pointed(vec2(30.1, 15.0)));
        assert!(!button.clicked(Pointer { pos: vec2(20.0, 12.0), clicked: false }));
        assert!(button.clicked(Pointer { pos: vec2(20.0, 12.0), clicked: true }));
    }
}
