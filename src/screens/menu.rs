use macroquad::prelude::*;

use crate::config::{
    BUTTON_FONT_SIZE, BUTTON_HEIGHT, BUTTON_WIDTH, COLOR_TEXT, COLOR_VERSION, COLOR_WINDOW_BACKGROUND,
    FONT_SIZE_LAST_SCORE, GRID, MARGIN, SPEEDS, VERSION, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::format::format_time;
use crate::save::SaveData;
use crate::ui::{Button, LongText, Pointer, Ui};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Quit,
    About,
    SetSpeed(u32),
    SlowDown,
    SpeedUp,
    VolumeDown,
    VolumeUp,
}

// Speed selector
const SPEED_BUTTON_WIDTH: f32 = 40.0;
const SPEED_BUTTON_HEIGHT: f32 = 35.0;
const SPEED_BUTTON_SPACING: f32 = 11.0;
const SPEED_FONT_SIZE: u16 = 22;

// Volume widget
const VOLUME_BUTTON: f32 = 22.0;
const VOLUME_SPACING: f32 = 10.0;
const VOLUME_FONT_SIZE: u16 = 22;

/// Menu shortcuts pressed this frame.
#[derive(Copy, Clone, Debug, Default)]
struct MenuKeys {
    escape: bool,
    space: bool,
    minus: bool,
    keypad_minus: bool,
    equal: bool,
    shift: bool,
    keypad_plus: bool,
}

impl MenuKeys {
    fn current() -> Self {
        Self {
            escape: is_key_pressed(KeyCode::Escape),
            space: is_key_pressed(KeyCode::Space),
            minus: is_key_pressed(KeyCode::Minus),
            keypad_minus: is_key_pressed(KeyCode::KpSubtract),
            equal: is_key_pressed(KeyCode::Equal),
            shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            keypad_plus: is_key_pressed(KeyCode::KpAdd),
        }
    }

    // `+` is Shift and `=` on the main keyboard
    fn action(self) -> Option<MenuAction> {
        if self.escape {
            Some(MenuAction::Quit)
        } else if self.space {
            Some(MenuAction::Play)
        } else if self.minus || self.keypad_minus {
            Some(MenuAction::SlowDown)
        } else if (self.equal && self.shift) || self.keypad_plus {
            Some(MenuAction::SpeedUp)
        } else {
            None
        }
    }
}

/// What the menu shows besides its widgets.
pub struct MenuView<'a> {
    pub data: &'a SaveData,
    pub speed: u32,
    pub last_score: Option<u32>,
}

pub struct MenuScreen {
    play: Button,
    exit: Button,
    about: Button,
    speeds: Vec<(u32, Button)>,
    volume_plus: Button,
    volume_minus: Button,
}

impl MenuScreen {
    pub fn new() -> Self {
        let center_x = (WINDOW_WIDTH as f32 - BUTTON_WIDTH) * 0.5;
        let bottom = (WINDOW_HEIGHT - MARGIN - 2 * GRID) as f32;

        let group_width = SPEEDS.len() as f32 * (SPEED_BUTTON_WIDTH + SPEED_BUTTON_SPACING) - SPEED_BUTTON_SPACING;
        let group_x = WINDOW_WIDTH as f32 - group_width - MARGIN as f32;
        let speeds = SPEEDS
            .iter()
            .enumerate()
            .map(|(i, speed)| {
                let x = group_x + i as f32 * (SPEED_BUTTON_WIDTH + SPEED_BUTTON_SPACING);
                let label = speed.to_string();
                let button = Button::new(x, MARGIN as f32, SPEED_BUTTON_WIDTH, SPEED_BUTTON_HEIGHT, &label, SPEED_FONT_SIZE)
                    .with_radius(4.0);
                (*speed, button)
            })
            .collect();

        let volume_y = MARGIN as f32 + SPEED_BUTTON_HEIGHT + 9.0;
        let minus_x = WINDOW_WIDTH as f32 - MARGIN as f32 - VOLUME_BUTTON;
        let plus_x = minus_x - VOLUME_SPACING - VOLUME_BUTTON;

        Self {
            play: Button::new(center_x, 275.0, BUTTON_WIDTH, BUTTON_HEIGHT, "Play", BUTTON_FONT_SIZE),
            exit: Button::new(center_x, 420.0, BUTTON_WIDTH, BUTTON_HEIGHT, "Exit", BUTTON_FONT_SIZE),
            about: Button::new(MARGIN as f32, bottom, 4.65 * GRID as f32, 2.0 * GRID as f32, "about", 21)
                .with_radius(7.0),
            speeds,
            volume_plus: Button::new(plus_x, volume_y, VOLUME_BUTTON, VOLUME_BUTTON, "+", VOLUME_FONT_SIZE),
            volume_minus: Button::new(minus_x, volume_y, VOLUME_BUTTON, VOLUME_BUTTON, "-", VOLUME_FONT_SIZE),
        }
    }

    pub fn update(&self, pointer: Pointer) -> Option<MenuAction> {
        if let Some(action) = self.clicked(pointer) {
            return Some(action);
        }
        MenuKeys::current().action()
    }

    fn clicked(&self, pointer: Pointer) -> Option<MenuAction> {
        if !pointer.clicked {
            return None;
        }
        if self.play.clicked(pointer) {
            return Some(MenuAction::Play);
        }
        if self.exit.clicked(pointer) {
            return Some(MenuAction::Quit);
        }
        if self.about.clicked(pointer) {
            return Some(MenuAction::About);
        }
        if self.volume_plus.clicked(pointer) {
            return Some(MenuAction::VolumeUp);
        }
        if self.volume_minus.clicked(pointer) {
            return Some(MenuAction::VolumeDown);
        }
        self.speeds
            .iter()
            .find(|(_, button)| button.clicked(pointer))
            .map(|(speed, _)| MenuAction::SetSpeed(*speed))
    }

    pub fn draw(&self, ui: &Ui, pointer: Pointer, view: &MenuView) {
        clear_background(COLOR_WINDOW_BACKGROUND);

        ui.text_centered("Snake Game", 113.0, 62, COLOR_TEXT);
        let stats_bottom = draw_highscores(ui, view.data);
        draw_totals(ui, view.data, stats_bottom + 7.0);

        if let Some(score) = view.last_score {
            ui.text_centered(&format!("last score: {score}"), 205.0, FONT_SIZE_LAST_SCORE, COLOR_TEXT);
        }

        self.play.draw(ui, pointer, false);
        self.exit.draw(ui, pointer, false);
        self.about.draw(ui, pointer, false);

        let version = format!("v{VERSION}");
        let size = ui.measure(&version, 19);
        ui.text(
            &version,
            WINDOW_WIDTH as f32 - MARGIN as f32 - size.x,
            WINDOW_HEIGHT as f32 - MARGIN as f32 - size.y,
            19,
            COLOR_VERSION,
        );

        self.draw_speed_selector(ui, pointer, view.speed);
        self.draw_volume(ui, pointer, view.data.volume);
    }

    fn draw_speed_selector(&self, ui: &Ui, pointer: Pointer, current: u32) {
        let Some((_, first)) = self.speeds.first() else { return };
        let label_w = ui.measure("Speed:", 22).x;
        let x = first.rect.x - SPEED_BUTTON_SPACING - label_w;
        ui.text("Speed:", x, MARGIN as f32 + (SPEED_BUTTON_HEIGHT - 22.0) * 0.5, 22, COLOR_TEXT);
        for (speed, button) in &self.speeds {
            button.draw(ui, pointer, *speed == current);
        }
    }

    fn draw_volume(&self, ui: &Ui, pointer: Pointer, volume: f32) {
        let text = format!("Volume: {:.0}%", volume * 100.0);
        let w = ui.measure(&text, VOLUME_FONT_SIZE).x;
        let x = WINDOW_WIDTH as f32 - MARGIN as f32 - 2.0 * (VOLUME_SPACING + VOLUME_BUTTON) - w;
        ui.text(&text, x, self.volume_minus.rect.y, VOLUME_FONT_SIZE, COLOR_TEXT);
        self.volume_minus.draw(ui, pointer, false);
        self.volume_plus.draw(ui, pointer, false);
    }
}

/// Returns the bottom edge of the list.
fn draw_highscores(ui: &Ui, data: &SaveData) -> f32 {
    let margin = MARGIN as f32;
    ui.text("Highscores:", margin, margin - 4.0, 23, COLOR_TEXT);

    let mut text = format!("• overall: {}", data.highscore);
    for speed in SPEEDS {
        text.push_str(&format!(" \n • {}: {}", speed, data.highscore_for(speed)));
    }
    let list = LongText::new(&text, COLOR_TEXT, 21, 40);
    let y = margin + 23.0;
    list.draw(ui, margin + 15.0, y);
    y + list.size(ui).y
}

fn draw_totals(ui: &Ui, data: &SaveData, y: f32) {
    let margin = MARGIN as f32;
    ui.text(&format!("total games: {}", data.total_games), margin, y, 20, COLOR_TEXT);
    ui.text(&format!("total time: {}", format_time(data.total_time, false)), margin, y + 25.0, 20, COLOR_TEXT);
}

pub fn next_speed(current: u32, faster: bool) -> u32 {
    let i = SPEEDS.iter().position(|s| *s == current).unwrap_or(0);
    let j = if faster { (i + 1).min(SPEEDS.len() - 1) } else { i.saturating_sub(1) };
    SPEEDS[j]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_steps_stop_at_the_ends() {
        assert_eq!(next_speed(10, true), 15);
        assert_eq!(next_speed(10, false), 5);
        assert_eq!(next_speed(5, false), 5);
        assert_eq!(next_speed(60, true), 60);
    }

    #[test]
    fn plus_needs_shift_on_the_main_keyboard() {
        let bare_equal = MenuKeys { equal: true, ..Default::default() };
        assert_eq!(bare_equal.action(), None);
        let plus = MenuKeys { equal: true, shift: true, ..Default::default() };
        assert_eq!(plus.action(), Some(MenuAction::SpeedUp));
        let keypad = MenuKeys { keypad_plus: true, ..Default::default() };
        assert_eq!(keypad.action(), Some(MenuAction::SpeedUp));
        let minus = MenuKeys { minus: true, shift: true, ..Default::default() };
        assert_eq!(minus.action(), Some(MenuAction::SlowDown));
        let both = MenuKeys { escape: true, space: true, ..Default::default() };
        assert_eq!(both.action(), Some(MenuAction::Quit));
    }

    #[test]
    fn speed_buttons_fit_the_window() {
        let menu = MenuScreen::new();
        let last = &menu.speeds.last().unwrap().1;
        assert_eq!(last.rect.x + last.rect.w, (WINDOW_WIDTH - MARGIN) as f32);
        assert!(menu.volume_plus.rect.x < menu.volume_minus.rect.x);
    }

    #[test]
    fn clicks_map_to_actions() {
        let menu = MenuScreen::new();
        let at = |b: &Button| Pointer { pos: b.rect.center(), clicked: true };
        assert_eq!(menu.clicked(at(&menu.play)), Some(MenuAction::Play));
        assert_eq!(menu.clicked(at(&menu.exit)), Some(MenuAction::Quit));
        assert_eq!(menu.clicked(at(&menu.about)), Some(MenuAction::About));
        assert_eq!(menu.clicked(at(&menu.speeds[3].1)), Some(MenuAction::SetSpeed(30)));
        assert_eq!(menu.clicked(at(&menu.volume_minus)), Some(MenuAction::VolumeDown));
        assert_eq!(menu.clicked(Pointer { pos: vec2(1.0, 640.0), clicked: true }), None);
        assert_eq!(menu.clicked(Pointer { pos: menu.play.rect.center(), clicked: false }), None);
    }
}
