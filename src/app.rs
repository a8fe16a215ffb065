use log::{debug, error, info};
use macroquad::prelude::*;

use crate::audio::Music;
use crate::error::{Error, Result};
use crate::format::format_time;
use crate::game::Game;
use crate::save::{DataStore, Record};
use crate::screens::about::AboutScreen;
use crate::screens::error::ErrorScreen;
use crate::screens::game_over::GameOverScreen;
use crate::screens::menu::{self, MenuAction, MenuScreen, MenuView};
use crate::screens::play::{PlayScreen, draw_game};
use crate::ui::{Pointer, Ui};

enum Screen {
    Menu,
    Playing(PlayScreen),
    GameOver(GameOverScreen),
    About(AboutScreen),
    Error(ErrorScreen),
}

/// Everything that outlives a single screen.
pub struct App {
    ui: Ui,
    store: DataStore,
    music: Music,
    speed: u32,
    last_score: Option<u32>,
    menu: MenuScreen,
}

impl App {
    pub fn new(ui: Ui, store: DataStore, music: Music, speed: u32) -> Self {
        Self { ui, store, music, speed, last_score: None, menu: MenuScreen::new() }
    }

    pub async fn run(mut self) {
        let mut screen = Screen::Menu;

        loop {
            if is_quit_requested() && !matches!(screen, Screen::Error(_)) {
                // a round cut short by closing the window still counts
                if let Screen::Playing(play) = &mut screen {
                    play.game.quit();
                    if let Err(err) = record_round(&mut self.store, &play.game, self.speed) {
                        error!("Error while writing game data: {err}");
                    }
                }
                break;
            }
            let pointer = Pointer::current();
            let mut next_screen: Option<Screen> = None;

            match &mut screen {
                Screen::Menu => {
                    match self.menu.update(pointer) {
                        Some(MenuAction::Quit) => break,
                        Some(action) => next_screen = self.on_menu_action(action),
                        None => {}
                    }
                    let view = MenuView { data: &self.store.data, speed: self.speed, last_score: self.last_score };
                    self.menu.draw(&self.ui, pointer, &view);
                }

                Screen::Playing(play) => {
                    play.update();
                    draw_game(&self.ui, &play.game, self.store.data.highscore_for(self.speed));
                }

                Screen::GameOver(over) => {
                    over.draw(&self.ui, self.store.data.highscore_for(self.speed));
                    if over.update(get_time()) {
                        self.music.stop();
                        next_screen = Some(Screen::Menu);
                    }
                }

                Screen::About(about) => {
                    about.draw(&self.ui, pointer);
                    if about.update(pointer) {
                        next_screen = Some(Screen::Menu);
                    }
                }

                Screen::Error(err) => err.frame(&self.ui, pointer),
            }

            // a finished round hands its game over by value
            if matches!(&screen, Screen::Playing(play) if play.game.is_over()) {
                if let Screen::Playing(play) = std::mem::replace(&mut screen, Screen::Menu) {
                    next_screen = Some(self.finish_game(play.game));
                }
            }

            if let Some(ns) = next_screen {
                screen = ns;
            }

            next_frame().await;
        }

        self.music.stop();
        info!("Quitting");
        match self.store.dump() {
            Ok(dump) => debug!("{dump}"),
            Err(err) => error!("Could not encode game data: {err}"),
        }
    }

    fn on_menu_action(&mut self, action: MenuAction) -> Option<Screen> {
        match action {
            // leaving the loop is up to the caller
            MenuAction::Quit => None,
            MenuAction::Play => {
                self.music.play_game();
                Some(Screen::Playing(PlayScreen::new(self.speed)))
            }
            MenuAction::About => Some(Screen::About(AboutScreen::new())),
            MenuAction::SetSpeed(speed) => self.change_speed(speed),
            MenuAction::SlowDown => self.change_speed(menu::next_speed(self.speed, false)),
            MenuAction::SpeedUp => self.change_speed(menu::next_speed(self.speed, true)),
            MenuAction::VolumeDown => self.change_volume(-0.1),
            MenuAction::VolumeUp => self.change_volume(0.1),
        }
    }

    fn change_speed(&mut self, speed: u32) -> Option<Screen> {
        if speed == self.speed {
            return None;
        }
        self.speed = speed;
        info!("Changed speed to {speed}");
        self.save()
    }

    fn change_volume(&mut self, delta: f32) -> Option<Screen> {
        let volume = self.store.data.change_volume(delta);
        self.music.set_volume(volume);
        info!("Changed volume to {:.0}%", volume * 100.0);
        self.save()
    }

    /// Writes game data; on failure returns the error screen to show.
    fn save(&mut self) -> Option<Screen> {
        self.store.write(self.speed).err().map(|err| fail("Error while writing game data", &err))
    }

    fn finish_game(&mut self, game: Game) -> Screen {
        self.music.play_game_over();
        let record = match record_round(&mut self.store, &game, self.speed) {
            Ok(record) => record,
            Err(err) => return fail("Error while writing game data", &err),
        };
        self.last_score = Some(game.score);
        Screen::GameOver(GameOverScreen::new(game, record, get_time(), self.music.game_over_seconds()))
    }
}

/// Adds a finished round to the statistics and writes them to disk.
fn record_round(store: &mut DataStore, game: &Game, speed: u32) -> Result<Record> {
    let seconds = game.elapsed_seconds();
    info!(
        "Game over, score: {} (speed: {}, time: {})",
        game.score,
        game.speed,
        format_time(seconds, true)
    );
    debug!("Round ended by {:?}, snake length {}", game.over_cause(), game.snake.len());

    let record = store.data.record_game(game.score, game.speed, seconds);
    match record {
        Record::Speed { previous } | Record::Overall { previous } => info!(
            "Highscore beaten, old: {previous}, new: {} (speed {})",
            game.score, game.speed
        ),
        Record::None => {}
    }
    store.write(speed)?;
    Ok(record)
}

fn fail(message: &str, err: &Error) -> Screen {
    Screen::Error(ErrorScreen::new(message, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Paths, scratch_dir};
    use crate::save;

    #[test]
    fn quit_round_is_recorded_and_written() {
        let paths = Paths::under(scratch_dir("quit-round").join(".snake"));
        paths.check_directories().unwrap();
        save::check_data_files(&paths).unwrap();
        let mut store = DataStore::read(&paths).unwrap();

        let mut game = Game::new(15);
        game.score = 4;
        game.quit();
        let record = record_round(&mut store, &game, 15).unwrap();
        assert_eq!(record, Record::Speed { previous: 0 });

        let reread = DataStore::read(&paths).unwrap();
        assert_eq!(reread.data.total_games, 1);
        assert_eq!(reread.data.highscore, 4);
        assert_eq!(reread.data.highscore_for(15), 4);
        assert_eq!(reread.stored_speed(), Some(15));
    }
}
