use log::{info, warn};
use macroquad::prelude::*;

mod app;
mod assets;
mod audio;
mod config;
mod error;
mod format;
mod game;
mod logging;
mod save;
mod screens;
mod ui;

use app::App;
use assets::Worker;
use audio::Music;
use config::{DEFAULT_SPEED, Paths, VERSION, WINDOW_HEIGHT, WINDOW_WIDTH};
use error::{Error, Result};
use save::DataStore;
use screens::error::ErrorScreen;
use ui::Ui;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Snake v{VERSION}"),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        icon: Some(assets::window_icon()),
        ..Default::default()
    }
}

fn prepare() -> Result<Paths> {
    prepare_in(Paths::detect()?)
}

// Directories first, so that the log file has somewhere to go
fn prepare_in(paths: Paths) -> Result<Paths> {
    paths.check_directories()?;
    logging::configure_logging(&paths)?;
    Ok(paths)
}

async fn fatal(ui: &Ui, message: &str, err: Error) {
    ErrorScreen::new(message, &err).run(ui).await
}

#[macroquad::main(window_conf)]
async fn main() {
    prevent_quit();
    let ui = Ui::new(None);
    if let Err(err) = logging::init_console() {
        return fatal(&ui, "Error while preparing game directories", err).await;
    }

    let paths = match prepare() {
        Ok(paths) => paths,
        Err(err) => return fatal(&ui, "Error while preparing game directories", err).await,
    };
    info!("Starting Snake v{VERSION}");
    info!("System: {}, architecture: {}", std::env::consts::OS, std::env::consts::ARCH);

    let worker_paths = paths.clone();
    let checked = match Worker::spawn("game-files", move || assets::check_game_files(&worker_paths)) {
        Ok(worker) => screens::loading::wait_for(&ui, worker, "Loading").await,
        Err(err) => Err(err),
    };
    let loaded = match checked {
        Ok(loaded) => loaded,
        Err(err) => return fatal(&ui, "Error while checking game files", err).await,
    };

    let font = loaded.font.as_deref().and_then(|bytes| match load_ttf_font_from_bytes(bytes) {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("Could not load the game font, using the built-in one: {err:?}");
            None
        }
    });
    let ui = Ui::new(font);

    let store = match DataStore::read(&paths) {
        Ok(store) => store,
        Err(err) => return fatal(&ui, "Error while reading game data", err).await,
    };
    let speed = store.stored_speed().unwrap_or(DEFAULT_SPEED);

    let music = match Music::load(&loaded, store.data.volume).await {
        Ok(music) => music,
        Err(err) => return fatal(&ui, "Error while loading sounds", err).await,
    };

    App::new(ui, store, music, speed).run().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn prepare_fails_when_the_game_dir_is_a_file() {
        let root = config::scratch_dir("prepare");
        let game_dir = root.join(".snake");
        fs::write(&game_dir, "not a directory").unwrap();

        let result = prepare_in(Paths::under(game_dir));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn prepare_fails_when_logs_cannot_be_created() {
        let root = config::scratch_dir("prepare-logs");
        let paths = Paths::under(root.join(".snake"));
        fs::create_dir_all(&paths.game_dir).unwrap();
        fs::write(&paths.log_dir, "not a directory").unwrap();

        assert!(matches!(prepare_in(paths), Err(Error::Io(_))));
    }
}
