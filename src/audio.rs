use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};

use crate::assets::{self, LoadedAssets};
use crate::config::GAME_OVER_HOLD_SECONDS;
use crate::error::{Error, Result};

pub struct Music {
    game: Sound,
    game_over: Sound,
    game_over_seconds: f64,
    volume: f32,
}

impl Music {
    pub async fn load(loaded: &LoadedAssets, volume: f32) -> Result<Self> {
        let game = load_sound_from_bytes(&loaded.music_game)
            .await
            .map_err(|e| Error::Asset { name: "game music".into(), reason: format!("{e:?}") })?;
        let game_over = load_sound_from_bytes(&loaded.music_game_over)
            .await
            .map_err(|e| Error::Asset { name: "game over music".into(), reason: format!("{e:?}") })?;
        let game_over_seconds = assets::track_seconds(&loaded.music_game_over).unwrap_or(GAME_OVER_HOLD_SECONDS);
        Ok(Self { game, game_over, game_over_seconds, volume: volume.clamp(0.0, 1.0) })
    }

    /// How long the game over track plays.
    pub fn game_over_seconds(&self) -> f64 {
        self.game_over_seconds
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        audio::set_sound_volume(&self.game, self.volume);
        audio::set_sound_volume(&self.game_over, self.volume);
    }

    pub fn play_game(&self) {
        audio::stop_sound(&self.game_over);
        audio::play_sound(&self.game, PlaySoundParams { looped: true, volume: self.volume });
    }

    pub fn play_game_over(&self) {
        audio::stop_sound(&self.game);
        audio::play_sound(&self.game_over, PlaySoundParams { looped: false, volume: self.volume });
    }

    pub fn stop(&self) {
        audio::stop_sound(&self.game);
        audio::stop_sound(&self.game_over);
    }
}
