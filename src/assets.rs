use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use log::{info, warn};
use macroquad::miniquad::conf::Icon;

use crate::config::{self, Paths};
use crate::error::{Error, Result};

const FONT_FILE: &str = "OpenSans-Bold.ttf";
const SAMPLE_RATE: u32 = 44100;

/// A music track: an `.ogg` dropped next to the game wins over the
/// generated `.wav`.
struct Track {
    stem: &'static str,
    notes: &'static [(f32, f32)],
}

// (frequency hz, duration seconds); 0 hz is a rest
const GAME_TRACK: Track = Track {
    stem: "game",
    notes: &[
        (523.25, 0.15), (659.25, 0.15), (783.99, 0.15), (1046.5, 0.15),
        (783.99, 0.15), (659.25, 0.15), (587.33, 0.15), (0.0, 0.15),
        (587.33, 0.15), (698.46, 0.15), (880.0, 0.15), (1174.66, 0.15),
        (880.0, 0.15), (698.46, 0.15), (659.25, 0.15), (0.0, 0.15),
    ],
};

const GAME_OVER_TRACK: Track = Track {
    stem: "game_over",
    notes: &[(392.0, 0.45), (369.99, 0.45), (349.23, 0.45), (329.63, 1.2)],
};

pub struct LoadedAssets {
    /// `None` falls back to the built-in font.
    pub font: Option<Vec<u8>>,
    pub music_game: Vec<u8>,
    pub music_game_over: Vec<u8>,
}

/// Verifies assets and the data files, generating what is missing.
/// Blocking; meant for the loading worker.
pub fn check_game_files(paths: &Paths) -> Result<LoadedAssets> {
    if !paths.assets_dir.exists() {
        fs::create_dir_all(&paths.assets_dir)?;
    }
    let search = asset_dirs(paths);

    let font = match find(&search, FONT_FILE) {
        Some(path) => Some(fs::read(path)?),
        None => {
            warn!("Asset \"{FONT_FILE}\" not found, using the built-in font");
            None
        }
    };
    let music_game = load_track(paths, &search, &GAME_TRACK)?;
    let music_game_over = load_track(paths, &search, &GAME_OVER_TRACK)?;

    crate::save::check_data_files(paths)?;
    info!("Checking files done");
    Ok(LoadedAssets { font, music_game, music_game_over })
}

fn asset_dirs(paths: &Paths) -> Vec<PathBuf> {
    paths.bundled_assets_dir.iter().cloned().chain([paths.assets_dir.clone()]).collect()
}

fn find(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter().map(|d| d.join(name)).find(|p| config::is_good(p))
}

fn load_track(paths: &Paths, dirs: &[PathBuf], track: &Track) -> Result<Vec<u8>> {
    let ogg = format!("{}.ogg", track.stem);
    let wav = format!("{}.wav", track.stem);
    if let Some(path) = find(dirs, &ogg).or_else(|| find(dirs, &wav)) {
        return Ok(fs::read(path)?);
    }

    warn!("Asset \"{wav}\" did not exist, generating");
    let bytes = render_wav(track.notes, 0.6);
    write_asset(&paths.assets_dir.join(&wav), &bytes)?;
    Ok(bytes)
}

fn write_asset(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| Error::Asset {
        name: path.display().to_string(),
        reason: e.to_string(),
    })
}

// PCM16 mono WAV from a list of notes
fn render_wav(notes: &[(f32, f32)], volume: f32) -> Vec<u8> {
    let num_samples: u32 = notes.iter().map(|(_, secs)| (secs * SAMPLE_RATE as f32) as u32).sum();
    let mut data: Vec<u8> = Vec::with_capacity((num_samples as usize) * 2 + 44);

    let block_align: u16 = 2; // mono 16-bit
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    // RIFF header
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    // fmt chunk
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    // data chunk
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude: f32 = volume.clamp(0.0, 1.0) * 0.7;
    for &(frequency_hz, secs) in notes {
        let n_samples = (secs * SAMPLE_RATE as f32) as u32;
        for n in 0..n_samples {
            let t = n as f32 / SAMPLE_RATE as f32;
            // short fade at both ends keeps notes from clicking
            let fade = (n.min(n_samples - n) as f32 / 400.0).min(1.0);
            let wave = if (frequency_hz * t).fract() < 0.5 { 1.0 } else { -1.0 };
            let level = if frequency_hz > 0.0 { amplitude * 0.5 * wave * fade } else { 0.0 };
            let sample = (level * i16::MAX as f32) as i16;
            data.extend_from_slice(&sample.to_le_bytes());
        }
    }
    data
}

/// Playing time of a WAV or Ogg Vorbis track, when its headers tell.
pub fn track_seconds(bytes: &[u8]) -> Option<f64> {
    wav_seconds(bytes).or_else(|| ogg_seconds(bytes))
}

fn read_u32_le(bytes: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(bytes.get(at..at + 4)?.try_into().ok()?))
}

fn wav_seconds(bytes: &[u8]) -> Option<f64> {
    if bytes.get(0..4)? != b"RIFF" || bytes.get(8..12)? != b"WAVE" {
        return None;
    }
    let mut byte_rate = None;
    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let size = read_u32_le(bytes, pos + 4)? as usize;
        let body = pos + 8;
        match &bytes[pos..pos + 4] {
            b"fmt " => byte_rate = read_u32_le(bytes, body + 8),
            b"data" => {
                let rate = byte_rate.filter(|r| *r > 0)?;
                return Some(size as f64 / rate as f64);
            }
            _ => {}
        }
        // chunks are padded to an even size
        pos = body + size + size % 2;
    }
    None
}

fn ogg_seconds(bytes: &[u8]) -> Option<f64> {
    if !bytes.starts_with(b"OggS") {
        return None;
    }
    // identification header: packet type, "vorbis", version u32, channels u8, rate u32
    let header = bytes.windows(7).position(|w| w == b"\x01vorbis")?;
    let rate = read_u32_le(bytes, header + 12).filter(|r| *r > 0)?;
    // granule position of the last page is the total sample count
    let last_page = bytes.windows(4).rposition(|w| w == b"OggS")?;
    let granule = u64::from_le_bytes(bytes.get(last_page + 6..last_page + 14)?.try_into().ok()?);
    if granule == u64::MAX {
        return None;
    }
    Some(granule as f64 / rate as f64)
}

/// Green square with a white head and a red apple.
pub fn window_icon() -> Icon {
    Icon {
        small: icon_pixels::<{ 16 * 16 * 4 }>(16),
        medium: icon_pixels::<{ 32 * 32 * 4 }>(32),
        big: icon_pixels::<{ 64 * 64 * 4 }>(64),
    }
}

fn icon_pixels<const N: usize>(size: usize) -> [u8; N] {
    let mut pixels = [0u8; N];
    let cell = size / 4;
    for y in 0..size {
        for x in 0..size {
            let (cx, cy) = (x / cell, y / cell);
            let rgb = match (cx, cy) {
                (1, 1) => [255, 255, 255],
                (2, 1) | (2, 2) | (1, 2) => [3, 255, 3],
                (3, 3) => [255, 0, 0],
                _ => [1, 170, 64],
            };
            let i = (y * size + x) * 4;
            pixels[i..i + 3].copy_from_slice(&rgb);
            pixels[i + 3] = 255;
        }
    }
    pixels
}

/// Blocking work on a named thread, polled from the frame loop.
pub struct Worker<T> {
    handle: Option<JoinHandle<Result<T>>>,
}

impl<T: Send + 'static> Worker<T> {
    pub fn spawn<F>(name: &str, job: F) -> Result<Self>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let handle = thread::Builder::new().name(name.to_owned()).spawn(job)?;
        Ok(Self { handle: Some(handle) })
    }

    /// `Some` once, when the job has finished.
    pub fn poll(&mut self) -> Option<Result<T>> {
        if !self.handle.as_ref()?.is_finished() {
            return None;
        }
        let handle = self.handle.take()?;
        Some(match handle.join() {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_owned());
                Err(Error::Worker(reason))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::scratch_dir;
    use std::time::Duration;

    fn wait<T: Send + 'static>(worker: &mut Worker<T>) -> Result<T> {
        loop {
            if let Some(result) = worker.poll() {
                return result;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn wav_header_matches_samples() {
        let bytes = render_wav(&[(440.0, 0.1), (0.0, 0.05)], 1.0);
        let samples = (0.1 * SAMPLE_RATE as f32) as u32 + (0.05 * SAMPLE_RATE as f32) as u32;
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes(bytes[40..44].try_into().unwrap()), samples * 2);
        assert_eq!(bytes.len(), 44 + samples as usize * 2);
        // the rest is silent
        assert!(bytes[bytes.len() - 100..].iter().all(|b| *b == 0));
    }

    #[test]
    fn generated_track_length_comes_from_the_header() {
        let bytes = render_wav(GAME_OVER_TRACK.notes, 0.6);
        let seconds = track_seconds(&bytes).unwrap();
        assert!((seconds - 2.55).abs() < 0.01, "{seconds}");
    }

    #[test]
    fn ogg_length_comes_from_the_last_granule() {
        let mut ogg = b"OggS".to_vec();
        ogg.extend([0u8; 24]);
        ogg.extend(b"\x01vorbis");
        ogg.extend(0u32.to_le_bytes());
        ogg.push(2);
        ogg.extend(44100u32.to_le_bytes());
        ogg.extend([0u8; 20]);
        ogg.extend(b"OggS");
        ogg.extend([0u8, 4]);
        ogg.extend(88200u64.to_le_bytes());
        ogg.extend([0u8; 10]);
        assert_eq!(track_seconds(&ogg), Some(2.0));
    }

    #[test]
    fn unknown_audio_has_no_length() {
        assert_eq!(track_seconds(b"OggS-not-really"), None);
        assert_eq!(track_seconds(b""), None);
        assert_eq!(track_seconds(b"RIFF\0\0\0\0WAVE"), None);
    }

    #[test]
    fn icon_is_opaque() {
        let icon = window_icon();
        assert!(icon.small.chunks(4).all(|px| px[3] == 255));
        assert_eq!(&icon.big[0..3], &[1, 170, 64]);
    }

    #[test]
    fn missing_music_is_generated_once() {
        let paths = Paths::under(scratch_dir("assets").join(".snake"));
        paths.check_directories().unwrap();

        let first = check_game_files(&paths).unwrap();
        assert!(first.font.is_none());
        assert!(config::is_good(&paths.assets_dir.join("game.wav")));
        assert!(config::is_good(&paths.assets_dir.join("game_over.wav")));
        assert!(config::is_good(&paths.data));

        fs::write(paths.assets_dir.join("game_over.ogg"), b"OggS-not-really").unwrap();
        let second = check_game_files(&paths).unwrap();
        assert_eq!(second.music_game, first.music_game);
        assert_eq!(second.music_game_over, b"OggS-not-really");
    }

    #[test]
    fn bundled_assets_win() {
        let root = scratch_dir("bundled");
        let mut paths = Paths::under(root.join(".snake"));
        paths.check_directories().unwrap();
        let bundled = root.join("bundle");
        fs::create_dir_all(&bundled).unwrap();
        fs::write(bundled.join(FONT_FILE), b"font").unwrap();
        paths.bundled_assets_dir = Some(bundled);

        let loaded = check_game_files(&paths).unwrap();
        assert_eq!(loaded.font.as_deref(), Some(&b"font"[..]));
    }

    #[test]
    fn worker_reports_result_and_panic() {
        let mut ok = Worker::spawn("ok", || Ok(7)).unwrap();
        assert_eq!(wait(&mut ok).unwrap(), 7);
        assert!(ok.poll().is_none());

        let mut boom: Worker<()> = Worker::spawn("boom", || panic!("boom")).unwrap();
        match wait(&mut boom) {
            Err(Error::Worker(reason)) => assert_eq!(reason, "boom"),
            _ => panic!("expected a worker error"),
        }
    }
}
