use std::collections::BTreeMap;
use std::fs;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{self, DEFAULT_VOLUME, Paths, SPEEDS, VERSION};
use crate::error::Result;

/// Second line of the data file. Decorative, never parsed.
const DATA_TRAILER: &str = "eyJqdXN0IGZvdW5kIGFuIEVhc3RlciBFZ2c/PyI6IHRydWV9";

// Persistent storage
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaveData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(default)]
    pub highscore: u32,
    #[serde(default)]
    pub highscores_speed: BTreeMap<String, u32>,
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub total_time: f64,
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Keys this version does not know about, kept as they were.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: None,
            speed: None,
            highscore: 0,
            highscores_speed: BTreeMap::new(),
            total_games: 0,
            total_time: 0.0,
            volume: DEFAULT_VOLUME,
            extra: Map::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Record {
    None,
    /// Best score for the speed played (and maybe overall).
    Speed { previous: u32 },
    /// Best overall, but not for this speed.
    Overall { previous: u32 },
}

impl SaveData {
    /// Exactly one per-speed highscore for every known speed.
    pub fn normalize(&mut self) {
        self.highscores_speed = SPEEDS
            .iter()
            .map(|s| {
                let key = s.to_string();
                let best = self.highscores_speed.get(&key).copied().unwrap_or(0);
                (key, best)
            })
            .collect();
        self.volume = round_to(self.volume.clamp(0.0, 1.0) as f64, 1) as f32;
    }

    pub fn highscore_for(&self, speed: u32) -> u32 {
        self.highscores_speed.get(&speed.to_string()).copied().unwrap_or(0)
    }

    pub fn record_game(&mut self, score: u32, speed: u32, seconds: f64) -> Record {
        self.total_games += 1;
        self.total_time += seconds.max(0.0);

        let speed_best = self.highscore_for(speed);
        if score > speed_best {
            self.highscores_speed.insert(speed.to_string(), score);
            if score > self.highscore {
                self.highscore = score;
            }
            Record::Speed { previous: speed_best }
        } else if score > self.highscore {
            let previous = self.highscore;
            self.highscore = score;
            Record::Overall { previous }
        } else {
            Record::None
        }
    }

    pub fn change_volume(&mut self, delta: f32) -> f32 {
        self.volume = round_to((self.volume + delta).clamp(0.0, 1.0) as f64, 1) as f32;
        self.volume
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn encode(data: &SaveData) -> Result<String> {
    let json = serde_json::to_string(data)?;
    Ok(STANDARD.encode(json))
}

pub fn decode(text: &str) -> Result<SaveData> {
    let line = text.lines().next().unwrap_or("").trim();
    let json = String::from_utf8(STANDARD.decode(line)?)?;
    Ok(serde_json::from_str(&json)?)
}

fn encode_str(text: &str) -> String {
    STANDARD.encode(text)
}

fn decode_str(text: &str) -> Result<String> {
    let line = text.lines().next().unwrap_or("").trim();
    Ok(String::from_utf8(STANDARD.decode(line)?)?)
}

fn data_file_contents(encoded: &str) -> String {
    format!("{encoded}\n{DATA_TRAILER}")
}

/// Creates the version and data files when they are missing or empty.
pub fn check_data_files(paths: &Paths) -> Result<()> {
    if !config::is_good(&paths.version) {
        warn!("Version file did not exist, trying to create");
        fs::write(&paths.version, encode_str(VERSION))?;
        warn!("Version file successfully created");
    }
    if !config::is_good(&paths.data) {
        warn!("Data file did not exist, trying to create");
        fs::write(&paths.data, data_file_contents(&encode_str("{}")))?;
        warn!("Data file successfully created");
    }
    Ok(())
}

pub struct DataStore {
    paths: Paths,
    pub data: SaveData,
}

impl DataStore {
    pub fn read(paths: &Paths) -> Result<Self> {
        let stored_version = decode_str(&fs::read_to_string(&paths.version)?)?;
        let mut data = decode(&fs::read_to_string(&paths.data)?)?;
        data.normalize();
        if stored_version != VERSION {
            info!("Game data written by version {stored_version}, running {VERSION}");
        }
        info!("Game data successfully read");
        Ok(Self { paths: paths.clone(), data })
    }

    /// Speed stored by the last session, if it is still offered.
    pub fn stored_speed(&self) -> Option<u32> {
        self.data.speed.filter(|s| config::is_known_speed(*s))
    }

    pub fn write(&mut self, speed: u32) -> Result<()> {
        debug!("Writing data");
        if self.paths.data.exists() {
            fs::rename(&self.paths.data, &self.paths.data_backup)?;
        }
        self.data.version = Some(VERSION.to_owned());
        self.data.speed = Some(speed);
        self.data.total_time = round_to(self.data.total_time, 3);
        self.data.volume = round_to(self.data.volume as f64, 1) as f32;
        fs::write(&self.paths.data, data_file_contents(&encode(&self.data)?))?;
        fs::write(&self.paths.version, encode_str(VERSION))?;
        Ok(())
    }

    pub fn dump(&self) -> Result<String> {
        encode(&self.data)
    }
}
