use std::{io, result};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed game data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("game data is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("could not determine the home directory")]
    HomeNotFound,
    #[error("logger already initialized: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("log file already attached")]
    LogFileAttached,
    #[error("asset \"{name}\" unusable: {reason}")]
    Asset { name: String, reason: String },
    #[error("background worker panicked: {0}")]
    Worker(String),
}

pub type Result<T = ()> = result::Result<T, Error>;
