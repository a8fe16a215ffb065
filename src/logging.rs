use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

use env_logger::{Logger, Target, WriteStyle};
use log::{LevelFilter, Log, Metadata, Record};

use crate::config::Paths;
use crate::error::{Error, Result};

/// Attached once the game directory exists.
static FILE_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Console, plus the log file when there is one.
struct TeeLogger {
    console: Logger,
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata) || FILE_LOGGER.get().is_some_and(|file| file.enabled(metadata))
    }

    fn log(&self, record: &Record) {
        // each side applies its own filter
        self.console.log(record);
        if let Some(file) = FILE_LOGGER.get() {
            file.log(record);
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = FILE_LOGGER.get() {
            file.flush();
        }
    }
}

/// Drops the oldest log and shifts the rest by one: `1.log` -> `2.log`, ...
pub fn rotate_log_files(log_paths: &[PathBuf]) -> Result<()> {
    let Some(last) = log_paths.last() else { return Ok(()) };
    if last.exists() {
        fs::remove_file(last)?;
    }
    for pair in log_paths.windows(2).rev() {
        if pair[0].exists() {
            fs::rename(&pair[0], &pair[1])?;
        }
    }
    Ok(())
}

/// Console logging, available before any directory is known.
pub fn init_console() -> Result<()> {
    let console = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(Target::Stdout)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .build();

    let max_level = console.filter();
    log::set_boxed_logger(Box::new(TeeLogger { console }))?;
    log::set_max_level(max_level);

    std::panic::set_hook(Box::new(|info| {
        log::error!("{info}");
    }));
    Ok(())
}

/// Rotates the log files and starts writing the newest one.
pub fn configure_logging(paths: &Paths) -> Result<()> {
    let log_paths = paths.log_files();
    rotate_log_files(&log_paths)?;

    let file = OpenOptions::new().create(true).append(true).open(&log_paths[0])?;
    let file = env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] (Line {} in {}) - {}",
                buf.timestamp_millis(),
                record.level(),
                record.line().unwrap_or(0),
                record.module_path().unwrap_or("?"),
                record.args()
            )
        })
        .build();

    let max_level = log::max_level().max(file.filter());
    FILE_LOGGER.set(file).map_err(|_| Error::LogFileAttached)?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::scratch_dir;

    #[test]
    fn rotation_shifts_and_drops_oldest() {
        let dir = scratch_dir("rotate");
        let logs: Vec<PathBuf> = (1..=4).map(|i| dir.join(format!("{i}.log"))).collect();
        for (i, path) in logs.iter().enumerate() {
            fs::write(path, format!("log {}", i + 1)).unwrap();
        }

        rotate_log_files(&logs).unwrap();

        assert!(!logs[0].exists());
        assert_eq!(fs::read_to_string(&logs[1]).unwrap(), "log 1");
        assert_eq!(fs::read_to_string(&logs[2]).unwrap(), "log 2");
        assert_eq!(fs::read_to_string(&logs[3]).unwrap(), "log 3");
    }

    #[test]
    fn console_first_then_log_file() {
        init_console().unwrap();
        log::debug!("before the file");

        let paths = Paths::under(scratch_dir("log-file").join(".snake"));
        paths.check_directories().unwrap();
        configure_logging(&paths).unwrap();
        log::debug!("into the file");
        log::logger().flush();

        let written = fs::read_to_string(&paths.log_files()[0]).unwrap();
        assert!(written.contains("[DEBUG]"));
        assert!(written.contains("into the file"));
        assert!(!written.contains("before the file"));
        assert!(matches!(configure_logging(&paths), Err(Error::LogFileAttached)));
    }

    #[test]
    fn rotation_tolerates_gaps() {
        let dir = scratch_dir("rotate-gaps");
        let logs: Vec<PathBuf> = (1..=4).map(|i| dir.join(format!("{i}.log"))).collect();
        fs::write(&logs[0], "first").unwrap();

        rotate_log_files(&logs).unwrap();
        rotate_log_files(&logs).unwrap();

        assert!(!logs[0].exists());
        assert!(!logs[1].exists());
        assert_eq!(fs::read_to_string(&logs[2]).unwrap(), "first");
    }
}
