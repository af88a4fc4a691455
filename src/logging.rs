use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

use crate::config::APP_DIR_NAME;

struct FileLogger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl FileLogger {
    fn new(file_path: PathBuf, level: LevelFilter) -> io::Result<Self> {
        // Create parent directories if they don't exist
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file_path)?;

        Ok(FileLogger {
            file: Mutex::new(file),
            level,
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = self.file.lock() {
                let _ = writeln!(
                    file,
                    "[{}] [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
                let _ = file.flush();
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Get the platform-specific log file path
pub fn get_log_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir = dirs::data_local_dir().ok_or("Could not determine local data directory")?;
    Ok(data_dir.join(APP_DIR_NAME).join("theme_lens.log"))
}

/// Initialize the logger to write to a single file in local app data, overwriting previous logs
pub fn init_logger(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let log_file_path = get_log_file_path()?;
    let logger = FileLogger::new(log_file_path, level)?;

    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;

    Ok(())
}
