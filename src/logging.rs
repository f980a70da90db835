// Conditional logging macros - only active in debug builds

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use log::LevelFilter;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const LOG_FILE_NAME: &str = "hangman.log";

/// Where log output goes for the chosen interface.
#[derive(Debug, PartialEq)]
pub enum LogTarget {
    Stderr,
    /// The TUI owns the terminal, so records go to a file instead.
    File(PathBuf),
}

/// Default log file location under the platform local data directory.
pub fn default_log_path() -> PathBuf {
    log_path_in(dirs::data_local_dir())
}

fn log_path_in(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir
        .unwrap_or_else(std::env::temp_dir)
        .join("hangman")
        .join(LOG_FILE_NAME)
}

/// The TUI always logs to a file; stderr would draw over the alternate screen.
pub fn log_target_for(tui: bool) -> LogTarget {
    if tui {
        LogTarget::File(default_log_path())
    } else {
        LogTarget::Stderr
    }
}

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    }
}

/// Installs the global logger. Configured from code only, `RUST_LOG` is not read.
pub fn init_logging(target: LogTarget, level: LevelFilter) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match target {
        LogTarget::Stderr => {
            builder.target(env_logger::Target::Stderr);
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }

    // a logger may already be installed (tests); keep the existing one
    let _ = builder.try_init();
    Ok(())
}
