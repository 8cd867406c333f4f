use std::path::PathBuf;

use chrono::{Datelike, Timelike};
// Re-export logging functions for convenience.
pub use log::*;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("unable to open log file: {0}")]
    File(#[from] std::io::Error),
    #[error("invalid logging configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("a logger is already installed")]
    AlreadyInitialized(#[from] SetLoggerError),
}

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Records below this level are discarded.
    pub filter: LevelFilter,
    /// Directory for the timestamped log file. `None` logs to the console only.
    pub directory: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: LevelFilter::Info,
            directory: Some(PathBuf::from("./logs")),
        }
    }
}

/// Initializes logging to the console and to a file under `./logs`. Should be called before any
/// other logging functions. Provided `LevelFilter` will remove all logs below the provided level.
///
/// # Panics
/// Panics if logging could not be set up. Use `try_init` to handle the failure instead.
pub fn init(filter: LevelFilter) {
    try_init(LogSettings {
        filter,
        ..Default::default()
    })
    .expect("unable to initialize logging");
}

/// Initializes logging with the given settings and routes panics to the log.
pub fn try_init(settings: LogSettings) -> Result<(), LogInitError> {
    let mut root = Root::builder().appender("stdout");
    let mut config = Config::builder().appender(
        Appender::builder().build("stdout", Box::new(ConsoleAppender::builder().build())),
    );

    // Name of the file is based on the current time.
    if let Some(directory) = &settings.directory {
        let now = chrono::Utc::now();
        let log_file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
            .build(directory.join(format!(
                "{} {} {} {} {} {}.txt",
                now.year(),
                now.month(),
                now.day(),
                now.hour(),
                now.minute(),
                now.second()
            )))?;

        config = config.appender(Appender::builder().build("log_file", Box::new(log_file)));
        root = root.appender("log_file");
    }

    let config = config.build(root.build(settings.filter))?;
    log4rs::init_config(config)?;

    log_panics::init();
    Ok(())
}
