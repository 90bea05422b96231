use std::path::Path;

use log::{info, LevelFilter, SetLoggerError};
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use thiserror::Error;

const PATTERN: &str = "{d(%H:%M:%S)(utc)} {l} - {m}\n";

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("cannot open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("invalid logger configuration: {0}")]
    Config(String),

    #[error(transparent)]
    SetLogger(#[from] SetLoggerError),
}

/// Logs to stdout and to `<log_dir>/<UTC date>.log`.
pub fn init_file_logger(log_dir: &str, level: LevelFilter) -> Result<(), LoggerError> {
    let current_date = chrono::offset::Utc::now().date_naive().to_string();
    let path = Path::new(log_dir).join(format!("{}.log", current_date));

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(path)?;

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(
            Root::builder()
                .appender("logfile")
                .appender("stdout")
                .build(level),
        )
        .map_err(|errors| LoggerError::Config(errors.to_string()))?;

    log4rs::init_config(config)?;
    info!("File logger initialized");

    Ok(())
}
