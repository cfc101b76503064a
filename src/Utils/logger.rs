use crate::numerical::ivp_error::IVPError;
use chrono::Local;
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// map "debug", "info", "warn", "error", "off" to a level filter; None means Info
pub fn parse_loglevel(loglevel: Option<&str>) -> Result<LevelFilter, IVPError> {
    match loglevel {
        None => Ok(LevelFilter::Info),
        Some(level) => match level.trim().to_lowercase().as_str() {
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "off" => Ok(LevelFilter::Off),
            other => Err(IVPError::InvalidInput(format!(
                "loglevel must be debug, info, warn, error or off (got {})",
                other
            ))),
        },
    }
}

/// log_<date>_<time>.txt
pub fn default_log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Terminal logger plus an optional file logger. If a global logger is already installed
/// the call is a no-op.
pub fn init_logger(loglevel: Option<&str>, log_file: Option<&Path>) -> Result<(), IVPError> {
    let level = parse_loglevel(loglevel)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path).map_err(|e| {
            IVPError::InvalidInput(format!("cannot create log file {}: {}", path.display(), e))
        })?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    let _ = CombinedLogger::init(loggers);
    Ok(())
}
