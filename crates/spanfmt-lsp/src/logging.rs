//! Logger setup for the server binary.
//!
//! `env_logger` is installed with a pass-all filter so that `log::max_level`
//! alone decides verbosity. `RUST_LOG` (default `info`) only picks the level
//! at startup; `logLevel` settings move it afterwards.

use env_logger::{Builder, Env, Target};
use log::{LevelFilter, SetLoggerError};

use crate::config::LogLevel;

/// Install the stderr logger. Fails if a logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    let initial = Builder::from_env(Env::default().default_filter_or("info"))
        .build()
        .filter();

    Builder::new()
        .filter_level(LevelFilter::Trace)
        .target(Target::Stderr)
        .try_init()?;

    log::set_max_level(initial);
    Ok(())
}

pub fn set_level(level: LogLevel) {
    log::set_max_level(level.to_level_filter());
    log::debug!("log level set to {:?}", level);
}
