//! Opt-in log output for hosts that do not install their own `log` backend.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::LevelFilter;

use crate::error::FlagsError;

/// Set once a logger has been configured by this module.
static LOGGER_CONFIGURED: Mutex<bool> = Mutex::new(false);

/// Routes this crate's `log` records through `env_logger` at `Debug` level,
/// to stderr or appended to `log_file`.
///
/// Only the first successful call has an effect; later calls do not touch
/// `log_file`. A file that cannot be opened is reported and leaves logging
/// unconfigured. If another logger is already installed it is left in place.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<(), FlagsError> {
    let mut configured = LOGGER_CONFIGURED
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if *configured {
        return Ok(());
    }

    let target = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    let mut builder = env_logger::Builder::new();

    builder.is_test(false);
    builder.filter_level(LevelFilter::Debug);

    // Custom formatter: just print the level and message
    builder.format(|buf, record| {
        writeln!(buf, "[{}] {}", record.level(), record.args())?;
        buf.flush()?;
        Ok(())
    });

    if let Some(file) = target {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
    *configured = true;
    Ok(())
}
