//! Process-wide logging setup.
//!
//! Records go to stdout as
//! `<YYYY-MM-DD HH:MM> - <target> - <LEVEL> - <message>`.
//! The level comes from the command-line verbosity flags only.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::io::Write;

/// Timestamp layout used in every log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Selected verbosity; the flags are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    /// Map the verbosity flags to a level.
    ///
    /// `verbose_count` is the number of `-v` occurrences, so `-vv` counts 2.
    pub fn from_flags(verbose_count: u8, very_verbose: bool) -> Self {
        if very_verbose || verbose_count >= 2 {
            Verbosity::VeryVerbose
        } else if verbose_count == 1 {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::VeryVerbose => LevelFilter::Debug,
        }
    }
}

/// Severity label printed in log lines.
pub fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARNING",
        log::Level::Info => "INFO",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

/// Format one record the way every mi-agent log line looks.
pub fn format_line(timestamp: &str, target: &str, level: log::Level, message: &str) -> String {
    format!("{} - {} - {} - {}", timestamp, target, level_label(level), message)
}

fn builder(verbosity: Verbosity) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(verbosity.level_filter())
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
            writeln!(
                buf,
                "{}",
                format_line(
                    &timestamp,
                    record.target(),
                    record.level(),
                    &record.args().to_string()
                )
            )
        });
    builder
}

/// Install the global logger. Can only succeed once per process.
pub fn init_logging(verbosity: Verbosity) -> Result<()> {
    builder(verbosity)
        .try_init()
        .context("Logging was already initialized")?;

    log::debug!("Logging initialized at {}", verbosity.level_filter());
    Ok(())
}
