//! Leveled logging.
//!
//! The logger is a plain component: constructed once at startup from the
//! configured level and handed explicitly to whatever needs it (router,
//! connection lifecycle, listener loop). It is observational only — it
//! never fails and is never consulted for control flow.

use std::fmt;
use std::time::SystemTime;

use log::{Level, LevelFilter};

use crate::date;

/// A leveled logger writing timestamped lines to stderr.
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    /// Create a logger emitting records at or below `level`.
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Log at the info level.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    /// Log at the error level.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    /// Log at the debug level.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if level <= self.level {
            eprintln!(
                "[{}] [{}] {}",
                date::fmt_rfc3339(SystemTime::now()),
                level,
                args
            );
        }
    }
}
