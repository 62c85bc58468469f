//! Severity levels and the threshold check shared by loggers and handlers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::LogError;

/// Severity of a log event.
///
/// The derived ordering follows the numeric rank, so `Level::Debug < Level::Error`.
/// `NotSet` is a sentinel meaning "no filtering configured"; see [`is_enabled`]
/// for how it behaves as a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    NotSet,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Real severities in ascending order (without the `NotSet` sentinel).
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn rank(self) -> u8 {
        match self {
            Level::NotSet => 0,
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::NotSet => "NOTSET",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Rank lookup by name.
    pub fn rank_of(name: &str) -> Result<u8, LogError> {
        name.parse::<Level>().map(Level::rank)
    }
}

/// Whether a record at `record` passes a `threshold`.
///
/// A `NotSet` threshold rejects everything, so auto-created loggers stay
/// silent until configured. A `NotSet` record has no severity and never passes.
pub fn is_enabled(record: Level, threshold: Level) -> bool {
    if threshold == Level::NotSet || record == Level::NotSet {
        return false;
    }
    record.rank() >= threshold.rank()
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOTSET" => Ok(Level::NotSet),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            other => Err(LogError::InvalidLevel(other.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
