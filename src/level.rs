//! Syslog-style severity levels used by GELF.
//!
//! GELF carries severities as integers where lower values are more severe.
//! [`GelfLevel`] names the eight conventional syslog levels, while the
//! transport itself accepts any `u8` so front-ends with their own numbering
//! keep working.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum GelfLevel {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Informational = 6,
    Debug = 7,
}

/// Error returned when a level name or number is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseLevelError {
    #[error("unknown GELF level name: {0}")]
    UnknownName(String),
    #[error("GELF level out of range: {0}")]
    OutOfRange(u8),
}

impl Default for GelfLevel {
    fn default() -> Self {
        Self::Informational
    }
}

impl fmt::Display for GelfLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GelfLevel::Emergency => "EMERGENCY",
            GelfLevel::Alert => "ALERT",
            GelfLevel::Critical => "CRITICAL",
            GelfLevel::Error => "ERROR",
            GelfLevel::Warning => "WARNING",
            GelfLevel::Notice => "NOTICE",
            GelfLevel::Informational => "INFO",
            GelfLevel::Debug => "DEBUG",
        };
        f.write_str(s)
    }
}

impl FromStr for GelfLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMERG" | "EMERGENCY" => Ok(Self::Emergency),
            "ALERT" => Ok(Self::Alert),
            "CRIT" | "CRITICAL" => Ok(Self::Critical),
            "ERR" | "ERROR" => Ok(Self::Error),
            "WARN" | "WARNING" => Ok(Self::Warning),
            "NOTICE" => Ok(Self::Notice),
            "INFO" | "INFORMATIONAL" => Ok(Self::Informational),
            "DEBUG" => Ok(Self::Debug),
            _ => Err(ParseLevelError::UnknownName(s.to_owned())),
        }
    }
}

impl From<GelfLevel> for u8 {
    fn from(level: GelfLevel) -> Self {
        level as u8
    }
}

impl TryFrom<u8> for GelfLevel {
    type Error = ParseLevelError;

    fn try_from(value: u8) -> Result<Self, ParseLevelError> {
        match value {
            0 => Ok(Self::Emergency),
            1 => Ok(Self::Alert),
            2 => Ok(Self::Critical),
            3 => Ok(Self::Error),
            4 => Ok(Self::Warning),
            5 => Ok(Self::Notice),
            6 => Ok(Self::Informational),
            7 => Ok(Self::Debug),
            other => Err(ParseLevelError::OutOfRange(other)),
        }
    }
}

impl GelfLevel {
    /// Numeric severity sent on the wire.
    pub fn severity(self) -> u8 {
        self.into()
    }

    pub fn parse_or_info(s: &str) -> Self {
        s.parse().unwrap_or(Self::Informational)
    }
}
