use crate::PrettyLogError;
use log::{Level, LevelFilter};
use std::{fmt, str::FromStr};

/// Ordinal importance of a record.
///
/// Uses the classic numeric scale, where a higher number means a more severe record:
///
/// | name       | value |
/// |------------|-------|
/// | `NOTSET`   | 0     |
/// | `TRACE`    | 5     |
/// | `DEBUG`    | 10    |
/// | `INFO`     | 20    |
/// | `WARNING`  | 30    |
/// | `ERROR`    | 40    |
/// | `CRITICAL` | 50    |
///
/// Any other value in between is allowed, too; it sorts accordingly, but has no name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(u8);

impl Severity {
    /// No severity at all; as a minimum severity it lets everything pass.
    pub const NOTSET: Self = Self(0);
    /// Finer than debug; only reachable from `log::trace!`.
    pub const TRACE: Self = Self(5);
    /// Diagnostic output.
    pub const DEBUG: Self = Self(10);
    /// Normal operation.
    pub const INFO: Self = Self(20);
    /// Something unexpected, but the program continues.
    pub const WARNING: Self = Self(30);
    /// Alias of [`Severity::WARNING`].
    pub const WARN: Self = Self::WARNING;
    /// An operation failed.
    pub const ERROR: Self = Self(40);
    /// The program may not be able to continue.
    pub const CRITICAL: Self = Self(50);
    /// Alias of [`Severity::CRITICAL`].
    pub const FATAL: Self = Self::CRITICAL;

    /// Creates a severity from its numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// The numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Upper-case name as used in plain and colored log lines,
    /// e.g. `WARNING`, or `Level 25` for unnamed values.
    #[must_use]
    pub fn name(self) -> String {
        match self.known_name() {
            Some(name) => name.to_string(),
            None => format!("Level {}", self.0),
        }
    }

    fn known_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("NOTSET"),
            5 => Some("TRACE"),
            10 => Some("DEBUG"),
            20 => Some("INFO"),
            30 => Some("WARNING"),
            40 => Some("ERROR"),
            50 => Some("CRITICAL"),
            _ => None,
        }
    }

    /// The most verbose `log::LevelFilter` that can still produce records of this
    /// severity or above.
    ///
    /// Is used to pre-filter in the `log` macros; the exact check happens later.
    #[must_use]
    pub fn to_level_filter(self) -> LevelFilter {
        match self.0 {
            0..=5 => LevelFilter::Trace,
            6..=10 => LevelFilter::Debug,
            11..=20 => LevelFilter::Info,
            21..=30 => LevelFilter::Warn,
            _ => LevelFilter::Error,
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Self::ERROR,
            Level::Warn => Self::WARNING,
            Level::Info => Self::INFO,
            Level::Debug => Self::DEBUG,
            Level::Trace => Self::TRACE,
        }
    }
}

impl From<u8> for Severity {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Severity {
    type Err = PrettyLogError;

    /// Accepts the symbolic names (case-insensitive, including the aliases `warn` and
    /// `fatal`) and plain numbers from 0 to 255.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u8>() {
            return Ok(Self(value));
        }
        match s.to_ascii_lowercase().as_str() {
            "notset" => Ok(Self::NOTSET),
            "trace" => Ok(Self::TRACE),
            "debug" => Ok(Self::DEBUG),
            "info" => Ok(Self::INFO),
            "warn" | "warning" => Ok(Self::WARNING),
            "error" => Ok(Self::ERROR),
            "critical" | "fatal" => Ok(Self::CRITICAL),
            _ => Err(PrettyLogError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Severity;
    use log::{Level, LevelFilter};

    #[test]
    fn parse_names_and_numbers() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::DEBUG);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::WARNING);
        assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::WARNING);
        assert_eq!("fatal".parse::<Severity>().unwrap(), Severity::CRITICAL);
        assert_eq!(" 20 ".parse::<Severity>().unwrap(), Severity::INFO);
        assert_eq!("25".parse::<Severity>().unwrap(), Severity::new(25));
        assert!("verbose".parse::<Severity>().is_err());
        assert!("300".parse::<Severity>().is_err());
    }

    #[test]
    fn ordering_follows_numbers() {
        assert!(Severity::DEBUG < Severity::INFO);
        assert!(Severity::ERROR < Severity::CRITICAL);
        assert!(Severity::new(45) > Severity::ERROR);
        assert_eq!(Severity::FATAL, Severity::CRITICAL);
    }

    #[test]
    fn log_levels() {
        assert_eq!(Severity::from(Level::Warn), Severity::WARNING);
        assert_eq!(Severity::from(Level::Trace), Severity::TRACE);
        assert_eq!(Severity::NOTSET.to_level_filter(), LevelFilter::Trace);
        assert_eq!(Severity::INFO.to_level_filter(), LevelFilter::Info);
        assert_eq!(Severity::new(25).to_level_filter(), LevelFilter::Warn);
        assert_eq!(Severity::CRITICAL.to_level_filter(), LevelFilter::Error);
    }

    #[test]
    fn names() {
        assert_eq!(Severity::WARNING.name(), "WARNING");
        assert_eq!(Severity::new(25).to_string(), "Level 25");
    }
}
