use crate::{
    formats::DateFormat,
    logger::{DEFAULT_BUFFER_SIZE, DEFAULT_FLUSH_LEVEL},
    writers::SyslogFacility,
    LogFormat, PrettyLogError, Severity,
};
use serde::de::{Deserialize, Deserializer, Error as _};
use serde_derive::Deserialize;
use std::path::Path;

/// The configuration surface of `prettylog`, e.g. for a section in a configuration file.
///
/// All fields are optional when deserializing:
///
/// ```toml
/// level = "debug"          # level name, or number
/// format = "json"          # stream, color, json, or syslog
/// buffered = true
/// buffer_size = 100        # positive
/// flush_level = "warning"
/// date_format = "%H:%M:%S" # pattern; true for the format's default; false for none
/// syslog_facility = "local0"
/// ```
///
/// Use it with [`basic_config`](crate::basic_config) or [`Logger::from_config`](crate::Logger::from_config).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Minimum severity; default is `info`.
    pub level: Severity,
    /// Output format; default is `color`.
    pub format: LogFormat,
    /// Whether to buffer; default is `false`.
    pub buffered: bool,
    /// Records per batch when buffering; default is 1024.
    pub buffer_size: usize,
    /// Severity that makes the buffer write out immediately; default is `error`.
    pub flush_level: Severity,
    /// Timestamp control; default is [`DateFormat::Unset`].
    pub date_format: DateFormat,
    /// Facility of the `syslog` format; default is `user`.
    pub syslog_facility: SyslogFacility,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Severity::INFO,
            format: LogFormat::default(),
            buffered: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            flush_level: DEFAULT_FLUSH_LEVEL,
            date_format: DateFormat::Unset,
            syslog_facility: SyslogFacility::default(),
        }
    }
}

/// Name of the environment variable for [`LogConfig::level`].
pub const ENV_LEVEL: &str = "PRETTYLOG_LEVEL";
/// Name of the environment variable for [`LogConfig::format`].
pub const ENV_FORMAT: &str = "PRETTYLOG_FORMAT";
/// Name of the environment variable for [`LogConfig::buffered`].
pub const ENV_BUFFERED: &str = "PRETTYLOG_BUFFERED";
/// Name of the environment variable for [`LogConfig::buffer_size`].
pub const ENV_BUFFER_SIZE: &str = "PRETTYLOG_BUFFER_SIZE";
/// Name of the environment variable for [`LogConfig::flush_level`].
pub const ENV_FLUSH_LEVEL: &str = "PRETTYLOG_FLUSH_LEVEL";
/// Name of the environment variable for [`LogConfig::date_format`].
pub const ENV_DATE_FORMAT: &str = "PRETTYLOG_DATE_FORMAT";

impl LogConfig {
    /// Parses a configuration in TOML syntax.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::Toml`] if the text is not valid, or contains unknown keys or values.
    pub fn from_toml_str(s: &str) -> Result<Self, PrettyLogError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Reads a configuration file in TOML syntax.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::Io`] if the file cannot be read, else as [`LogConfig::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PrettyLogError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Reads the configuration from the `PRETTYLOG_*` environment variables;
    /// variables that are not set leave the default in place.
    ///
    /// `PRETTYLOG_DATE_FORMAT` takes a pattern, `true` for the format's default,
    /// or `false` (or an empty value) to disable timestamps.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::Env`] if a variable has an unusable value.
    pub fn from_env() -> Result<Self, PrettyLogError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F: Fn(&'static str) -> Option<String>>(
        lookup: F,
    ) -> Result<Self, PrettyLogError> {
        fn parse<T, F>(name: &'static str, value: &str, f: F) -> Result<T, PrettyLogError>
        where
            F: FnOnce(&str) -> Option<T>,
        {
            f(value).ok_or_else(|| PrettyLogError::Env {
                name,
                value: value.to_string(),
            })
        }

        let mut config = Self::default();
        if let Some(v) = lookup(ENV_LEVEL) {
            config.level = parse(ENV_LEVEL, &v, |v| v.parse().ok())?;
        }
        if let Some(v) = lookup(ENV_FORMAT) {
            config.format = parse(ENV_FORMAT, &v, |v| v.parse().ok())?;
        }
        if let Some(v) = lookup(ENV_BUFFERED) {
            config.buffered = parse(ENV_BUFFERED, &v, parse_bool)?;
        }
        if let Some(v) = lookup(ENV_BUFFER_SIZE) {
            config.buffer_size = parse(ENV_BUFFER_SIZE, &v, |v| {
                v.trim().parse().ok().filter(|size| *size > 0)
            })?;
        }
        if let Some(v) = lookup(ENV_FLUSH_LEVEL) {
            config.flush_level = parse(ENV_FLUSH_LEVEL, &v, |v| v.parse().ok())?;
        }
        if let Some(v) = lookup(ENV_DATE_FORMAT) {
            config.date_format = match parse_bool(&v) {
                Some(true) => DateFormat::FormatDefault,
                Some(false) => DateFormat::Disabled,
                None if v.is_empty() => DateFormat::Disabled,
                None => DateFormat::Pattern(v),
            };
        }
        Ok(config)
    }

    fn validate(self) -> Result<Self, PrettyLogError> {
        if self.buffer_size == 0 {
            Err(PrettyLogError::InvalidBufferSize)
        } else {
            Ok(self)
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameOrNumber {
    Name(String),
    Number(u8),
}

impl<'de> Deserialize<'de> for Severity {
    /// Accepts level names and numbers.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NameOrNumber::deserialize(deserializer)? {
            NameOrNumber::Name(name) => name.parse().map_err(D::Error::custom),
            NameOrNumber::Number(value) => Ok(Severity::new(value)),
        }
    }
}

impl<'de> Deserialize<'de> for LogFormat {
    /// Accepts format names and their numeric values.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NameOrNumber::deserialize(deserializer)? {
            NameOrNumber::Name(name) => name.parse().map_err(D::Error::custom),
            NameOrNumber::Number(value) => LogFormat::try_from(value).map_err(D::Error::custom),
        }
    }
}

impl<'de> Deserialize<'de> for SyslogFacility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatternOrSwitch {
    Switch(bool),
    Pattern(String),
}

impl<'de> Deserialize<'de> for DateFormat {
    /// Accepts `true`, `false`, or a pattern.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PatternOrSwitch::deserialize(deserializer)? {
            PatternOrSwitch::Switch(true) => DateFormat::FormatDefault,
            PatternOrSwitch::Switch(false) => DateFormat::Disabled,
            PatternOrSwitch::Pattern(pattern) => DateFormat::Pattern(pattern),
        })
    }
}
