use thiserror::Error;

/// Describes errors in the configuration of `prettylog`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PrettyLogError {
    /// The requested log format does not exist ("not implemented").
    #[error("Log format '{0}' is not implemented; use one of stream, color, json, syslog")]
    UnsupportedFormat(String),

    /// The level is neither a known level name nor a number.
    #[error("Invalid level: '{0}'")]
    InvalidLevel(String),

    /// The date format is not a valid strftime-style pattern.
    #[error("Invalid date format: '{0}'")]
    InvalidDateFormat(String),

    /// The name is not a known syslog facility.
    #[error("Invalid syslog facility: '{0}'")]
    InvalidFacility(String),

    /// The buffer size must be positive.
    #[error("The buffer size must be positive")]
    InvalidBufferSize,

    /// Opening the output failed.
    #[error("Opening the output failed")]
    Io(#[from] std::io::Error),

    /// Installing the logger in the `log` facade failed, because some other logger
    /// was installed already.
    #[error("Logger initialization failed")]
    Log(#[from] log::SetLoggerError),

    /// The configuration text cannot be parsed.
    #[error("Parsing the configuration failed")]
    Toml(#[from] toml::de::Error),

    /// An environment variable holds an unusable value.
    #[error("Environment variable {name} has an unusable value '{value}'")]
    Env {
        /// Name of the variable.
        name: &'static str,
        /// Its value.
        value: String,
    },

    /// Some mutex or `RwLock` is poisoned.
    #[error("Some mutex is poisoned")]
    Poison,
}

/// Errors of the JSON encoder.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EncodeError {
    /// A mapped field could not be coerced to its declared type.
    #[error("Field '{field}' cannot be coerced to {expected}")]
    Coercion {
        /// The output key of the field.
        field: &'static str,
        /// The declared type.
        expected: &'static str,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    Serialize(#[from] serde_json::Error),
}

impl From<EncodeError> for std::io::Error {
    fn from(err: EncodeError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err)
    }
}
