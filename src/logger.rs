use crate::{
    formats::DateFormat,
    logging_context::install_global,
    writers::{BufferedWriter, Destination, LogWriter, SyslogFacility},
    LogConfig, LogFormat, LoggerHandle, LoggingContext, PrettyLogError, Severity,
};
use std::sync::Arc;

/// Default number of records a buffered writer collects before it writes them.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Default severity from which on a record makes a buffered writer write out immediately.
pub const DEFAULT_FLUSH_LEVEL: Severity = Severity::ERROR;

/// The standard entry-point for using `prettylog`.
///
/// Create a `Logger` with the minimum severity,
/// use its configuration methods, and finally call [`Logger::start`].
///
/// ## Examples
///
/// ### Use defaults only
///
/// Colored lines with timestamps on stderr, for `info` and above:
///
/// ```rust
/// use prettylog::Logger;
///
/// Logger::try_with_level("info").unwrap().start().unwrap();
/// ```
///
/// ### JSON on stdout, buffered
///
/// ```rust
/// use prettylog::{LogFormat, Logger, Severity};
///
/// let _handle = Logger::with_severity(Severity::DEBUG)
///     .format(LogFormat::Json)
///     .buffered(true)
///     .buffer_size(100)
///     .flush_level(Severity::WARNING)
///     .start()
///     .unwrap_or_else(|e| panic!("Logger initialization failed with {e}"));
/// ```
///
/// Starting again is allowed; the new configuration replaces the previous one.
#[derive(Clone, Debug)]
pub struct Logger {
    min_severity: Severity,
    format: LogFormat,
    buffered: bool,
    buffer_size: usize,
    flush_level: Severity,
    date_format: DateFormat,
    destination: Option<Destination>,
    syslog_facility: SyslogFacility,
}

/// Simple methods for influencing the behavior of the Logger.
impl Logger {
    /// Creates a `Logger` for the given level, which is a level name
    /// (`debug`, `WARNING`, ...) or a number.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::InvalidLevel`] if the level cannot be parsed.
    pub fn try_with_level<S: AsRef<str>>(level: S) -> Result<Self, PrettyLogError> {
        Ok(Self::with_severity(level.as_ref().parse()?))
    }

    /// Creates a `Logger` that writes records of at least the given severity.
    #[must_use]
    pub fn with_severity(min_severity: Severity) -> Self {
        Self {
            min_severity,
            format: LogFormat::default(),
            buffered: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            flush_level: DEFAULT_FLUSH_LEVEL,
            date_format: DateFormat::Unset,
            destination: None,
            syslog_facility: SyslogFacility::default(),
        }
    }

    /// Creates a `Logger` from a configuration value.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        Self::with_severity(config.level)
            .format(config.format)
            .buffered(config.buffered)
            .buffer_size(config.buffer_size)
            .flush_level(config.flush_level)
            .date_format(config.date_format.clone())
            .syslog_facility(config.syslog_facility)
    }

    /// The output format; default is [`LogFormat::Color`].
    #[must_use]
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the output format by name.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::UnsupportedFormat`] for unknown names.
    pub fn try_format<S: AsRef<str>>(self, format_name: S) -> Result<Self, PrettyLogError> {
        Ok(self.format(format_name.as_ref().parse()?))
    }

    /// Collect records in memory and write them in batches; default is `false`.
    #[must_use]
    pub fn buffered(mut self, buffered: bool) -> Self {
        self.buffered = buffered;
        self
    }

    /// Number of records after which a buffered writer writes; default is
    /// [`DEFAULT_BUFFER_SIZE`]. Must be positive.
    #[must_use]
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Severity from which on a buffered writer writes immediately; default is
    /// [`DEFAULT_FLUSH_LEVEL`].
    #[must_use]
    pub fn flush_level(mut self, flush_level: Severity) -> Self {
        self.flush_level = flush_level;
        self
    }

    /// Controls the timestamps; see [`DateFormat::resolve`] for the effect per format.
    #[must_use]
    pub fn date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    /// Overrides where the `stream`, `color`, and `json` formats write to.
    #[must_use]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    /// The facility used by the `syslog` format; default is [`SyslogFacility::User`].
    #[must_use]
    pub fn syslog_facility(mut self, facility: SyslogFacility) -> Self {
        self.syslog_facility = facility;
        self
    }

    /// Creates the configured writer, including the buffering wrapper if requested,
    /// without installing it anywhere.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::InvalidBufferSize`] if buffering is requested with size 0,
    /// [`PrettyLogError::InvalidDateFormat`] for invalid date patterns,
    /// [`PrettyLogError::Io`] if the syslog cannot be reached.
    pub fn build(&self) -> Result<Box<dyn LogWriter>, PrettyLogError> {
        if self.buffered && self.buffer_size == 0 {
            return Err(PrettyLogError::InvalidBufferSize);
        }
        let writer = self.format.create_writer_with(
            &self.date_format,
            self.destination.clone(),
            self.syslog_facility,
        )?;
        Ok(if self.buffered {
            Box::new(BufferedWriter::new(
                writer,
                self.buffer_size,
                self.flush_level,
            ))
        } else {
            writer
        })
    }

    /// Installs the configured writer behind the `log` facade, replacing whatever
    /// was configured before.
    ///
    /// On failure, the previous configuration stays in place.
    ///
    /// # Errors
    ///
    /// See [`Logger::build`]; [`PrettyLogError::Log`] if another logger
    /// is already registered with the `log` facade.
    pub fn start(self) -> Result<LoggerHandle, PrettyLogError> {
        let writer = self.build()?;
        let context = install_global(writer, self.min_severity)?;
        Ok(LoggerHandle::new(context))
    }

    /// Installs the configured writer in the given context rather than the global one.
    ///
    /// # Errors
    ///
    /// See [`Logger::build`].
    pub fn start_in(self, context: Arc<LoggingContext>) -> Result<LoggerHandle, PrettyLogError> {
        context.install(self.build()?, self.min_severity);
        Ok(LoggerHandle::new(context))
    }
}

/// Configures logging from a configuration value; a shortcut for
/// `Logger::from_config(config).start()`.
///
/// Calling it again replaces the previous configuration.
///
/// # Errors
///
/// See [`Logger::start`].
pub fn basic_config(config: &LogConfig) -> Result<LoggerHandle, PrettyLogError> {
    Logger::from_config(config).start()
}
