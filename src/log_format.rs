use crate::{
    formats::{color_format, stream_format, syslog_format, DateFormat},
    json::json_format,
    util::{eprint_msg, ErrorCode},
    writers::{Destination, LogWriter, StreamWriter, SyslogConnection, SyslogFacility, SyslogWriter},
    FormatFunction, PrettyLogError,
};
use std::{fmt, str::FromStr};

/// The supported output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogFormat {
    /// Plain lines `LEVELNAME:name:message` on stderr.
    Stream = 0,
    /// Colored lines with timestamp and thread name on stderr.
    #[default]
    Color = 1,
    /// One JSON document per line on stdout.
    Json = 2,
    /// Messages to the local syslog daemon.
    Syslog = 3,
}

impl LogFormat {
    /// The names of the supported formats, in the order of their numeric values.
    pub const CHOICES: [&'static str; 4] = ["stream", "color", "json", "syslog"];

    /// Returns [`LogFormat::CHOICES`], e.g. for the help text of a command line option.
    #[must_use]
    pub fn choices() -> &'static [&'static str] {
        &Self::CHOICES
    }

    /// The lower-case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::CHOICES[self as usize]
    }

    /// Where the format writes to if no destination is given explicitly.
    ///
    /// The syslog has no destination of this kind.
    #[must_use]
    pub fn default_destination(self) -> Destination {
        match self {
            Self::Json => Destination::Stdout,
            Self::Stream | Self::Color | Self::Syslog => Destination::Stderr,
        }
    }

    /// The format function that renders a record in this format.
    #[must_use]
    pub fn format_function(self) -> FormatFunction {
        match self {
            Self::Stream => stream_format,
            Self::Color => color_format,
            Self::Json => json_format,
            Self::Syslog => syslog_format,
        }
    }

    /// Creates a ready-to-use writer for this format, with the default destination
    /// and syslog facility.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::InvalidDateFormat`] for invalid date patterns,
    /// [`PrettyLogError::Io`] if the syslog cannot be reached.
    pub fn create_writer(
        self,
        date_format: &DateFormat,
    ) -> Result<Box<dyn LogWriter>, PrettyLogError> {
        self.create_writer_with(date_format, None, SyslogFacility::default())
    }

    pub(crate) fn create_writer_with(
        self,
        date_format: &DateFormat,
        destination: Option<Destination>,
        facility: SyslogFacility,
    ) -> Result<Box<dyn LogWriter>, PrettyLogError> {
        let timestamp = date_format.resolve(self)?;
        match self {
            Self::Syslog => {
                if matches!(date_format, DateFormat::Pattern(p) if !p.is_empty()) {
                    eprint_msg(
                        ErrorCode::DateFormat,
                        "Can not apply \"date_format\" for syslog",
                    );
                }
                Ok(SyslogWriter::builder(SyslogConnection::try_default()?)
                    .facility(facility)
                    .build())
            }
            Self::Stream | Self::Color | Self::Json => Ok(Box::new(StreamWriter::new(
                destination.unwrap_or_else(|| self.default_destination()),
                self.format_function(),
                timestamp,
            ))),
        }
    }
}

/// Creates the writer for the format with the given name.
///
/// This is the format selector: `format_name` is one of [`LogFormat::CHOICES`]
/// (case does not matter).
///
/// # Errors
///
/// [`PrettyLogError::UnsupportedFormat`] for unknown names; see also [`LogFormat::create_writer`].
pub fn build_writer(
    format_name: &str,
    date_format: &DateFormat,
) -> Result<Box<dyn LogWriter>, PrettyLogError> {
    format_name.parse::<LogFormat>()?.create_writer(date_format)
}

impl FromStr for LogFormat {
    type Err = PrettyLogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stream" => Ok(Self::Stream),
            "color" => Ok(Self::Color),
            "json" => Ok(Self::Json),
            "syslog" => Ok(Self::Syslog),
            _ => Err(PrettyLogError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<u8> for LogFormat {
    type Error = PrettyLogError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Stream),
            1 => Ok(Self::Color),
            2 => Ok(Self::Json),
            3 => Ok(Self::Syslog),
            _ => Err(PrettyLogError::UnsupportedFormat(value.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::{build_writer, LogFormat};
    use crate::{
        formats::DateFormat,
        writers::{Destination, MemorySink},
        PrettyLogError, Record, Severity,
    };

    #[test]
    fn names_and_values() {
        assert_eq!(LogFormat::choices(), &["stream", "color", "json", "syslog"]);
        for (value, name) in LogFormat::CHOICES.iter().enumerate() {
            let format = LogFormat::try_from(u8::try_from(value).unwrap()).unwrap();
            assert_eq!(format as usize, value);
            assert_eq!(format.to_string(), *name);
            assert_eq!(name.parse::<LogFormat>().unwrap(), format);
        }
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!(LogFormat::try_from(4).is_err());
    }

    #[test]
    fn unknown_format_is_not_implemented() {
        match build_writer("xml", &DateFormat::Unset) {
            Err(PrettyLogError::UnsupportedFormat(name)) => assert_eq!(name, "xml"),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("xml must not be supported"),
        }
    }

    #[test]
    fn invalid_date_format_fails() {
        assert!(matches!(
            build_writer("stream", &DateFormat::Pattern("%!".to_string())),
            Err(PrettyLogError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn empty_date_format_is_accepted() {
        for name in LogFormat::CHOICES {
            build_writer(name, &DateFormat::Pattern(String::new()))
                .unwrap_or_else(|e| panic!("format {name} failed: {e}"));
        }
    }

    #[test]
    fn all_formats_can_be_created() {
        for name in LogFormat::CHOICES {
            build_writer(name, &DateFormat::Unset)
                .unwrap_or_else(|e| panic!("format {name} failed: {e}"));
        }
        // the date format is ignored, with a warning
        build_writer("syslog", &DateFormat::Pattern("%H:%M".to_string())).unwrap();
    }

    #[test]
    fn destination_override() {
        let sink = MemorySink::new();
        let writer = LogFormat::Stream
            .create_writer_with(
                &DateFormat::Disabled,
                Some(Destination::Memory(sink.clone())),
                crate::writers::SyslogFacility::User,
            )
            .unwrap();
        writer
            .write(
                &Record::builder()
                    .severity(Severity::WARNING)
                    .logger("sel")
                    .template("careful")
                    .build(),
            )
            .unwrap();
        assert_eq!(sink.contents(), "WARNING:sel:careful\n");
    }
}
