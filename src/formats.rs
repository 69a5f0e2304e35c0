#[cfg(feature = "colors")]
use crate::Severity;
use crate::{LogFormat, PrettyLogError, Record};
use chrono::format::{Item, StrftimeItems};
#[cfg(feature = "colors")]
use nu_ansi_term::{Color, Style};
use std::io::Write;

/// Function type for format functions.
///
/// A format function writes the given record as a single log line (without the
/// trailing newline) into the given writer. If a timestamp format is given,
/// the line should contain the record's creation time in this format.
pub type FormatFunction = fn(
    write: &mut dyn Write,
    record: &Record,
    timestamp: Option<&TimestampFormat>,
) -> Result<(), std::io::Error>;

/// The date format option of the configuration.
///
/// Distinguishes between not saying anything about the timestamp (`Unset`),
/// explicitly switching it off (`Disabled`), asking for the default of the chosen
/// log format (`FormatDefault`), and providing a strftime-style pattern.
///
/// See [`DateFormat::resolve`] for what each variant means for each log format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// Use what the log format does by default (only `color` shows a timestamp then).
    #[default]
    Unset,
    /// Don't show a timestamp.
    Disabled,
    /// Show a timestamp, in the log format's own default layout.
    FormatDefault,
    /// Show a timestamp in the given strftime-style layout;
    /// `%s` and `epoch` stand for the raw number of seconds since the epoch.
    Pattern(String),
}

/// The resolved layout of timestamps in log lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Fractional seconds since the epoch, as a number.
    Epoch,
    /// strftime-style pattern.
    Pattern(String),
}

const COLOR_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const STREAM_DATE_FORMAT: &str = "[%Y-%m-%d %H:%M:%S]";

impl DateFormat {
    /// Determines the timestamp layout for the given log format:
    ///
    /// |                 | `stream`                | `color`             | `json` | `syslog` |
    /// |-----------------|-------------------------|---------------------|--------|----------|
    /// | `Unset`         | -                       | `%Y-%m-%d %H:%M:%S` | -      | -        |
    /// | `Disabled`      | -                       | -                   | -      | -        |
    /// | `FormatDefault` | `[%Y-%m-%d %H:%M:%S]`   | `%Y-%m-%d %H:%M:%S` | epoch  | -        |
    /// | `Pattern(p)`    | `p`                     | `p`                 | `p`    | -        |
    ///
    /// The syslog supplies its own timestamps. An empty pattern means no timestamp,
    /// like `Disabled`.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::InvalidDateFormat`] if the pattern is not a valid strftime pattern.
    pub fn resolve(&self, format: LogFormat) -> Result<Option<TimestampFormat>, PrettyLogError> {
        match (self, format) {
            (Self::Pattern(pattern), _) if pattern.is_empty() => Ok(None),
            (_, LogFormat::Syslog)
            | (Self::Disabled, _)
            | (Self::Unset, LogFormat::Stream | LogFormat::Json) => Ok(None),
            (Self::Unset | Self::FormatDefault, LogFormat::Color) => {
                Ok(Some(TimestampFormat::Pattern(COLOR_DATE_FORMAT.to_string())))
            }
            (Self::FormatDefault, LogFormat::Stream) => {
                Ok(Some(TimestampFormat::Pattern(STREAM_DATE_FORMAT.to_string())))
            }
            (Self::FormatDefault, _) => Ok(Some(TimestampFormat::Epoch)),
            (Self::Pattern(pattern), _) => TimestampFormat::parse(pattern).map(Some),
        }
    }
}

impl TimestampFormat {
    /// Parses a pattern, recognizing the epoch sentinels `%s` and `epoch`.
    ///
    /// # Errors
    ///
    /// [`PrettyLogError::InvalidDateFormat`] if the pattern is not a valid strftime pattern.
    pub fn parse(pattern: &str) -> Result<Self, PrettyLogError> {
        if pattern == "%s" || pattern == "epoch" {
            Ok(Self::Epoch)
        } else if pattern.is_empty()
            || StrftimeItems::new(pattern).any(|item| item == Item::Error)
        {
            Err(PrettyLogError::InvalidDateFormat(pattern.to_string()))
        } else {
            Ok(Self::Pattern(pattern.to_string()))
        }
    }

    /// Writes the record's creation time in this format.
    ///
    /// # Errors
    ///
    /// `std::io::Error` from writing to the given writer.
    pub fn write(&self, w: &mut dyn Write, record: &Record) -> Result<(), std::io::Error> {
        match self {
            Self::Epoch => write!(w, "{}", record.created_epoch()),
            Self::Pattern(pattern) => write!(w, "{}", record.created().format(pattern)),
        }
    }
}

/// A logline-formatter that produces log lines like <br>
/// ```WARNING:my_prog::some_module:Task successfully read from conf.json```,
/// optionally prefixed with a timestamp.
///
/// If the record carries an error, its stack trace follows on the next lines.
///
/// # Errors
///
/// See `std::write`
pub fn stream_format(
    w: &mut dyn Write,
    record: &Record,
    timestamp: Option<&TimestampFormat>,
) -> Result<(), std::io::Error> {
    if let Some(timestamp) = timestamp {
        timestamp.write(w, record)?;
        w.write_all(b" ")?;
    }
    write!(
        w,
        "{}:{}:{}",
        record.severity(),
        record.logger(),
        record.message()
    )?;
    write_stack_trace(w, record)
}

/// A colored logline-formatter that produces log lines like <br>
/// <code>
/// <span style="font-weight:bold">2016-01-13 15:25:01</span>
/// <span style="color:blue">[T:main]</span>
/// <span style="color:yellow">WARNING:my_prog::some_module</span>:
/// <span style="font-weight:bold">Task failed</span>
/// </code>
///
/// The level name and logger are colored by severity (debug cyan, info green,
/// warning yellow, error red, critical red on white), and the message of warnings and
/// more severe records is bold.
///
/// Without the feature `colors`, the same layout is written without any colors.
///
/// # Errors
///
/// See `std::write`
pub fn color_format(
    w: &mut dyn Write,
    record: &Record,
    timestamp: Option<&TimestampFormat>,
) -> Result<(), std::io::Error> {
    #[cfg(feature = "colors")]
    {
        if let Some(timestamp) = timestamp {
            let mut ts = Vec::<u8>::with_capacity(32);
            timestamp.write(&mut ts, record)?;
            write!(
                w,
                "{} ",
                Style::new()
                    .bold()
                    .fg(Color::White)
                    .on(Color::Black)
                    .paint(String::from_utf8_lossy(&ts))
            )?;
        }
        let (level_style, message_style) = styles(record.severity());
        write!(
            w,
            "{} {}: {}",
            Color::Blue.paint(format!("[T:{}]", record.thread_name())),
            level_style.paint(format!("{}:{}", record.severity(), record.logger())),
            message_style.paint(record.message()),
        )?;
    }
    #[cfg(not(feature = "colors"))]
    {
        if let Some(timestamp) = timestamp {
            timestamp.write(w, record)?;
            w.write_all(b" ")?;
        }
        write!(
            w,
            "[T:{}] {}:{}: {}",
            record.thread_name(),
            record.severity(),
            record.logger(),
            record.message()
        )?;
    }
    write_stack_trace(w, record)
}

/// Writes the message of the record, followed by its stack trace, if any.
///
/// Is used for the syslog, which adds all the rest itself.
///
/// # Errors
///
/// See `std::write`
pub fn syslog_format(
    w: &mut dyn Write,
    record: &Record,
    _timestamp: Option<&TimestampFormat>,
) -> Result<(), std::io::Error> {
    write!(w, "{}", record.message())?;
    write_stack_trace(w, record)
}

fn write_stack_trace(w: &mut dyn Write, record: &Record) -> Result<(), std::io::Error> {
    if let Some(error) = record.error() {
        write!(w, "\n{}", error.stack_trace())?;
    }
    Ok(())
}

#[cfg(feature = "colors")]
fn styles(severity: Severity) -> (Style, Style) {
    let level_style = match severity {
        Severity::DEBUG => Color::Cyan.normal(),
        Severity::INFO => Color::Green.normal(),
        Severity::WARNING => Color::Yellow.normal(),
        Severity::ERROR => Color::Red.normal(),
        Severity::CRITICAL => Color::Red.on(Color::White),
        _ => Style::new(),
    };
    let message_style = if matches!(
        severity,
        Severity::WARNING | Severity::ERROR | Severity::CRITICAL
    ) {
        Style::new().bold()
    } else {
        Style::new()
    };
    (level_style, message_style)
}
