use crate::Severity;

/// Syslog severity.
///
/// See [RFC 5424](https://datatracker.ietf.org/doc/rfc5424).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum SyslogSeverity {
    /// System is unusable.
    Emergency = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Critical = 2,
    /// Error conditions.
    Error = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

impl From<Severity> for SyslogSeverity {
    /// Named severities map to their counterpart, trace to debug;
    /// unnamed values are sent as warnings.
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::CRITICAL => Self::Critical,
            Severity::ERROR => Self::Error,
            Severity::WARNING => Self::Warning,
            Severity::INFO => Self::Info,
            Severity::DEBUG | Severity::TRACE => Self::Debug,
            _ => Self::Warning,
        }
    }
}
