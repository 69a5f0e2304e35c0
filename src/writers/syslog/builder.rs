use super::{SyslogConnection, SyslogFacility, SyslogWriter};
use crate::{formats::syslog_format, FormatFunction};

#[allow(clippy::module_name_repetitions)]
/// Builder for the `SyslogWriter`.
///
/// Is created with [`SyslogWriter::builder`].
pub struct SyslogWriterBuilder {
    syslog_connection: SyslogConnection,
    syslog_facility: SyslogFacility,
    format: FormatFunction,
}
impl SyslogWriterBuilder {
    #[must_use]
    pub(super) fn new(syslog: SyslogConnection) -> SyslogWriterBuilder {
        SyslogWriterBuilder {
            syslog_connection: syslog,
            syslog_facility: SyslogFacility::default(),
            format: syslog_format,
        }
    }

    /// The facility for all messages; default is [`SyslogFacility::User`].
    #[must_use]
    pub fn facility(mut self, facility: SyslogFacility) -> Self {
        self.syslog_facility = facility;
        self
    }

    /// Use the given format function to write the message part of the syslog entries.
    ///
    /// By default, [`syslog_format`](crate::syslog_format) is used.
    /// The format function gets no timestamp format, the daemon adds the time.
    #[must_use]
    pub fn format(mut self, format: FormatFunction) -> Self {
        self.format = format;
        self
    }

    /// Returns a boxed instance of `SyslogWriter`.
    #[must_use]
    pub fn build(self) -> Box<SyslogWriter> {
        Box::new(SyslogWriter::new(
            self.syslog_facility,
            self.syslog_connection,
            self.format,
        ))
    }
}
