//! Delivery of records to the local syslog daemon.
//!
//! Each record becomes one message `<PRI>message\0`, where `PRI` combines the
//! [`SyslogFacility`] with the [`SyslogSeverity`] derived from the record's severity.
//! Timestamps and host names are left to the daemon.
mod builder;
mod connection;
mod facility;
mod severity;
mod syslog_connection;
mod writer;

#[allow(clippy::module_name_repetitions)]
pub use self::{
    builder::SyslogWriterBuilder,
    facility::SyslogFacility,
    severity::SyslogSeverity,
    syslog_connection::{SyslogConnection, DEFAULT_UDP_SERVER, DEV_LOG},
    writer::SyslogWriter,
};
