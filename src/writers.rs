//! The outputs that records are written to.
//!
//! Every output implements [`LogWriter`]:
//!
//! * [`StreamWriter`] writes one line per record to a [`Destination`];
//!   it serves the `stream`, `color`, and `json` formats.
//! * [`SyslogWriter`] sends every record as one message to the syslog daemon.
//! * [`BufferedWriter`] wraps any other writer and hands records over in batches.
//!
//! Usually you don't create writers yourself, [`Logger`](crate::Logger) does it for you.
//! They can be used directly with a [`LoggingContext`](crate::LoggingContext), though:
//!
//! ```rust
//! use prettylog::{
//!     stream_format,
//!     writers::{Destination, MemorySink, StreamWriter},
//!     LoggingContext, Record, Severity,
//! };
//!
//! let sink = MemorySink::new();
//! let context = LoggingContext::new();
//! context.install(
//!     Box::new(StreamWriter::new(Destination::Memory(sink.clone()), stream_format, None)),
//!     Severity::INFO,
//! );
//! context.emit(&Record::builder().template("hello").build()).unwrap();
//! assert_eq!(sink.contents(), "INFO:root:hello\n");
//! ```
mod buffered_writer;
mod destination;
mod log_writer;
mod stream_writer;
mod syslog;

pub use self::buffered_writer::BufferedWriter;
pub use self::destination::{Destination, MemorySink};
pub use self::log_writer::LogWriter;
pub use self::stream_writer::StreamWriter;
pub use self::syslog::{
    SyslogConnection, SyslogFacility, SyslogSeverity, SyslogWriter, SyslogWriterBuilder,
    DEFAULT_UDP_SERVER, DEV_LOG,
};
