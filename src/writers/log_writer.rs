use crate::Record;
use std::io;

/// Writes records to a single log output.
///
/// A `LogWriter` is what the format selector hands out and what the
/// [`LoggingContext`](crate::LoggingContext) dispatches to.
/// Implementations must be usable from many threads at once.
pub trait LogWriter: Sync + Send {
    /// Writes out a single record.
    ///
    /// # Errors
    ///
    /// Formatting errors are reported with [`std::io::ErrorKind::InvalidData`],
    /// everything else is an error of the underlying output.
    fn write(&self, record: &Record) -> io::Result<()>;

    /// Flushes any buffered records.
    ///
    /// # Errors
    ///
    /// Errors of the underlying output.
    fn flush(&self) -> io::Result<()>;

    /// Cleanup when the writer is being replaced or the program ends.
    ///
    /// The default implementation flushes and reports a failure on stderr.
    fn shutdown(&self) {
        if let Err(e) = self.flush() {
            crate::util::eprint_err(crate::util::ErrorCode::Flush, "flushing on shutdown failed", &e);
        }
    }
}
