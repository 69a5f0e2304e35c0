use crate::{
    util::{eprint_err, report_write_error, ErrorCode},
    LoggingContext, Record, Severity,
};
use std::sync::Arc;

/// Gives access to the configured logging, and **flushes it when the last clone is dropped**.
///
/// A `LoggerHandle` is returned from [`Logger::start`](crate::Logger::start),
/// [`Logger::start_in`](crate::Logger::start_in), and [`basic_config`](crate::basic_config).
///
/// Keep it alive until the very end of your program if you use buffering,
/// because records still held in the buffer are lost otherwise:
///
/// ```rust
/// use prettylog::{LogFormat, Logger};
/// use std::error::Error;
/// fn main() -> Result<(), Box<dyn Error>> {
///     let _logger = Logger::try_with_level("info")?
///         .format(LogFormat::Json)
///         .buffered(true)
///         .start()?;
///     // do work
///     Ok(())
/// }
/// ```
///
/// In unbuffered configurations, dropping the `LoggerHandle` has no effect and then
/// you can safely ignore it.
#[derive(Clone)]
pub struct LoggerHandle(Arc<HandleInner>);

struct HandleInner {
    context: Arc<LoggingContext>,
}
impl Drop for HandleInner {
    fn drop(&mut self) {
        if let Err(e) = self.context.flush() {
            eprint_err(ErrorCode::Flush, "flushing on drop failed", &e);
        }
    }
}

impl LoggerHandle {
    pub(crate) fn new(context: Arc<LoggingContext>) -> Self {
        Self(Arc::new(HandleInner { context }))
    }

    /// Writes out all buffered records.
    pub fn flush(&self) {
        if let Err(e) = self.0.context.flush() {
            eprint_err(ErrorCode::Flush, "flushing failed", &e);
        }
    }

    /// Writes out all buffered records and removes the writer;
    /// subsequent records are dropped until logging is configured again.
    pub fn shutdown(&self) {
        self.0.context.uninstall();
    }

    /// Sends a record through the configured writer, bypassing the `log` facade.
    ///
    /// Records below the minimum severity are dropped silently;
    /// failures are reported on stderr, like for records from the `log` macros.
    pub fn log(&self, record: &Record) {
        if let Err(e) = self.0.context.emit(record) {
            report_write_error(&e);
        }
    }

    /// The configured minimum severity, or `None` after shutdown.
    #[must_use]
    pub fn min_severity(&self) -> Option<Severity> {
        self.0.context.min_severity()
    }

    /// Whether a writer is installed, i.e., whether logging is active.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.0.context.is_installed()
    }

    /// The context this handle belongs to.
    #[must_use]
    pub fn context(&self) -> &Arc<LoggingContext> {
        &self.0.context
    }
}
