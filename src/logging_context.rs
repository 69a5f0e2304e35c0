use crate::{
    util::{eprint_err, poison_err, report_write_error, ErrorCode},
    writers::LogWriter,
    PrettyLogError, Record, Severity,
};
use std::sync::{Arc, LazyLock, Mutex, RwLock, RwLockReadGuard};

/// Holds the currently installed writer together with the minimum severity.
///
/// Records below the minimum severity are dropped, all others go to the writer.
/// Installing a new writer replaces the previous one atomically; the previous one is
/// shut down first, so that records it still buffers are written out before
/// the new writer takes over.
///
/// The process-wide instance behind the `log` facade is managed by
/// [`Logger::start`](crate::Logger::start); further instances can be created
/// freely and driven with [`LoggingContext::emit`].
pub struct LoggingContext {
    slot: RwLock<Option<Installed>>,
}

struct Installed {
    writer: Box<dyn LogWriter>,
    min_severity: Severity,
}

impl LoggingContext {
    /// Creates a context without writer; it drops everything.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Installs `writer`, replacing and shutting down the previous one.
    pub fn install(&self, writer: Box<dyn LogWriter>, min_severity: Severity) {
        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = slot.take() {
            previous.writer.shutdown();
        }
        *slot = Some(Installed {
            writer,
            min_severity,
        });
    }

    /// Removes and shuts down the installed writer, if any.
    pub fn uninstall(&self) {
        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = slot.take() {
            previous.writer.shutdown();
        }
    }

    /// Whether a writer is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.read().is_ok_and(|slot| slot.is_some())
    }

    /// The minimum severity of the installed writer.
    #[must_use]
    pub fn min_severity(&self) -> Option<Severity> {
        self.read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|installed| installed.min_severity))
    }

    /// Whether a record of the given severity would be written.
    #[must_use]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.min_severity().is_some_and(|min| severity >= min)
    }

    /// Hands the record to the installed writer, unless it is below the minimum severity.
    ///
    /// # Errors
    ///
    /// The errors of the writer.
    pub fn emit(&self, record: &Record) -> std::io::Result<()> {
        let slot = self.read()?;
        match *slot {
            Some(ref installed) if record.severity() >= installed.min_severity => {
                installed.writer.write(record)
            }
            _ => Ok(()),
        }
    }

    /// Flushes the installed writer.
    ///
    /// # Errors
    ///
    /// The errors of the writer.
    pub fn flush(&self) -> std::io::Result<()> {
        match *self.read()? {
            Some(ref installed) => installed.writer.flush(),
            None => Ok(()),
        }
    }

    fn read(&self) -> std::io::Result<RwLockReadGuard<'_, Option<Installed>>> {
        self.slot.read().map_err(|_| poison_err("LoggingContext"))
    }
}
impl Default for LoggingContext {
    fn default() -> Self {
        Self::new()
    }
}

// The context behind the `log` facade.
pub(crate) static GLOBAL_CONTEXT: LazyLock<Arc<LoggingContext>> =
    LazyLock::new(|| Arc::new(LoggingContext::new()));

// Connects the `log` facade with the global context.
struct GlobalLogger;
impl log::Log for GlobalLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        GLOBAL_CONTEXT.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Err(e) = GLOBAL_CONTEXT.emit(&Record::from_log(record)) {
            report_write_error(&e);
        }
    }

    fn flush(&self) {
        if let Err(e) = GLOBAL_CONTEXT.flush() {
            eprint_err(ErrorCode::Flush, "flushing failed", &e);
        }
    }
}

static GLOBAL_LOGGER: GlobalLogger = GlobalLogger;

// Serializes reconfigurations of the global context, and remembers
// whether the facade is connected already.
static FACADE_CONNECTED: Mutex<bool> = Mutex::new(false);

// Installs the writer in the global context and connects the `log` facade on first use.
pub(crate) fn install_global(
    writer: Box<dyn LogWriter>,
    min_severity: Severity,
) -> Result<Arc<LoggingContext>, PrettyLogError> {
    let mut connected = FACADE_CONNECTED.lock().map_err(|_| PrettyLogError::Poison)?;
    if !*connected {
        log::set_logger(&GLOBAL_LOGGER)?;
        *connected = true;
    }
    GLOBAL_CONTEXT.install(writer, min_severity);
    log::set_max_level(min_severity.to_level_filter());
    Ok(Arc::clone(&GLOBAL_CONTEXT))
}

#[cfg(test)]
mod test {
    use super::LoggingContext;
    use crate::{
        formats::stream_format,
        writers::{BufferedWriter, Destination, MemorySink, StreamWriter},
        Record, Severity,
    };

    fn stream(sink: &MemorySink) -> Box<StreamWriter> {
        Box::new(StreamWriter::new(
            Destination::Memory(sink.clone()),
            stream_format,
            None,
        ))
    }

    fn record(severity: Severity, msg: &str) -> Record {
        Record::builder().severity(severity).logger("ctx").template(msg).build()
    }

    #[test]
    fn without_writer_nothing_happens() {
        let context = LoggingContext::new();
        assert!(!context.is_installed());
        assert!(!context.is_enabled(Severity::CRITICAL));
        context.emit(&record(Severity::CRITICAL, "lost")).unwrap();
        context.flush().unwrap();
    }

    #[test]
    fn filters_by_min_severity() {
        let sink = MemorySink::new();
        let context = LoggingContext::new();
        context.install(stream(&sink), Severity::WARNING);
        assert_eq!(context.min_severity(), Some(Severity::WARNING));

        context.emit(&record(Severity::INFO, "quiet")).unwrap();
        context.emit(&record(Severity::WARNING, "loud")).unwrap();
        context.emit(&record(Severity::new(35), "louder")).unwrap();
        assert_eq!(sink.lines(), vec!["WARNING:ctx:loud", "Level 35:ctx:louder"]);
    }

    #[test]
    fn replacing_is_not_additive() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let context = LoggingContext::new();

        context.install(stream(&first), Severity::INFO);
        context.install(stream(&second), Severity::INFO);
        context.emit(&record(Severity::INFO, "once")).unwrap();

        assert!(first.contents().is_empty());
        assert_eq!(second.lines(), vec!["INFO:ctx:once"]);
    }

    #[test]
    fn replacing_flushes_buffered_records() {
        let first = MemorySink::new();
        let context = LoggingContext::new();
        context.install(
            Box::new(BufferedWriter::new(stream(&first), 10, Severity::ERROR)),
            Severity::INFO,
        );
        context.emit(&record(Severity::INFO, "pending")).unwrap();
        assert!(first.contents().is_empty());

        context.install(stream(&MemorySink::new()), Severity::INFO);
        assert_eq!(first.lines(), vec!["INFO:ctx:pending"]);

        context.uninstall();
        assert!(!context.is_installed());
    }
}
