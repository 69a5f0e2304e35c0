use crate::util::poison_err;
use std::{
    io::{Error as IoError, Stderr, StderrLock, Stdout, StdoutLock, Write},
    sync::{Arc, Mutex, MutexGuard},
};

/// The output of the stream-based formats.
#[derive(Clone, Debug, Default)]
pub enum Destination {
    /// Standard output.
    Stdout,
    /// Standard error.
    #[default]
    Stderr,
    /// An in-memory sink, mainly useful for tests.
    Memory(MemorySink),
}

/// A shared in-memory byte buffer.
///
/// Clones share the same buffer, so one clone can be handed to a writer
/// while another one is kept for reading the output.
#[derive(Clone, Debug, Default)]
pub struct MemorySink(Arc<Mutex<Vec<u8>>>);
impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        match self.0.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(_) => String::new(),
        }
    }

    /// Returns the written lines, without their line breaks.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(ToString::to_string).collect()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.clear();
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<u8>>, IoError> {
        self.0.lock().map_err(|_| poison_err("MemorySink"))
    }
}
impl Write for MemorySink {
    fn write(&mut self, buffer: &[u8]) -> Result<usize, IoError> {
        self.lock()?.write(buffer)
    }
    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}

// Abstraction over the destinations
pub(crate) enum StdStream {
    Out(Stdout),
    Err(Stderr),
    Memory(MemorySink),
}
impl From<Destination> for StdStream {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Stdout => StdStream::Out(std::io::stdout()),
            Destination::Stderr => StdStream::Err(std::io::stderr()),
            Destination::Memory(sink) => StdStream::Memory(sink),
        }
    }
}
impl StdStream {
    pub(crate) fn lock(&self) -> Result<StdstreamLock<'_>, IoError> {
        Ok(match self {
            StdStream::Out(s) => StdstreamLock::Out(s.lock()),
            StdStream::Err(s) => StdstreamLock::Err(s.lock()),
            StdStream::Memory(s) => StdstreamLock::Memory(s.lock()?),
        })
    }
}

pub(crate) enum StdstreamLock<'a> {
    Out(StdoutLock<'a>),
    Err(StderrLock<'a>),
    Memory(MutexGuard<'a, Vec<u8>>),
}
impl Write for StdstreamLock<'_> {
    fn write(&mut self, buffer: &[u8]) -> Result<usize, IoError> {
        match self {
            StdstreamLock::Out(l) => l.write(buffer),
            StdstreamLock::Err(l) => l.write(buffer),
            StdstreamLock::Memory(l) => l.write(buffer),
        }
    }
    fn flush(&mut self) -> Result<(), IoError> {
        match self {
            StdstreamLock::Out(l) => l.flush(),
            StdstreamLock::Err(l) => l.flush(),
            StdstreamLock::Memory(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Destination, MemorySink, StdStream};
    use std::io::Write;

    #[test]
    fn memory_sink_is_shared() {
        let sink = MemorySink::new();
        let stream = StdStream::from(Destination::Memory(sink.clone()));
        {
            let mut w = stream.lock().unwrap();
            w.write_all(b"first\nsecond\n").unwrap();
        }
        assert_eq!(sink.lines(), vec!["first", "second"]);
        sink.clear();
        assert!(sink.contents().is_empty());
    }
}
