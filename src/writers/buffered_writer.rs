use crate::{util::poison_err, writers::LogWriter, Record, Severity};
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

/// Holds records in memory and hands them to its target in batches.
///
/// The pending records are written, in arrival order, as soon as
///
/// * `capacity` records are pending, or
/// * a record with at least `flush_severity` arrives (it is written together with the batch).
///
/// `flush`, `shutdown`, and dropping the writer write all pending records, too.
/// If the process dies without any of these, the pending records are lost.
pub struct BufferedWriter {
    target: Box<dyn LogWriter>,
    capacity: usize,
    flush_severity: Severity,
    pending: Mutex<VecDeque<Record>>,
}
impl BufferedWriter {
    /// Wraps `target`.
    ///
    /// A `capacity` of zero behaves like a capacity of one, i.e., records are passed through.
    #[must_use]
    pub fn new(target: Box<dyn LogWriter>, capacity: usize, flush_severity: Severity) -> Self {
        let capacity = capacity.max(1);
        Self {
            target,
            capacity,
            flush_severity,
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// The number of records that trigger a flush.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The severity from which on a record triggers a flush.
    #[must_use]
    pub fn flush_severity(&self) -> Severity {
        self.flush_severity
    }

    /// Number of records that are waiting to be written.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock_pending().map_or(0, |pending| pending.len())
    }

    fn lock_pending(&self) -> Result<MutexGuard<'_, VecDeque<Record>>, std::io::Error> {
        self.pending
            .lock()
            .map_err(|_| poison_err("BufferedWriter"))
    }

    // Writes out all pending records; a failing record does not stop the others,
    // the first error is returned.
    fn drain(&self, pending: &mut VecDeque<Record>) -> std::io::Result<()> {
        let mut result = Ok(());
        for record in pending.drain(..) {
            if let Err(e) = self.target.write(&record) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}
impl LogWriter for BufferedWriter {
    fn write(&self, record: &Record) -> std::io::Result<()> {
        let mut pending = self.lock_pending()?;
        pending.push_back(record.clone());
        if pending.len() >= self.capacity || record.severity() >= self.flush_severity {
            self.drain(&mut pending)
        } else {
            Ok(())
        }
    }

    fn flush(&self) -> std::io::Result<()> {
        let mut pending = self.lock_pending()?;
        let result = self.drain(&mut pending);
        drop(pending);
        result.and(self.target.flush())
    }

    fn shutdown(&self) {
        if let Err(e) = self.flush() {
            crate::util::eprint_err(
                crate::util::ErrorCode::Flush,
                "flushing buffered records failed",
                &e,
            );
        }
        self.target.shutdown();
    }
}
impl Drop for BufferedWriter {
    fn drop(&mut self) {
        let pending = match self.pending.get_mut() {
            Ok(pending) => pending,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !pending.is_empty() {
            let mut pending = std::mem::take(pending);
            if let Err(e) = self.drain(&mut pending) {
                crate::util::eprint_err(
                    crate::util::ErrorCode::Flush,
                    "writing buffered records failed",
                    &e,
                );
            }
        }
    }
}
