use super::destination::{Destination, StdStream};
use crate::{
    formats::TimestampFormat,
    util::write_buffered,
    writers::LogWriter,
    FormatFunction, Record,
};
use std::io::Write;

/// Writes one formatted line per record to stdout, stderr, or a [`MemorySink`](super::MemorySink).
///
/// This is the writer behind the `stream`, `color`, and `json` formats.
pub struct StreamWriter {
    format: FormatFunction,
    timestamp: Option<TimestampFormat>,
    stream: StdStream,
}
impl StreamWriter {
    /// Creates a writer that formats with `format` and renders timestamps with `timestamp`.
    #[must_use]
    pub fn new(
        destination: Destination,
        format: FormatFunction,
        timestamp: Option<TimestampFormat>,
    ) -> Self {
        Self {
            format,
            timestamp,
            stream: destination.into(),
        }
    }
}
impl LogWriter for StreamWriter {
    #[inline]
    fn write(&self, record: &Record) -> std::io::Result<()> {
        let mut w = self.stream.lock()?;
        write_buffered(self.format, record, self.timestamp.as_ref(), &mut w)
    }

    #[inline]
    fn flush(&self) -> std::io::Result<()> {
        self.stream.lock()?.flush()
    }
}

#[cfg(test)]
mod test {
    use super::StreamWriter;
    use crate::{
        formats::{stream_format, TimestampFormat},
        json_format,
        writers::{Destination, LogWriter, MemorySink},
        Record, Severity,
    };

    #[test]
    fn writes_one_line_per_record() {
        let sink = MemorySink::new();
        let writer = StreamWriter::new(Destination::Memory(sink.clone()), stream_format, None);

        let rb = || Record::builder().logger("myApp").file("stream_writer.rs").line(222);
        writer
            .write(&rb().severity(Severity::ERROR).template("This is an error message").build())
            .unwrap();
        writer
            .write(&rb().severity(Severity::WARNING).template("This is a warning").build())
            .unwrap();
        writer
            .write(&rb().severity(Severity::INFO).template("This is an info message").build())
            .unwrap();
        writer.flush().unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "ERROR:myApp:This is an error message",
                "WARNING:myApp:This is a warning",
                "INFO:myApp:This is an info message",
            ]
        );
    }

    #[test]
    fn json_lines_carry_epoch_timestamps() {
        let sink = MemorySink::new();
        let writer = StreamWriter::new(
            Destination::Memory(sink.clone()),
            json_format,
            Some(TimestampFormat::Epoch),
        );
        writer
            .write(&Record::builder().template("hi").line(1).build())
            .unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let document: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(document["msg"], "hi");
        assert!(document["@timestamp"].is_f64());
    }

    #[test]
    fn format_errors_are_invalid_data() {
        let sink = MemorySink::new();
        let writer = StreamWriter::new(Destination::Memory(sink.clone()), json_format, None);
        let err = writer.write(&Record::builder().template("no line").build()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        assert!(sink.contents().is_empty());
    }
}
