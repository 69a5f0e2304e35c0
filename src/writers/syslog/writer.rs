use super::{
    connection::Connection, SyslogConnection, SyslogFacility, SyslogSeverity, SyslogWriterBuilder,
};
use crate::{util::poison_err, writers::LogWriter, FormatFunction, Record};
use std::{
    io::{Result as IoResult, Write},
    sync::Mutex,
};

/// A [`LogWriter`] that sends every record as one message to the syslog.
///
/// A message looks like `<PRI>text\0`, with `PRI = facility * 8 + severity`.
#[allow(clippy::module_name_repetitions)]
pub struct SyslogWriter {
    facility: SyslogFacility,
    format: FormatFunction,
    m_conn_state: Mutex<ConnectorAndBuffer>,
}
impl SyslogWriter {
    /// Instantiate the builder for the `SyslogWriter`.
    #[must_use]
    pub fn builder(syslog: SyslogConnection) -> SyslogWriterBuilder {
        SyslogWriterBuilder::new(syslog)
    }

    pub(super) fn new(
        facility: SyslogFacility,
        syslog_connection: SyslogConnection,
        format: FormatFunction,
    ) -> SyslogWriter {
        SyslogWriter {
            facility,
            format,
            m_conn_state: Mutex::new(ConnectorAndBuffer {
                conn: syslog_connection.into_inner(),
                buf: Vec::with_capacity(200),
            }),
        }
    }

    fn priority(&self, record: &Record) -> u8 {
        (self.facility.code() << 3) | SyslogSeverity::from(record.severity()) as u8
    }
}
impl LogWriter for SyslogWriter {
    fn write(&self, record: &Record) -> IoResult<()> {
        let mut conn_state = self
            .m_conn_state
            .lock()
            .map_err(|_| poison_err("SyslogWriter"))?;
        let conn_state = &mut *conn_state;

        conn_state.buf.clear();
        write!(conn_state.buf, "<{}>", self.priority(record))?;
        (self.format)(&mut conn_state.buf, record, None)?;
        conn_state.buf.push(0);

        // we _have_ to buffer above because each write here generates a syslog entry
        conn_state.conn.write_all(&conn_state.buf)
    }

    fn flush(&self) -> IoResult<()> {
        self.m_conn_state
            .lock()
            .map_err(|_| poison_err("SyslogWriter"))?
            .conn
            .flush()
    }
}

struct ConnectorAndBuffer {
    conn: Connection,
    buf: Vec<u8>,
}

#[cfg(test)]
mod test {
    use crate::{
        writers::{LogWriter, SyslogConnection, SyslogFacility, SyslogWriter},
        ErrorInfo, Record, Severity,
    };
    use std::net::UdpSocket;

    fn receiver() -> (UdpSocket, String) {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(std::time::Duration::from_secs(5)))
            .unwrap();
        let addr = socket.local_addr().unwrap().to_string();
        (socket, addr)
    }

    fn receive(socket: &UdpSocket) -> Vec<u8> {
        let mut buf = [0_u8; 2048];
        let len = socket.recv(&mut buf).unwrap();
        buf[..len].to_vec()
    }

    #[test]
    fn frames_over_udp() {
        let (socket, addr) = receiver();
        let writer =
            SyslogWriter::builder(SyslogConnection::try_udp("127.0.0.1:0", addr).unwrap()).build();

        writer
            .write(
                &Record::builder()
                    .severity(Severity::ERROR)
                    .template("disk {} is full")
                    .arg("/var")
                    .build(),
            )
            .unwrap();
        assert_eq!(receive(&socket), b"<11>disk /var is full\0");

        writer
            .write(&Record::builder().severity(Severity::DEBUG).template("dbg").build())
            .unwrap();
        assert_eq!(receive(&socket), b"<15>dbg\0");
        writer.flush().unwrap();
    }

    #[test]
    fn facility_and_stack_trace() {
        let (socket, addr) = receiver();
        let writer =
            SyslogWriter::builder(SyslogConnection::try_udp("127.0.0.1:0", addr).unwrap())
                .facility(SyslogFacility::Local0)
                .build();

        writer
            .write(
                &Record::builder()
                    .severity(Severity::CRITICAL)
                    .template("giving up")
                    .error(ErrorInfo::from_message(Some("Timeout"), "no answer"))
                    .build(),
            )
            .unwrap();
        let message = String::from_utf8(receive(&socket)).unwrap();
        assert!(message.starts_with("<130>giving up\nTimeout: no answer"));
        assert!(message.ends_with('\0'));
    }

    #[cfg(unix)]
    #[test]
    fn frames_over_unix_datagram() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("log.sock");
        let server = std::os::unix::net::UnixDatagram::bind(&path).unwrap();

        let writer = SyslogWriter::builder(SyslogConnection::try_datagram(&path).unwrap()).build();
        writer
            .write(&Record::builder().severity(Severity::INFO).template("hello").build())
            .unwrap();

        let mut buf = [0_u8; 256];
        let len = server.recv(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"<14>hello\0");
    }
}
