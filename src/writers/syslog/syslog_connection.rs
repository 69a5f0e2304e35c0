use super::connection::Connection;

#[cfg(unix)]
use std::path::Path;
use std::{
    io::Result as IoResult,
    net::{ToSocketAddrs, UdpSocket},
};

/// The conventional path of the local syslog socket.
pub const DEV_LOG: &str = "/dev/log";

/// Where the syslog is reached via UDP if there is no local socket.
pub const DEFAULT_UDP_SERVER: &str = "127.0.0.1:514";

/// The connection to the syslog daemon.
///
/// Is required to instantiate a [`SyslogWriter`](crate::writers::SyslogWriter).
/// [`SyslogConnection::try_default`] picks what the local system offers.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct SyslogConnection(Connection);
impl SyslogConnection {
    /// Connects to the local syslog socket at [`DEV_LOG`] if it exists,
    /// first as datagram socket, then as stream socket.
    /// If that is not possible, sends via UDP to [`DEFAULT_UDP_SERVER`].
    ///
    /// # Errors
    ///
    /// Any kind of I/O error can occur.
    pub fn try_default() -> IoResult<Self> {
        #[cfg(unix)]
        if Path::new(DEV_LOG).exists() {
            if let Ok(conn) = Self::try_datagram(DEV_LOG).or_else(|_| Self::try_stream(DEV_LOG)) {
                return Ok(conn);
            }
        }
        Self::try_udp("127.0.0.1:0", DEFAULT_UDP_SERVER)
    }

    /// Connects via unix datagram to the specified path.
    ///
    /// # Errors
    ///
    /// Any kind of I/O error can occur.
    #[cfg_attr(docsrs, doc(cfg(unix)))]
    #[cfg(unix)]
    pub fn try_datagram<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let ud = std::os::unix::net::UnixDatagram::unbound()?;
        ud.connect(&path)?;
        Ok(SyslogConnection(Connection::Datagram(ud)))
    }

    /// Connects via unix stream to the specified path.
    ///
    /// # Errors
    ///
    /// Any kind of I/O error can occur.
    #[cfg_attr(docsrs, doc(cfg(unix)))]
    #[cfg(unix)]
    pub fn try_stream<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        Ok(SyslogConnection(Connection::Stream(
            std::os::unix::net::UnixStream::connect(path)?,
        )))
    }

    /// Sends the messages via UDP from `local` to `server`.
    ///
    /// # Errors
    ///
    /// `std::io::Error` if binding or connecting the socket fails.
    pub fn try_udp<L: ToSocketAddrs, S: ToSocketAddrs>(local: L, server: S) -> IoResult<Self> {
        let socket = UdpSocket::bind(local)?;
        socket.connect(server)?;
        Ok(SyslogConnection(Connection::Udp(socket)))
    }

    pub(super) fn into_inner(self) -> Connection {
        self.0
    }
}
