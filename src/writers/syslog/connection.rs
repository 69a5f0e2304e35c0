use std::{
    io::{Result as IoResult, Write},
    net::UdpSocket,
};

// Writable and flushable connection to the syslog daemon.
// Every write carries exactly one complete message.
#[derive(Debug)]
pub(super) enum Connection {
    #[cfg(unix)]
    Datagram(std::os::unix::net::UnixDatagram),

    #[cfg(unix)]
    Stream(std::os::unix::net::UnixStream),

    Udp(UdpSocket),
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        match *self {
            #[cfg(unix)]
            Self::Datagram(ref ud) => ud.send(buf),
            #[cfg(unix)]
            Self::Stream(ref mut w) => w.write(buf),
            Self::Udp(ref socket) => socket.send(buf),
        }
    }

    fn flush(&mut self) -> IoResult<()> {
        match *self {
            #[cfg(unix)]
            Self::Datagram(_) => Ok(()),
            #[cfg(unix)]
            Self::Stream(ref mut w) => w.flush(),
            Self::Udp(_) => Ok(()),
        }
    }
}
