use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};

use super::Transport;

#[derive(Debug, Default)]
/// Datagram socket transport over the OS UDP/IP stack
pub struct UdpTransport {
    stage: Stage,
}

#[derive(Debug, Default)]
enum Stage {
    #[default]
    Closed,
    Open(Socket),
    Bound(UdpSocket),
}

impl UdpTransport {
    /// Return a new transport, no socket is created yet
    pub fn new() -> Self {
        Self::default()
    }

    fn bound(&mut self) -> std::io::Result<&mut UdpSocket> {
        match &mut self.stage {
            Stage::Bound(sock) => Ok(sock),
            _ => Err(std::io::Error::from(std::io::ErrorKind::NotConnected)),
        }
    }
}

impl Transport for UdpTransport {
    fn open(&mut self, timeout: Duration) -> std::io::Result<()> {
        let sock = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        sock.set_reuse_address(true)?;
        sock.set_read_timeout(Some(timeout))?;
        sock.set_write_timeout(Some(timeout))?;
        self.stage = Stage::Open(sock);
        Ok(())
    }

    fn bind(&mut self, port: u16) -> std::io::Result<()> {
        let sock = match std::mem::take(&mut self.stage) {
            Stage::Open(sock) => sock,
            stage => {
                self.stage = stage;
                return Err(std::io::Error::from(std::io::ErrorKind::NotConnected));
            }
        };
        let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port));
        match sock.bind(&addr.into()) {
            Ok(()) => {
                self.stage = Stage::Bound(sock.into());
                Ok(())
            }
            Err(e) => {
                // the socket stays allocated, releasing it is the caller's call
                self.stage = Stage::Open(sock);
                Err(e)
            }
        }
    }

    fn join(&mut self, group: Ipv4Addr) -> std::io::Result<()> {
        self.bound()?
            .join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)
    }

    fn leave(&mut self, group: Ipv4Addr) -> std::io::Result<()> {
        self.bound()?
            .leave_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)
    }

    fn recv_from(&mut self, buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)> {
        self.bound()?.recv_from(buf)
    }

    fn send_to(&mut self, buf: &[u8], dest: SocketAddr) -> std::io::Result<usize> {
        self.bound()?.send_to(buf, dest)
    }

    fn close(&mut self) {
        self.stage = Stage::Closed;
    }
}
