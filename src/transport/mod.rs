//!
//! Socket transports backing a multicast endpoint
//!
//! The default backend is [`UdpTransport`], built on OS datagram sockets.
//! A different backend can be injected to run an endpoint over another stack,
//! or over a scripted socket in tests.
//!

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

///
/// A trait abstracting the datagram socket under a `MulticastEndpoint`
///
/// Calls are made in lifecycle order: `startup`, `open`, `bind`, `join`, then
/// any number of `recv_from`/`send_to`, then `leave` and `close`.
///
pub trait Transport {
    /// Start the host networking subsystem, called once before `open()`
    fn startup(&mut self) -> std::io::Result<()> {
        Ok(())
    }
    /// Create the datagram socket, with address reuse enabled and both I/O timeouts set
    fn open(&mut self, timeout: Duration) -> std::io::Result<()>;
    /// Bind the socket to the wildcard address on the given port
    fn bind(&mut self, port: u16) -> std::io::Result<()>;
    /// Join a multicast group on the default interface
    fn join(&mut self, group: Ipv4Addr) -> std::io::Result<()>;
    /// Leave a multicast group previously joined with `join()`
    fn leave(&mut self, group: Ipv4Addr) -> std::io::Result<()>;
    /// Wait for a datagram, return its size and the address of its sender
    fn recv_from(&mut self, buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)>;
    /// Send a datagram to the destination
    fn send_to(&mut self, buf: &[u8], dest: SocketAddr) -> std::io::Result<usize>;
    /// Release the socket, callable in any state
    fn close(&mut self);
}

impl std::fmt::Debug for dyn Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Transport {{  }}")
    }
}

mod udptransport;

pub use udptransport::UdpTransport;
