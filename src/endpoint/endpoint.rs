use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use crate::error::{InitError, IoError};
use crate::transport::{Transport, UdpTransport};

use super::GroupAddress;

/// Wait bound applied to every blocking receive and send
pub const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifecycle state of a `MulticastEndpoint`
///
/// The state only moves forward: `Uninitialized` to `Bound` or `Failed` after
/// `initialize()`, then `Closed` after `close()`. A closed endpoint cannot be
/// reinitialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointState {
    /// Endpoint was created, no OS resource is held yet
    Uninitialized,
    /// Socket is bound and member of the group, I/O is possible
    Bound,
    /// Initialization failed, the socket may still be allocated until `close()`
    Failed,
    /// Socket was released, the endpoint cannot be revived
    Closed,
}

/// UDP endpoint exchanging datagrams with one multicast group
///
/// The endpoint owns a single UDP socket bound to the wildcard address on a
/// fixed port and joined to one IPv4 multicast group. Each received datagram
/// re-points the reply destination used by `send()` at its sender.
///
/// # Example
///
/// ```no_run
/// use groupcast::endpoint::{GroupAddress, MulticastEndpoint};
///
/// let group = GroupAddress::new("239.1.1.1").unwrap();
/// let mut endpoint = MulticastEndpoint::new(group, 5000);
/// endpoint.initialize().unwrap();
///
/// let mut buf = [0; 2048];
/// let nb = endpoint.receive(&mut buf).unwrap();
/// endpoint.send(&buf[..nb]).unwrap();
/// endpoint.close();
/// ```
#[derive(Debug)]
pub struct MulticastEndpoint {
    group: GroupAddress,
    port: u16,
    state: EndpointState,
    transport: Box<dyn Transport>,
    reply_addr: Option<SocketAddr>,
    joined: Option<Ipv4Addr>,
}

impl MulticastEndpoint {
    /// Return a new endpoint for the given group and port
    ///
    /// No OS resource is acquired before `initialize()` is called.
    pub fn new(group: GroupAddress, port: u16) -> Self {
        Self::with_transport(group, port, Box::new(UdpTransport::new()))
    }

    /// Return a new endpoint running over the given transport backend
    pub fn with_transport(group: GroupAddress, port: u16, transport: Box<dyn Transport>) -> Self {
        Self {
            group,
            port,
            state: EndpointState::Uninitialized,
            transport,
            reply_addr: None,
            joined: None,
        }
    }

    /// Multicast group this endpoint belongs to
    pub fn group(&self) -> &GroupAddress {
        &self.group
    }

    /// UDP port this endpoint listens on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Current lifecycle state
    pub fn state(&self) -> EndpointState {
        self.state
    }

    /// Destination of the next `send()`
    ///
    /// Starts as the group itself and follows the sender of the last received
    /// datagram. `None` before initialization and after close.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.reply_addr
    }

    /// Acquire the socket, bind it to the wildcard address and join the group
    ///
    /// On success the endpoint is `Bound` and ready for I/O. On failure it is
    /// `Failed` and keeps the resources acquired by the completed steps, call
    /// `close()` to release them.
    pub fn initialize(&mut self) -> Result<(), InitError> {
        if self.state != EndpointState::Uninitialized {
            return Err(InitError::AlreadyInitialized(self.state));
        }
        match self.initialize_steps() {
            Ok(group) => {
                log::info!("Join multicast group {} on port {}", group, self.port);
                self.joined = Some(group);
                self.reply_addr = Some(SocketAddr::V4(SocketAddrV4::new(group, self.port)));
                self.state = EndpointState::Bound;
                Ok(())
            }
            Err(e) => {
                log::error!("{:?}", e);
                self.state = EndpointState::Failed;
                Err(e)
            }
        }
    }

    fn initialize_steps(&mut self) -> Result<Ipv4Addr, InitError> {
        self.transport
            .startup()
            .map_err(InitError::SubsystemStartup)?;
        self.transport
            .open(IO_TIMEOUT)
            .map_err(InitError::SocketCreate)?;
        self.transport
            .bind(self.port)
            .map_err(|source| InitError::Bind {
                port: self.port,
                source,
            })?;
        let group: Ipv4Addr =
            self.group
                .as_str()
                .parse()
                .map_err(|_| InitError::AddressParse {
                    literal: self.group.as_str().to_owned(),
                })?;
        self.transport
            .join(group)
            .map_err(|source| InitError::JoinGroup { group, source })?;
        Ok(group)
    }

    /// Wait for a datagram from the group
    ///
    /// Blocks for at most 5 seconds. On success the sender of the datagram
    /// becomes the destination of the next `send()`. A timeout is not fatal,
    /// the endpoint stays `Bound` and the wait can be restarted.
    ///
    /// A datagram larger than `buf` is truncated to its prefix.
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        if self.state != EndpointState::Bound {
            return Err(IoError::NotBound(self.state));
        }
        let (nb, peer) = self
            .transport
            .recv_from(buf)
            .map_err(|e| trace_io("receive", e))?;
        log::debug!("Received {} bytes from {}", nb, peer);
        self.reply_addr = Some(peer);
        Ok(nb)
    }

    /// Send a datagram to the current peer
    ///
    /// The destination starts as the multicast group itself and is re-pointed
    /// at the sender of every received datagram. Blocks for at most 5 seconds.
    pub fn send(&mut self, buf: &[u8]) -> Result<usize, IoError> {
        let dest = match (self.state, self.reply_addr) {
            (EndpointState::Bound, Some(addr)) => addr,
            _ => return Err(IoError::NotBound(self.state)),
        };
        let nb = self
            .transport
            .send_to(buf, dest)
            .map_err(|e| trace_io("send", e))?;
        log::debug!("Sent {} bytes to {}", nb, dest);
        Ok(nb)
    }

    /// Leave the group and release the socket
    ///
    /// Safe to call in any state and more than once, extra calls are no-ops.
    pub fn close(&mut self) {
        if self.state == EndpointState::Closed {
            return;
        }
        if let Some(group) = self.joined.take() {
            log::info!("Leave multicast group {}", group);
            self.transport.leave(group).ok();
        }
        self.transport.close();
        self.reply_addr = None;
        self.state = EndpointState::Closed;
    }
}

impl Drop for MulticastEndpoint {
    fn drop(&mut self) {
        self.close();
    }
}

fn trace_io(op: &str, err: std::io::Error) -> IoError {
    let err = IoError::from(err);
    if err.is_timeout() {
        log::debug!("No datagram within the wait bound during {}", op);
    } else {
        log::error!("Fail to {}: {:?}", op, err);
    }
    err
}
