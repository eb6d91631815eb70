use crate::endpoint::{EndpointState, GroupAddress};
use std::net::Ipv4Addr;

/// Error raised while bringing a `MulticastEndpoint` up
///
/// Each variant maps to one step of the initialization sequence. When a step
/// fails, the endpoint switches to `EndpointState::Failed` and keeps the
/// resources acquired by the previous steps until `close()` is called.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Fail to start the host networking subsystem
    #[error("Fail to start the networking subsystem")]
    SubsystemStartup(#[source] std::io::Error),
    /// Fail to create or configure the datagram socket
    #[error("Fail to create the datagram socket")]
    SocketCreate(#[source] std::io::Error),
    /// Fail to bind the socket to the wildcard address
    #[error("Fail to bind the socket to port {port}")]
    Bind {
        /// Port the bind was attempted on
        port: u16,
        /// OS error returned by the bind call
        #[source]
        source: std::io::Error,
    },
    /// Group address literal is not a valid IPv4 address
    #[error("Fail to parse '{literal}' as an IPv4 address")]
    AddressParse {
        /// Literal that was rejected
        literal: String,
    },
    /// OS refused the multicast group membership
    #[error("Fail to join the multicast group {group}")]
    JoinGroup {
        /// Group the endpoint tried to join
        group: Ipv4Addr,
        /// OS error returned by the membership call
        #[source]
        source: std::io::Error,
    },
    /// `initialize()` was called on an endpoint that already left `Uninitialized`
    #[error("Endpoint is already initialized, state is {0:?}")]
    AlreadyInitialized(EndpointState),
}

/// Error raised by a receive or send operation
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// No datagram was exchanged before the 5 seconds wait bound elapsed
    ///
    /// The endpoint stays `Bound`, the operation can be retried.
    #[error("No datagram was exchanged within the wait bound")]
    TimedOut,
    /// Operation was attempted while the endpoint is not `Bound`
    #[error("Endpoint is not bound, state is {0:?}")]
    NotBound(EndpointState),
    /// OS error outside the timeout path
    #[error("Fail to exchange a datagram with the group")]
    Os(#[source] std::io::Error),
}

impl IoError {
    /// Return true when the operation merely exhausted its wait bound
    pub fn is_timeout(&self) -> bool {
        matches!(self, IoError::TimedOut)
    }
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        // SO_RCVTIMEO expirations surface as WouldBlock on Unix and TimedOut on Windows
        match err.kind() {
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => IoError::TimedOut,
            _ => IoError::Os(err),
        }
    }
}

/// Rejection raised when constructing a `GroupAddress`
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidGroupAddress {
    /// Literal is empty
    #[error("Group address literal is empty")]
    Empty,
    /// Literal does not fit within a dotted-quad IPv4 address
    #[error("Group address literal is {0} bytes long, at most {max} are allowed", max = GroupAddress::MAX_LEN)]
    TooLong(usize),
}
