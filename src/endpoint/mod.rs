//!
//! Multicast endpoint exchanging datagrams with a single IPv4 group
//!

mod endpoint;
mod groupaddr;

pub use endpoint::EndpointState;
pub use endpoint::MulticastEndpoint;
pub use endpoint::IO_TIMEOUT;
pub use groupaddr::GroupAddress;
