//! # Groupcast
//!
//! IPv4 UDP multicast endpoint with bounded-wait blocking I/O
//!
//! A [`MulticastEndpoint`](endpoint::MulticastEndpoint) owns a single UDP socket that is a member
//! of one multicast group. Once initialized, the endpoint receives datagrams addressed to the
//! group and sends datagrams back to the last peer it heard from. Every receive and send blocks
//! for at most 5 seconds, so a caller always regains control on an idle network.
//!
//! # UDP/IP Multicast receiver
//!
//! Receive datagrams from a multicast group
//!
//!```no_run
//! use groupcast::endpoint::{GroupAddress, MulticastEndpoint};
//!
//! // Join the multicast group 239.1.1.1 on port 5000
//! let group = GroupAddress::new("239.1.1.1").unwrap();
//! let mut endpoint = MulticastEndpoint::new(group, 5000);
//! endpoint.initialize().unwrap();
//!
//! // Receive datagrams, a timeout is not fatal and the wait can be restarted
//! let mut buf = [0; 2048];
//! loop {
//!     match endpoint.receive(&mut buf) {
//!         Ok(nb) => log::info!("Received {} bytes", nb),
//!         Err(e) if e.is_timeout() => continue,
//!         Err(e) => {
//!             log::error!("{:?}", e);
//!             break;
//!         }
//!     }
//! }
//! endpoint.close();
//!```
//!
//! # UDP/IP Multicast sender
//!
//! Send a datagram to the multicast group
//!
//!```no_run
//! use groupcast::endpoint::{GroupAddress, MulticastEndpoint};
//!
//! let group = GroupAddress::new("239.1.1.1").unwrap();
//! let mut endpoint = MulticastEndpoint::new(group, 5000);
//! endpoint.initialize().unwrap();
//!
//! // Before any datagram is received, send targets the group itself
//! endpoint.send(b"hello").unwrap();
//! endpoint.close();
//!```

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

mod tools;

pub mod endpoint;
pub mod transport;
pub use crate::tools::error;
