use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::InvalidGroupAddress;

/// Multicast group address literal
///
/// Holds the dotted-quad text form of the group ("239.1.1.1"). Construction only
/// rejects literals that are empty or too long to be an IPv4 address, whether the
/// text actually parses is checked during `MulticastEndpoint::initialize()`.
#[derive(Debug, PartialEq, Deserialize, Serialize, Clone, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "String", into = "String")]
pub struct GroupAddress(String);

impl GroupAddress {
    /// Maximum length of a dotted-quad IPv4 literal, in bytes
    pub const MAX_LEN: usize = 15;

    /// Create a new group address from its text form
    pub fn new(literal: &str) -> Result<Self, InvalidGroupAddress> {
        Self::try_from(literal.to_owned())
    }

    /// Text form of the address
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for GroupAddress {
    type Err = InvalidGroupAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for GroupAddress {
    type Error = InvalidGroupAddress;

    fn try_from(literal: String) -> Result<Self, Self::Error> {
        if literal.is_empty() {
            return Err(InvalidGroupAddress::Empty);
        }
        if literal.len() > Self::MAX_LEN {
            return Err(InvalidGroupAddress::TooLong(literal.len()));
        }
        Ok(Self(literal))
    }
}

impl From<GroupAddress> for String {
    fn from(addr: GroupAddress) -> Self {
        addr.0
    }
}

impl std::fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
