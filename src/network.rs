//! Network tag carried in the low nibble of every Shelley address header.

use std::fmt;
use std::str::FromStr;

/// Identifier of the network an address belongs to.
///
/// Only the values `0..=15` fit in the address header. `0` is used by the
/// test networks and `1` by mainnet, the other values are passed through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(u8);

/// Largest value that fits in the header nibble.
pub const NETWORK_ID_MAX: u8 = 0b1111;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid network id {0}, expected a value between 0 and 15")]
    OutOfRange(u8),
    #[error("invalid network id `{0}', expected `mainnet', `testnet' or a number")]
    Unparsable(String),
}

impl NetworkId {
    pub const TESTNET: Self = NetworkId(0);
    pub const MAINNET: Self = NetworkId(1);

    pub fn new(id: u8) -> Result<Self, Error> {
        if id > NETWORK_ID_MAX {
            Err(Error::OutOfRange(id))
        } else {
            Ok(NetworkId(id))
        }
    }

    pub(crate) fn from_header(header: u8) -> Self {
        NetworkId(header & NETWORK_ID_MAX)
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }

    pub fn is_mainnet(self) -> bool {
        self == Self::MAINNET
    }
}

impl Default for NetworkId {
    fn default() -> Self {
        NetworkId::MAINNET
    }
}

impl From<NetworkId> for u8 {
    fn from(id: NetworkId) -> u8 {
        id.0
    }
}

impl std::convert::TryFrom<u8> for NetworkId {
    type Error = Error;
    fn try_from(id: u8) -> Result<Self, Self::Error> {
        NetworkId::new(id)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NetworkId {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(NetworkId::MAINNET),
            "testnet" => Ok(NetworkId::TESTNET),
            other => other
                .parse::<u8>()
                .map_err(|_| Error::Unparsable(other.to_owned()))
                .and_then(NetworkId::new),
        }
    }
}
