//! 28 bytes hashes used as address credentials.
//!
//! The human readable prefix of the bech32 form is not part of the value:
//! any prefix is accepted on decoding and the caller chooses the prefix on
//! encoding.

use bech32::{FromBase32, ToBase32, Variant};
use std::fmt;
use std::str::FromStr;

/// Size in bytes of a credential hash (blake2b-224).
pub const HASH_SIZE: usize = 28;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("invalid bech32")]
    Bech32(#[from] bech32::Error),
    #[error("bech32m checksum found, expected a bech32 checksum")]
    UnexpectedVariant,
    #[error("invalid hash size, expected {expected} bytes but received {got} bytes")]
    InvalidSize { got: usize, expected: usize },
    #[error("invalid hexadecimal")]
    Hex(#[from] hex::FromHexError),
}

/// Decode the payload of a bech32 string, ignoring its prefix.
fn decode_bech32(s: &str) -> Result<Vec<u8>, Error> {
    let (_, data, variant) = bech32::decode(s)?;
    if variant != Variant::Bech32 {
        return Err(Error::UnexpectedVariant);
    }
    Ok(Vec::<u8>::from_base32(&data)?)
}

pub(crate) fn encode_bech32(hrp: &str, bytes: &[u8]) -> Result<String, bech32::Error> {
    bech32::encode(hrp, bytes.to_base32(), Variant::Bech32)
}

macro_rules! credential_hash {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; HASH_SIZE]);

        impl $name {
            pub fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
                $name(bytes)
            }

            pub fn try_from_slice(slice: &[u8]) -> Result<Self, Error> {
                if slice.len() != HASH_SIZE {
                    return Err(Error::InvalidSize {
                        got: slice.len(),
                        expected: HASH_SIZE,
                    });
                }
                let mut bytes = [0u8; HASH_SIZE];
                bytes.copy_from_slice(slice);
                Ok($name(bytes))
            }

            /// Decode from bech32, whatever the human readable prefix is.
            pub fn from_bech32_str(s: &str) -> Result<Self, Error> {
                let bytes = decode_bech32(s)?;
                Self::try_from_slice(&bytes)
            }

            /// Encode with the given human readable prefix.
            pub fn to_bech32_str(&self, hrp: &str) -> Result<String, bech32::Error> {
                encode_bech32(hrp, &self.0)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self)
            }
        }

        impl FromStr for $name {
            type Err = Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s)?;
                Self::try_from_slice(&bytes)
            }
        }
    };
}

credential_hash! {
    /// Hash of an Ed25519 verification key.
    KeyHash
}

credential_hash! {
    /// Hash of a script (native or plutus).
    ScriptHash
}
