//! Shelley base addresses and their bech32 form.
//!
//! [`AddressCodec`] builds a base address out of two bech32 encoded key
//! hashes, parses bech32 base addresses and re-encodes their key hashes
//! with configurable prefixes. The address model it works on lives in
//! [`address`], [`credential`], [`hash`] and [`network`].

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod address;
pub mod cli;
pub mod codec;
pub mod config;
pub mod credential;
pub mod hash;
pub mod log;
pub mod network;

#[cfg(any(test, feature = "property-test-api"))]
mod testing;

pub use address::{Address, BaseAddress, Kind, KindType, Pointer};
pub use codec::{AddressCodec, KeyHashPrefixes};
pub use credential::{CredentialKind, CredentialRole, StakeCredential};
pub use hash::{KeyHash, ScriptHash};
pub use network::NetworkId;
