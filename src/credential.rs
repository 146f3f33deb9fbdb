use crate::hash::{KeyHash, ScriptHash};
use std::fmt;

/// A payment or stake credential: what is required to spend from or to
/// withdraw the rewards of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StakeCredential {
    KeyHash(KeyHash),
    ScriptHash(ScriptHash),
}

/// Kind of a credential, as encoded in the address header bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    KeyHash,
    ScriptHash,
}

/// Position of a credential within an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialRole {
    Payment,
    Stake,
}

impl StakeCredential {
    pub fn kind(&self) -> CredentialKind {
        match self {
            StakeCredential::KeyHash(_) => CredentialKind::KeyHash,
            StakeCredential::ScriptHash(_) => CredentialKind::ScriptHash,
        }
    }

    pub fn to_keyhash(&self) -> Option<KeyHash> {
        match self {
            StakeCredential::KeyHash(hash) => Some(*hash),
            StakeCredential::ScriptHash(_) => None,
        }
    }

    pub fn to_scripthash(&self) -> Option<ScriptHash> {
        match self {
            StakeCredential::KeyHash(_) => None,
            StakeCredential::ScriptHash(hash) => Some(*hash),
        }
    }
}

impl AsRef<[u8]> for StakeCredential {
    fn as_ref(&self) -> &[u8] {
        match self {
            StakeCredential::KeyHash(hash) => hash.as_ref(),
            StakeCredential::ScriptHash(hash) => hash.as_ref(),
        }
    }
}

impl From<KeyHash> for StakeCredential {
    fn from(hash: KeyHash) -> Self {
        StakeCredential::KeyHash(hash)
    }
}

impl From<ScriptHash> for StakeCredential {
    fn from(hash: ScriptHash) -> Self {
        StakeCredential::ScriptHash(hash)
    }
}

impl CredentialKind {
    /// Header bit for this kind, 0 for a key hash.
    pub(crate) fn bit(self) -> u8 {
        match self {
            CredentialKind::KeyHash => 0,
            CredentialKind::ScriptHash => 1,
        }
    }

    pub(crate) fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            CredentialKind::KeyHash
        } else {
            CredentialKind::ScriptHash
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CredentialKind::KeyHash => write!(f, "key hash"),
            CredentialKind::ScriptHash => write!(f, "script hash"),
        }
    }
}

impl fmt::Display for CredentialRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CredentialRole::Payment => write!(f, "payment"),
            CredentialRole::Stake => write!(f, "stake"),
        }
    }
}
