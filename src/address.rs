//! Shelley address
//!
//! The binary format starts with a header byte: the high nibble holds the
//! address type, the low nibble holds the network id. The remaining bytes
//! are type specific:
//!
//! Base address (types 0 to 3):
//!     HEADER || PAYMENT_CREDENTIAL (28 bytes) || STAKE_CREDENTIAL (28 bytes)
//!
//! Pointer address (types 4 and 5):
//!     HEADER || PAYMENT_CREDENTIAL (28 bytes) || SLOT || TX_INDEX || CERT_INDEX
//!
//! Enterprise address (types 6 and 7):
//!     HEADER || PAYMENT_CREDENTIAL (28 bytes)
//!
//! Reward address (types 14 and 15):
//!     HEADER || STAKE_CREDENTIAL (28 bytes)
//!
//! Within each family the low bits of the type tell whether a credential is
//! a key hash (0) or a script hash (1). For base addresses bit 0 is for the
//! payment credential and bit 1 for the stake credential.
//!
//! Pointer indices are variable length naturals: big endian groups of 7
//! bits, the high bit set on every byte but the last.
//!
//! Byron addresses (type 8) are not bech32 encoded and are not supported.
//!
//! Address human format is bech32 encoded with `addr` (mainnet) or
//! `addr_test` as prefix, `stake` and `stake_test` for reward addresses.

use crate::credential::{CredentialKind, StakeCredential};
use crate::hash::{self, HASH_SIZE};
use crate::network::NetworkId;
use bech32::{FromBase32, Variant};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Size of a Base address
pub const ADDR_SIZE_BASE: usize = 1 + HASH_SIZE + HASH_SIZE;

/// Size of an Enterprise address
pub const ADDR_SIZE_ENTERPRISE: usize = 1 + HASH_SIZE;

/// Size of a Reward address
pub const ADDR_SIZE_REWARD: usize = 1 + HASH_SIZE;

/// Smallest size of a Pointer address, all three indices on one byte
pub const ADDR_SIZE_POINTER_MIN: usize = 1 + HASH_SIZE + 3;

const ADDR_TYPE_BASE_MAX: u8 = 0b0011;
const ADDR_TYPE_POINTER: u8 = 0b0100;
const ADDR_TYPE_ENTERPRISE: u8 = 0b0110;
const ADDR_TYPE_BYRON: u8 = 0b1000;
const ADDR_TYPE_REWARD: u8 = 0b1110;

pub const MAINNET_ADDRESS_PREFIX: &str = "addr";
pub const TEST_ADDRESS_PREFIX: &str = "addr_test";
pub const MAINNET_REWARD_PREFIX: &str = "stake";
pub const TEST_REWARD_PREFIX: &str = "stake_test";

/// Reference to a stake registration certificate by its position in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub slot: u64,
    pub tx_index: u64,
    pub cert_index: u64,
}

/// Kind of an address, with its credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Base(StakeCredential, StakeCredential),
    Pointer(StakeCredential, Pointer),
    Enterprise(StakeCredential),
    Reward(StakeCredential),
}

/// Kind Type of an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindType {
    Base,
    Pointer,
    Enterprise,
    Reward,
}

/// A decoded Shelley address: network id and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub NetworkId, pub Kind);

/// An address holding both a payment and a stake credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseAddress {
    network: NetworkId,
    payment: StakeCredential,
    stake: StakeCredential,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("empty address")]
    EmptyAddress,
    #[error("byron addresses are not supported")]
    ByronAddress,
    #[error("unsupported address type {0:#06b}")]
    UnsupportedKind(u8),
    #[error("invalid {kind} address size, expected {expected} bytes but received {got} bytes")]
    InvalidSize {
        kind: KindType,
        got: usize,
        expected: usize,
    },
    #[error("invalid pointer encoding")]
    InvalidPointer,
    #[error("invalid bech32")]
    Bech32(#[from] bech32::Error),
    #[error("bech32m checksum found, expected a bech32 checksum")]
    UnexpectedVariant,
    #[error("invalid address prefix '{hrp}'")]
    InvalidPrefix { hrp: String },
    #[error("address prefix '{hrp}' does not match the address, expected '{expected}'")]
    MismatchPrefix { hrp: String, expected: &'static str },
    #[error("expected a base address, found a {0} address")]
    NotBaseAddress(KindType),
}

impl KindType {
    /// Fixed size of the binary form, `None` for the variable sized pointer.
    pub fn size(self) -> Option<usize> {
        match self {
            KindType::Base => Some(ADDR_SIZE_BASE),
            KindType::Pointer => None,
            KindType::Enterprise => Some(ADDR_SIZE_ENTERPRISE),
            KindType::Reward => Some(ADDR_SIZE_REWARD),
        }
    }
}

impl fmt::Display for KindType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KindType::Base => write!(f, "base"),
            KindType::Pointer => write!(f, "pointer"),
            KindType::Enterprise => write!(f, "enterprise"),
            KindType::Reward => write!(f, "reward"),
        }
    }
}

impl Pointer {
    pub fn new(slot: u64, tx_index: u64, cert_index: u64) -> Self {
        Pointer {
            slot,
            tx_index,
            cert_index,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        write_natural(out, self.slot);
        write_natural(out, self.tx_index);
        write_natural(out, self.cert_index);
    }

    fn read(bytes: &[u8]) -> Result<Self, Error> {
        let (slot, used) = read_natural(bytes)?;
        let bytes = &bytes[used..];
        let (tx_index, used) = read_natural(bytes)?;
        let bytes = &bytes[used..];
        let (cert_index, used) = read_natural(bytes)?;
        if used != bytes.len() {
            return Err(Error::InvalidPointer);
        }
        Ok(Pointer::new(slot, tx_index, cert_index))
    }
}

fn write_natural(out: &mut Vec<u8>, mut n: u64) {
    let mut buf = [0u8; 10];
    let mut i = buf.len() - 1;
    buf[i] = (n & 0x7f) as u8;
    n >>= 7;
    while n > 0 {
        i -= 1;
        buf[i] = 0x80 | (n & 0x7f) as u8;
        n >>= 7;
    }
    out.extend_from_slice(&buf[i..]);
}

/// Returns the natural and the number of bytes it used.
fn read_natural(bytes: &[u8]) -> Result<(u64, usize), Error> {
    let mut n: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        if n > (u64::MAX >> 7) {
            return Err(Error::InvalidPointer);
        }
        n = (n << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Ok((n, i + 1));
        }
    }
    Err(Error::InvalidPointer)
}

fn get_type_value(header: u8) -> u8 {
    header >> 4
}

fn check_size(kind: KindType, bytes: &[u8]) -> Result<(), Error> {
    match kind.size() {
        Some(expected) if bytes.len() != expected => Err(Error::InvalidSize {
            kind,
            got: bytes.len(),
            expected,
        }),
        None if bytes.len() < ADDR_SIZE_POINTER_MIN => Err(Error::InvalidSize {
            kind,
            got: bytes.len(),
            expected: ADDR_SIZE_POINTER_MIN,
        }),
        _ => Ok(()),
    }
}

fn credential(kind: CredentialKind, bytes: &[u8]) -> StakeCredential {
    // callers have checked the address size, the slice is always HASH_SIZE long
    let mut hash = [0u8; HASH_SIZE];
    hash.copy_from_slice(bytes);
    match kind {
        CredentialKind::KeyHash => StakeCredential::KeyHash(hash::KeyHash::from_bytes(hash)),
        CredentialKind::ScriptHash => {
            StakeCredential::ScriptHash(hash::ScriptHash::from_bytes(hash))
        }
    }
}

impl Address {
    pub fn network_id(&self) -> NetworkId {
        self.0
    }

    pub fn kind(&self) -> &Kind {
        &self.1
    }

    /// Return the Kind type of a given address
    pub fn kind_type(&self) -> KindType {
        match self.1 {
            Kind::Base(_, _) => KindType::Base,
            Kind::Pointer(_, _) => KindType::Pointer,
            Kind::Enterprise(_) => KindType::Enterprise,
            Kind::Reward(_) => KindType::Reward,
        }
    }

    fn type_value(&self) -> u8 {
        match &self.1 {
            Kind::Base(payment, stake) => payment.kind().bit() | (stake.kind().bit() << 1),
            Kind::Pointer(payment, _) => ADDR_TYPE_POINTER | payment.kind().bit(),
            Kind::Enterprise(payment) => ADDR_TYPE_ENTERPRISE | payment.kind().bit(),
            Kind::Reward(stake) => ADDR_TYPE_REWARD | stake.kind().bit(),
        }
    }

    /// Try to convert from_bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let header = *bytes.first().ok_or(Error::EmptyAddress)?;
        let network = NetworkId::from_header(header);
        let type_value = get_type_value(header);

        let kind = match type_value {
            0..=ADDR_TYPE_BASE_MAX => {
                check_size(KindType::Base, bytes)?;
                let payment = credential(CredentialKind::from_bit(type_value), &bytes[1..29]);
                let stake = credential(CredentialKind::from_bit(type_value >> 1), &bytes[29..]);
                Kind::Base(payment, stake)
            }
            ADDR_TYPE_POINTER | 0b0101 => {
                check_size(KindType::Pointer, bytes)?;
                let payment = credential(CredentialKind::from_bit(type_value), &bytes[1..29]);
                let pointer = Pointer::read(&bytes[29..])?;
                Kind::Pointer(payment, pointer)
            }
            ADDR_TYPE_ENTERPRISE | 0b0111 => {
                check_size(KindType::Enterprise, bytes)?;
                Kind::Enterprise(credential(
                    CredentialKind::from_bit(type_value),
                    &bytes[1..],
                ))
            }
            ADDR_TYPE_REWARD | 0b1111 => {
                check_size(KindType::Reward, bytes)?;
                Kind::Reward(credential(CredentialKind::from_bit(type_value), &bytes[1..]))
            }
            ADDR_TYPE_BYRON => return Err(Error::ByronAddress),
            other => return Err(Error::UnsupportedKind(other)),
        };
        Ok(Address(network, kind))
    }

    /// Serialize an address into bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.kind_type().size().unwrap_or(ADDR_SIZE_BASE));
        out.push((self.type_value() << 4) | self.0.as_u8());
        match &self.1 {
            Kind::Base(payment, stake) => {
                out.extend_from_slice(payment.as_ref());
                out.extend_from_slice(stake.as_ref());
            }
            Kind::Pointer(payment, pointer) => {
                out.extend_from_slice(payment.as_ref());
                pointer.write(&mut out);
            }
            Kind::Enterprise(cred) | Kind::Reward(cred) => out.extend_from_slice(cred.as_ref()),
        }
        out
    }

    /// Human readable prefix of the bech32 form of this address.
    pub fn prefix(&self) -> &'static str {
        match (self.kind_type(), self.0.is_mainnet()) {
            (KindType::Reward, true) => MAINNET_REWARD_PREFIX,
            (KindType::Reward, false) => TEST_REWARD_PREFIX,
            (_, true) => MAINNET_ADDRESS_PREFIX,
            (_, false) => TEST_ADDRESS_PREFIX,
        }
    }

    pub fn to_bech32_str(&self) -> String {
        hash::encode_bech32(self.prefix(), &self.to_bytes())
            .expect("address prefixes are valid human readable parts")
    }

    /// Decode a bech32 address, checking the prefix agrees with the
    /// decoded kind and network.
    pub fn from_bech32_str(s: &str) -> Result<Self, Error> {
        let (hrp, data, variant) = bech32::decode(s)?;
        if variant != Variant::Bech32 {
            return Err(Error::UnexpectedVariant);
        }
        let known_prefix = matches!(
            hrp.as_str(),
            MAINNET_ADDRESS_PREFIX | TEST_ADDRESS_PREFIX | MAINNET_REWARD_PREFIX | TEST_REWARD_PREFIX
        );
        if !known_prefix {
            return Err(Error::InvalidPrefix { hrp });
        }
        let bytes = Vec::<u8>::from_base32(&data)?;
        let address = Address::from_bytes(&bytes)?;
        let expected = address.prefix();
        if hrp != expected {
            return Err(Error::MismatchPrefix { hrp, expected });
        }
        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_bech32_str())
    }
}

impl FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_bech32_str(s)
    }
}

impl BaseAddress {
    pub fn new(network: NetworkId, payment: StakeCredential, stake: StakeCredential) -> Self {
        BaseAddress {
            network,
            payment,
            stake,
        }
    }

    pub fn network_id(&self) -> NetworkId {
        self.network
    }

    pub fn payment_cred(&self) -> &StakeCredential {
        &self.payment
    }

    pub fn stake_cred(&self) -> &StakeCredential {
        &self.stake
    }

    pub fn to_address(&self) -> Address {
        Address(self.network, Kind::Base(self.payment, self.stake))
    }

    pub fn from_address(address: &Address) -> Option<Self> {
        match address.1 {
            Kind::Base(payment, stake) => Some(BaseAddress::new(address.0, payment, stake)),
            _ => None,
        }
    }

    pub fn to_bech32_str(&self) -> String {
        self.to_address().to_bech32_str()
    }

    pub fn from_bech32_str(s: &str) -> Result<Self, Error> {
        Address::from_bech32_str(s).and_then(BaseAddress::try_from)
    }
}

impl From<BaseAddress> for Address {
    fn from(base: BaseAddress) -> Self {
        base.to_address()
    }
}

impl TryFrom<Address> for BaseAddress {
    type Error = Error;
    fn try_from(address: Address) -> Result<Self, Self::Error> {
        BaseAddress::from_address(&address).ok_or_else(|| Error::NotBaseAddress(address.kind_type()))
    }
}

impl fmt::Display for BaseAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_bech32_str())
    }
}

impl FromStr for BaseAddress {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseAddress::from_bech32_str(s)
    }
}
