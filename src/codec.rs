//! Conversions between base addresses, key hashes and their bech32 form.
//!
//! The prefixes used to re-encode the key hashes of an address (`hbas_` for
//! the payment credential and `hstk_` for the stake credential by default)
//! follow a wallet convention, they are not part of any published address
//! standard. Two codecs only interoperate if they use the same prefixes.

use crate::address::{self, BaseAddress};
use crate::credential::{CredentialRole, StakeCredential};
use crate::hash::{self, KeyHash};
use crate::network::NetworkId;

pub const DEFAULT_PAYMENT_KEY_HASH_PREFIX: &str = "hbas_";
pub const DEFAULT_STAKE_KEY_HASH_PREFIX: &str = "hstk_";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot decode payment key hash '{input}'")]
    PaymentKeyHash {
        input: String,
        #[source]
        source: hash::Error,
    },
    #[error("cannot decode stake key hash '{input}'")]
    StakeKeyHash {
        input: String,
        #[source]
        source: hash::Error,
    },
    #[error("{role} credential is a script hash, expected a key hash")]
    CredentialKindMismatch { role: CredentialRole },
    #[error("invalid address")]
    Address(#[from] address::Error),
    #[error("invalid key hash prefix '{prefix}'")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: bech32::Error,
    },
}

/// Human readable prefixes used to encode the key hashes of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHashPrefixes {
    payment: String,
    stake: String,
}

fn check_prefix(prefix: &str) -> Result<(), Error> {
    bech32::encode(prefix, Vec::<bech32::u5>::new(), bech32::Variant::Bech32)
        .map(|_| ())
        .map_err(|source| Error::InvalidPrefix {
            prefix: prefix.to_owned(),
            source,
        })
}

impl KeyHashPrefixes {
    pub fn new(payment: impl Into<String>, stake: impl Into<String>) -> Result<Self, Error> {
        let payment = payment.into();
        let stake = stake.into();
        check_prefix(&payment)?;
        check_prefix(&stake)?;
        Ok(KeyHashPrefixes { payment, stake })
    }

    pub fn payment(&self) -> &str {
        &self.payment
    }

    pub fn stake(&self) -> &str {
        &self.stake
    }
}

impl Default for KeyHashPrefixes {
    fn default() -> Self {
        KeyHashPrefixes {
            payment: DEFAULT_PAYMENT_KEY_HASH_PREFIX.to_owned(),
            stake: DEFAULT_STAKE_KEY_HASH_PREFIX.to_owned(),
        }
    }
}

/// Stateless facade building and decoding base addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCodec {
    prefixes: KeyHashPrefixes,
}

impl AddressCodec {
    pub fn new(prefixes: KeyHashPrefixes) -> Self {
        AddressCodec { prefixes }
    }

    pub fn prefixes(&self) -> &KeyHashPrefixes {
        &self.prefixes
    }

    /// Build a base address from two bech32 encoded key hashes.
    ///
    /// The prefixes of the inputs are not checked. Fails on the first key
    /// hash that does not decode, no address is built in that case.
    pub fn new_base_address(
        &self,
        network: NetworkId,
        payment_key_hash: &str,
        stake_key_hash: &str,
    ) -> Result<BaseAddress, Error> {
        let payment =
            KeyHash::from_bech32_str(payment_key_hash).map_err(|source| Error::PaymentKeyHash {
                input: payment_key_hash.to_owned(),
                source,
            })?;
        let stake =
            KeyHash::from_bech32_str(stake_key_hash).map_err(|source| Error::StakeKeyHash {
                input: stake_key_hash.to_owned(),
                source,
            })?;
        let address = BaseAddress::new(network, payment.into(), stake.into());
        tracing::debug!(%network, %payment, %stake, "base address built");
        Ok(address)
    }

    pub fn address_network_id(&self, address: &BaseAddress) -> NetworkId {
        address.network_id()
    }

    /// Parse a bech32 base address.
    ///
    /// Any failure gives `None`: the reason is only logged. Use
    /// [`try_from_bech32`](Self::try_from_bech32) to get it.
    pub fn from_bech32(&self, s: &str) -> Option<BaseAddress> {
        match self.try_from_bech32(s) {
            Ok(address) => Some(address),
            Err(error) => {
                tracing::warn!(input = s, reason = %error, "cannot decode base address");
                None
            }
        }
    }

    pub fn try_from_bech32(&self, s: &str) -> Result<BaseAddress, Error> {
        BaseAddress::from_bech32_str(s).map_err(Error::from)
    }

    pub fn address_bech32(&self, address: &BaseAddress) -> String {
        address.to_bech32_str()
    }

    /// Payment key hash, bech32 encoded with the payment prefix.
    pub fn address_pub_key_hash(&self, address: &BaseAddress) -> Result<String, Error> {
        encode_key_hash(
            address.payment_cred(),
            CredentialRole::Payment,
            &self.prefixes.payment,
        )
    }

    /// Stake key hash, bech32 encoded with the stake prefix.
    pub fn address_stake_key_hash(&self, address: &BaseAddress) -> Result<String, Error> {
        encode_key_hash(
            address.stake_cred(),
            CredentialRole::Stake,
            &self.prefixes.stake,
        )
    }
}

fn encode_key_hash(
    credential: &StakeCredential,
    role: CredentialRole,
    prefix: &str,
) -> Result<String, Error> {
    let hash = credential
        .to_keyhash()
        .ok_or(Error::CredentialKindMismatch { role })?;
    hash.to_bech32_str(prefix)
        .map_err(|source| Error::InvalidPrefix {
            prefix: prefix.to_owned(),
            source,
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::address::{Address, Kind, ADDR_SIZE_BASE};
    use crate::hash::ScriptHash;

    const PAYMENT_VKH: &str = "addr_vkh1jjfnzhxe966a33psfenm0ct2udkkr569qf55v4uprgkgu8zsvmg";
    const STAKE_VKH: &str = "stake_vkh1xdak9nllvsp6q636e0p5lrzxqq7xnlne5d3gemafc3e9z3v4vud";
    const TESTNET_BASE: &str = "addr_test1qz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgs68faae";

    #[test]
    fn build_testnet_base_address() {
        let codec = AddressCodec::default();
        let address = codec
            .new_base_address(NetworkId::TESTNET, PAYMENT_VKH, STAKE_VKH)
            .unwrap();
        let bech32 = codec.address_bech32(&address);

        assert_eq!(bech32, TESTNET_BASE);
        assert!(bech32.starts_with("addr_test1"));
        assert_eq!(address.to_address().to_bytes().len(), ADDR_SIZE_BASE);
        assert_eq!(codec.address_network_id(&address), NetworkId::TESTNET);
    }

    #[test]
    fn key_hashes_use_prefixes() {
        let codec = AddressCodec::default();
        let address = codec.from_bech32(TESTNET_BASE).unwrap();
        assert_eq!(
            codec.address_pub_key_hash(&address).unwrap(),
            "hbas_1jjfnzhxe966a33psfenm0ct2udkkr569qf55v4uprgkgu53uxzn"
        );
        assert_eq!(
            codec.address_stake_key_hash(&address).unwrap(),
            "hstk_1xdak9nllvsp6q636e0p5lrzxqq7xnlne5d3gemafc3e9z20plv2"
        );
    }

    #[test]
    fn configured_prefixes() {
        let codec = AddressCodec::new(KeyHashPrefixes::new("addr_vkh", "stake_vkh").unwrap());
        let address = codec.from_bech32(TESTNET_BASE).unwrap();
        assert_eq!(codec.address_pub_key_hash(&address).unwrap(), PAYMENT_VKH);
        assert_eq!(codec.address_stake_key_hash(&address).unwrap(), STAKE_VKH);
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        assert!(matches!(
            KeyHashPrefixes::new("", "hstk_"),
            Err(Error::InvalidPrefix { .. })
        ));
        assert!(matches!(
            KeyHashPrefixes::new("hbas_", "Mixed"),
            Err(Error::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn new_base_address_fails_on_invalid_key_hash() {
        let codec = AddressCodec::default();
        match codec.new_base_address(NetworkId::TESTNET, "invalid-bech32", STAKE_VKH) {
            Err(Error::PaymentKeyHash { input, .. }) => assert_eq!(input, "invalid-bech32"),
            other => panic!("unexpected result {:?}", other),
        }
        match codec.new_base_address(NetworkId::TESTNET, PAYMENT_VKH, "stake_vkh1xxxx") {
            Err(Error::StakeKeyHash { input, .. }) => assert_eq!(input, "stake_vkh1xxxx"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn from_bech32_gives_none_on_failure() {
        let codec = AddressCodec::default();
        assert_eq!(codec.from_bech32("not-a-valid-bech32-string"), None);
        assert_eq!(
            codec.from_bech32("stake1uyehkck0lajq8gr28t9uxnuvgcqrc6070x3k9r8048z8y5gh6ffgw"),
            None
        );
        assert_eq!(
            codec.from_bech32("addr1vx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzers66hrl8"),
            None
        );
        assert_eq!(codec.from_bech32(PAYMENT_VKH), None);
    }

    #[test]
    fn script_credentials_are_not_key_hashes() {
        let codec = AddressCodec::default();
        let script: ScriptHash = "c37b1b5dc0669f1d3c61a6fddb2e8fde96be87b881c60bce8e8d542f"
            .parse()
            .unwrap();
        let address = codec
            .from_bech32("addr1z8phkx6acpnf78fuvxn0mkew3l0fd058hzquvz7w36x4gten0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgs9yc0hh")
            .unwrap();
        assert_eq!(address.payment_cred(), &StakeCredential::ScriptHash(script));
        assert!(matches!(
            codec.address_pub_key_hash(&address),
            Err(Error::CredentialKindMismatch {
                role: CredentialRole::Payment
            })
        ));
        assert!(codec.address_stake_key_hash(&address).is_ok());

        let address = BaseAddress::new(NetworkId::MAINNET, *address.stake_cred(), script.into());
        assert!(matches!(
            codec.address_stake_key_hash(&address),
            Err(Error::CredentialKindMismatch {
                role: CredentialRole::Stake
            })
        ));
    }

    quickcheck! {
        fn bech32_round_trip(address: BaseAddress) -> bool {
            let codec = AddressCodec::default();
            codec.from_bech32(&codec.address_bech32(&address)) == Some(address)
        }

        fn construction_keeps_network_and_hashes(network: NetworkId, payment: KeyHash, stake: KeyHash) -> bool {
            let codec = AddressCodec::default();
            let address = codec
                .new_base_address(
                    network,
                    &payment.to_bech32_str("addr_vkh").unwrap(),
                    &stake.to_bech32_str("stake_vkh").unwrap(),
                )
                .unwrap();
            let pkh = codec.address_pub_key_hash(&address).unwrap();
            let skh = codec.address_stake_key_hash(&address).unwrap();

            codec.address_network_id(&address) == network
                && KeyHash::from_bech32_str(&pkh).unwrap() == payment
                && KeyHash::from_bech32_str(&skh).unwrap() == stake
                && Address::from(address).kind() == &Kind::Base(payment.into(), stake.into())
        }
    }
}
