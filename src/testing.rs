use crate::address::{Address, BaseAddress, Kind, KindType, Pointer};
use crate::credential::StakeCredential;
use crate::hash::{KeyHash, ScriptHash, HASH_SIZE};
use crate::network::{NetworkId, NETWORK_ID_MAX};
use quickcheck::{Arbitrary, Gen};

fn arbitrary_hash<G: Gen>(g: &mut G) -> [u8; HASH_SIZE] {
    let mut bytes = [0u8; HASH_SIZE];
    for byte in bytes.iter_mut() {
        *byte = u8::arbitrary(g);
    }
    bytes
}

impl Arbitrary for NetworkId {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        NetworkId::from_header(u8::arbitrary(g) % (NETWORK_ID_MAX + 1))
    }
}

impl Arbitrary for KeyHash {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        KeyHash::from_bytes(arbitrary_hash(g))
    }
}

impl Arbitrary for ScriptHash {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        ScriptHash::from_bytes(arbitrary_hash(g))
    }
}

impl Arbitrary for StakeCredential {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        if bool::arbitrary(g) {
            StakeCredential::KeyHash(Arbitrary::arbitrary(g))
        } else {
            StakeCredential::ScriptHash(Arbitrary::arbitrary(g))
        }
    }
}

impl Arbitrary for Pointer {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        Pointer::new(
            Arbitrary::arbitrary(g),
            Arbitrary::arbitrary(g),
            Arbitrary::arbitrary(g),
        )
    }
}

impl Arbitrary for KindType {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        match u8::arbitrary(g) % 4 {
            0 => KindType::Base,
            1 => KindType::Pointer,
            2 => KindType::Enterprise,
            3 => KindType::Reward,
            _ => unreachable!(),
        }
    }
}

impl Arbitrary for Address {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let network = Arbitrary::arbitrary(g);
        let kind = match KindType::arbitrary(g) {
            KindType::Base => Kind::Base(Arbitrary::arbitrary(g), Arbitrary::arbitrary(g)),
            KindType::Pointer => Kind::Pointer(Arbitrary::arbitrary(g), Arbitrary::arbitrary(g)),
            KindType::Enterprise => Kind::Enterprise(Arbitrary::arbitrary(g)),
            KindType::Reward => Kind::Reward(Arbitrary::arbitrary(g)),
        };
        Address(network, kind)
    }
}

impl Arbitrary for BaseAddress {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        BaseAddress::new(
            Arbitrary::arbitrary(g),
            Arbitrary::arbitrary(g),
            Arbitrary::arbitrary(g),
        )
    }
}
