use super::output_format::{self, OutputFormat};
use crate::address::{self, Address as ShelleyAddress, Kind};
use crate::codec::{self, AddressCodec};
use crate::credential::StakeCredential;
use crate::network::NetworkId;
use serde_json::{json, Value};
use structopt::StructOpt;
use thiserror::Error;

#[derive(StructOpt)]
#[structopt(name = "address", rename_all = "kebab-case")]
pub enum Address {
    /// Create a base address from a payment key hash and a stake key hash.
    New(NewArgs),

    /// Display the content and info of a bech32 formatted address.
    Info(InfoArgs),

    /// Display the network id of a bech32 base address.
    NetworkId(AddressArgs),

    /// Display the payment key hash of a bech32 base address, encoded with
    /// the configured payment prefix.
    PaymentKeyHash(AddressArgs),

    /// Display the stake key hash of a bech32 base address, encoded with
    /// the configured stake prefix.
    StakeKeyHash(AddressArgs),
}

#[derive(StructOpt)]
pub struct NewArgs {
    /// The network id: `mainnet', `testnet' or a number between 0 and 15.
    #[structopt(long = "network", default_value = "mainnet")]
    network: NetworkId,

    /// The payment key hash in bech32 encoding, the prefix is ignored.
    #[structopt(name = "PAYMENT_KEY_HASH")]
    payment: String,

    /// The stake key hash in bech32 encoding, the prefix is ignored.
    #[structopt(name = "STAKE_KEY_HASH")]
    stake: String,
}

#[derive(StructOpt)]
pub struct InfoArgs {
    /// An address, in bech32 format, to display the content
    /// and info that can be extracted from.
    #[structopt(name = "ADDRESS")]
    address: String,

    #[structopt(flatten)]
    output_format: OutputFormat,
}

#[derive(StructOpt)]
pub struct AddressArgs {
    /// A base address in bech32 format.
    #[structopt(name = "ADDRESS")]
    address: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] codec::Error),
    #[error("invalid address")]
    Address(#[from] address::Error),
    #[error(transparent)]
    Output(#[from] output_format::Error),
}

impl Address {
    pub fn exec(self, codec: &AddressCodec) -> Result<(), Error> {
        match self {
            Address::New(args) => {
                let address = codec.new_base_address(args.network, &args.payment, &args.stake)?;
                println!("{}", codec.address_bech32(&address));
            }
            Address::Info(args) => {
                let info = address_info(codec, &args.address)?;
                println!("{}", args.output_format.format_json(info)?);
            }
            Address::NetworkId(args) => {
                let address = codec.try_from_bech32(&args.address)?;
                println!("{}", codec.address_network_id(&address));
            }
            Address::PaymentKeyHash(args) => {
                let address = codec.try_from_bech32(&args.address)?;
                println!("{}", codec.address_pub_key_hash(&address)?);
            }
            Address::StakeKeyHash(args) => {
                let address = codec.try_from_bech32(&args.address)?;
                println!("{}", codec.address_stake_key_hash(&address)?);
            }
        }
        Ok(())
    }
}

fn address_info(codec: &AddressCodec, address: &str) -> Result<Value, Error> {
    let address: ShelleyAddress = address.parse()?;
    let prefixes = codec.prefixes();
    let mut info = json!({
        "address": address.to_bech32_str(),
        "network_id": address.network_id().as_u8(),
        "kind": address.kind_type().to_string(),
    });
    match address.kind() {
        Kind::Base(payment, stake) => {
            info["payment"] = credential_info(payment, prefixes.payment());
            info["stake"] = credential_info(stake, prefixes.stake());
        }
        Kind::Pointer(payment, pointer) => {
            info["payment"] = credential_info(payment, prefixes.payment());
            info["pointer"] = json!({
                "slot": pointer.slot,
                "tx_index": pointer.tx_index,
                "cert_index": pointer.cert_index,
            });
        }
        Kind::Enterprise(payment) => {
            info["payment"] = credential_info(payment, prefixes.payment());
        }
        Kind::Reward(stake) => {
            info["stake"] = credential_info(stake, prefixes.stake());
        }
    }
    Ok(info)
}

fn credential_info(credential: &StakeCredential, prefix: &str) -> Value {
    match credential {
        // prefixes are validated when the codec is built
        StakeCredential::KeyHash(hash) => match hash.to_bech32_str(prefix) {
            Ok(bech32) => json!({ "key_hash": bech32 }),
            Err(_) => json!({ "key_hash": hash.to_string() }),
        },
        StakeCredential::ScriptHash(hash) => json!({ "script_hash": hash.to_string() }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn info_of_base_address() {
        let info = address_info(
            &AddressCodec::default(),
            "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x",
        )
        .unwrap();
        assert_eq!(info["network_id"], 1);
        assert_eq!(info["kind"], "base");
        assert_eq!(
            info["payment"]["key_hash"],
            "hbas_1jjfnzhxe966a33psfenm0ct2udkkr569qf55v4uprgkgu53uxzn"
        );
        assert_eq!(
            info["stake"]["key_hash"],
            "hstk_1xdak9nllvsp6q636e0p5lrzxqq7xnlne5d3gemafc3e9z20plv2"
        );
    }

    #[test]
    fn info_of_pointer_address() {
        let info = address_info(
            &AddressCodec::default(),
            "addr1gx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer5pnz75xxcrzqf96k",
        )
        .unwrap();
        assert_eq!(info["kind"], "pointer");
        assert_eq!(info["pointer"]["slot"], 2498243);
        assert_eq!(info["pointer"]["tx_index"], 27);
        assert_eq!(info["pointer"]["cert_index"], 3);
        assert!(info.get("stake").is_none());
    }

    #[test]
    fn info_of_script_address() {
        let info = address_info(
            &AddressCodec::default(),
            "addr1z8phkx6acpnf78fuvxn0mkew3l0fd058hzquvz7w36x4gten0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgs9yc0hh",
        )
        .unwrap();
        assert_eq!(
            info["payment"]["script_hash"],
            "c37b1b5dc0669f1d3c61a6fddb2e8fde96be87b881c60bce8e8d542f"
        );
    }

    #[test]
    fn info_of_invalid_address() {
        assert!(matches!(
            address_info(&AddressCodec::default(), "not-a-valid-bech32-string"),
            Err(Error::Address(_))
        ));
    }
}
