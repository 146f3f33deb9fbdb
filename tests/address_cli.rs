use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const PAYMENT_VKH: &str = "addr_vkh1jjfnzhxe966a33psfenm0ct2udkkr569qf55v4uprgkgu8zsvmg";
const STAKE_VKH: &str = "stake_vkh1xdak9nllvsp6q636e0p5lrzxqq7xnlne5d3gemafc3e9z3v4vud";
const MAINNET_BASE: &str = "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x";
const TESTNET_BASE: &str = "addr_test1qz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgs68faae";
const REWARD: &str = "stake1uyehkck0lajq8gr28t9uxnuvgcqrc6070x3k9r8048z8y5gh6ffgw";

fn shelley_addr() -> Command {
    Command::cargo_bin("shelley-addr").expect("shelley-addr binary is built")
}

#[test]
pub fn new_base_address_on_testnet() {
    shelley_addr()
        .args(&["address", "new", "--network", "testnet", PAYMENT_VKH, STAKE_VKH])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", TESTNET_BASE)));
}

#[test]
pub fn new_base_address_defaults_to_mainnet() {
    shelley_addr()
        .args(&["address", "new", PAYMENT_VKH, STAKE_VKH])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", MAINNET_BASE)));
}

#[test]
pub fn new_base_address_with_invalid_key_hash_fails() {
    shelley_addr()
        .args(&["address", "new", "invalid-bech32", STAKE_VKH])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "cannot decode payment key hash 'invalid-bech32'",
        ));
}

#[test]
pub fn key_hashes_with_default_prefixes() {
    shelley_addr()
        .args(&["address", "payment-key-hash", MAINNET_BASE])
        .assert()
        .success()
        .stdout("hbas_1jjfnzhxe966a33psfenm0ct2udkkr569qf55v4uprgkgu53uxzn\n");
    shelley_addr()
        .args(&["address", "stake-key-hash", MAINNET_BASE])
        .assert()
        .success()
        .stdout("hstk_1xdak9nllvsp6q636e0p5lrzxqq7xnlne5d3gemafc3e9z20plv2\n");
}

#[test]
pub fn key_hashes_with_configured_prefixes() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let config = temp_dir.child("config.yaml");
    config
        .write_str("key_hash_prefixes:\n  payment: addr_vkh\n  stake: stake_vkh\n")
        .unwrap();

    shelley_addr()
        .arg("--config")
        .arg(config.path())
        .args(&["address", "payment-key-hash", TESTNET_BASE])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", PAYMENT_VKH)));
    shelley_addr()
        .arg("--config")
        .arg(config.path())
        .args(&["address", "stake-key-hash", TESTNET_BASE])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", STAKE_VKH)));
}

#[test]
pub fn invalid_config_is_reported() {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let config = temp_dir.child("config.yaml");
    config
        .write_str("key_hash_prefixes:\n  payment: \"\"\n")
        .unwrap();

    shelley_addr()
        .arg("--config")
        .arg(config.path())
        .args(&["address", "network-id", MAINNET_BASE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key hash prefixes"));
}

#[test]
pub fn network_id_of_base_address() {
    shelley_addr()
        .args(&["address", "network-id", TESTNET_BASE])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
pub fn reward_address_is_not_a_base_address() {
    shelley_addr()
        .args(&["address", "network-id", REWARD])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected a base address, found a reward address",
        ));
}

#[test]
pub fn info_as_json() {
    shelley_addr()
        .args(&["address", "info", "--output-format", "json", REWARD])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"kind\": \"reward\"")
                .and(predicate::str::contains("\"network_id\": 1"))
                .and(predicate::str::contains(
                    "hstk_1xdak9nllvsp6q636e0p5lrzxqq7xnlne5d3gemafc3e9z20plv2",
                )),
        );
}

#[test]
pub fn bech32_convert() {
    shelley_addr()
        .args(&["utils", "bech32-convert", PAYMENT_VKH, "hbas_"])
        .assert()
        .success()
        .stdout("hbas_1jjfnzhxe966a33psfenm0ct2udkkr569qf55v4uprgkgu53uxzn\n");
}
