//! YAML configuration file.
//!
//! ```yaml
//! key_hash_prefixes:
//!   payment: hbas_
//!   stake: hstk_
//! log:
//!   level: info
//!   format: plain
//! ```
//!
//! Every entry is optional.

use crate::codec::{
    self, AddressCodec, KeyHashPrefixes, DEFAULT_PAYMENT_KEY_HASH_PREFIX,
    DEFAULT_STAKE_KEY_HASH_PREFIX,
};
use crate::log::FileSettings;
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read configuration file `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid key hash prefixes in configuration")]
    KeyHashPrefixes(#[from] codec::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub key_hash_prefixes: KeyHashPrefixesSettings,
    #[serde(default)]
    pub log: Option<FileSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyHashPrefixesSettings {
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default)]
    pub stake: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self, Error> {
        // an empty document deserializes to unit, not to an empty map
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.key_hash_prefixes()?;
        Ok(config)
    }

    pub fn key_hash_prefixes(&self) -> Result<KeyHashPrefixes, codec::Error> {
        let settings = &self.key_hash_prefixes;
        KeyHashPrefixes::new(
            settings
                .payment
                .as_deref()
                .unwrap_or(DEFAULT_PAYMENT_KEY_HASH_PREFIX),
            settings
                .stake
                .as_deref()
                .unwrap_or(DEFAULT_STAKE_KEY_HASH_PREFIX),
        )
    }

    pub fn codec(&self) -> Result<AddressCodec, codec::Error> {
        self.key_hash_prefixes().map(AddressCodec::new)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.key_hash_prefixes().unwrap(), KeyHashPrefixes::default());
    }

    #[test]
    fn partial_prefixes() {
        let config = Config::from_yaml_str(
            r#"
            key_hash_prefixes:
              stake: stake_vkh
            "#,
        )
        .unwrap();
        let prefixes = config.key_hash_prefixes().unwrap();
        assert_eq!(prefixes.payment(), DEFAULT_PAYMENT_KEY_HASH_PREFIX);
        assert_eq!(prefixes.stake(), "stake_vkh");
    }

    #[test]
    fn log_settings() {
        let config = Config::from_yaml_str(
            r#"
            log:
              level: debug
            "#,
        )
        .unwrap();
        let log = config.log.unwrap();
        assert_eq!(log.level, Some(LevelFilter::DEBUG));
        assert_eq!(log.format, None);
    }

    #[test]
    fn invalid_prefix() {
        let result = Config::from_yaml_str(
            r#"
            key_hash_prefixes:
              payment: "pay ment"
            "#,
        );
        assert!(matches!(result, Err(Error::KeyHashPrefixes(_))));
    }

    #[test]
    fn unknown_field() {
        let result = Config::from_yaml_str("network: mainnet");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn missing_file() {
        let result = Config::from_file("/this/file/does/not/exist.yaml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
