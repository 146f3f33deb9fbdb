mod address;
mod output_format;
mod utils;

pub use self::output_format::OutputFormat;

use crate::codec::AddressCodec;
use crate::config::Config;
use crate::log::{CliSettings, LogSettings};
use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

/// Shelley address toolkit
#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct ShelleyAddr {
    /// YAML configuration file with the key hash prefixes and the log settings.
    #[structopt(long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(flatten)]
    log: CliSettings,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub enum Command {
    /// Address tooling and helper
    Address(address::Address),
    /// Utilities that perform specialized tasks
    Utils(utils::Utils),
}

impl ShelleyAddr {
    pub fn exec(self) -> Result<(), Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let _guard = LogSettings::new(&self.log, config.log.as_ref()).init_log()?;
        let codec = config.codec()?;
        tracing::debug!(
            payment_prefix = codec.prefixes().payment(),
            stake_prefix = codec.prefixes().stake(),
            "codec configured"
        );
        self.command.exec(&codec)
    }
}

impl Command {
    pub fn exec(self, codec: &AddressCodec) -> Result<(), Box<dyn Error>> {
        match self {
            Command::Address(address) => address.exec(codec)?,
            Command::Utils(utils) => utils.exec()?,
        };
        Ok(())
    }
}
