//! Log setup of the command line tool.
//!
//! Settings come from the configuration file and are overridden by the
//! command line arguments. Logs always go to the standard error so they
//! never mix with the command output.

use lazy_static::lazy_static;
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;
use structopt::StructOpt;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;

const DEFAULT_FILTER_LEVEL: LevelFilter = LevelFilter::WARN;
const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Plain;

lazy_static! {
    static ref LOG_FILTER_LEVEL_POSSIBLE_VALUES: Vec<&'static str> = {
        [
            LevelFilter::OFF,
            LevelFilter::TRACE,
            LevelFilter::DEBUG,
            LevelFilter::INFO,
            LevelFilter::WARN,
            LevelFilter::ERROR,
        ]
        .iter()
        .map(|name| name.to_string().to_ascii_lowercase())
        .map(|name| &*Box::leak(name.into_boxed_str()))
        .collect()
    };
}

#[derive(Debug, Copy, Clone, serde_derive::Serialize, serde_derive::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Format of the logger.
pub enum LogFormat {
    Plain,
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogFormat::Plain => "plain",
            LogFormat::Json => "json",
        };
        f.write_str(s)
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &*s.trim().to_lowercase() {
            "plain" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, serde_derive::Serialize, serde_derive::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    #[serde(default, with = "filter_level_opt_serde")]
    pub level: Option<LevelFilter>,
    #[serde(default)]
    pub format: Option<LogFormat>,
}

mod filter_level_opt_serde {
    use super::*;
    use serde::Serialize as _;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<LevelFilter>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|variant| {
                variant.parse().map_err(|_| {
                    D::Error::unknown_variant(&variant, &**LOG_FILTER_LEVEL_POSSIBLE_VALUES)
                })
            })
            .transpose()
    }

    pub fn serialize<S: Serializer>(
        data: &Option<LevelFilter>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        data.map(|level| level.to_string()).serialize(serializer)
    }
}

fn log_level_parse(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("Unknown log level value: '{}'", level))
}

#[derive(Debug, Default, StructOpt)]
pub struct CliSettings {
    /// Set log messages minimum severity. If not configured anywhere, defaults to "warn".
    #[structopt(
        long = "log-level",
        parse(try_from_str = log_level_parse),
        possible_values = &LOG_FILTER_LEVEL_POSSIBLE_VALUES
    )]
    pub log_level: Option<LevelFilter>,

    /// Set format of the log emitted. Can be "json" or "plain".
    /// If not configured anywhere, defaults to "plain".
    #[structopt(long = "log-format", parse(try_from_str))]
    pub log_format: Option<LogFormat>,
}

impl LogSettings {
    pub fn new(command_line: &CliSettings, file: Option<&FileSettings>) -> LogSettings {
        let mut settings = LogSettings {
            level: DEFAULT_FILTER_LEVEL,
            format: DEFAULT_LOG_FORMAT,
        };

        if let Some(cfg) = file {
            if let Some(level) = cfg.level {
                settings.level = level;
            }
            if let Some(format) = cfg.format {
                settings.format = format;
            }
        }

        // command line arguments override everything else
        if let Some(level) = command_line.log_level {
            settings.level = level;
        }
        if let Some(format) = command_line.log_format {
            settings.format = format;
        }

        settings
    }

    /// Install the global subscriber. The returned guard flushes the
    /// pending logs when dropped and has to be kept alive until exit.
    pub fn init_log(self) -> Result<WorkerGuard, Error> {
        use tracing_subscriber::prelude::*;

        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        match self.format {
            LogFormat::Plain => {
                let layer = tracing_subscriber::fmt::Layer::new()
                    .with_level(true)
                    .with_writer(non_blocking);
                tracing_subscriber::registry()
                    .with(self.level)
                    .with(layer)
                    .try_init()?;
            }
            LogFormat::Json => {
                let layer = tracing_subscriber::fmt::Layer::new()
                    .json()
                    .with_level(true)
                    .with_writer(non_blocking);
                tracing_subscriber::registry()
                    .with(self.level)
                    .with(layer)
                    .try_init()?;
            }
        }
        Ok(guard)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to set global subscriber")]
    SetGlobalSubscriberError(#[from] tracing_subscriber::util::TryInitError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cli_has_priority() {
        let cli = CliSettings::from_iter(vec!["example", "--log-level", "trace"]);

        let file: FileSettings = serde_yaml::from_str(
            r#"
            level: info
            format: json
            "#,
        )
        .unwrap();

        let settings = LogSettings::new(&cli, Some(&file));

        assert_eq!(settings.level, LevelFilter::TRACE);
        assert_eq!(settings.format, LogFormat::Json);
    }

    #[test]
    fn defaults() {
        let settings = LogSettings::new(&CliSettings::default(), None);
        assert_eq!(settings.level, DEFAULT_FILTER_LEVEL);
        assert_eq!(settings.format, DEFAULT_LOG_FORMAT);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(serde_yaml::from_str::<FileSettings>("level: verbose").is_err());
    }
}
