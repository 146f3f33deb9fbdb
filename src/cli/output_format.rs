use serde_json::Value;
use structopt::{clap::arg_enum, StructOpt};
use thiserror::Error;

#[derive(StructOpt, Debug)]
pub struct OutputFormat {
    /// Format of output data. Possible values: yaml, json.
    #[structopt(
        long = "output-format",
        default_value = "yaml",
        possible_values = &FormatVariant::variants(),
        case_insensitive = true
    )]
    format: FormatVariant,
}

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FormatVariant {
        Yaml,
        Json,
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("formatting output failed")]
    Yaml(#[from] serde_yaml::Error),
    #[error("formatting output failed")]
    Json(#[from] serde_json::Error),
}

impl OutputFormat {
    pub fn format_json(&self, data: Value) -> Result<String, Error> {
        let formatted = match self.format {
            FormatVariant::Yaml => serde_yaml::to_string(&data)?,
            FormatVariant::Json => serde_json::to_string_pretty(&data)?,
        };
        Ok(formatted)
    }
}
