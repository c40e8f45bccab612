use std::path::PathBuf;

use envconfig::Envconfig;

use crate::error::{Error, Result};

pub const DEFAULT_OUT_PATH: &str = "latest.json";

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "YT_API_KEY")]
    pub api_key: String,
    #[envconfig(from = "YT_CHANNEL_ID")]
    pub channel_id: String,
    #[envconfig(from = "OUT_PATH", default = "latest.json")]
    pub out_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::init_from_env()
            .map_err(missing_var)
            .and_then(Self::validated)
    }

    #[cfg(test)]
    pub fn from_map(vars: &std::collections::HashMap<String, String>) -> Result<Self> {
        Self::init_from_hashmap(vars)
            .map_err(missing_var)
            .and_then(Self::validated)
    }

    /// Empty values are treated the same as unset ones.
    fn validated(mut self) -> Result<Self> {
        if self.api_key.is_empty() {
            return Err(Error::ConfigurationMissing("YT_API_KEY"));
        }
        if self.channel_id.is_empty() {
            return Err(Error::ConfigurationMissing("YT_CHANNEL_ID"));
        }
        if self.out_path.as_os_str().is_empty() {
            self.out_path = PathBuf::from(DEFAULT_OUT_PATH);
        }
        Ok(self)
    }
}

fn missing_var(err: envconfig::Error) -> Error {
    match err {
        envconfig::Error::EnvVarMissing { name } => Error::ConfigurationMissing(name),
        envconfig::Error::ParseError { name } => Error::ConfigurationInvalid(name),
    }
}
