//! Configuration management for the RAX FTP client
//!
//! Settings come from built-in defaults, then an optional
//! `rax-ftp-client.toml` in the working directory (or a file named on the
//! command line), then `RAX_FTP_CLIENT_*` environment variables.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

/// Name of the configuration file looked up when none is given
pub const DEFAULT_CONFIG_NAME: &str = "rax-ftp-client";

/// Chunk size used for data transfers
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// When the data connection is opened relative to the transfer command
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataConnectOrder {
    /// Send the command, wait for 125/150, then connect.
    ///
    /// Servers that only send 150 once the data connection is accepted stall
    /// until their accept timeout here; use `BeforeCommand` for them.
    #[default]
    AfterReady,
    /// Connect right after PASV, before the command is sent
    BeforeCommand,
}

/// Client configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Bytes read or written per chunk on the data connection
    pub buffer_size: usize,

    /// Require 200 for TYPE/MODE/STRU and 226/250 after every transfer
    pub strict_replies: bool,

    pub data_connect: DataConnectOrder,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            strict_replies: false,
            data_connect: DataConnectOrder::AfterReady,
        }
    }
}

impl ClientConfig {
    /// Load configuration with environment overrides.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .set_default("buffer_size", DEFAULT_BUFFER_SIZE as i64)?
            .set_default("strict_replies", false)?
            .set_default("data_connect", "after_ready")?
            .add_source(file)
            .add_source(Environment::with_prefix("RAX_FTP_CLIENT").try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
