//! FTP URL decoding
//!
//! Turns `ftp://[user[:password]@]host[:port][/path]` into a fully resolved
//! `SessionConfig`. Every default is applied here so nothing downstream has
//! to guess.

use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use url::{Host, Url};

use crate::error::ArgumentError;
use crate::orchestrator::Direction;
use crate::transfer::modes::TransferParams;

pub const FTP_SCHEME: &str = "ftp";
pub const DEFAULT_PORT: u16 = 21;
pub const ANONYMOUS_USER: &str = "anonymous";
pub const ROOT_PATH: &str = "/";

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            user: ANONYMOUS_USER.to_string(),
            password: String::new(),
        }
    }
}

/// Everything needed to open and drive one control session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    /// Remote path the operation acts on
    pub path: String,
    pub credentials: Credentials,
    pub params: TransferParams,
}

impl SessionConfig {
    /// Decodes an `ftp://` URL.
    pub fn from_url(raw: &str) -> Result<Self, ArgumentError> {
        let url = Url::parse(raw).map_err(|e| match e {
            url::ParseError::EmptyHost => ArgumentError::MissingHost(raw.to_string()),
            _ => ArgumentError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            },
        })?;

        if url.scheme() != FTP_SCHEME {
            return Err(ArgumentError::UnsupportedScheme(url.scheme().to_string()));
        }

        let host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => return Err(ArgumentError::MissingHost(raw.to_string())),
        };

        let credentials = Credentials {
            user: match url.username() {
                "" => ANONYMOUS_USER.to_string(),
                user => decode(user),
            },
            password: url.password().map(decode).unwrap_or_default(),
        };

        let path = match url.path() {
            "" => ROOT_PATH.to_string(),
            path => decode(path),
        };

        Ok(Self {
            host,
            port: url.port().unwrap_or(DEFAULT_PORT),
            path,
            credentials,
            params: TransferParams::default(),
        })
    }
}

/// Returns whether a command-line parameter names a remote location.
pub fn is_ftp_url(param: &str) -> bool {
    param.starts_with("ftp://")
}

/// Works out which side of a copy/move is remote.
///
/// Exactly one of the two parameters must be an FTP URL; the other is the
/// local path.
pub fn resolve_transfer(
    source: &str,
    destination: &str,
) -> Result<(SessionConfig, Direction), ArgumentError> {
    match (is_ftp_url(source), is_ftp_url(destination)) {
        (true, false) => Ok((
            SessionConfig::from_url(source)?,
            Direction::Download {
                local: PathBuf::from(destination),
            },
        )),
        (false, true) => Ok((
            SessionConfig::from_url(destination)?,
            Direction::Upload {
                local: PathBuf::from(source),
            },
        )),
        (true, true) => Err(ArgumentError::BothRemote),
        (false, false) => Err(ArgumentError::NoRemoteParameter),
    }
}

fn decode(component: &str) -> String {
    percent_decode_str(component)
        .decode_utf8_lossy()
        .into_owned()
}
