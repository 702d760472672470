//! Error types
//!
//! Defines domain-specific error types for each layer of the FTP client.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::Reply;

/// Control-channel framing and passive-reply decoding errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection closed by server")]
    ConnectionClosed,
    #[error("reply not terminated by CRLF: {0:?}")]
    MissingDelimiter(String),
    #[error("malformed reply: {0:?}")]
    MalformedReply(String),
    #[error("no parenthesized address in passive reply: {0}")]
    MissingPassiveAddress(String),
    #[error("passive reply carries {count} fields, expected 6: {text}")]
    PassiveFieldCount { count: usize, text: String },
    #[error("invalid field {field:?} in passive reply: {text}")]
    MalformedPassive { field: String, text: String },
}

/// Data channel errors
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to open data connection to {endpoint}: {source}")]
    ConnectFailed {
        endpoint: String,
        #[source]
        source: io::Error,
    },
    #[error("data connection read failed: {0}")]
    ReadFailed(#[source] io::Error),
    #[error("data connection write failed: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Local filesystem errors
#[derive(Debug, Error)]
pub enum LocalError {
    #[error("local file '{}' does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("local path '{}' is not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot remove '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading local file: {0}")]
    Read(#[source] io::Error),
    #[error("error writing local file: {0}")]
    Write(#[source] io::Error),
}

/// Command-line and URL errors
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("invalid FTP URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("URL must start with ftp:// (got scheme '{0}')")]
    UnsupportedScheme(String),
    #[error("URL must specify a host: {0}")]
    MissingHost(String),
    #[error("one of the parameters must be an FTP URL")]
    NoRemoteParameter,
    #[error("only one of the parameters may be an FTP URL")]
    BothRemote,
}

/// Coarse classification of a failure, used for reporting and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    ProtocolViolation,
    UnexpectedReplyCode,
    LocalIo,
    Argument,
    Config,
}

/// General FTP client error that encompasses all error types
#[derive(Debug, Error)]
pub enum FtpClientError {
    #[error("error connecting to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("control connection error: {0}")]
    Connection(#[from] io::Error),
    #[error("control connection is closed")]
    SessionClosed,
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("{context}: {reply}")]
    UnexpectedReply { context: String, reply: Reply },
    #[error("login failed: {0}")]
    Auth(Reply),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error(transparent)]
    LocalIo(#[from] LocalError),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl FtpClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FtpClientError::Connect { .. }
            | FtpClientError::Connection(_)
            | FtpClientError::SessionClosed
            | FtpClientError::Transfer(_)
            | FtpClientError::Protocol(ProtocolError::ConnectionClosed) => ErrorKind::Connection,
            FtpClientError::Protocol(_) => ErrorKind::ProtocolViolation,
            FtpClientError::UnexpectedReply { .. } | FtpClientError::Auth(_) => {
                ErrorKind::UnexpectedReplyCode
            }
            FtpClientError::LocalIo(_) => ErrorKind::LocalIo,
            FtpClientError::Argument(_) => ErrorKind::Argument,
            FtpClientError::Config(_) => ErrorKind::Config,
        }
    }

    /// The reply that triggered the failure, if any.
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            FtpClientError::UnexpectedReply { reply, .. } | FtpClientError::Auth(reply) => {
                Some(reply)
            }
            _ => None,
        }
    }

    /// Whether the control connection can no longer carry commands after this error.
    pub fn breaks_control(&self) -> bool {
        matches!(
            self,
            FtpClientError::Connect { .. }
                | FtpClientError::Connection(_)
                | FtpClientError::SessionClosed
                | FtpClientError::Protocol(
                    ProtocolError::ConnectionClosed
                        | ProtocolError::MissingDelimiter(_)
                        | ProtocolError::MalformedReply(_)
                )
        )
    }
}
