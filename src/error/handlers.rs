//! Error handlers
//!
//! Reports terminal failures and maps them to process exit codes.

use std::error::Error;

use log::{debug, error};

use crate::error::types::{ErrorKind, FtpClientError};

/// Log a terminal error and print it to stderr, with its source chain at
/// debug level.
pub fn report_error(err: &FtpClientError) {
    error!("{:?} error: {err}", err.kind());
    eprintln!("Error: {err}");

    let mut source = err.source();
    while let Some(cause) = source {
        debug!("caused by: {cause}");
        source = cause.source();
    }
}

/// Convert error to process exit code
pub fn exit_code(err: &FtpClientError) -> u8 {
    match err.kind() {
        ErrorKind::Argument | ErrorKind::Config => 2,
        ErrorKind::Connection
        | ErrorKind::ProtocolViolation
        | ErrorKind::UnexpectedReplyCode
        | ErrorKind::LocalIo => 1,
    }
}
