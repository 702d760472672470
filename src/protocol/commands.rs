//! Module `commands`
//!
//! Defines the FTP commands the client sends over the control connection
//! and how each one is rendered on the wire.

use std::fmt;

use crate::transfer::modes::{FileStructure, TransferMode, TransferType};

/// Represents an FTP command sent to the server.
///
/// Commands that take an argument store it in the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    USER(String), // Username for login
    PASS(String), // Password for login
    TYPE(TransferType),
    MODE(TransferMode),
    STRU(FileStructure),
    PASV,         // Enter passive mode
    LIST(String), // List a remote path
    RETR(String), // Retrieve/download file
    STOR(String), // Store/upload file
    DELE(String), // Delete file
    MKD(String),  // Make directory
    RMD(String),  // Remove directory
    QUIT,
}

impl Command {
    /// The command verb as sent on the wire.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::USER(_) => "USER",
            Command::PASS(_) => "PASS",
            Command::TYPE(_) => "TYPE",
            Command::MODE(_) => "MODE",
            Command::STRU(_) => "STRU",
            Command::PASV => "PASV",
            Command::LIST(_) => "LIST",
            Command::RETR(_) => "RETR",
            Command::STOR(_) => "STOR",
            Command::DELE(_) => "DELE",
            Command::MKD(_) => "MKD",
            Command::RMD(_) => "RMD",
            Command::QUIT => "QUIT",
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            Command::USER(arg)
            | Command::PASS(arg)
            | Command::LIST(arg)
            | Command::RETR(arg)
            | Command::STOR(arg)
            | Command::DELE(arg)
            | Command::MKD(arg)
            | Command::RMD(arg) => Some(arg),
            Command::TYPE(transfer_type) => Some(transfer_type.code()),
            Command::MODE(mode) => Some(mode.code()),
            Command::STRU(structure) => Some(structure.code()),
            Command::PASV | Command::QUIT => None,
        }
    }

    /// Wire text without the CRLF terminator.
    pub fn to_line(&self) -> String {
        match self.argument() {
            Some(arg) => format!("{} {}", self.verb(), arg),
            None => self.verb().to_string(),
        }
    }
}

/// Log-safe rendering: the PASS argument is masked.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(_) => write!(f, "PASS ****"),
            _ => write!(f, "{}", self.to_line()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_lines() {
        assert_eq!(Command::USER("alice".into()).to_line(), "USER alice");
        assert_eq!(Command::TYPE(TransferType::Image).to_line(), "TYPE I");
        assert_eq!(Command::MODE(TransferMode::Stream).to_line(), "MODE S");
        assert_eq!(Command::STRU(FileStructure::File).to_line(), "STRU F");
        assert_eq!(Command::PASV.to_line(), "PASV");
        assert_eq!(Command::LIST("/pub".into()).to_line(), "LIST /pub");
        assert_eq!(Command::MKD("/a b".into()).to_line(), "MKD /a b");
    }

    #[test]
    fn test_password_is_masked_in_display() {
        let pass = Command::PASS("hunter2".into());
        assert_eq!(pass.to_line(), "PASS hunter2");
        assert_eq!(pass.to_string(), "PASS ****");
    }

    #[test]
    fn test_empty_password_keeps_separator() {
        assert_eq!(Command::PASS(String::new()).to_line(), "PASS ");
    }
}
