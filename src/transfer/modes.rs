//! FTP transfer parameters
//!
//! Representation type, transmission mode and file structure. The client
//! fixes these once per session and never renegotiates them.

use crate::protocol::Command;

/// Representation type (TYPE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    Ascii,
    #[default]
    Image,
}

impl TransferType {
    pub fn code(&self) -> &'static str {
        match self {
            TransferType::Ascii => "A",
            TransferType::Image => "I",
        }
    }
}

/// Transmission mode (MODE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    #[default]
    Stream,
}

impl TransferMode {
    pub fn code(&self) -> &'static str {
        match self {
            TransferMode::Stream => "S",
        }
    }
}

/// File structure (STRU)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStructure {
    #[default]
    File,
}

impl FileStructure {
    pub fn code(&self) -> &'static str {
        match self {
            FileStructure::File => "F",
        }
    }
}

/// The full set of transfer parameters sent after login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferParams {
    pub transfer_type: TransferType,
    pub mode: TransferMode,
    pub structure: FileStructure,
}

impl TransferParams {
    /// Commands in the order they are sent: TYPE, MODE, STRU.
    pub fn commands(&self) -> [Command; 3] {
        [
            Command::TYPE(self.transfer_type),
            Command::MODE(self.mode),
            Command::STRU(self.structure),
        ]
    }
}
