//! FTP reply codes
//!
//! Standard reply codes the client checks against.

pub const DATA_CONNECTION_OPEN: u16 = 125;
pub const FILE_STATUS_OK: u16 = 150;
pub const COMMAND_OK: u16 = 200;
pub const SERVICE_READY: u16 = 220;
pub const CLOSING_CONTROL: u16 = 221;
pub const ENTERING_PASSIVE: u16 = 227;
pub const LOGIN_SUCCESS: u16 = 230;
pub const FILE_ACTION_OK: u16 = 250;
pub const PATHNAME_CREATED: u16 = 257;
pub const PASSWORD_REQUIRED: u16 = 331;

/// Replies that allow payload to start flowing on the data connection
pub const TRANSFER_READY: [u16; 2] = [DATA_CONNECTION_OPEN, FILE_STATUS_OK];
