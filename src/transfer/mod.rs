//! Transfer module for the FTP client
//!
//! Handles passive-mode negotiation, the data connection, and the
//! transfer parameters fixed at login.

pub mod data_channel;
pub mod modes;
pub mod passive;
pub mod results;

// Re-export key types and functions
pub use data_channel::DataChannel;
pub use modes::TransferParams;
pub use passive::{Endpoint, negotiate_passive, parse_passive_reply};
pub use results::TransferSummary;
