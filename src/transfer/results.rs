//! Transfer result types
//!
//! Defines result structures returned by data transfers.

use crate::protocol::Reply;

/// Result of one completed data transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferSummary {
    /// Bytes carried on the data connection
    pub bytes: u64,
    /// Reply read after the data connection was closed
    pub final_reply: Reply,
}
