//! Operation result types
//!
//! Defines the outcomes returned by the orchestrator. A `Rejected` or a
//! failed move cleanup is an operation-level failure: the session itself
//! completed and was terminated cleanly.

use crate::protocol::Reply;
use crate::transfer::TransferSummary;

/// What happened to the source of a move after the copy
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCleanup {
    Removed,
    /// The server refused to delete the remote source
    Rejected(Reply),
    /// The source was kept because the transfer did not report success
    Skipped(Reply),
    /// Removal failed locally, or the control connection was lost
    Failed(String),
}

/// Result of one operation
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    /// Directory listing text, exactly as received
    Listing {
        text: String,
        transfer: TransferSummary,
    },
    Transferred(TransferSummary),
    /// Administrative command accepted with its expected code
    Completed(Reply),
    /// Administrative command answered with any other code
    Rejected(Reply),
    Moved {
        transfer: TransferSummary,
        cleanup: SourceCleanup,
    },
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        self.failure().is_none()
    }

    /// Describes an operation-level failure, if there was one.
    pub fn failure(&self) -> Option<String> {
        match self {
            OperationOutcome::Listing { transfer, .. } | OperationOutcome::Transferred(transfer) => {
                unconfirmed(transfer)
            }
            OperationOutcome::Completed(_) => None,
            OperationOutcome::Rejected(reply) => Some(format!("server refused: {reply}")),
            OperationOutcome::Moved { cleanup, .. } => match cleanup {
                SourceCleanup::Removed => None,
                SourceCleanup::Rejected(reply) => {
                    Some(format!("file copied but source not removed: {reply}"))
                }
                SourceCleanup::Skipped(reply) => {
                    Some(format!("transfer not confirmed, source kept: {reply}"))
                }
                SourceCleanup::Failed(reason) => {
                    Some(format!("file copied but source not removed: {reason}"))
                }
            },
        }
    }
}

fn unconfirmed(transfer: &TransferSummary) -> Option<String> {
    if transfer.final_reply.is_positive() {
        None
    } else {
        Some(format!("transfer not confirmed: {}", transfer.final_reply))
    }
}
