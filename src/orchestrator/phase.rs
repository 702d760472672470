//! Operation phases
//!
//! The states one operation passes through, from connecting to closed.
//! Payload-free operations skip `Negotiating` and `Transferring`.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Connecting,
    Authenticating,
    ConfiguringTransfer,
    Negotiating,
    Transferring,
    AwaitingFinalReply,
    Terminating,
    Closed,
}

/// Records the phases entered by one run.
#[derive(Debug, Default)]
pub struct PhaseTracker {
    history: Vec<Phase>,
}

impl PhaseTracker {
    pub fn enter(&mut self, phase: Phase) {
        match self.current() {
            Some(previous) => debug!("Phase {previous:?} -> {phase:?}"),
            None => debug!("Phase {phase:?}"),
        }
        self.history.push(phase);
    }

    pub fn current(&self) -> Option<Phase> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Phase] {
        &self.history
    }
}
