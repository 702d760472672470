pub mod config;
pub mod error;
pub mod orchestrator;
pub mod protocol;
pub mod session;
pub mod storage;
pub mod target;
pub mod transfer;
pub mod utils;

pub use orchestrator::TransferOrchestrator;
