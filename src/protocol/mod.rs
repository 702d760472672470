//! FTP protocol implementation
//!
//! Handles reply reading and parsing, reply codes, and command rendering
//! for the control connection.

pub mod commands;
pub mod reader;
pub mod reply;
pub mod responses;

pub use commands::Command;
pub use reader::{CRLF, read_reply_line};
pub use reply::Reply;
