//! Operations the client can carry out in one session

use std::fmt;
use std::path::{Path, PathBuf};

/// Which way a copy or move carries the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Remote file to `local`
    Download { local: PathBuf },
    /// `local` to the remote path
    Upload { local: PathBuf },
}

/// One top-level operation on the remote path of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    MakeDir,
    Delete,
    RemoveDir,
    Upload(PathBuf),
    Download(PathBuf),
    /// Copy, then remove the source
    Move(Direction),
}

impl Operation {
    /// Builds the plain copy for a direction.
    pub fn copy(direction: Direction) -> Self {
        match direction {
            Direction::Download { local } => Operation::Download(local),
            Direction::Upload { local } => Operation::Upload(local),
        }
    }

    /// Local file that must exist before the session is opened.
    pub fn upload_source(&self) -> Option<&Path> {
        match self {
            Operation::Upload(local) | Operation::Move(Direction::Upload { local }) => Some(local),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "ls"),
            Operation::MakeDir => write!(f, "mkdir"),
            Operation::Delete => write!(f, "rm"),
            Operation::RemoveDir => write!(f, "rmdir"),
            Operation::Upload(local) => write!(f, "upload of {}", local.display()),
            Operation::Download(local) => write!(f, "download to {}", local.display()),
            Operation::Move(Direction::Upload { local }) => {
                write!(f, "move of {} to server", local.display())
            }
            Operation::Move(Direction::Download { local }) => {
                write!(f, "move from server to {}", local.display())
            }
        }
    }
}
