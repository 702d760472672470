//! Local file system operations
//!
//! Opens, creates and removes the local side of a copy or move.

use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};
use tokio::fs::{self, File};

use crate::error::LocalError;

/// Checks that `path` names an existing regular file.
pub async fn ensure_source_file(path: &Path) -> Result<(), LocalError> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(LocalError::NotAFile(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(LocalError::NotFound(path.to_path_buf())),
        Err(source) => Err(LocalError::Open {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Opens a local file for upload.
pub async fn open_source(path: &Path) -> Result<File, LocalError> {
    let file = File::open(path).await.map_err(|source| match source.kind() {
        ErrorKind::NotFound => LocalError::NotFound(path.to_path_buf()),
        _ => LocalError::Open {
            path: path.to_path_buf(),
            source,
        },
    })?;

    debug!("Opened {} for reading", path.display());
    Ok(file)
}

/// Creates (or truncates) the local destination of a download.
pub async fn create_destination(path: &Path) -> Result<File, LocalError> {
    let file = File::create(path)
        .await
        .map_err(|source| LocalError::Create {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Created {} for writing", path.display());
    Ok(file)
}

/// Deletes a local file once it has been moved to the server.
pub async fn remove_local_file(path: &Path) -> Result<(), LocalError> {
    fs::remove_file(path)
        .await
        .map_err(|source| LocalError::Remove {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Removed local file {}", path.display());
    Ok(())
}
