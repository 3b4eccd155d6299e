use crate::ports::outbound::SnapshotReader;
use crate::shared::error::InventoryError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading snapshots from the file system
///
/// Symbolic links, non-regular files and files above the size limit are
/// refused before any content is read.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotReader for FileSystemReader {
    fn read_snapshot(&self, snapshot_path: &Path) -> Result<String> {
        if !snapshot_path.exists() && fs::symlink_metadata(snapshot_path).is_err() {
            return Err(InventoryError::SnapshotNotFound {
                path: snapshot_path.to_path_buf(),
                suggestion: format!(
                    "No file at \"{}\".\n   \
                     Export an inventory snapshot first, or pass the correct path with --snapshot.",
                    snapshot_path.display()
                ),
            }
            .into());
        }

        validate_regular_file(snapshot_path, "snapshot").map_err(|e| {
            InventoryError::FileReadError {
                path: snapshot_path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        fs::read_to_string(snapshot_path).map_err(|e| {
            InventoryError::FileReadError {
                path: snapshot_path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
