use crate::shared::Result;
use std::path::Path;

/// SnapshotReader port for reading snapshot contents
///
/// This port abstracts the file system operations needed to read
/// an inventory snapshot exported from a subscription.
pub trait SnapshotReader {
    /// Reads the snapshot file at the specified path
    ///
    /// # Arguments
    /// * `snapshot_path` - Path to the snapshot JSON file
    ///
    /// # Returns
    /// The raw content of the snapshot as a string
    ///
    /// # Errors
    /// Returns an error if:
    /// - The snapshot file does not exist
    /// - The path is a symbolic link, not a regular file, or too large
    /// - The file cannot be read due to permissions or I/O errors
    fn read_snapshot(&self, snapshot_path: &Path) -> Result<String>;
}
