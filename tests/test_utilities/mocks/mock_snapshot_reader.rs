use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use resgraph::prelude::*;

/// Mock SnapshotReader serving fixed content and recording requested paths
#[derive(Clone)]
pub struct MockSnapshotReader {
    pub content: String,
    pub should_fail: bool,
    pub requested_paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockSnapshotReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            should_fail: false,
            requested_paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(String::new())
        }
    }

    pub fn requested_paths(&self) -> Vec<PathBuf> {
        self.requested_paths.lock().unwrap().clone()
    }
}

impl SnapshotReader for MockSnapshotReader {
    fn read_snapshot(&self, snapshot_path: &Path) -> Result<String> {
        self.requested_paths
            .lock()
            .unwrap()
            .push(snapshot_path.to_path_buf());
        if self.should_fail {
            anyhow::bail!("Mock snapshot read failure");
        }
        Ok(self.content.clone())
    }
}
