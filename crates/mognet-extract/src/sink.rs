//! Filesystem output sink

use std::io;
use std::path::PathBuf;

use mognet_formats::extract::{ObjectPath, Sink};
use tracing::debug;

/// Sink that writes each object under a root directory, creating parent
/// directories on demand.
pub struct DirectorySink {
    root: PathBuf,
    written: usize,
}

impl DirectorySink {
    /// Sink rooted at `root`; nothing is created until the first object
    /// arrives.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    /// Number of objects written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl Sink for DirectorySink {
    fn write(&mut self, path: &ObjectPath, data: &[u8]) -> io::Result<()> {
        let target = self.root.join(path.to_relative_path());
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %target.display(), size = data.len(), "writing object");
        std::fs::write(&target, data)?;
        self.written += 1;
        Ok(())
    }
}
