//! Extraction output seam
//!
//! Walkers emit each terminal object exactly once as a relative
//! [`ObjectPath`] plus the object's bytes; they never retain an object after
//! the [`Sink`] call returns. Where the bytes land (filesystem, memory, a
//! listing) is the caller's business.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Relative output location of one extracted object
///
/// An ordered list of path segments (the walkers push zero-padded decimal
/// indices) with an optional suffix. The suffix carries its own leading dot
/// and is appended to the last segment, so `02` + `013` + `.ff9db` renders
/// as `02/013.ff9db`.
#[derive(Debug, Clone, Default)]
pub struct ObjectPath {
    segments: Vec<String>,
    suffix: Option<String>,
}

impl ObjectPath {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this path with one more segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.segments.push(segment.into());
        child
    }

    /// A copy of this path with the given suffix (replacing any prior one).
    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        let mut named = self.clone();
        named.suffix = Some(suffix.into());
        named
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path as a relative `PathBuf`, suffix folded into the last
    /// segment.
    pub fn to_relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for (index, segment) in self.segments.iter().enumerate() {
            if index + 1 == self.segments.len()
                && let Some(suffix) = &self.suffix
            {
                path.push(format!("{segment}{suffix}"));
            } else {
                path.push(segment);
            }
        }
        path
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "/")?;
            }
            write!(f, "{segment}")?;
        }
        if let Some(suffix) = &self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

/// Receiver for extracted objects
pub trait Sink {
    /// Persist one object. Errors abort the extraction run.
    fn write(&mut self, path: &ObjectPath, data: &[u8]) -> io::Result<()>;
}

/// Sink that collects objects in memory
///
/// Used by the test suites and useful for dry runs and listings.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Extracted objects in emission order, as `(path, bytes)` pairs.
    pub objects: Vec<(String, Vec<u8>)>,
}

impl Sink for MemorySink {
    fn write(&mut self, path: &ObjectPath, data: &[u8]) -> io::Result<()> {
        self.objects.push((path.to_string(), data.to_vec()));
        Ok(())
    }
}
