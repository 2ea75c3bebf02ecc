//! Filename generation and collision handling.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::media::MediaKind;

/// Safety cap on collision suffix probing.
const MAX_SUFFIX: u32 = 1000;

/// Build a media filename: `twitter_<kind>_<unix-seconds>[_<n>].<ext>`.
pub fn media_filename(kind: MediaKind, timestamp: i64, suffix: Option<u32>, ext: &str) -> String {
    match suffix {
        Some(n) => format!("twitter_{}_{}_{}.{}", kind.tag(), timestamp, n, ext),
        None => format!("twitter_{}_{}.{}", kind.tag(), timestamp, ext),
    }
}

/// Allocates output paths that are unique within one run.
///
/// Two entries of the same kind resolved within the same second would
/// otherwise collide; the allocator appends `_1`, `_2`, ... before the
/// extension. Names already present on disk are treated as taken too, so a
/// re-run into the same directory never overwrites earlier output.
#[derive(Debug, Default)]
pub struct FilenameAllocator {
    reserved: HashSet<PathBuf>,
}

impl FilenameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a unique path in `dir` for the given kind and timestamp.
    pub fn allocate(&mut self, dir: &Path, kind: MediaKind, timestamp: i64, ext: &str) -> PathBuf {
        let base = dir.join(media_filename(kind, timestamp, None, ext));
        if self.reserve(&base) {
            return base;
        }

        let mut counter = 1;
        loop {
            let candidate = dir.join(media_filename(kind, timestamp, Some(counter), ext));
            if self.reserve(&candidate) || counter >= MAX_SUFFIX {
                return candidate;
            }
            counter += 1;
        }
    }

    fn reserve(&mut self, path: &Path) -> bool {
        if path.exists() || self.reserved.contains(path) {
            return false;
        }
        self.reserved.insert(path.to_path_buf());
        true
    }
}
