//! Directory signatures for change detection.
//!
//! A signature folds `(path, mtime)` of every watched file into a single
//! `u64` with XOR, so it does not depend on directory enumeration order.
//! Adding, removing or touching a watched file changes the signature.
//! Two changes that cancel each other out are not detected.

use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Walks a directory tree and computes its signature.
#[derive(Clone, Debug)]
pub(crate) struct SignatureScanner {
    root_dir: PathBuf,
    extensions: Vec<String>,
}

impl SignatureScanner {
    /// Create a scanner for files under `root_dir` with one of `extensions`.
    ///
    /// Extensions are given without the leading dot and matched
    /// case-insensitively.
    pub(crate) fn new(root_dir: PathBuf, extensions: &[String]) -> Self {
        Self {
            root_dir,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Compute the signature of the watched files.
    ///
    /// Files that disappear or cannot be stat'ed during the walk are left
    /// out of the signature. A missing root yields `0`.
    pub(crate) fn signature(&self) -> u64 {
        let mut signature = 0;
        self.scan_directory(&self.root_dir, &mut signature);
        signature
    }

    fn scan_directory(&self, dir_path: &Path, signature: &mut u64) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            // Symlinked directories are not followed.
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(&path, signature);
                continue;
            }

            if !self.is_watched(&entry.file_name().to_string_lossy()) {
                continue;
            }

            if let Some(mtime_ns) = modified_nanos(&path) {
                *signature ^= hash_entry(&path, mtime_ns);
            }
        }
    }

    /// Check whether a file name carries a watched extension.
    fn is_watched(&self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

/// Modification time of a regular file in nanoseconds since the epoch.
fn modified_nanos(path: &Path) -> Option<u128> {
    let metadata = fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }
    let modified = metadata.modified().ok()?;
    Some(
        modified
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos()),
    )
}

fn hash_entry(path: &Path, mtime_ns: u128) -> u64 {
    let mut hasher = DefaultHasher::new();
    (path, mtime_ns).hash(&mut hasher);
    hasher.finish()
}
