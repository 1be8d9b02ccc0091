//! Bounded, read-only access to candidate executable files.
//!
//! Input is memory-mapped behind a size ceiling so a pathological path can
//! never make the inspector map or read unbounded data. How the bytes are
//! interpreted is the format layer's concern; this module only produces them.

pub mod error;

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;

use crate::io::error::{IoError, Result};

/// Ceiling for candidate images (64 MiB). Managed assemblies are small;
/// anything larger is refused rather than mapped.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// A size-capped, read-only view of one file.
#[derive(Debug)]
pub struct BoundedReader {
    path: PathBuf,
    // None when the file is empty; memmap cannot map zero-length files.
    mmap: Option<Mmap>,
    file_size: u64,
}

impl BoundedReader {
    /// Open `path` under the default size ceiling.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_limit(path, DEFAULT_MAX_FILE_SIZE)
    }

    /// Open `path`, refusing files larger than `max_file_size` bytes.
    pub fn open_with_limit<P: AsRef<Path>>(path: P, max_file_size: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        debug!(path = %path.display(), size = file_size, "opening candidate image");

        if file_size > max_file_size {
            return Err(IoError::FileTooLarge {
                limit: max_file_size,
                found: file_size,
            });
        }

        let mmap = if file_size == 0 {
            None
        } else {
            // Safety: read-only mapping of a regular file we just opened.
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            file_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.file_size
    }

    /// The mapped bytes; an empty slice for an empty file.
    pub fn data(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}
