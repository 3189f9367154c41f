//! Read-only byte views over parser input.

use crate::error::SourceError;
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A file mapped read-only into memory.
///
/// The mapping lives as long as the `MappedSource`, so any slice borrowed from
/// [`MappedSource::as_bytes`] stays valid for a whole parse. Empty files are not
/// mapped and expose an empty view.
#[derive(Debug)]
pub struct MappedSource {
    path: PathBuf,
    mmap: Option<Mmap>,
}

impl MappedSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| SourceError::Open {
            path: path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map(|meta| meta.len())
            .map_err(|source| SourceError::Open {
                path: path.clone(),
                source,
            })?;

        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: the map is read-only; callers must not truncate the file
            // while a parse borrows it.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|source| SourceError::Map {
                path: path.clone(),
                source,
            })?;
            Some(mmap)
        };

        debug!("mapped {} ({len} bytes)", path.display());
        Ok(Self { path, mmap })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start of the `[begin, end)` view.
    pub fn begin(&self) -> *const u8 {
        self.as_bytes().as_ptr_range().start
    }

    /// One past the end of the `[begin, end)` view.
    pub fn end(&self) -> *const u8 {
        self.as_bytes().as_ptr_range().end
    }
}

impl AsRef<[u8]> for MappedSource {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
