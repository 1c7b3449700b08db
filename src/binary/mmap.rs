//! Memory-mapped word files.
//!
//! [`MmapWords`] opens a file holding raw words (for example a
//! [`RiceVec`](crate::rice::RiceVec)'s bytes dumped verbatim) and exposes it
//! as `&[u64]` without copying. Mappings are page aligned, so the cast from
//! bytes is free; byte order is native, matching what
//! [`words_to_bytes`](super::words_to_bytes) produced on the same machine.

use std::fmt;
use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

/// Why a word file failed to open.
#[derive(Debug)]
pub enum MmapError {
    /// Underlying file or mapping failure.
    Io(std::io::Error),
    /// The file's byte length is not a whole number of words.
    BadLength(u64),
}

impl fmt::Display for MmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmapError::Io(err) => write!(f, "io error: {}", err),
            MmapError::BadLength(len) => {
                write!(f, "file length {} is not a multiple of 8", len)
            }
        }
    }
}

impl std::error::Error for MmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MmapError::Io(err) => Some(err),
            MmapError::BadLength(_) => None,
        }
    }
}

impl From<std::io::Error> for MmapError {
    fn from(err: std::io::Error) -> Self {
        MmapError::Io(err)
    }
}

/// A read-only memory mapping viewed as 64-bit words.
pub struct MmapWords {
    map: Mmap,
}

impl MmapWords {
    /// Map `path` read-only.
    ///
    /// The file must stay untouched for the mapping's lifetime; truncating
    /// it elsewhere while mapped is undefined behavior at the OS level.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MmapError> {
        let file = File::open(path)?;
        // SAFETY: the mapping is private to this struct and read-only; the
        // caller contract above covers outside truncation.
        let map = unsafe { Mmap::map(&file)? };
        if map.len() % 8 != 0 {
            return Err(MmapError::BadLength(map.len() as u64));
        }
        Ok(Self { map })
    }

    /// The mapped words.
    #[inline]
    pub fn words(&self) -> &[u64] {
        bytemuck::cast_slice(&self.map)
    }

    /// Number of mapped words.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len() / 8
    }

    /// Whether the file held no words.
    pub fn is_empty(&self) -> bool {
        self.map.len() == 0
    }
}
