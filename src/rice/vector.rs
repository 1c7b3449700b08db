//! Sealed Golomb-Rice bit stream.

#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::RiceCursor;
use crate::binary;

/// An immutable, sealed Golomb-Rice bit stream.
///
/// Produced by [`RiceBuilder::build`](super::RiceBuilder::build), or
/// restored from words or a byte stream, and only ever read afterwards.
/// Decoding state lives in separately constructed [`RiceCursor`]s, so any
/// number of cursors, on any number of threads, may read one vector.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiceVec {
    words: Vec<u64>,
}

impl RiceVec {
    /// Wrap raw words (little-endian bit order) as a sealed stream.
    pub fn from_words(words: Vec<u64>) -> Self {
        Self { words }
    }

    /// The sealed words.
    #[inline]
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Native-endian byte view of the sealed words.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        binary::words_to_bytes(&self.words)
    }

    /// Allocated bit capacity, rounded up to whole words by
    /// [`build`](super::RiceBuilder::build). Not the written bit count,
    /// which the owner tracks via
    /// [`bits_written`](super::RiceBuilder::bits_written).
    #[inline]
    pub fn size_in_bits(&self) -> usize {
        self.words.len() * 64
    }

    /// Start a cursor over this stream.
    ///
    /// The cursor begins with both region cursors at bit 0, so a stream with
    /// a nonempty fixed region must be positioned with
    /// [`RiceCursor::reset`] before the first decode.
    pub fn cursor(&self) -> RiceCursor<'_> {
        RiceCursor::new(&self.words)
    }

    /// Write the stream as a counted little-endian word sequence.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        binary::write_words(writer, &self.words)
    }

    /// Read back a stream written by [`write_to`](Self::write_to).
    #[cfg(feature = "std")]
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            words: binary::read_words(reader)?,
        })
    }
}

impl core::fmt::Debug for RiceVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RiceVec")
            .field("words", &self.words.len())
            .field("bits", &self.size_in_bits())
            .finish()
    }
}
