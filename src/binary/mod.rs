//! Binary serialization of word-backed structures.
//!
//! Everything in this crate persists as sequences of 64-bit words. This
//! module provides the byte-level views (zero-copy where alignment allows)
//! and the counted little-endian streams used by
//! [`RiceVec`](crate::rice::RiceVec) and
//! [`FixedFenwick`](crate::fenwick::FixedFenwick).
//!
//! Streams carry no magic number: a `u64` word count, then the words, all
//! little-endian. Bytes written by one structure are only meaningful to the
//! structure that wrote them.

#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "memmap2")]
pub mod mmap;

/// View words as raw bytes in native byte order, zero copy.
#[inline]
pub fn words_to_bytes(words: &[u64]) -> &[u8] {
    bytemuck::cast_slice(words)
}

/// View bytes as words, zero copy.
///
/// Panics unless the slice's length is a multiple of 8 and its address is
/// 8-byte aligned. [`bytes_to_words_vec`] copies instead of caring.
#[inline]
pub fn bytes_to_words(bytes: &[u8]) -> &[u64] {
    assert!(
        bytes.len() % 8 == 0,
        "byte length {} must be a multiple of 8",
        bytes.len()
    );
    bytemuck::cast_slice(bytes)
}

/// Fallible [`bytes_to_words`]: `None` when length or alignment is off.
#[inline]
pub fn try_bytes_to_words(bytes: &[u8]) -> Option<&[u64]> {
    bytemuck::try_cast_slice(bytes).ok()
}

/// Copy bytes into owned words, reading little-endian, any alignment.
///
/// Panics unless the length is a multiple of 8.
pub fn bytes_to_words_vec(bytes: &[u8]) -> Vec<u64> {
    assert!(
        bytes.len() % 8 == 0,
        "byte length {} must be a multiple of 8",
        bytes.len()
    );
    bytes
        .chunks_exact(8)
        .map(|chunk| u64::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// Write `words` as a counted little-endian stream: a `u64` count, then the
/// words themselves.
#[cfg(feature = "std")]
pub fn write_words<W: std::io::Write>(writer: &mut W, words: &[u64]) -> std::io::Result<()> {
    writer.write_all(&(words.len() as u64).to_le_bytes())?;
    #[cfg(target_endian = "little")]
    writer.write_all(words_to_bytes(words))?;
    #[cfg(target_endian = "big")]
    for &word in words {
        writer.write_all(&word.to_le_bytes())?;
    }
    Ok(())
}

/// Read back a stream written by [`write_words`].
#[cfg(feature = "std")]
pub fn read_words<R: std::io::Read>(reader: &mut R) -> std::io::Result<Vec<u64>> {
    let mut header = [0u8; 8];
    reader.read_exact(&mut header)?;
    let count = u64::from_le_bytes(header) as usize;
    let byte_len = count.checked_mul(8).ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, "word count out of range")
    })?;
    let mut bytes = vec![0u8; byte_len];
    reader.read_exact(&mut bytes)?;
    Ok(bytes_to_words_vec(&bytes))
}
