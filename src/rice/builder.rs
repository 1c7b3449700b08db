//! Builder side of the Golomb-Rice bit stream.

#[cfg(not(test))]
use alloc::vec::Vec;

use super::RiceVec;

/// Accumulates Golomb-Rice codes into a growing bit stream.
///
/// A stream is written in two passes over the items sharing one bit cursor:
/// first every item's fixed-width remainder via
/// [`append_fixed`](Self::append_fixed), one call per item, in item order,
/// then every item's unary-coded quotient in the same order via
/// [`append_unary_all`](Self::append_unary_all). The passes produce the
/// back-to-back fixed and unary regions described in the
/// [module docs](crate::rice).
///
/// The builder is consumed by [`build`](Self::build), which trims the
/// backing words to the written bit count and seals them into an immutable
/// [`RiceVec`]. Appending after sealing is impossible by construction.
///
/// # Examples
///
/// ```
/// use prefixbits::rice::RiceBuilder;
///
/// let mut builder = RiceBuilder::new();
/// builder.append_fixed(3, 2);
/// builder.append_fixed(1, 2);
/// builder.append_unary_all(&[0, 2]);
/// assert_eq!(builder.bits_written(), 8);
///
/// let rice = builder.build();
/// assert_eq!(rice.size_in_bits(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct RiceBuilder {
    words: Vec<u64>,
    bit_count: usize,
}

impl RiceBuilder {
    /// Create a builder with a small default preallocation.
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Create a builder preallocating `words` 64-bit words.
    pub fn with_capacity(words: usize) -> Self {
        Self {
            words: Vec::with_capacity(words),
            bit_count: 0,
        }
    }

    /// Total bits written so far. Monotonically nondecreasing.
    #[inline]
    pub fn bits_written(&self) -> usize {
        self.bit_count
    }

    /// Append the low `log2golomb` bits of `v` at the current bit cursor.
    ///
    /// The write is split across a word boundary when it does not fit in the
    /// current word. `log2golomb` must be below 64; zero width appends
    /// nothing.
    pub fn append_fixed(&mut self, v: u64, log2golomb: u32) {
        debug_assert!(log2golomb < 64, "remainder width {} out of range", log2golomb);
        let lower = v & ((1u64 << log2golomb) - 1);
        let word = self.bit_count / 64;
        let used = (self.bit_count % 64) as u32;

        self.grow_to(self.bit_count + log2golomb as usize);

        self.words[word] |= lower << used;
        if used + log2golomb > 64 {
            self.words[word + 1] = lower >> (64 - used);
        }
        self.bit_count += log2golomb as usize;
    }

    /// Append, for each quotient `u` in order, `u` zero bits and one set
    /// bit. The backing words grow once up front to cover the whole run.
    pub fn append_unary_all(&mut self, quotients: &[u32]) {
        let total: usize = quotients.iter().map(|&u| u as usize + 1).sum();
        self.grow_to(self.bit_count + total);

        for &u in quotients {
            self.bit_count += u as usize;
            self.words[self.bit_count / 64] |= 1u64 << (self.bit_count % 64);
            self.bit_count += 1;
        }
    }

    /// Seal the stream: trim the backing words to the minimum count covering
    /// the written bits and hand them to an immutable [`RiceVec`].
    pub fn build(mut self) -> RiceVec {
        self.words.truncate(self.bit_count.div_ceil(64));
        self.words.shrink_to_fit();
        RiceVec::from_words(self.words)
    }

    // One slack word keeps every append in bounds, including zero-width
    // appends landing exactly on a word boundary.
    fn grow_to(&mut self, bits: usize) {
        let words = bits / 64 + 1;
        if self.words.len() < words {
            self.words.resize(words, 0);
        }
    }
}

impl Default for RiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
