//! Decode cursor over a sealed Golomb-Rice stream.
//!
//! A cursor keeps two positions into one buffer: an absolute bit offset into
//! the fixed region, and a word-at-a-time window into the unary region. The
//! window is kept shifted so its bit 0 is the next unread unary bit, with
//! `valid_bits` counting how much of it is still meaningful; everything at
//! and above that index is zero. When the window runs dry the next word is
//! loaded whole, and an all-zero word contributes 64 zeros to the running
//! quotient without any per-bit scanning.

use crate::util::broadword::select_in_word;

/// Decode cursor over a borrowed word slice.
///
/// Cursors are cheap to create and `Copy`: duplicating one yields an
/// independent position, so saving and restoring a decode point is a plain
/// assignment, and concurrent consumers each hold their own. The underlying
/// words are never mutated.
///
/// Reads must mirror the build-time appends: one
/// [`read_next`](Self::read_next) per item with the width it was built
/// with, in the original item order, or
/// [`skip_subtree`](Self::skip_subtree) over whole runs of items. Reading
/// past the written bits or with mismatched widths desynchronizes the two
/// regions and yields garbage, and panics once an access falls outside the
/// sealed words.
#[derive(Clone, Copy, Debug)]
pub struct RiceCursor<'a> {
    words: &'a [u64],
    /// Absolute bit offset of the next remainder.
    fixed_offset: usize,
    /// Unary bits, shifted so bit 0 is the next unread bit.
    window: u64,
    /// Index of the next unary word to load.
    next_word: usize,
    /// Unconsumed bits left in `window`.
    valid_bits: u32,
}

impl<'a> RiceCursor<'a> {
    /// Cursor over raw sealed words, for example a memory-mapped file.
    ///
    /// Equivalent to [`RiceVec::cursor`](super::RiceVec::cursor): both
    /// region cursors start at bit 0 with the first word load deferred.
    /// Streams with a nonempty fixed region need a
    /// [`reset`](Self::reset) before the first decode.
    pub fn new(words: &'a [u64]) -> Self {
        Self {
            words,
            fixed_offset: 0,
            window: 0,
            next_word: 0,
            valid_bits: 0,
        }
    }

    /// Decode the next value, whose remainder is `log2golomb` bits wide.
    #[inline]
    pub fn read_next(&mut self, log2golomb: u32) -> u64 {
        debug_assert!(log2golomb < 64, "remainder width {} out of range", log2golomb);
        let mut quotient = 0u64;

        if self.window == 0 {
            // Whatever was left of the window is all zeros, so it belongs
            // to this quotient's run.
            quotient = u64::from(self.valid_bits);
            self.window = self.words[self.next_word];
            self.next_word += 1;
            self.valid_bits = 64;
            while self.window == 0 {
                quotient += 64;
                self.window = self.words[self.next_word];
                self.next_word += 1;
            }
        }

        let run = self.window.trailing_zeros();
        // Two shifts: consuming run + 1 bits in one go could shift by 64.
        self.window >>= run;
        self.window >>= 1;
        self.valid_bits -= run + 1;
        quotient += u64::from(run);

        let remainder = read_bits(self.words, self.fixed_offset, log2golomb);
        self.fixed_offset += log2golomb as usize;
        (quotient << log2golomb) | remainder
    }

    /// Advance past `nodes` unary codes and `fixed_bits` bits of the fixed
    /// region without decoding them.
    ///
    /// Whole words are consumed by population count; only the word holding
    /// the last skipped terminator pays for a bit select. `nodes` must be
    /// positive, and `fixed_bits` must be the exact width sum of the skipped
    /// items.
    pub fn skip_subtree(&mut self, nodes: usize, fixed_bits: usize) {
        debug_assert!(nodes > 0, "skip of zero codes");
        let mut missing = nodes;
        let mut in_window = self.window.count_ones() as usize;
        while in_window < missing {
            missing -= in_window;
            self.window = self.words[self.next_word];
            self.next_word += 1;
            self.valid_bits = 64;
            in_window = self.window.count_ones() as usize;
        }
        let last = select_in_word(self.window, (missing - 1) as u32);
        self.window >>= last;
        self.window >>= 1;
        self.valid_bits -= last + 1;
        self.fixed_offset += fixed_bits;
    }

    /// Reposition both region cursors.
    ///
    /// `bit_pos` becomes the next fixed-region offset, and the unary window
    /// reloads from absolute bit `bit_pos + unary_offset`. The displacement
    /// is the caller's bookkeeping (a cursor does not know where the fixed
    /// region ends): to resume at item `i` of a stream whose fixed region is
    /// `F` bits, pass the width sum of items before `i` as `bit_pos`, and
    /// `F - bit_pos` plus the unary bits spent before item `i` as
    /// `unary_offset`. A fresh stream starts at `reset(0, F)`.
    pub fn reset(&mut self, bit_pos: usize, unary_offset: usize) {
        let unary_pos = bit_pos + unary_offset;
        self.fixed_offset = bit_pos;
        self.window = self.words[unary_pos / 64] >> (unary_pos % 64);
        self.next_word = unary_pos / 64 + 1;
        self.valid_bits = 64 - (unary_pos % 64) as u32;
    }
}

/// Read `width` bits starting at absolute bit `offset`, crossing at most
/// one word boundary.
#[inline]
fn read_bits(words: &[u64], offset: usize, width: u32) -> u64 {
    if width == 0 {
        return 0;
    }
    let word = offset / 64;
    let bit = (offset % 64) as u32;
    let mask = (1u64 << width) - 1;
    let low = words[word] >> bit;
    if bit + width <= 64 {
        low & mask
    } else {
        (low | (words[word + 1] << (64 - bit))) & mask
    }
}
