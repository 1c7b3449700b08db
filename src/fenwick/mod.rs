//! Dynamic prefix-sum (Fenwick) trees.
//!
//! [`FenwickTree`] is the operation contract every realization satisfies;
//! [`FixedFenwick`] is the dense fixed-width realization. Node indices are
//! 1-based throughout: the aggregated sequence occupies `1..=len()`.
//!
//! Realizations serialize as little-endian word streams, but each owns its
//! encoding. Bytes written by one realization mean nothing to another.

mod fixed;

pub use fixed::FixedFenwick;

/// Operation contract for dynamic prefix-sum trees over nonnegative values.
///
/// The tree aggregates a logical sequence indexed `1..=len()`. Elements are
/// updated in place with [`add`](Self::add) or appended and removed at the
/// tail with [`push`](Self::push) and [`pop`](Self::pop); prefix sums and
/// bounded searches take logarithmic time.
///
/// Two caller-trusted preconditions are never checked: every element must
/// stay nonnegative after `add`, and the searches assume the monotone
/// prefix sums that nonnegative elements guarantee.
pub trait FenwickTree {
    /// Sum of the first `length` elements. `length` ranges over
    /// `0..=len()`; `prefix(0)` is 0.
    fn prefix(&self, length: usize) -> u64;

    /// Add `delta` to element `idx` (1-based).
    ///
    /// Negative deltas are fine as long as the element stays nonnegative.
    fn add(&mut self, idx: usize, delta: i64);

    /// Length of the longest prefix whose sum is at most `bound`, with the
    /// leftover `bound - prefix(length)`.
    ///
    /// When even the first element exceeds `bound` the answer is
    /// `(0, bound)`, an ordinary outcome rather than an error.
    fn find(&self, bound: u64) -> (usize, u64);

    /// [`find`](Self::find) against the complemented sums, where element
    /// `i` counts as `ceiling - element_i` for the realization's ceiling.
    fn comp_find(&self, bound: u64) -> (usize, u64);

    /// Append `value` as the new last element.
    fn push(&mut self, value: u64);

    /// Drop the last element. Allocated space is not released.
    fn pop(&mut self);

    /// Preallocate room for `capacity` elements in total.
    fn reserve(&mut self, capacity: usize);

    /// Shrink the allocation toward `capacity` elements, best effort. Live
    /// elements always survive.
    fn trim(&mut self, capacity: usize);

    /// Shrink the allocation as far as the live elements allow.
    fn trim_to_fit(&mut self) {
        self.trim(0);
    }

    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Estimated total footprint of the structure, in bits.
    fn bit_count(&self) -> usize;
}
