//! Dense fixed-width Fenwick tree.

#[cfg(not(test))]
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::FenwickTree;

/// Fenwick tree over plain `u64` node sums.
///
/// Node `j` aggregates the `lowbit(j)` elements ending at `j`, the classic
/// binary-indexed layout. Slot 0 of the backing array is permanently unused,
/// which keeps every index 1-based like the contract.
///
/// `ceiling` is the per-element upper bound that
/// [`comp_find`](FenwickTree::comp_find) complements against: element `i`
/// counts as `ceiling - element_i` there. For meaningful complemented
/// searches keep every element at most `ceiling` and `ceiling * len()`
/// within `u64`; the tree itself never checks either.
///
/// # Examples
///
/// ```
/// use prefixbits::{FenwickTree, FixedFenwick};
///
/// let mut tree = FixedFenwick::from_values(64, &[3, 0, 5]);
/// assert_eq!(tree.prefix(2), 3);
/// tree.add(2, 4);
/// assert_eq!(tree.prefix(3), 12);
/// assert_eq!(tree.find(7), (2, 0));
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedFenwick {
    tree: Vec<u64>,
    ceiling: u64,
}

impl FixedFenwick {
    /// Create an empty tree. Complemented searches treat every element as
    /// bounded above by `ceiling`.
    pub fn new(ceiling: u64) -> Self {
        Self::with_capacity(ceiling, 0)
    }

    /// Create an empty tree preallocating room for `capacity` elements.
    pub fn with_capacity(ceiling: u64, capacity: usize) -> Self {
        let mut tree = Vec::with_capacity(capacity + 1);
        tree.push(0);
        Self { tree, ceiling }
    }

    /// Build from a whole sequence in linear time.
    pub fn from_values(ceiling: u64, values: &[u64]) -> Self {
        let mut tree = Vec::with_capacity(values.len() + 1);
        tree.push(0);
        tree.extend_from_slice(values);
        for node in 1..tree.len() {
            let parent = node + (node & node.wrapping_neg());
            if parent < tree.len() {
                tree[parent] = tree[parent].wrapping_add(tree[node]);
            }
        }
        Self { tree, ceiling }
    }

    /// The per-element bound used by complemented searches.
    #[inline]
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Serialize as the ceiling followed by the node words, little-endian.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.ceiling.to_le_bytes())?;
        crate::binary::write_words(writer, &self.tree)
    }

    /// Restore a tree serialized by [`write_to`](Self::write_to).
    #[cfg(feature = "std")]
    pub fn read_from<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        let ceiling = u64::from_le_bytes(buf);
        let tree = crate::binary::read_words(reader)?;
        if tree.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "fenwick stream is missing slot 0",
            ));
        }
        Ok(Self { tree, ceiling })
    }

    // Largest power of two at most len(), or 0 for an empty tree. The
    // searches probe spans in decreasing power-of-two order from here.
    fn search_mask(&self) -> usize {
        let n = self.len();
        if n == 0 {
            0
        } else {
            1 << (usize::BITS - 1 - n.leading_zeros())
        }
    }
}

impl FenwickTree for FixedFenwick {
    fn prefix(&self, length: usize) -> u64 {
        debug_assert!(length <= self.len(), "prefix length {} out of range", length);
        let mut sum = 0u64;
        let mut node = length;
        while node != 0 {
            sum = sum.wrapping_add(self.tree[node]);
            node &= node - 1;
        }
        sum
    }

    fn add(&mut self, idx: usize, delta: i64) {
        debug_assert!(
            idx >= 1 && idx <= self.len(),
            "index {} out of range",
            idx
        );
        let mut node = idx;
        while node < self.tree.len() {
            self.tree[node] = self.tree[node].wrapping_add(delta as u64);
            node += node & node.wrapping_neg();
        }
    }

    fn find(&self, bound: u64) -> (usize, u64) {
        let mut node = 0;
        let mut excess = bound;
        let mut probe = self.search_mask();
        while probe != 0 {
            let next = node + probe;
            if next <= self.len() && self.tree[next] <= excess {
                excess -= self.tree[next];
                node = next;
            }
            probe >>= 1;
        }
        (node, excess)
    }

    fn comp_find(&self, bound: u64) -> (usize, u64) {
        let mut node = 0;
        let mut excess = bound;
        let mut probe = self.search_mask();
        while probe != 0 {
            let next = node + probe;
            if next <= self.len() {
                let complement = (probe as u64) * self.ceiling - self.tree[next];
                if complement <= excess {
                    excess -= complement;
                    node = next;
                }
            }
            probe >>= 1;
        }
        (node, excess)
    }

    fn push(&mut self, value: u64) {
        let node = self.tree.len();
        let lowbit = node & node.wrapping_neg();
        let mut sum = value;
        let mut span = 1;
        // Node `node` covers the lowbit(node) elements ending at it; fold in
        // the already-aggregated spans to its left.
        while span < lowbit {
            sum = sum.wrapping_add(self.tree[node - span]);
            span <<= 1;
        }
        self.tree.push(sum);
    }

    fn pop(&mut self) {
        debug_assert!(!self.is_empty(), "pop on an empty tree");
        if self.tree.len() > 1 {
            self.tree.truncate(self.tree.len() - 1);
        }
    }

    fn reserve(&mut self, capacity: usize) {
        let want = capacity + 1;
        if want > self.tree.len() {
            self.tree.reserve(want - self.tree.len());
        }
    }

    fn trim(&mut self, capacity: usize) {
        self.tree.shrink_to(capacity.saturating_add(1));
    }

    fn len(&self) -> usize {
        self.tree.len() - 1
    }

    fn bit_count(&self) -> usize {
        (core::mem::size_of::<Self>() + self.tree.capacity() * core::mem::size_of::<u64>()) * 8
    }
}

impl core::fmt::Debug for FixedFenwick {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FixedFenwick")
            .field("len", &self.len())
            .field("ceiling", &self.ceiling)
            .finish()
    }
}
