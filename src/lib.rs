//! # Prefixbits
//!
//! Succinct prefix structures for Rust: Golomb-Rice coded bit streams and
//! Fenwick prefix-sum trees.
//!
//! ## Module Organization
//!
//! - [`rice`] - Two-region Golomb-Rice bit streams: a linear [`RiceBuilder`]
//!   seals into an immutable [`RiceVec`], decoded by any number of
//!   independent [`RiceCursor`]s with sequential decode, bulk skip and
//!   repositioning
//! - [`fenwick`] - The [`FenwickTree`] contract for dynamic prefix sums
//!   (point update, prefix query, bounded search over plain and
//!   complemented sums), with [`FixedFenwick`] as the dense realization
//! - [`binary`] - Word-level views and counted little-endian streams
//!
//! ## Quick Start
//!
//! ```
//! use prefixbits::{FenwickTree, FixedFenwick, RiceBuilder};
//!
//! // Golomb-Rice: every remainder, then every quotient, then seal.
//! let values = [9u64, 2, 30, 7];
//! let mut builder = RiceBuilder::new();
//! for &v in &values {
//!     builder.append_fixed(v, 2);
//! }
//! let quotients: Vec<u32> = values.iter().map(|&v| (v >> 2) as u32).collect();
//! builder.append_unary_all(&quotients);
//!
//! let rice = builder.build();
//! let mut cursor = rice.cursor();
//! cursor.reset(0, 2 * values.len()); // the fixed region is 2 bits per item
//! for &v in &values {
//!     assert_eq!(cursor.read_next(2), v);
//! }
//!
//! // Fenwick: prefix sums under updates.
//! let mut tree = FixedFenwick::from_values(64, &[3, 0, 5]);
//! tree.add(2, 4);
//! assert_eq!(tree.prefix(3), 12);
//! assert_eq!(tree.find(7), (2, 0));
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Stream I/O (`write_to`/`read_from`). Disable for
//!   `no_std` + `alloc` builds
//! - `serde` - Serialization/deserialization derives on [`RiceVec`] and
//!   [`FixedFenwick`]
//! - `mmap-tests` - Memory-mapped word files (`binary::mmap`)

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Core modules
// =============================================================================

/// Golomb-Rice coded bit streams.
pub mod rice;

/// Dynamic prefix-sum (Fenwick) trees.
pub mod fenwick;

/// Binary serialization utilities.
pub mod binary;

/// Internal utilities (not part of public API).
pub(crate) mod util;

// =============================================================================
// Public re-exports (convenience)
// =============================================================================

pub use fenwick::{FenwickTree, FixedFenwick};
pub use rice::{optimal_log2golomb, RiceBuilder, RiceCursor, RiceVec};
pub use util::select_in_word;
