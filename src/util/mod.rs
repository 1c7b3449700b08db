//! Internal bit-manipulation utilities.
//!
//! Low-level primitives used by the bit-stream codec. Most users should not
//! need these directly.

pub(crate) mod broadword;

pub use broadword::select_in_word;
