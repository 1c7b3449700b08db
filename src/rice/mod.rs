//! Golomb-Rice coded bit streams.
//!
//! A Golomb-Rice code splits a nonnegative value `v` against a parameter
//! `log2golomb` into a `log2golomb`-bit remainder (`v & (2^log2golomb - 1)`,
//! stored verbatim) and a unary-coded quotient (`v >> log2golomb` zero bits
//! followed by a one).
//!
//! # Stream layout
//!
//! The two halves of each code do not interleave. All remainders come first,
//! back to back in item order; all quotients follow, also in item order, in
//! the same word buffer:
//!
//! ```text
//! bit 0                          F                         F + U
//!   | r0 | r1 | r2 | ...          | q0 | q1 | q2 | ...       |
//!   '------ fixed region ------'  '------ unary region -----'
//! ```
//!
//! Bit `k` of the buffer lives at bit `k % 64` of word `k / 64`, so within a
//! word the first-written bit is the least significant.
//!
//! A cursor advances one position in each region per decoded item, which
//! means decoding must replay the same widths, in the same order, as the
//! build did. The boundary `F` is the builder's bookkeeping, not the
//! stream's: [`RiceCursor::reset`] is how a consumer positions the two
//! region cursors before decoding.
//!
//! Build with [`RiceBuilder`] (every remainder first, then every quotient
//! via [`append_unary_all`](RiceBuilder::append_unary_all)), seal with
//! [`build`](RiceBuilder::build), decode through [`RiceVec::cursor`].

mod builder;
mod cursor;
mod vector;

pub use builder::RiceBuilder;
pub use cursor::RiceCursor;
pub use vector::RiceVec;

/// Rice parameter for values averaging `mean`: the smallest `k` with
/// `2^k >= mean`, clamped to `[0, 63]`.
///
/// This is the classic estimator for geometrically distributed values; pass
/// the observed mean of what is about to be encoded.
///
/// ```
/// use prefixbits::rice::optimal_log2golomb;
///
/// assert_eq!(optimal_log2golomb(0.4), 0);
/// assert_eq!(optimal_log2golomb(6.0), 3);
/// assert_eq!(optimal_log2golomb(256.0), 8);
/// ```
pub fn optimal_log2golomb(mean: f64) -> u32 {
    if mean.is_nan() || mean <= 1.0 {
        return 0;
    }
    let k = libm::ceil(libm::log2(mean));
    if k >= 63.0 {
        63
    } else {
        k as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_log2golomb_small_means() {
        assert_eq!(optimal_log2golomb(0.0), 0);
        assert_eq!(optimal_log2golomb(1.0), 0);
        assert_eq!(optimal_log2golomb(1.5), 1);
        assert_eq!(optimal_log2golomb(2.0), 1);
        assert_eq!(optimal_log2golomb(3.0), 2);
    }

    #[test]
    fn test_optimal_log2golomb_powers_of_two() {
        for k in 1..=20 {
            let mean = (1u64 << k) as f64;
            assert_eq!(optimal_log2golomb(mean), k, "mean=2^{}", k);
            assert_eq!(optimal_log2golomb(mean + 1.0), k + 1, "mean=2^{}+1", k);
        }
    }

    #[test]
    fn test_optimal_log2golomb_clamps() {
        assert_eq!(optimal_log2golomb(f64::NAN), 0);
        assert_eq!(optimal_log2golomb(-7.0), 0);
        assert_eq!(optimal_log2golomb(1e30), 63);
        assert_eq!(optimal_log2golomb(f64::INFINITY), 63);
    }
}
