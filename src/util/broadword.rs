//! Broadword (SWAR) selection within a 64-bit word.
//!
//! [`select_in_word`] finds the k-th set bit of a word without scanning bit
//! by bit: byte population counts are prefix-summed in parallel, a packed
//! comparison locates the byte holding the target bit, and a small lookup
//! table finishes the job inside that byte. On `x86_64` with the `bmi2`
//! target feature the whole search collapses to a `pdep` and a count of
//! trailing zeros.

const ONES_STEP_4: u64 = 0x1111_1111_1111_1111;
const ONES_STEP_8: u64 = 0x0101_0101_0101_0101;
const MSBS_STEP_8: u64 = 0x8080_8080_8080_8080;

/// Position of the k-th set bit (0-indexed) within each byte value, indexed
/// `byte * 8 + k`, or 8 when the byte has fewer than `k + 1` set bits.
///
/// Table size: 256 bytes × 8 ranks = 2048 bytes.
static SELECT_IN_BYTE: [u8; 2048] = {
    let mut table = [8u8; 2048];
    let mut byte = 0u16;
    while byte < 256 {
        let mut pos = 0u8;
        let mut rank = 0u8;
        while pos < 8 {
            if (byte >> pos) & 1 == 1 {
                table[(byte as usize) * 8 + rank as usize] = pos;
                rank += 1;
            }
            pos += 1;
        }
        byte += 1;
    }
    table
};

/// Index of the k-th set bit (0-indexed) of `word`.
///
/// `k` must be below `word.count_ones()`; a rank beyond the population is a
/// caller bug and yields a meaningless position.
#[inline]
pub fn select_in_word(word: u64, k: u32) -> u32 {
    debug_assert!(k < word.count_ones(), "rank {} beyond population", k);

    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    // SAFETY: the bmi2 target feature is statically enabled.
    return unsafe { core::arch::x86_64::_pdep_u64(1 << k, word) }.trailing_zeros();

    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        // Popcount per byte, then a running total across bytes: after the
        // multiply, byte i holds the number of set bits in bytes 0..=i.
        let mut sums = word - ((word >> 1) & (0x5 * ONES_STEP_4));
        sums = (sums & (0x3 * ONES_STEP_4)) + ((sums >> 2) & (0x3 * ONES_STEP_4));
        sums = (sums + (sums >> 4)) & (0x0F * ONES_STEP_8);
        sums = sums.wrapping_mul(ONES_STEP_8);

        // The target bit lives in the first byte whose running total exceeds
        // k, i.e. at index (number of bytes with running total <= k).
        let target = (k as u64) * ONES_STEP_8;
        let place = (((target | MSBS_STEP_8) - sums) & MSBS_STEP_8).count_ones() * 8;
        let rank_in_byte = k - ((((sums << 8) >> place) & 0xFF) as u32);
        let byte = ((word >> place) & 0xFF) as usize;
        place + SELECT_IN_BYTE[byte * 8 + rank_in_byte as usize] as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_select(word: u64, k: u32) -> u32 {
        let mut seen = 0;
        for pos in 0..64 {
            if (word >> pos) & 1 == 1 {
                if seen == k {
                    return pos;
                }
                seen += 1;
            }
        }
        unreachable!("rank {} beyond population of {:#x}", k, word);
    }

    #[test]
    fn test_single_bit_words() {
        for pos in 0..64 {
            assert_eq!(select_in_word(1u64 << pos, 0), pos);
        }
    }

    #[test]
    fn test_all_ones() {
        for k in 0..64 {
            assert_eq!(select_in_word(u64::MAX, k), k);
        }
    }

    #[test]
    fn test_alternating_bits() {
        // 0xAA.. = bits at odd positions
        let word = 0xAAAA_AAAA_AAAA_AAAA;
        for k in 0..32 {
            assert_eq!(select_in_word(word, k), 2 * k + 1);
        }
    }

    #[test]
    fn test_byte_table_matches_bit_scan() {
        for byte in 0u8..=255 {
            let pop = byte.count_ones();
            for k in 0..pop {
                let pos = SELECT_IN_BYTE[(byte as usize) * 8 + k as usize];
                assert!((byte >> pos) & 1 == 1, "byte={:08b}, k={}", byte, k);
            }
            for k in pop..8 {
                assert_eq!(SELECT_IN_BYTE[(byte as usize) * 8 + k as usize], 8);
            }
        }
    }

    #[test]
    fn test_matches_naive_on_mixed_words() {
        // Weyl sequence gives a spread of bit patterns without pulling in a
        // random number generator.
        let mut word = 0x9E37_79B9_7F4A_7C15u64;
        for _ in 0..1000 {
            word = word
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            for k in 0..word.count_ones() {
                assert_eq!(
                    select_in_word(word, k),
                    naive_select(word, k),
                    "word={:#x}, k={}",
                    word,
                    k
                );
            }
        }
    }
}
