//! Integration tests for the Golomb-Rice codec.

use prefixbits::{RiceBuilder, RiceVec};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

/// Encode `values` with one shared Rice parameter.
fn build_uniform(values: &[u64], log2: u32) -> RiceVec {
    let mut builder = RiceBuilder::new();
    for &v in values {
        builder.append_fixed(v, log2);
    }
    let quotients: Vec<u32> = values.iter().map(|&v| (v >> log2) as u32).collect();
    builder.append_unary_all(&quotients);
    builder.build()
}

/// Encode `(value, log2golomb)` items, returning the stream and its fixed
/// region width.
fn build_mixed(items: &[(u64, u32)]) -> (RiceVec, usize) {
    let mut builder = RiceBuilder::new();
    for &(v, log2) in items {
        builder.append_fixed(v, log2);
    }
    let fixed_bits = builder.bits_written();
    let quotients: Vec<u32> = items.iter().map(|&(v, log2)| (v >> log2) as u32).collect();
    builder.append_unary_all(&quotients);
    (builder.build(), fixed_bits)
}

/// Turn raw proptest triples into `(value, log2golomb)` items.
fn materialize(raw: Vec<(u32, u32, u64)>) -> Vec<(u64, u32)> {
    raw.into_iter()
        .map(|(quotient, log2, seed)| {
            let mask = (1u64 << log2) - 1;
            (((quotient as u64) << log2) | (seed & mask), log2)
        })
        .collect()
}

fn item_strategy() -> impl Strategy<Value = Vec<(u32, u32, u64)>> {
    prop::collection::vec((0u32..2000, 0u32..50, any::<u64>()), 1..200)
}

// ============================================================================
// Bit layout
// ============================================================================

#[test]
fn test_two_value_stream_layout() {
    // Remainders 11 and 10, then codes 1 and 001, all in one word.
    let mut builder = RiceBuilder::new();
    builder.append_fixed(3, 2);
    builder.append_fixed(1, 2);
    builder.append_unary_all(&[0, 2]);
    assert_eq!(builder.bits_written(), 8);

    let rice = builder.build();
    assert_eq!(rice.as_words(), &[0b1001_0111]);
    assert_eq!(rice.size_in_bits(), 64);

    let mut cursor = rice.cursor();
    cursor.reset(0, 4);
    assert_eq!(cursor.read_next(2), 3);
    assert_eq!(cursor.read_next(2), 9);
}

#[test]
fn test_bits_written_counts_both_regions() {
    let values = [9u64, 2, 30, 7];
    let mut builder = RiceBuilder::new();
    for &v in &values {
        builder.append_fixed(v, 2);
    }
    assert_eq!(builder.bits_written(), 8);
    builder.append_unary_all(&[2, 0, 7, 1]);
    // 8 fixed bits plus 4 terminators plus 10 zeros.
    assert_eq!(builder.bits_written(), 22);
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_round_trip_log2_zero() {
    // Width zero is pure unary and needs no reset.
    let values = [0u64, 3, 1, 0, 65, 2];
    let rice = build_uniform(&values, 0);
    let mut cursor = rice.cursor();
    for &v in &values {
        assert_eq!(cursor.read_next(0), v);
    }
}

#[test]
fn test_round_trip_full_width_remainders() {
    let values = [u64::MAX - 1, 1u64 << 62, 0, (1u64 << 63) | 12345];
    let rice = build_uniform(&values, 63);
    let mut cursor = rice.cursor();
    cursor.reset(0, 63 * values.len());
    for &v in &values {
        assert_eq!(cursor.read_next(63), v);
    }
}

#[test]
fn test_round_trip_thousand_values() {
    let values: Vec<u64> = (0..1000).map(|i| (i * i) % 4093).collect();
    let rice = build_uniform(&values, 5);
    let mut cursor = rice.cursor();
    cursor.reset(0, 5 * values.len());
    for &v in &values {
        assert_eq!(cursor.read_next(5), v);
    }
}

proptest! {
    #[test]
    fn test_round_trip_any_items(raw in item_strategy()) {
        let items = materialize(raw);
        let (rice, fixed_bits) = build_mixed(&items);

        let unary_bits: usize = items
            .iter()
            .map(|&(v, log2)| (v >> log2) as usize + 1)
            .sum();
        let total_bits = fixed_bits + unary_bits;
        prop_assert_eq!(rice.size_in_bits(), total_bits.div_ceil(64) * 64);

        let mut cursor = rice.cursor();
        cursor.reset(0, fixed_bits);
        for &(v, log2) in &items {
            prop_assert_eq!(cursor.read_next(log2), v);
        }
    }

    // ========================================================================
    // Skip and reset agree with sequential decoding
    // ========================================================================

    #[test]
    fn test_skip_matches_sequential_decode(
        raw in item_strategy(),
        split in any::<prop::sample::Index>(),
    ) {
        let items = materialize(raw);
        prop_assume!(items.len() >= 2);
        let (rice, fixed_bits) = build_mixed(&items);
        let skipped = split.index(items.len() - 1) + 1;

        let mut skipping = rice.cursor();
        skipping.reset(0, fixed_bits);
        let skipped_fixed: usize = items[..skipped]
            .iter()
            .map(|&(_, log2)| log2 as usize)
            .sum();
        skipping.skip_subtree(skipped, skipped_fixed);

        let mut sequential = rice.cursor();
        sequential.reset(0, fixed_bits);
        for &(_, log2) in &items[..skipped] {
            sequential.read_next(log2);
        }

        for &(v, log2) in &items[skipped..] {
            prop_assert_eq!(skipping.read_next(log2), v);
            prop_assert_eq!(sequential.read_next(log2), v);
        }
    }

    #[test]
    fn test_reset_resumes_at_any_item(
        raw in item_strategy(),
        at in any::<prop::sample::Index>(),
    ) {
        let items = materialize(raw);
        let (rice, fixed_bits) = build_mixed(&items);
        let resume = at.index(items.len());

        let fixed_before: usize = items[..resume]
            .iter()
            .map(|&(_, log2)| log2 as usize)
            .sum();
        let unary_before: usize = items[..resume]
            .iter()
            .map(|&(v, log2)| (v >> log2) as usize + 1)
            .sum();

        let mut cursor = rice.cursor();
        cursor.reset(fixed_before, fixed_bits - fixed_before + unary_before);
        for &(v, log2) in &items[resume..] {
            prop_assert_eq!(cursor.read_next(log2), v);
        }
    }
}

// ============================================================================
// Shared vectors
// ============================================================================

#[test]
fn test_interleaved_cursors_do_not_interfere() {
    let values: Vec<u64> = (0..64).map(|i| i * 3 + 1).collect();
    let rice = build_uniform(&values, 3);
    let fixed_bits = 3 * values.len();

    let mut ahead = rice.cursor();
    ahead.reset(0, fixed_bits);
    let mut behind = rice.cursor();
    behind.reset(0, fixed_bits);

    for (i, &v) in values.iter().enumerate() {
        assert_eq!(ahead.read_next(3), v);
        if i % 2 == 1 {
            assert_eq!(behind.read_next(3), values[i / 2]);
        }
    }
}

#[test]
fn test_concurrent_cursors_share_a_vector() {
    let values: Vec<u64> = (0..500).map(|i| (i * 37) % 1024).collect();
    let rice = build_uniform(&values, 5);
    let fixed_bits = 5 * values.len();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut cursor = rice.cursor();
                cursor.reset(0, fixed_bits);
                for &v in &values {
                    assert_eq!(cursor.read_next(5), v);
                }
            });
        }
    });
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_stream_survives_write_and_read() {
    let values: Vec<u64> = (0..200).map(|i| i * 11 % 513).collect();
    let rice = build_uniform(&values, 4);

    let mut bytes = Vec::new();
    rice.write_to(&mut bytes).unwrap();
    let restored = RiceVec::read_from(&mut bytes.as_slice()).unwrap();
    assert_eq!(restored.as_words(), rice.as_words());

    let mut cursor = restored.cursor();
    cursor.reset(0, 4 * values.len());
    for &v in &values {
        assert_eq!(cursor.read_next(4), v);
    }
}

#[test]
fn test_byte_view_round_trip() {
    let values = [17u64, 0, 255, 3];
    let rice = build_uniform(&values, 6);

    let words = prefixbits::binary::bytes_to_words_vec(rice.as_bytes());
    let restored = RiceVec::from_words(words);

    let mut cursor = restored.cursor();
    cursor.reset(0, 6 * values.len());
    for &v in &values {
        assert_eq!(cursor.read_next(6), v);
    }
}

// ============================================================================
// Memory-mapped streams
// ============================================================================

#[cfg(feature = "mmap-tests")]
mod mmap_tests {
    use super::build_uniform;
    use prefixbits::binary::mmap::MmapWords;
    use prefixbits::RiceCursor;
    use std::io::Write;

    #[test]
    fn test_cursor_over_mapped_words() {
        let values: Vec<u64> = (0..200).map(|i| i * 3 + 1).collect();
        let rice = build_uniform(&values, 3);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(rice.as_bytes()).unwrap();
        file.flush().unwrap();

        let mapped = MmapWords::open(file.path()).unwrap();
        assert_eq!(mapped.len(), rice.as_words().len());
        assert_eq!(mapped.words(), rice.as_words());

        let mut cursor = RiceCursor::new(mapped.words());
        cursor.reset(0, 3 * values.len());
        for &v in &values {
            assert_eq!(cursor.read_next(3), v);
        }
    }

    #[test]
    fn test_rejects_ragged_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 13]).unwrap();
        file.flush().unwrap();
        assert!(MmapWords::open(file.path()).is_err());
    }
}
