//! Fuzz target for pack/unpack.
//!
//! Arbitrary bytes must either pack and unpack to themselves, or be
//! rejected with an error that points at the offending byte.

#![no_main]

use kmerring::{pack, unpack, KmerRingError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match pack(data) {
        Ok(kmer) => {
            let k = data.len();
            assert!((1..=31).contains(&k), "accepted length {k}");
            assert!(kmer < 1 << (2 * k), "packed value exceeds 2k bits");

            let unpacked = unpack(kmer, k).unwrap();
            assert_eq!(unpacked.as_bytes(), data, "Pack/unpack roundtrip failed");
        }
        Err(KmerRingError::InvalidLength { k, .. }) => {
            assert_eq!(k, data.len());
            assert!(k == 0 || k > 31, "rejected valid length {k}");
        }
        Err(KmerRingError::InvalidNucleotide { base, position }) => {
            assert!(
                position < data.len(),
                "Error position {position} out of bounds for data len {}",
                data.len()
            );
            assert_eq!(base, data[position], "Error byte mismatch at {position}");
            assert!(
                data[..position]
                    .iter()
                    .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')),
                "an earlier byte was invalid"
            );
        }
        Err(err) => panic!("unexpected error {err}"),
    }
});
