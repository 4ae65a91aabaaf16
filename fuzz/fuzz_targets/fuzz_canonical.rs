//! Fuzz target for strand operations and canonical k-mers.
//!
//! The first byte picks `k`, the next eight the packed value.

#![no_main]

use kmerring::{canonical, hash_kmer, parity_even, reverse_complement, unhash};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [k, b0, b1, b2, b3, b4, b5, b6, b7, ..] = *data else {
        return;
    };
    let k = usize::from(k % 31) + 1;
    let kmer = u64::from_le_bytes([b0, b1, b2, b3, b4, b5, b6, b7]) & ((1 << (2 * k)) - 1);

    let rc = reverse_complement(kmer, k);
    assert_eq!(reverse_complement(rc, k), kmer, "reverse complement is not an involution");

    let c = canonical(kmer, k);
    assert!(c == kmer || c == rc);
    assert_eq!(canonical(c, k), c, "Canonical is not idempotent");

    if k % 2 == 1 {
        assert!(parity_even(c), "odd-k canonical with odd parity");
        assert_eq!(c, canonical(rc, k), "k-mer and RC have different canonical forms");

        let index = hash_kmer(kmer, k).unwrap();
        assert!(index < 1 << (2 * k - 1));
        assert_eq!(unhash(index, k).unwrap(), c);
    }
});
