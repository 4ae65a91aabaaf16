//! Fuzz target for the minimizer ring.
//!
//! Slides a ring over a fuzzed sequence and compares every window against
//! a from-scratch minimum.

#![no_main]

use kmerring::{canonical, mmer_score, pack, MinimizerRing, Tokenizer};
use libfuzzer_sys::fuzz_target;

fn brute_force(window: &[u8], m: usize) -> u64 {
    window
        .windows(m)
        .map(|mmer| canonical(pack(mmer).unwrap(), m))
        .min_by_key(|&value| mmer_score(value))
        .unwrap()
}

fuzz_target!(|data: &[u8]| {
    let [a, b, rest @ ..] = data else {
        return;
    };
    let k = usize::from(*a % 31) + 1;
    let m = usize::from(*b) % k + 1;
    let seq: Vec<u8> = rest.iter().map(|&x| b"ACGT"[usize::from(x & 0b11)]).collect();
    if seq.len() < k {
        return;
    }

    let mut kmers = Tokenizer::new(&seq, k).unwrap();
    let Some(first) = kmers.next() else {
        return;
    };
    let mut ring = MinimizerRing::create(k, m, first).unwrap();
    assert_eq!(ring.get_mini().unwrap(), brute_force(&seq[..k], m));

    for (start, kmer) in kmers.enumerate().map(|(i, kmer)| (i + 1, kmer)) {
        ring.add_kmer(kmer).unwrap();
        let window = &seq[start..start + k];
        assert_eq!(
            ring.get_mini().unwrap(),
            brute_force(window, m),
            "k={k} m={m} start={start}"
        );
    }
});
