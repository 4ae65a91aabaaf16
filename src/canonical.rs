//! Strand-independent k-mer selection.
//!
//! Reversal keeps the number of set bits and complement flips exactly one
//! bit per base, so for odd `k` a k-mer and its reverse complement always
//! have opposite parity. The member with an even popcount is canonical,
//! which avoids comparing the two values at all.
//!
//! For even `k` both strands share their parity and [`canonical`] only picks
//! a strand when the k-mer itself is odd. An odd k-mer then maps to its odd
//! reverse complement and back, so for even `k` the result is neither
//! idempotent nor shared by both strands. The guarantees below apply to odd
//! `k`.

use crate::revcomp::reverse_complement;

/// True if `kmer` has an even number of set bits.
#[inline]
pub const fn parity_even(kmer: u64) -> bool {
    kmer.count_ones() % 2 == 0
}

/// Returns `kmer` if it has even parity, its reverse complement otherwise.
///
/// The result is always `kmer` or its reverse complement, and a palindromic
/// k-mer (`kmer == reverse_complement(kmer, k)`) is returned unchanged. For
/// odd `k` the result also has even parity, `canonical(canonical(x)) ==
/// canonical(x)` and `canonical(x) == canonical(reverse_complement(x))`.
///
/// ```rust
/// use kmerring::canonical::{canonical, parity_even};
///
/// assert!(!parity_even(109));
/// assert_eq!(canonical(109, 5), 846);
/// assert!(parity_even(846));
/// ```
#[inline]
pub const fn canonical(kmer: u64, k: usize) -> u64 {
    if parity_even(kmer) {
        kmer
    } else {
        reverse_complement(kmer, k)
    }
}

/// The leading bit of the packed value, bit 0.
///
/// Once a k-mer is canonical this bit is redundant: it equals the parity of
/// the remaining bits.
#[inline]
pub const fn get_leading_bit(kmer: u64) -> bool {
    kmer & 1 != 0
}

/// Drops the leading bit, halving the value range.
#[inline]
pub const fn clear_leading_bit(kmer: u64) -> u64 {
    kmer >> 1
}
