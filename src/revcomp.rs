//! Complement and reversal of packed k-mers.
//!
//! These functions take the packed value and its length `k` and work
//! entirely on the integer. The caller guarantees `1 <= k <= 31` and
//! `kmer < 4^k`; results are always `< 4^k`.

use crate::kmer::mask_for;

/// `0b10` in every 2-bit digit.
const COMPLEMENT_MASK: u64 = 0xAAAA_AAAA_AAAA_AAAA;

const PAIRS: u64 = 0x3333_3333_3333_3333;
const NIBBLES: u64 = 0x0F0F_0F0F_0F0F_0F0F;

/// Complements every base: `A <-> T`, `C <-> G`.
///
/// With the `A=0, C=1, T=2, G=3` code this flips the high bit of each digit.
///
/// ```rust
/// use kmerring::revcomp::complement;
///
/// // TAGGC -> ATCCG
/// assert_eq!(complement(0b10_00_11_11_01, 5), 0b00_10_01_01_11);
/// ```
#[inline]
pub const fn complement(kmer: u64, k: usize) -> u64 {
    (kmer ^ COMPLEMENT_MASK) & mask_for(k)
}

/// Reverses the order of the `k` bases without changing them.
#[inline]
pub const fn reverse(kmer: u64, k: usize) -> u64 {
    // Swap digits within each byte, then the bytes themselves.
    let mut x = ((kmer >> 2) & PAIRS) | ((kmer & PAIRS) << 2);
    x = ((x >> 4) & NIBBLES) | ((x & NIBBLES) << 4);
    x = x.swap_bytes();
    x >> (64 - 2 * k)
}

/// The sequence read from the opposite strand.
///
/// ```rust
/// use kmerring::revcomp::reverse_complement;
///
/// assert_eq!(reverse_complement(109, 5), 846);
/// ```
#[inline]
pub const fn reverse_complement(kmer: u64, k: usize) -> u64 {
    reverse(complement(kmer, k), k)
}
