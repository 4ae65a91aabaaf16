//! Dense, strand-independent indices for canonical k-mers.
//!
//! A canonical k-mer has even parity, so any single bit of it can be
//! recomputed from the others. Dropping the leading bit maps the `4^k`
//! k-mer space onto `4^k / 2` indices without collisions (for odd `k`),
//! and a k-mer and its reverse complement share one index.

use crate::{
    canonical::{canonical, clear_leading_bit, parity_even},
    error::{KmerRingError, Result},
    kmer::{check_range, pack, KmerLength},
};

/// Number of distinct packed k-mers of length `k`: `4^k`.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidLength`](crate::KmerRingError::InvalidLength)
/// if `k` is outside `1..=31`.
pub fn kmer_space_size(k: usize) -> Result<u64> {
    let k = KmerLength::new(k)?;
    Ok(1u64 << k.bits())
}

/// Number of canonical k-mer indices of length `k`: `4^k / 2`.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidLength`](crate::KmerRingError::InvalidLength)
/// if `k` is outside `1..=31`.
pub fn hash_space_size(k: usize) -> Result<u64> {
    let k = KmerLength::new(k)?;
    Ok(1u64 << (k.bits() - 1))
}

/// Packs `seq`, canonicalizes it and drops its redundant bit.
///
/// The result is below [`hash_space_size`]`(seq.len())`.
///
/// # Errors
///
/// Same as [`pack`].
///
/// # Example
///
/// ```rust
/// use kmerring::hash::hash;
///
/// // A sequence and its reverse complement share an index.
/// assert_eq!(hash(b"TAGGC")?, hash(b"GCCTA")?);
/// assert!(hash(b"ACTGC")? < 512);
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
pub fn hash(seq: &[u8]) -> Result<u64> {
    let kmer = pack(seq)?;
    Ok(hash_unchecked(kmer, seq.len()))
}

/// [`hash`] on an already packed k-mer.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidLength`](crate::KmerRingError::InvalidLength)
/// for `k` outside `1..=31` and
/// [`KmerRingError::KmerOutOfRange`](crate::KmerRingError::KmerOutOfRange)
/// if `kmer >= 4^k`.
pub fn hash_kmer(kmer: u64, k: usize) -> Result<u64> {
    let len = KmerLength::new(k)?;
    check_range(kmer, len)?;
    Ok(hash_unchecked(kmer, k))
}

#[inline]
pub(crate) const fn hash_unchecked(kmer: u64, k: usize) -> u64 {
    clear_leading_bit(canonical(kmer, k))
}

/// Recovers the canonical k-mer behind a hash index.
///
/// The dropped bit is whatever makes the total popcount even.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidLength`](crate::KmerRingError::InvalidLength)
/// for `k` outside `1..=31` and
/// [`KmerRingError::KmerOutOfRange`](crate::KmerRingError::KmerOutOfRange)
/// if `index >= 4^k / 2`.
///
/// ```rust
/// use kmerring::{canonical::canonical, hash::{hash, unhash}, kmer::pack};
///
/// let index = hash(b"ACTGC")?;
/// assert_eq!(unhash(index, 5)?, canonical(pack(b"ACTGC")?, 5));
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
pub fn unhash(index: u64, k: usize) -> Result<u64> {
    let len = KmerLength::new(k)?;
    if index > len.mask() >> 1 {
        return Err(KmerRingError::KmerOutOfRange { kmer: index, k });
    }
    let bit = u64::from(!parity_even(index));
    Ok((index << 1) | bit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{revcomp::reverse_complement, tokenizer::Tokenizer};

    #[test]
    fn space_sizes() {
        assert_eq!(kmer_space_size(5).unwrap(), 1024);
        assert_eq!(hash_space_size(5).unwrap(), 512);
        assert_eq!(kmer_space_size(15).unwrap(), 1_073_741_824);
        assert_eq!(kmer_space_size(1).unwrap(), 4);
        assert_eq!(hash_space_size(1).unwrap(), 2);
        assert_eq!(kmer_space_size(31).unwrap(), 1 << 62);
        assert_eq!(hash_space_size(31).unwrap(), 1 << 61);
    }

    #[test]
    fn space_sizes_every_k() {
        for k in 1..=31u32 {
            let full = 4u64.pow(k);
            assert_eq!(kmer_space_size(k as usize).unwrap(), full, "k={k}");
            assert_eq!(hash_space_size(k as usize).unwrap(), full / 2, "k={k}");
        }
    }

    #[test]
    fn space_sizes_reject_bad_k() {
        assert!(matches!(
            kmer_space_size(0),
            Err(KmerRingError::InvalidLength { k: 0, .. })
        ));
        assert!(matches!(
            hash_space_size(32),
            Err(KmerRingError::InvalidLength { k: 32, .. })
        ));
    }

    #[test]
    fn hash_golden() {
        assert_eq!(hash(b"TAGGC").unwrap(), 0b1_0001_1110);
        assert_eq!(hash(b"GCCTA").unwrap(), 0b1_0001_1110);
        assert_eq!(hash(b"ACTGC").unwrap(), 423);
    }

    #[test]
    fn hash_over_tokens() {
        let hashes: Vec<u64> = Tokenizer::new(b"ACTGACTG", 5)
            .unwrap()
            .map(|kmer| hash_kmer(kmer, 5).unwrap())
            .collect();
        assert_eq!(hashes, vec![54, 457, 114, 397]);
    }

    #[test]
    fn hash_propagates_errors() {
        assert!(matches!(hash(b""), Err(KmerRingError::InvalidLength { .. })));
        assert!(matches!(
            hash(b"ACGN"),
            Err(KmerRingError::InvalidNucleotide { position: 3, .. })
        ));
        assert_eq!(
            hash_kmer(1024, 5),
            Err(KmerRingError::KmerOutOfRange { kmer: 1024, k: 5 })
        );
    }

    #[test]
    fn hash_is_dense_and_collision_free_for_odd_k() {
        let k = 5;
        let size = hash_space_size(k).unwrap();
        let mut seen = vec![false; size as usize];
        for kmer in 0..kmer_space_size(k).unwrap() {
            let index = hash_kmer(kmer, k).unwrap();
            assert!(index < size);
            assert_eq!(index, hash_kmer(reverse_complement(kmer, k), k).unwrap());
            seen[index as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn unhash_inverts_hash() {
        for kmer in 0..kmer_space_size(3).unwrap() {
            let index = hash_kmer(kmer, 3).unwrap();
            assert_eq!(unhash(index, 3).unwrap(), canonical(kmer, 3));
        }
        assert!(matches!(
            unhash(512, 5),
            Err(KmerRingError::KmerOutOfRange { .. })
        ));
    }
}
