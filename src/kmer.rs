//! Packing short DNA sequences into `u64` values.
//!
//! A k-mer of length `k` occupies the low `2k` bits of a `u64`. The first
//! base is the most significant 2-bit digit and the last base the least
//! significant, so `ACTGC` packs to `0b00_01_10_11_01 = 109`.

use serde::{Deserialize, Serialize};

use crate::{
    error::{KmerLengthError, KmerRingError, Result},
    nucleotide::{encode_at, CODE_TO_BYTE},
};

/// Minimum valid k-mer length.
pub const MIN_K: usize = 1;

/// Maximum valid k-mer length; `2 * 31 = 62` bits fit a `u64` with room to spare.
pub const MAX_K: usize = 31;

/// A validated k-mer length in `1..=31`.
///
/// # Example
///
/// ```rust
/// use kmerring::kmer::KmerLength;
///
/// let k = KmerLength::new(21)?;
/// assert_eq!(k.get(), 21);
/// assert!(KmerLength::new(0).is_err());
/// assert!(KmerLength::new(32).is_err());
/// # Ok::<(), kmerring::error::KmerLengthError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct KmerLength(usize);

impl KmerLength {
    /// Validates `k` and wraps it.
    pub const fn new(k: usize) -> Result<Self, KmerLengthError> {
        if k < MIN_K || k > MAX_K {
            return Err(KmerLengthError {
                k,
                min: MIN_K as u8,
                max: MAX_K as u8,
            });
        }
        Ok(Self(k))
    }

    /// The wrapped length.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of bits a packed k-mer of this length occupies.
    pub const fn bits(self) -> u32 {
        (self.0 * 2) as u32
    }

    /// Mask selecting the low `2k` bits.
    pub const fn mask(self) -> u64 {
        (1u64 << self.bits()) - 1
    }
}

impl TryFrom<usize> for KmerLength {
    type Error = KmerLengthError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl From<KmerLength> for usize {
    fn from(k: KmerLength) -> Self {
        k.0
    }
}

impl std::fmt::Display for KmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mask of the low `2k` bits for a `k` already known to be in range.
#[inline]
pub(crate) const fn mask_for(k: usize) -> u64 {
    (1u64 << (2 * k)) - 1
}

/// Packs `seq` into its 2-bit representation.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidLength`] if `seq` is empty or longer than
/// [`MAX_K`], and [`KmerRingError::InvalidNucleotide`] for bytes outside
/// `A`, `C`, `T`, `G`.
///
/// # Example
///
/// ```rust
/// use kmerring::kmer::pack;
///
/// assert_eq!(pack(b"ACTGC")?, 109);
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
pub fn pack(seq: &[u8]) -> Result<u64> {
    KmerLength::new(seq.len())?;
    pack_unchecked_len(seq)
}

/// Packs without the length check; the caller guarantees `seq.len() <= 32`.
#[inline]
pub(crate) fn pack_unchecked_len(seq: &[u8]) -> Result<u64> {
    seq.iter()
        .enumerate()
        .try_fold(0u64, |kmer, (i, &nuc)| Ok((kmer << 2) | encode_at(nuc, i)?))
}

/// Checks that `kmer` fits in `k` bases.
#[inline]
pub(crate) fn check_range(kmer: u64, k: KmerLength) -> Result<()> {
    if kmer > k.mask() {
        return Err(KmerRingError::KmerOutOfRange { kmer, k: k.get() });
    }
    Ok(())
}

/// Unpacks a 2-bit encoded k-mer back into its bases.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidLength`] if `k` is outside `1..=31` and
/// [`KmerRingError::KmerOutOfRange`] if `kmer >= 4^k`.
///
/// # Example
///
/// ```rust
/// use kmerring::kmer::unpack;
///
/// assert_eq!(unpack(246, 5)?, "AGGCT");
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
pub fn unpack(kmer: u64, k: usize) -> Result<String> {
    let k = KmerLength::new(k)?;
    check_range(kmer, k)?;
    Ok(unpack_to_string(kmer, k))
}

/// Unpacks into raw bytes. `kmer` bits above `2k` are ignored.
pub fn unpack_to_bytes(kmer: u64, k: KmerLength) -> Vec<u8> {
    (0..k.get())
        .rev()
        .map(|i| CODE_TO_BYTE[((kmer >> (2 * i)) & 0b11) as usize])
        .collect()
}

/// Unpacks into a `String`. `kmer` bits above `2k` are ignored.
pub fn unpack_to_string(kmer: u64, k: KmerLength) -> String {
    // Every byte comes from CODE_TO_BYTE, which is ASCII.
    unpack_to_bytes(kmer, k).into_iter().map(char::from).collect()
}
