//! Two-bit nucleotide codec.
//!
//! The code assignment is `A = 0b00`, `C = 0b01`, `T = 0b10`, `G = 0b11`.
//! Complementary bases differ only in their high bit, so the complement of a
//! code is `code ^ 0b10`.

use crate::error::{InvalidBaseError, KmerRingError, Result};

/// Marker for bytes outside the alphabet in [`BYTE_TO_CODE`].
const INVALID: u8 = 0xff;

/// Byte -> 2-bit code, `INVALID` for everything except `A`, `C`, `T`, `G`.
pub(crate) static BYTE_TO_CODE: [u8; 256] = {
    let mut table = [INVALID; 256];
    table[b'A' as usize] = 0;
    table[b'C' as usize] = 1;
    table[b'T' as usize] = 2;
    table[b'G' as usize] = 3;
    table
};

/// 2-bit code -> byte.
pub(crate) const CODE_TO_BYTE: [u8; 4] = [b'A', b'C', b'T', b'G'];

/// A single DNA base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Nucleotide {
    A = 0,
    C = 1,
    T = 2,
    G = 3,
}

impl Nucleotide {
    const ALL: [Self; 4] = [Self::A, Self::C, Self::T, Self::G];

    /// The 2-bit code of this base.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a 2-bit code.
    pub fn from_code(code: u64) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(KmerRingError::InvalidCode { code })
    }

    /// The Watson-Crick partner of this base.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self::ALL[(self.code() ^ 0b10) as usize]
    }

    /// Uppercase ASCII letter of this base.
    pub const fn as_byte(self) -> u8 {
        CODE_TO_BYTE[self as usize]
    }
}

impl TryFrom<u8> for Nucleotide {
    type Error = InvalidBaseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match BYTE_TO_CODE[value as usize] {
            INVALID => Err(InvalidBaseError {
                base: value,
                position: 0,
            }),
            code => Ok(Self::ALL[code as usize]),
        }
    }
}

impl From<Nucleotide> for u64 {
    fn from(n: Nucleotide) -> Self {
        Self::from(n.code())
    }
}

impl std::fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

/// Maps `A`, `C`, `T`, `G` to `0`, `1`, `2`, `3`.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidNucleotide`] for any other byte,
/// including lowercase letters.
///
/// # Example
///
/// ```rust
/// use kmerring::nucleotide::nucleotide_to_code;
///
/// assert_eq!(nucleotide_to_code(b'T')?, 2);
/// assert!(nucleotide_to_code(b'N').is_err());
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
pub fn nucleotide_to_code(nuc: u8) -> Result<u64> {
    Nucleotide::try_from(nuc)
        .map(u64::from)
        .map_err(KmerRingError::from)
}

/// Maps `0`, `1`, `2`, `3` back to `A`, `C`, `T`, `G`.
///
/// # Errors
///
/// Returns [`KmerRingError::InvalidCode`] for codes above 3.
pub fn code_to_nucleotide(code: u64) -> Result<u8> {
    Nucleotide::from_code(code).map(Nucleotide::as_byte)
}

/// Code lookup for a byte at `position` of a longer sequence.
#[inline]
pub(crate) fn encode_at(nuc: u8, position: usize) -> Result<u64> {
    match BYTE_TO_CODE[nuc as usize] {
        INVALID => Err(KmerRingError::InvalidNucleotide {
            base: nuc,
            position,
        }),
        code => Ok(u64::from(code)),
    }
}

/// Position of the first byte outside the alphabet, if any.
pub(crate) fn find_invalid(seq: &[u8]) -> Option<usize> {
    seq.iter().position(|&b| BYTE_TO_CODE[b as usize] == INVALID)
}
