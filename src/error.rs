//! Error types for kmerring.
//!
//! Every fallible operation validates its input at the call boundary and
//! reports failures synchronously through [`KmerRingError`]. Nothing is
//! clamped or silently replaced with a default.

use thiserror::Error;

/// Errors that can occur in kmerring operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KmerRingError {
    /// Sequence or k-mer length is outside the valid range (1-31).
    #[error("invalid k-mer length {k}: must be between {min} and {max}")]
    InvalidLength { k: usize, min: u8, max: u8 },

    /// Minimizer length is zero or longer than the k-mer it is taken from.
    #[error("invalid minimizer length {m}: must be between 1 and k ({k})")]
    InvalidMinimizerLength { m: usize, k: usize },

    /// Encountered a character outside the A/C/T/G alphabet.
    #[error("invalid nucleotide 0x{base:02x} at position {position}")]
    InvalidNucleotide { base: u8, position: usize },

    /// A 2-bit code outside 0-3 was given to the decoder.
    #[error("invalid nucleotide code {code}: must be between 0 and 3")]
    InvalidCode { code: u64 },

    /// A packed value does not fit in `2k` bits.
    #[error("packed k-mer {kmer} does not fit in {k} bases")]
    KmerOutOfRange { kmer: u64, k: usize },

    /// The minimizer ring was queried before it was ever populated.
    #[error("minimizer ring has not been populated")]
    EmptyRing,

    /// The ring handle was already destroyed.
    #[error("minimizer ring handle has been destroyed")]
    HandleInvalidated,
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = KmerRingError> = std::result::Result<T, E>;

/// Error for invalid k-mer length.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("k-mer length {k} is out of range: must be between {min} and {max}")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: usize,
    /// Minimum valid k-mer length.
    pub min: u8,
    /// Maximum valid k-mer length.
    pub max: u8,
}

/// Error for invalid DNA base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBaseError {
    /// The invalid byte value.
    pub base: u8,
    /// Position of the invalid byte in the sequence.
    pub position: usize,
}

impl std::fmt::Display for InvalidBaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.base.is_ascii_graphic() || self.base == b' ' {
            write!(
                f,
                "invalid base '{}' (0x{:02x}) at position {}",
                self.base as char, self.base, self.position
            )
        } else {
            write!(
                f,
                "invalid base 0x{:02x} at position {}",
                self.base, self.position
            )
        }
    }
}

impl std::error::Error for InvalidBaseError {}

impl From<KmerLengthError> for KmerRingError {
    fn from(err: KmerLengthError) -> Self {
        Self::InvalidLength {
            k: err.k,
            min: err.min,
            max: err.max,
        }
    }
}

impl From<InvalidBaseError> for KmerRingError {
    fn from(err: InvalidBaseError) -> Self {
        Self::InvalidNucleotide {
            base: err.base,
            position: err.position,
        }
    }
}
