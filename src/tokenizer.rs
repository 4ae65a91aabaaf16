//! Iterators rolling packed k-mers over a DNA sequence.
//!
//! Each tokenizer checks the whole sequence once on construction, so the
//! iteration itself is infallible. A sequence shorter than `k` yields
//! nothing.

use crate::{
    canonical::parity_even,
    config::RingConfig,
    error::{KmerRingError, Result},
    kmer::{pack_unchecked_len, KmerLength},
    minimizer::MinimizerRing,
    nucleotide::{find_invalid, BYTE_TO_CODE},
    revcomp::reverse_complement,
};

fn validate(seq: &[u8]) -> Result<()> {
    match find_invalid(seq) {
        Some(position) => Err(KmerRingError::InvalidNucleotide {
            base: seq[position],
            position,
        }),
        None => Ok(()),
    }
}

/// 2-bit code of a byte already known to be in the alphabet.
#[inline]
fn code(nuc: u8) -> u64 {
    u64::from(BYTE_TO_CODE[nuc as usize])
}

/// Forward-strand k-mers of a sequence, in order.
///
/// # Example
///
/// ```rust
/// use kmerring::tokenizer::Tokenizer;
///
/// let kmers: Vec<u64> = Tokenizer::new(b"ACTGACTG", 5)?.collect();
/// assert_eq!(kmers, vec![108, 433, 710, 795]);
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    seq: &'a [u8],
    pos: usize,
    kmer: u64,
    mask: u64,
}

impl<'a> Tokenizer<'a> {
    /// # Errors
    ///
    /// Returns [`KmerRingError::InvalidLength`] for `k` outside `1..=31` and
    /// [`KmerRingError::InvalidNucleotide`] for the first byte of `seq`
    /// outside `A`, `C`, `T`, `G`.
    pub fn new(seq: &'a [u8], k: usize) -> Result<Self> {
        let k = KmerLength::new(k)?;
        validate(seq)?;
        let prefix = k.get().saturating_sub(1).min(seq.len());
        Ok(Self {
            seq,
            pos: prefix,
            kmer: pack_unchecked_len(&seq[..prefix])?,
            mask: k.mask(),
        })
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let &nuc = self.seq.get(self.pos)?;
        self.kmer = ((self.kmer << 2) & self.mask) | code(nuc);
        self.pos += 1;
        Some(self.kmer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Tokenizer<'_> {}

/// Canonical k-mers of a sequence.
///
/// Both strands are rolled in step: the forward value shifts left and the
/// reverse complement shifts right, taking the complemented base at its
/// most significant digit.
///
/// ```rust
/// use kmerring::tokenizer::CanonicalTokenizer;
///
/// let kmers: Vec<u64> = CanonicalTokenizer::new(b"ACTGACTG", 5)?.collect();
/// assert_eq!(kmers, vec![108, 915, 228, 795]);
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CanonicalTokenizer<'a> {
    forward: Tokenizer<'a>,
    reverse: u64,
    top_shift: u32,
}

impl<'a> CanonicalTokenizer<'a> {
    /// # Errors
    ///
    /// Same as [`Tokenizer::new`].
    pub fn new(seq: &'a [u8], k: usize) -> Result<Self> {
        let forward = Tokenizer::new(seq, k)?;
        // The prefix is k - 1 bases; reading it as a k-mer puts a leading A
        // in front, whose complement falls off on the first shift.
        let reverse = reverse_complement(forward.kmer, k);
        Ok(Self {
            forward,
            reverse,
            top_shift: ((k - 1) * 2) as u32,
        })
    }
}

impl CanonicalTokenizer<'_> {
    /// Next forward k-mer together with its canonical form.
    fn next_pair(&mut self) -> Option<(u64, u64)> {
        let forward = self.forward.next()?;
        let nuc = forward & 0b11;
        self.reverse = (self.reverse >> 2) | ((nuc ^ 0b10) << self.top_shift);
        if parity_even(forward) {
            Some((forward, forward))
        } else {
            Some((forward, self.reverse))
        }
    }
}

impl Iterator for CanonicalTokenizer<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_pair().map(|(_, canonical)| canonical)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.forward.size_hint()
    }
}

impl ExactSizeIterator for CanonicalTokenizer<'_> {}

/// Forward k-mers paired with the minimizer of their window.
///
/// ```rust
/// use kmerring::tokenizer::MinimizerTokenizer;
///
/// let minis: Vec<u64> = MinimizerTokenizer::new(b"ACTGTAGAAA", 5, 3)?
///     .map(|(_, mini)| mini)
///     .collect();
/// assert_eq!(minis, vec![6, 46, 24, 12, 12, 0]);
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MinimizerTokenizer<'a> {
    kmers: Tokenizer<'a>,
    ring: MinimizerRing,
}

impl<'a> MinimizerTokenizer<'a> {
    /// # Errors
    ///
    /// Same as [`Tokenizer::new`], plus
    /// [`KmerRingError::InvalidMinimizerLength`] unless `1 <= m <= k`.
    pub fn new(seq: &'a [u8], k: usize, m: usize) -> Result<Self> {
        let config = RingConfig::new(k, m)?;
        Ok(Self {
            kmers: Tokenizer::new(seq, k)?,
            ring: config.build_empty(),
        })
    }
}

impl Iterator for MinimizerTokenizer<'_> {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let kmer = self.kmers.next()?;
        advance(&mut self.ring, kmer).map(|mini| (kmer, mini))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.kmers.size_hint()
    }
}

/// Seeds the ring on the first window and slides it afterwards.
fn advance(ring: &mut MinimizerRing, kmer: u64) -> Option<u64> {
    if ring.is_empty() {
        // Tokenized k-mers never exceed the mask, so this cannot fail.
        ring.populate_buffer(kmer).ok()?;
    } else {
        ring.slide(kmer);
    }
    ring.peek().map(|mini| mini.value)
}

/// Canonical k-mers paired with the minimizer of their window.
///
/// The ring is driven by the forward k-mer; minimizers are canonical m-mers
/// already, so the pairs are the same whichever strand is scanned (odd `k`
/// and `m`), only in reverse order.
///
/// ```rust
/// use kmerring::tokenizer::CanonicalMinimizerTokenizer;
///
/// let pairs: Vec<(u64, u64)> = CanonicalMinimizerTokenizer::new(b"ACTGTAGAAA", 5, 3)?.collect();
/// // ACTGT has odd parity, so its reverse complement ACAGT is reported.
/// assert_eq!(pairs[0], (78, 6));
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CanonicalMinimizerTokenizer<'a> {
    kmers: CanonicalTokenizer<'a>,
    ring: MinimizerRing,
}

impl<'a> CanonicalMinimizerTokenizer<'a> {
    /// # Errors
    ///
    /// Same as [`MinimizerTokenizer::new`].
    pub fn new(seq: &'a [u8], k: usize, m: usize) -> Result<Self> {
        let config = RingConfig::new(k, m)?;
        Ok(Self {
            kmers: CanonicalTokenizer::new(seq, k)?,
            ring: config.build_empty(),
        })
    }
}

impl Iterator for CanonicalMinimizerTokenizer<'_> {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let (forward, canonical) = self.kmers.next_pair()?;
        advance(&mut self.ring, forward).map(|mini| (canonical, mini))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.kmers.size_hint()
    }
}
