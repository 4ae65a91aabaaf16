//! Sliding-window minimizers over packed k-mers.
//!
//! A [`MinimizerRing`] holds the `k - m + 1` canonical m-mers of the current
//! k-mer window in a ring buffer, together with the slot of the smallest
//! one. Advancing the window by one base overwrites the oldest slot with
//! the new trailing m-mer. The buffer is only rescanned when the slot that
//! was overwritten held the minimizer and the incoming m-mer does not beat it.
//!
//! M-mers are ordered by [`mmer_score`] of their canonical value, not by the
//! value itself, so that minimizers are spread evenly instead of favouring
//! `A`-rich m-mers.

use serde::{Deserialize, Serialize};

use crate::{
    canonical::canonical,
    config::RingConfig,
    error::{KmerRingError, Result},
    kmer::{check_range, mask_for, KmerLength},
};

/// Comparison key of a canonical m-mer.
///
/// A single Fx-style mixing round: rotate, xor, multiply. It is a bijection
/// on the values an m-mer can take, so equal scores mean equal m-mers, and
/// it is fixed so minimizer trajectories are identical across runs.
#[inline]
pub const fn mmer_score(mmer: u64) -> u64 {
    (mmer.rotate_left(5) ^ mmer).wrapping_mul(0x517c_c1b7_2722_0a95)
}

/// The minimizer of the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Minimizer {
    /// Canonical m-mer value.
    pub value: u64,
    /// Its [`mmer_score`].
    pub score: u64,
    /// Index of the m-mer within the window, 0 being the leftmost.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Slot {
    value: u64,
    score: u64,
}

impl Slot {
    #[inline]
    const fn new(mmer: u64, m: usize) -> Self {
        let value = canonical(mmer, m);
        Self {
            value,
            score: mmer_score(value),
        }
    }
}

/// Tracks the minimizer of a k-mer window sliding one base at a time.
///
/// # Example
///
/// ```rust
/// use kmerring::{kmer::pack, minimizer::MinimizerRing};
///
/// let mut ring = MinimizerRing::create(5, 3, pack(b"ACTGT")?)?;
/// assert_eq!(ring.get_mini()?, 6);
///
/// ring.add_kmer(pack(b"CTGTA")?)?;
/// assert_eq!(ring.get_mini()?, 46);
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MinimizerRing {
    ring: Box<[Slot]>,
    /// Slot holding the oldest (leftmost) m-mer; overwritten next.
    current: usize,
    /// Slot of the minimizer, `None` until the ring is populated.
    minimizer: Option<usize>,
    mask: u64,
    k: KmerLength,
    m: KmerLength,
}

impl MinimizerRing {
    /// An unpopulated ring for a validated configuration.
    pub fn new(config: RingConfig) -> Self {
        let (k, m) = (config.k(), config.m());
        Self {
            ring: vec![Slot::default(); config.window_len()].into_boxed_slice(),
            current: 0,
            minimizer: None,
            mask: mask_for(m.get()),
            k,
            m,
        }
    }

    /// An unpopulated ring; [`get_mini`](Self::get_mini) fails until
    /// [`populate_buffer`](Self::populate_buffer) is called.
    ///
    /// # Errors
    ///
    /// Returns [`KmerRingError::InvalidLength`] or
    /// [`KmerRingError::InvalidMinimizerLength`] unless `1 <= m <= k <= 31`.
    pub fn empty(k: usize, m: usize) -> Result<Self> {
        RingConfig::new(k, m).map(Self::new)
    }

    /// A ring seeded with the m-mers of `kmer`.
    ///
    /// # Errors
    ///
    /// As [`empty`](Self::empty), plus [`KmerRingError::KmerOutOfRange`] if
    /// `kmer >= 4^k`.
    pub fn create(k: usize, m: usize, kmer: u64) -> Result<Self> {
        let mut ring = Self::empty(k, m)?;
        ring.populate_buffer(kmer)?;
        Ok(ring)
    }

    /// Resets the window to the m-mers of `kmer`.
    ///
    /// # Errors
    ///
    /// Returns [`KmerRingError::KmerOutOfRange`] if `kmer >= 4^k`.
    pub fn populate_buffer(&mut self, kmer: u64) -> Result<()> {
        check_range(kmer, self.k)?;
        self.fill(kmer);
        Ok(())
    }

    /// Slides the window one base to the right.
    ///
    /// `kmer` must be the previous window shifted by one base; this is not
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`KmerRingError::KmerOutOfRange`] if `kmer >= 4^k` and
    /// [`KmerRingError::EmptyRing`] if the ring was never populated.
    pub fn add_kmer(&mut self, kmer: u64) -> Result<()> {
        check_range(kmer, self.k)?;
        if self.minimizer.is_none() {
            return Err(KmerRingError::EmptyRing);
        }
        self.slide(kmer);
        Ok(())
    }

    /// Canonical value of the current minimizer.
    ///
    /// # Errors
    ///
    /// Returns [`KmerRingError::EmptyRing`] if the ring was never populated.
    pub fn get_mini(&self) -> Result<u64> {
        self.minimizer().map(|mini| mini.value)
    }

    /// The current minimizer with its score and offset in the window.
    ///
    /// # Errors
    ///
    /// Returns [`KmerRingError::EmptyRing`] if the ring was never populated.
    pub fn minimizer(&self) -> Result<Minimizer> {
        self.peek().ok_or(KmerRingError::EmptyRing)
    }

    pub const fn k(&self) -> usize {
        self.k.get()
    }

    pub const fn m(&self) -> usize {
        self.m.get()
    }

    /// Number of m-mers per window, `k - m + 1`.
    pub fn window_len(&self) -> usize {
        self.ring.len()
    }

    /// True until the ring is first populated.
    pub const fn is_empty(&self) -> bool {
        self.minimizer.is_none()
    }

    pub(crate) fn peek(&self) -> Option<Minimizer> {
        let index = self.minimizer?;
        let slot = self.ring[index];
        let len = self.ring.len();
        Some(Minimizer {
            value: slot.value,
            score: slot.score,
            offset: (index + len - self.current) % len,
        })
    }

    fn fill(&mut self, mut kmer: u64) {
        let len = self.ring.len();
        let mut best = u64::MAX;
        let mut best_index = len - 1;

        // Rightmost m-mer first; slot 0 ends up holding the leftmost one.
        for index in (0..len).rev() {
            let slot = Slot::new(kmer & self.mask, self.m.get());
            self.ring[index] = slot;
            if slot.score < best {
                best = slot.score;
                best_index = index;
            }
            kmer >>= 2;
        }

        self.current = 0;
        self.minimizer = Some(best_index);
    }

    /// Caller guarantees the ring is populated.
    pub(crate) fn slide(&mut self, kmer: u64) {
        let slot = Slot::new(kmer & self.mask, self.m.get());
        let previous = self.minimizer.unwrap_or(self.current);
        let previous_score = self.ring[previous].score;

        self.ring[self.current] = slot;

        if slot.score < previous_score {
            self.minimizer = Some(self.current);
        } else if self.current == previous {
            self.rescan();
        }

        self.current = (self.current + 1) % self.ring.len();
    }

    fn rescan(&mut self) {
        let mut best = u64::MAX;
        let mut best_index = 0;
        for (index, slot) in self.ring.iter().enumerate() {
            if slot.score < best {
                best = slot.score;
                best_index = index;
            }
        }
        self.minimizer = Some(best_index);
    }
}
