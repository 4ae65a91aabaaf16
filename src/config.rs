//! Validated minimizer ring parameters.
//!
//! `RingConfig` is what downstream indices store next to their data so a
//! scan can be reproduced exactly: same `k`, same `m`, same minimizers.

use serde::{Deserialize, Serialize};

use crate::{
    error::{KmerRingError, Result},
    kmer::KmerLength,
    minimizer::MinimizerRing,
};

/// Window and minimizer lengths with `1 <= m <= k <= 31`.
///
/// # Example
///
/// ```rust
/// use kmerring::config::RingConfig;
///
/// let config = RingConfig::new(21, 11)?;
/// assert_eq!(config.window_len(), 11);
/// assert!(RingConfig::new(5, 7).is_err());
/// # Ok::<(), kmerring::KmerRingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRingConfig", into = "RawRingConfig")]
pub struct RingConfig {
    k: KmerLength,
    m: KmerLength,
}

#[derive(Serialize, Deserialize)]
struct RawRingConfig {
    k: usize,
    m: usize,
}

impl RingConfig {
    /// Validates `k` and `m`.
    pub fn new(k: usize, m: usize) -> Result<Self> {
        let k = KmerLength::new(k)?;
        if m == 0 || m > k.get() {
            return Err(KmerRingError::InvalidMinimizerLength { m, k: k.get() });
        }
        let m = KmerLength::new(m)?;
        Ok(Self { k, m })
    }

    pub const fn k(&self) -> KmerLength {
        self.k
    }

    pub const fn m(&self) -> KmerLength {
        self.m
    }

    /// M-mers per k-mer window, `k - m + 1`.
    pub const fn window_len(&self) -> usize {
        self.k.get() - self.m.get() + 1
    }

    /// An unpopulated ring with these parameters.
    pub fn build_empty(self) -> MinimizerRing {
        MinimizerRing::new(self)
    }

    /// A ring seeded with `kmer`.
    ///
    /// # Errors
    ///
    /// Returns [`KmerRingError::KmerOutOfRange`] if `kmer >= 4^k`.
    pub fn build(self, kmer: u64) -> Result<MinimizerRing> {
        let mut ring = MinimizerRing::new(self);
        ring.populate_buffer(kmer)?;
        Ok(ring)
    }
}

impl TryFrom<RawRingConfig> for RingConfig {
    type Error = KmerRingError;

    fn try_from(raw: RawRingConfig) -> Result<Self> {
        Self::new(raw.k, raw.m)
    }
}

impl From<RingConfig> for RawRingConfig {
    fn from(config: RingConfig) -> Self {
        Self {
            k: config.k.get(),
            m: config.m.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_valid() {
        let config = RingConfig::new(5, 3).unwrap();
        assert_eq!(config.k().get(), 5);
        assert_eq!(config.m().get(), 3);
        assert_eq!(config.window_len(), 3);
        assert_eq!(RingConfig::new(31, 31).unwrap().window_len(), 1);
        assert_eq!(RingConfig::new(1, 1).unwrap().window_len(), 1);
    }

    #[test]
    fn config_invalid() {
        assert!(matches!(
            RingConfig::new(0, 0),
            Err(KmerRingError::InvalidLength { k: 0, .. })
        ));
        assert!(matches!(
            RingConfig::new(32, 5),
            Err(KmerRingError::InvalidLength { k: 32, .. })
        ));
        assert_eq!(
            RingConfig::new(11, 12),
            Err(KmerRingError::InvalidMinimizerLength { m: 12, k: 11 })
        );
        assert_eq!(
            RingConfig::new(11, 0),
            Err(KmerRingError::InvalidMinimizerLength { m: 0, k: 11 })
        );
    }

    #[test]
    fn config_builds_rings() {
        let config = RingConfig::new(5, 3).unwrap();
        assert!(config.build_empty().is_empty());
        let ring = config.build(109).unwrap();
        assert_eq!((ring.k(), ring.m(), ring.window_len()), (5, 3, 3));
        assert!(config.build(1 << 10).is_err());
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = RingConfig::new(21, 11).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        insta::assert_snapshot!(json, @r#"{"k":21,"m":11}"#);
        let back: RingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn config_serde_validates() {
        assert!(serde_json::from_str::<RingConfig>(r#"{"k":5,"m":7}"#).is_err());
        assert!(serde_json::from_str::<RingConfig>(r#"{"k":40,"m":7}"#).is_err());
    }
}
