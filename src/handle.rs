//! Handle-based access to a minimizer ring for embedding layers.
//!
//! A host binding keeps a [`RingHandle`] where it would otherwise juggle a
//! raw pointer. The handle either owns its ring or borrows one owned
//! elsewhere; only an owning handle frees the ring. After
//! [`destroy`](RingHandle::destroy) every operation fails with
//! [`KmerRingError::HandleInvalidated`], and destroying again does nothing.

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::{
    error::{KmerRingError, Result},
    minimizer::{Minimizer, MinimizerRing},
};

/// Whether a handle is responsible for freeing its ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The handle allocated the ring and releases it.
    Owned,
    /// The ring belongs to someone else; releasing only detaches.
    Borrowed,
}

#[derive(Debug)]
enum Slot<'a> {
    Owned(Box<MinimizerRing>),
    Borrowed(&'a mut MinimizerRing),
    Released,
}

/// An owned or borrowed [`MinimizerRing`] with explicit release.
///
/// # Example
///
/// ```rust
/// use kmerring::{handle::RingHandle, kmer::pack, KmerRingError};
///
/// let mut handle = RingHandle::create(5, 3, pack(b"ACTGT")?)?;
/// assert_eq!(handle.get_mini()?, 6);
///
/// handle.destroy();
/// handle.destroy();
/// assert_eq!(handle.get_mini(), Err(KmerRingError::HandleInvalidated));
/// # Ok::<(), KmerRingError>(())
/// ```
#[derive(Debug)]
pub struct RingHandle<'a> {
    slot: Slot<'a>,
}

impl RingHandle<'static> {
    /// Allocates a ring seeded with `kmer`.
    ///
    /// # Errors
    ///
    /// Same as [`MinimizerRing::create`].
    pub fn create(k: usize, m: usize, kmer: u64) -> Result<Self> {
        MinimizerRing::create(k, m, kmer).map(Self::owned)
    }

    /// Allocates an unpopulated ring.
    ///
    /// # Errors
    ///
    /// Same as [`MinimizerRing::empty`].
    pub fn create_empty(k: usize, m: usize) -> Result<Self> {
        MinimizerRing::empty(k, m).map(Self::owned)
    }

    /// Takes ownership of an existing ring.
    pub fn owned(ring: MinimizerRing) -> Self {
        #[cfg(feature = "tracing")]
        debug!(k = ring.k(), m = ring.m(), "Acquired owned minimizer ring handle");

        Self {
            slot: Slot::Owned(Box::new(ring)),
        }
    }
}

impl<'a> RingHandle<'a> {
    /// Wraps a ring owned by the caller. Destroying the handle leaves the
    /// ring untouched.
    pub fn borrowed(ring: &'a mut MinimizerRing) -> Self {
        #[cfg(feature = "tracing")]
        debug!(k = ring.k(), m = ring.m(), "Acquired borrowed minimizer ring handle");

        Self {
            slot: Slot::Borrowed(ring),
        }
    }

    /// `None` once the handle is destroyed.
    pub const fn ownership(&self) -> Option<Ownership> {
        match self.slot {
            Slot::Owned(_) => Some(Ownership::Owned),
            Slot::Borrowed(_) => Some(Ownership::Borrowed),
            Slot::Released => None,
        }
    }

    pub const fn is_destroyed(&self) -> bool {
        matches!(self.slot, Slot::Released)
    }

    fn ring(&self) -> Result<&MinimizerRing> {
        match &self.slot {
            Slot::Owned(ring) => Ok(ring),
            Slot::Borrowed(ring) => Ok(ring),
            Slot::Released => Err(Self::invalidated()),
        }
    }

    fn ring_mut(&mut self) -> Result<&mut MinimizerRing> {
        match &mut self.slot {
            Slot::Owned(ring) => Ok(ring),
            Slot::Borrowed(ring) => Ok(ring),
            Slot::Released => Err(Self::invalidated()),
        }
    }

    fn invalidated() -> KmerRingError {
        #[cfg(feature = "tracing")]
        trace!("Operation on destroyed minimizer ring handle");

        KmerRingError::HandleInvalidated
    }

    /// See [`MinimizerRing::populate_buffer`].
    pub fn populate_buffer(&mut self, kmer: u64) -> Result<()> {
        self.ring_mut()?.populate_buffer(kmer)
    }

    /// See [`MinimizerRing::add_kmer`].
    pub fn add_kmer(&mut self, kmer: u64) -> Result<()> {
        self.ring_mut()?.add_kmer(kmer)
    }

    /// See [`MinimizerRing::get_mini`].
    pub fn get_mini(&self) -> Result<u64> {
        self.ring()?.get_mini()
    }

    /// See [`MinimizerRing::minimizer`].
    pub fn minimizer(&self) -> Result<Minimizer> {
        self.ring()?.minimizer()
    }

    /// Releases the ring (owned) or detaches from it (borrowed).
    ///
    /// Returns `true` if this call released something, `false` if the handle
    /// was already destroyed.
    pub fn destroy(&mut self) -> bool {
        match std::mem::replace(&mut self.slot, Slot::Released) {
            Slot::Owned(ring) => {
                #[cfg(feature = "tracing")]
                debug!(k = ring.k(), m = ring.m(), "Released owned minimizer ring");

                drop(ring);
                true
            }
            Slot::Borrowed(_) => {
                #[cfg(feature = "tracing")]
                debug!("Detached borrowed minimizer ring");

                true
            }
            Slot::Released => {
                #[cfg(feature = "tracing")]
                debug!("Minimizer ring handle already destroyed");

                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::pack;

    #[test]
    fn owned_handle_lifecycle() {
        let mut handle = RingHandle::create(5, 3, pack(b"ACTGT").unwrap()).unwrap();
        assert_eq!(handle.ownership(), Some(Ownership::Owned));
        assert_eq!(handle.get_mini().unwrap(), 6);

        handle.add_kmer(pack(b"CTGTA").unwrap()).unwrap();
        assert_eq!(handle.get_mini().unwrap(), 46);

        assert!(handle.destroy());
        assert!(handle.is_destroyed());
        assert_eq!(handle.ownership(), None);
    }

    #[test]
    fn double_destroy_is_noop() {
        let mut handle = RingHandle::create(5, 3, 0).unwrap();
        assert!(handle.destroy());
        assert!(!handle.destroy());
        assert!(!handle.destroy());
    }

    #[test]
    fn operations_after_destroy_fail() {
        let mut handle = RingHandle::create(5, 3, 0).unwrap();
        handle.destroy();
        assert_eq!(handle.get_mini(), Err(KmerRingError::HandleInvalidated));
        assert_eq!(handle.minimizer(), Err(KmerRingError::HandleInvalidated));
        assert_eq!(handle.add_kmer(0), Err(KmerRingError::HandleInvalidated));
        assert_eq!(
            handle.populate_buffer(0),
            Err(KmerRingError::HandleInvalidated)
        );
    }

    #[test]
    fn empty_handle_reports_empty_ring() {
        let mut handle = RingHandle::create_empty(5, 3).unwrap();
        assert_eq!(handle.get_mini(), Err(KmerRingError::EmptyRing));
        handle.populate_buffer(pack(b"ACTGT").unwrap()).unwrap();
        assert_eq!(handle.get_mini().unwrap(), 6);
    }

    #[test]
    fn create_validates() {
        assert!(matches!(
            RingHandle::create(3, 5, 0),
            Err(KmerRingError::InvalidMinimizerLength { m: 5, k: 3 })
        ));
        assert!(matches!(
            RingHandle::create_empty(0, 0),
            Err(KmerRingError::InvalidLength { .. })
        ));
    }

    #[test]
    fn borrowed_handle_leaves_ring_alive() {
        let mut ring = MinimizerRing::create(5, 3, pack(b"ACTGT").unwrap()).unwrap();
        {
            let mut handle = RingHandle::borrowed(&mut ring);
            assert_eq!(handle.ownership(), Some(Ownership::Borrowed));
            handle.add_kmer(pack(b"CTGTA").unwrap()).unwrap();
            assert!(handle.destroy());
            assert_eq!(handle.get_mini(), Err(KmerRingError::HandleInvalidated));
        }
        // Updates made through the handle are visible to the owner.
        assert_eq!(ring.get_mini().unwrap(), 46);
    }

    #[cfg(feature = "tracing")]
    #[tracing_test::traced_test]
    #[test]
    fn destroy_is_logged() {
        let mut handle = RingHandle::create(5, 3, 0).unwrap();
        handle.destroy();
        handle.destroy();
        assert!(logs_contain("Released owned minimizer ring"));
        assert!(logs_contain("already destroyed"));
    }
}
