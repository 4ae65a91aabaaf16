//! # kmerring
//!
//! Compact integer representations of short DNA k-mers, and the
//! operations minimizer-based indexers build on.
//!
//! - [`kmer`]: pack a sequence of up to 31 bases into a `u64` (2 bits per
//!   base, `A=0 C=1 T=2 G=3`) and unpack it again.
//! - [`revcomp`]: complement, reverse and reverse complement on packed values.
//! - [`canonical`]: a strand-independent representative chosen by popcount
//!   parity, for which one bit is redundant.
//! - [`hash`]: a dense index into `0..4^k / 2` built on that redundancy.
//! - [`minimizer`]: the minimizer of a sliding k-mer window, maintained
//!   incrementally in a ring buffer.
//! - [`tokenizer`]: iterators rolling all of the above over a sequence.
//!
//! ## Example
//!
//! ```rust
//! use kmerring::{canonical, hash, pack, reverse_complement, unpack, MinimizerRing};
//!
//! let kmer = pack(b"ACTGC")?;
//! assert_eq!(kmer, 109);
//! assert_eq!(unpack(kmer, 5)?, "ACTGC");
//!
//! // Both strands share a canonical form and a hash index.
//! let rc = reverse_complement(kmer, 5);
//! assert_eq!(canonical(kmer, 5), canonical(rc, 5));
//! assert_eq!(hash(b"ACTGC")?, hash(b"GCAGT")?);
//!
//! let mut ring = MinimizerRing::create(5, 3, pack(b"ACTGT")?)?;
//! ring.add_kmer(pack(b"CTGTA")?)?;
//! assert_eq!(ring.get_mini()?, 46);
//! # Ok::<(), kmerring::KmerRingError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing`: lifecycle events for [`handle::RingHandle`] and
//!   [`logging::init_tracing`] to print them.

pub mod canonical;
pub mod config;
pub mod error;
pub mod handle;
pub mod hash;
pub mod kmer;
#[cfg(feature = "tracing")]
pub mod logging;
pub mod minimizer;
pub mod nucleotide;
pub mod revcomp;
pub mod tokenizer;

pub use canonical::{canonical, clear_leading_bit, get_leading_bit, parity_even};
pub use config::RingConfig;
pub use error::{KmerRingError, Result};
pub use handle::{Ownership, RingHandle};
pub use hash::{hash, hash_kmer, hash_space_size, kmer_space_size, unhash};
pub use kmer::{pack, unpack, KmerLength, MAX_K, MIN_K};
pub use minimizer::{mmer_score, Minimizer, MinimizerRing};
pub use nucleotide::{code_to_nucleotide, nucleotide_to_code, Nucleotide};
pub use revcomp::{complement, reverse, reverse_complement};
pub use tokenizer::{
    CanonicalMinimizerTokenizer, CanonicalTokenizer, MinimizerTokenizer, Tokenizer,
};
