//! # seqforge: nucleotide sequences, k-mers and pairwise alignment
//!
//! A small, exact reference toolkit for DNA/RNA analysis.
//!
//! ## Components
//!
//! 1. **Sequences**: validated DNA/RNA values with complement, transcription,
//!    composition and motif queries
//! 2. **K-mers**: frequency counting, canonical k-mers and k-mer distances
//! 3. **Alignment**: Smith-Waterman, Needleman-Wunsch and an O(n) score-only
//!    pass, with CIGAR/identity derivation on the result
//! 4. **Space accounting**: cell-level tracking of DP memory
//!
//! ## Usage Example
//!
//! ```
//! use seqforge::{smith_waterman, ScoringMatrix, Sequence};
//!
//! let a = Sequence::dna("ATCG")?;
//! let b = Sequence::dna("ATCG")?;
//! let scoring = ScoringMatrix::linear(5, -1, -2)?;
//! let aln = smith_waterman(&a, &b, &scoring)?;
//! assert_eq!(aln.score(), 20);
//! assert_eq!(aln.to_cigar(), "4M");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod alignment; // Pairwise DP aligners and alignment results
pub mod genomics;  // Sequences and k-mer indexing
pub mod space;     // Space accounting utilities

// Re-exports for convenience
pub use alignment::{
    align_against_multiple, alignment_score_only, find_best_alignment, needleman_wunsch,
    simple_align, smith_waterman, Aligner, AlignerConfig, Alignment, AlignmentError,
    AlignmentKind, AlignmentMode, ScoringError, ScoringMatrix,
};
pub use genomics::{
    estimate_genome_size, kmer_distance, KMer, KMerCounter, KMerError, Sequence, SequenceError,
    SequenceKind,
};
pub use space::{SpaceProfile, SpaceTracker};

/// Crate version, as recorded in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_cover_the_common_path() {
        let query = Sequence::dna("ACGTACGT").unwrap();
        let targets = vec![query.clone(), Sequence::dna("TTTT").unwrap()];
        let (index, aln) =
            find_best_alignment(&query, &targets, &ScoringMatrix::default()).unwrap();
        assert_eq!(index, 0);
        assert_eq!(aln.identity(), 1.0);
        assert_eq!(kmer_distance(&query, &query, 3).unwrap(), 0.0);
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
