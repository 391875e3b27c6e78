//! Nucleotide sequences and k-mer indexing.
//!
//! [`Sequence`] is the validated value type every other component consumes;
//! [`KMerCounter`] builds frequency indexes over it.

mod kmer;
mod sequence;
mod types;

pub use kmer::{
    count_kmers, count_kmers_canonical, estimate_genome_size, jaccard_distance, kmer_distance,
    most_frequent_kmers, shared_kmers, KMer, KMerCounter, KMerError,
};
pub use sequence::{
    complement_base, BaseComposition, Sequence, SequenceError, SequenceKind, AMBIGUOUS_BASE,
};
pub use types::{run_length_encode, CigarOp, CigarOpKind};
