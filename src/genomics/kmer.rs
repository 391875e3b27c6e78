use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use thiserror::Error;
use tracing::trace;

use super::sequence::{complement_base, Sequence, AMBIGUOUS_BASE};

/// Errors raised by k-mer construction and counting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KMerError {
    /// Window width must be at least one.
    #[error("k must be > 0")]
    NonPositiveK,

    /// A genome-size estimate was given a zero parameter.
    #[error("{parameter} must be > 0")]
    NonPositiveParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },

    /// A k-mer of the wrong width was supplied.
    #[error("k-mer length {found} does not match k={expected}")]
    LengthMismatch {
        /// Width configured on the counter.
        expected: usize,
        /// Width of the supplied k-mer.
        found: usize,
    },

    /// Counts added to a counter must be positive.
    #[error("count must be > 0")]
    NonPositiveCount,

    /// Counters with different widths cannot be combined.
    #[error("cannot merge counters with k={left} and k={right}")]
    KMismatch {
        /// Width of the receiving counter.
        left: usize,
        /// Width of the merged counter.
        right: usize,
    },

    /// A k-mer needs at least one symbol.
    #[error("k-mer is empty")]
    EmptyKMer,

    /// The window is wider than the sequence it should slide over.
    #[error("k={k} exceeds sequence length {len}")]
    KExceedsSequence {
        /// Requested width.
        k: usize,
        /// Sequence length.
        len: usize,
    },
}

/// Fixed-width window of nucleotide symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KMer {
    sequence: String,
}

impl KMer {
    /// Build a k-mer from text, normalising to uppercase.
    pub fn new(text: &str) -> Result<Self, KMerError> {
        if text.is_empty() {
            return Err(KMerError::EmptyKMer);
        }
        Ok(Self {
            sequence: text.to_ascii_uppercase(),
        })
    }

    /// Width of the window.
    pub fn k(&self) -> usize {
        self.sequence.chars().count()
    }

    /// Symbols of the window.
    pub fn as_str(&self) -> &str {
        &self.sequence
    }

    /// Reverse complement; symbols outside `ACGT` map to `N`.
    pub fn reverse_complement(&self) -> Self {
        Self {
            sequence: reverse_complement_str(&self.sequence),
        }
    }

    /// The lexicographically smaller of this k-mer and its reverse complement.
    ///
    /// Comparison is byte-wise on ASCII, giving the order `A < C < G < N < T`.
    pub fn canonical(&self) -> Self {
        let rc = self.reverse_complement();
        if self.sequence <= rc.sequence {
            self.clone()
        } else {
            rc
        }
    }

    /// Returns `true` when this k-mer is already in canonical form.
    pub fn is_canonical(&self) -> bool {
        self.sequence <= reverse_complement_str(&self.sequence)
    }
}

impl fmt::Display for KMer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sequence)
    }
}

fn reverse_complement_str(text: &str) -> String {
    text.bytes().rev().map(|b| complement_base(b) as char).collect()
}

fn canonical_str(window: &str) -> String {
    let rc = reverse_complement_str(window);
    if window <= rc.as_str() {
        window.to_string()
    } else {
        rc
    }
}

/// Frequency index of k-mers of a single width.
///
/// `total` always equals the sum of all stored counts and every key has
/// exactly `k` symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KMerCounter {
    k: usize,
    counts: HashMap<String, u64>,
    total: u64,
}

impl KMerCounter {
    /// Empty counter for windows of width `k`.
    pub fn new(k: usize) -> Result<Self, KMerError> {
        if k == 0 {
            return Err(KMerError::NonPositiveK);
        }
        Ok(Self {
            k,
            counts: HashMap::new(),
            total: 0,
        })
    }

    /// Window width.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct k-mers.
    pub fn unique_count(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` when nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Add `count` occurrences of `kmer`. Width is measured in symbols.
    pub fn add(&mut self, kmer: &str, count: u64) -> Result<(), KMerError> {
        let found = kmer.chars().count();
        if found != self.k {
            return Err(KMerError::LengthMismatch {
                expected: self.k,
                found,
            });
        }
        if count == 0 {
            return Err(KMerError::NonPositiveCount);
        }
        *self.counts.entry(kmer.to_ascii_uppercase()).or_insert(0) += count;
        self.total += count;
        Ok(())
    }

    /// Slide a window of width `k` across `sequence`, counting every window
    /// that contains no ambiguous base. Each window goes through
    /// [`add`](Self::add).
    pub fn count_from_sequence(&mut self, sequence: &Sequence) -> Result<(), KMerError> {
        let before = self.total;
        for window in sequence.windows(self.k) {
            if window.as_bytes().contains(&AMBIGUOUS_BASE) {
                continue;
            }
            self.add(window, 1)?;
        }
        trace!(k = self.k, added = self.total - before, "counted k-mers");
        Ok(())
    }

    /// Like [`count_from_sequence`](Self::count_from_sequence), but each window
    /// is folded onto its canonical form first.
    pub fn count_canonical_from_sequence(&mut self, sequence: &Sequence) -> Result<(), KMerError> {
        let before = self.total;
        for window in sequence.windows(self.k) {
            if window.as_bytes().contains(&AMBIGUOUS_BASE) {
                continue;
            }
            self.add(&canonical_str(window), 1)?;
        }
        trace!(k = self.k, added = self.total - before, "counted canonical k-mers");
        Ok(())
    }

    /// Stored count for `kmer` (case-insensitive); zero when absent.
    pub fn get(&self, kmer: &str) -> u64 {
        self.counts
            .get(&kmer.to_ascii_uppercase())
            .copied()
            .unwrap_or(0)
    }

    /// Relative frequency of `kmer`; zero for an empty counter.
    pub fn frequency(&self, kmer: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(kmer) as f64 / self.total as f64
    }

    /// Iterate over `(kmer, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(kmer, &count)| (kmer.as_str(), count))
    }

    /// Up to `n` entries with the highest counts.
    ///
    /// Ties are broken by k-mer text so that results are reproducible.
    pub fn most_frequent(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries = self.sorted_entries();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// Up to `n` entries with the lowest counts, ties broken by k-mer text.
    pub fn least_frequent(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries = self.sorted_entries();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// All entries with a count of at least `min_count`, sorted by k-mer.
    pub fn filter_by_count(&self, min_count: u64) -> Vec<(String, u64)> {
        self.sorted_entries()
            .into_iter()
            .filter(|(_, count)| *count >= min_count)
            .collect()
    }

    /// K-mers seen exactly once, sorted.
    pub fn unique_kmers(&self) -> Vec<String> {
        self.sorted_entries()
            .into_iter()
            .filter(|(_, count)| *count == 1)
            .map(|(kmer, _)| kmer)
            .collect()
    }

    /// Count spectrum: for each observed count, the number of distinct k-mers
    /// with that count.
    pub fn spectrum(&self) -> BTreeMap<u64, usize> {
        let mut spectrum = BTreeMap::new();
        for &count in self.counts.values() {
            *spectrum.entry(count).or_insert(0) += 1;
        }
        spectrum
    }

    /// Shannon entropy (bits) of the k-mer distribution.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }

    /// Add every count from `other` into this counter.
    pub fn merge(&mut self, other: &KMerCounter) -> Result<(), KMerError> {
        if self.k != other.k {
            return Err(KMerError::KMismatch {
                left: self.k,
                right: other.k,
            });
        }
        for (kmer, &count) in &other.counts {
            *self.counts.entry(kmer.clone()).or_insert(0) += count;
        }
        self.total += other.total;
        trace!(k = self.k, merged = other.total, total = self.total, "merged counters");
        Ok(())
    }

    /// Distinct k-mers as a set.
    pub fn kmer_set(&self) -> HashSet<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    fn sorted_entries(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(kmer, &count)| (kmer.clone(), count))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl fmt::Display for KMerCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KMerCounter {{ k: {}, unique: {}, total: {} }}",
            self.k,
            self.unique_count(),
            self.total
        )
    }
}

fn checked_width(sequence: &Sequence, k: usize) -> Result<(), KMerError> {
    if k == 0 {
        return Err(KMerError::NonPositiveK);
    }
    if k > sequence.len() {
        return Err(KMerError::KExceedsSequence {
            k,
            len: sequence.len(),
        });
    }
    Ok(())
}

/// Count all k-mers of `sequence`.
pub fn count_kmers(sequence: &Sequence, k: usize) -> Result<KMerCounter, KMerError> {
    checked_width(sequence, k)?;
    let mut counter = KMerCounter::new(k)?;
    counter.count_from_sequence(sequence)?;
    Ok(counter)
}

/// Count canonical k-mers of `sequence`, merging each k-mer with its reverse
/// complement.
pub fn count_kmers_canonical(sequence: &Sequence, k: usize) -> Result<KMerCounter, KMerError> {
    checked_width(sequence, k)?;
    let mut counter = KMerCounter::new(k)?;
    counter.count_canonical_from_sequence(sequence)?;
    Ok(counter)
}

/// The `n` most frequent k-mers of `sequence`.
pub fn most_frequent_kmers(
    sequence: &Sequence,
    k: usize,
    n: usize,
) -> Result<Vec<(String, u64)>, KMerError> {
    Ok(count_kmers(sequence, k)?.most_frequent(n))
}

/// Jaccard distance `1 - |A∩B| / |A∪B|` over the distinct k-mers of two
/// counters; zero when both are empty.
pub fn jaccard_distance(a: &KMerCounter, b: &KMerCounter) -> f64 {
    let set_a = a.kmer_set();
    let set_b = b.kmer_set();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    1.0 - intersection as f64 / union as f64
}

/// K-mers present in both counters, sorted.
pub fn shared_kmers(a: &KMerCounter, b: &KMerCounter) -> Vec<String> {
    let set_b = b.kmer_set();
    let mut shared: Vec<String> = a
        .kmer_set()
        .into_iter()
        .filter(|kmer| set_b.contains(kmer))
        .map(str::to_string)
        .collect();
    shared.sort_unstable();
    shared
}

/// Jaccard k-mer distance between two sequences.
pub fn kmer_distance(seq1: &Sequence, seq2: &Sequence, k: usize) -> Result<f64, KMerError> {
    let a = count_kmers(seq1, k)?;
    let b = count_kmers(seq2, k)?;
    Ok(jaccard_distance(&a, &b))
}

/// Genome size from a k-mer spectrum: total k-mers divided by the coverage
/// peak, rounded down. `k` only has to be positive.
pub fn estimate_genome_size(
    total_kmers: u64,
    peak_coverage: u64,
    k: usize,
) -> Result<u64, KMerError> {
    if total_kmers == 0 {
        return Err(KMerError::NonPositiveParameter {
            parameter: "total_kmers",
        });
    }
    if peak_coverage == 0 {
        return Err(KMerError::NonPositiveParameter {
            parameter: "peak_coverage",
        });
    }
    if k == 0 {
        return Err(KMerError::NonPositiveParameter { parameter: "k" });
    }
    Ok(total_kmers / peak_coverage)
}
