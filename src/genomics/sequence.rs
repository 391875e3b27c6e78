use std::fmt;

use thiserror::Error;

/// Symbol used for ambiguous positions in both alphabets.
pub const AMBIGUOUS_BASE: u8 = b'N';

/// Nucleic acid alphabet a [`Sequence`] is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SequenceKind {
    /// Deoxyribonucleic acid: `A`, `C`, `G`, `T`, `N`.
    Dna,
    /// Ribonucleic acid: `A`, `C`, `G`, `U`, `N`.
    Rna,
}

impl SequenceKind {
    /// Uppercase symbols accepted for this kind.
    pub fn alphabet(self) -> &'static [u8] {
        match self {
            SequenceKind::Dna => b"ACGTN",
            SequenceKind::Rna => b"ACGUN",
        }
    }

    /// Returns `true` when `symbol` (already uppercase) belongs to the alphabet.
    pub fn accepts(self, symbol: u8) -> bool {
        matches!(
            (self, symbol),
            (_, b'A' | b'C' | b'G' | b'N') | (SequenceKind::Dna, b'T') | (SequenceKind::Rna, b'U')
        )
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Dna => write!(f, "DNA"),
            SequenceKind::Rna => write!(f, "RNA"),
        }
    }
}

/// Errors that can occur while constructing or transforming sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The input contained no symbols.
    #[error("sequence is empty")]
    EmptySequence,

    /// A symbol outside the alphabet of the requested kind was found.
    #[error("invalid {kind} symbol '{symbol}' at position {position}")]
    InvalidSymbol {
        /// Zero-based position of the offending symbol.
        position: usize,
        /// Offending symbol as supplied (before normalisation).
        symbol: char,
        /// Alphabet the sequence was validated against.
        kind: SequenceKind,
    },

    /// The operation is only defined for another sequence kind.
    #[error("operation requires a {expected} sequence, found {found}")]
    WrongSequenceKind {
        /// Kind the operation accepts.
        expected: SequenceKind,
        /// Kind that was supplied.
        found: SequenceKind,
    },

    /// Two sequences of different kinds were combined.
    #[error("cannot concatenate {left} with {right}")]
    KindMismatch {
        /// Kind of the receiver.
        left: SequenceKind,
        /// Kind of the argument.
        right: SequenceKind,
    },

    /// Motif searches need at least one symbol.
    #[error("motif is empty")]
    EmptyMotif,

    /// Slice bounds do not describe a non-empty range inside the sequence.
    #[error("invalid range {start}..{end} for sequence of length {len}")]
    InvalidRange {
        /// Requested start (inclusive).
        start: usize,
        /// Requested end (exclusive).
        end: usize,
        /// Length of the sequence.
        len: usize,
    },
}

/// Validated, immutable nucleotide sequence.
///
/// Bases are normalised to uppercase ASCII on construction and every symbol is
/// guaranteed to belong to the alphabet of [`Sequence::kind`]. A sequence is
/// never empty. All transformations return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sequence {
    bases: String,
    kind: SequenceKind,
    id: Option<String>,
    description: Option<String>,
}

impl Sequence {
    /// Validate `text` against the alphabet of `kind` and build a sequence.
    ///
    /// Lowercase input is accepted and normalised to uppercase.
    pub fn new(text: &str, kind: SequenceKind) -> Result<Self, SequenceError> {
        if text.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        let mut bases = String::with_capacity(text.len());
        for (position, symbol) in text.chars().enumerate() {
            let upper = symbol.to_ascii_uppercase();
            if !upper.is_ascii() || !kind.accepts(upper as u8) {
                return Err(SequenceError::InvalidSymbol {
                    position,
                    symbol,
                    kind,
                });
            }
            bases.push(upper);
        }

        Ok(Self::from_validated(bases, kind, None, None))
    }

    /// Shorthand for [`Sequence::new`] with [`SequenceKind::Dna`].
    pub fn dna(text: &str) -> Result<Self, SequenceError> {
        Self::new(text, SequenceKind::Dna)
    }

    /// Shorthand for [`Sequence::new`] with [`SequenceKind::Rna`].
    pub fn rna(text: &str) -> Result<Self, SequenceError> {
        Self::new(text, SequenceKind::Rna)
    }

    // Callers must guarantee `bases` is non-empty, uppercase and within the
    // alphabet of `kind`.
    fn from_validated(
        bases: String,
        kind: SequenceKind,
        id: Option<String>,
        description: Option<String>,
    ) -> Self {
        debug_assert!(!bases.is_empty());
        debug_assert!(bases.bytes().all(|b| kind.accepts(b)));
        Self {
            bases,
            kind,
            id,
            description,
        }
    }

    // Derive a sequence carrying this one's metadata.
    fn derive(&self, bases: String, kind: SequenceKind) -> Self {
        Self::from_validated(bases, kind, self.id.clone(), self.description.clone())
    }

    /// Attach an identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Uppercase bases.
    pub fn bases(&self) -> &str {
        &self.bases
    }

    /// Bases as ASCII bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.bases.as_bytes()
    }

    /// Alphabet of this sequence.
    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    /// Optional identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of bases (always > 0).
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Base at `index`, or `None` past the end.
    pub fn symbol_at(&self, index: usize) -> Option<char> {
        self.as_bytes().get(index).map(|&b| b as char)
    }

    /// Half-open slice `[start, end)` as a new sequence with the same metadata.
    pub fn subsequence(&self, start: usize, end: usize) -> Result<Self, SequenceError> {
        if end <= start || end > self.len() {
            return Err(SequenceError::InvalidRange {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(self.derive(self.bases[start..end].to_string(), self.kind))
    }

    fn require_dna(&self) -> Result<(), SequenceError> {
        match self.kind {
            SequenceKind::Dna => Ok(()),
            found => Err(SequenceError::WrongSequenceKind {
                expected: SequenceKind::Dna,
                found,
            }),
        }
    }

    /// Watson-Crick complement (`A`↔`T`, `C`↔`G`, `N`→`N`). DNA only.
    pub fn complement(&self) -> Result<Self, SequenceError> {
        self.require_dna()?;
        let bases = self.bases.bytes().map(|b| complement_base(b) as char).collect();
        Ok(self.derive(bases, SequenceKind::Dna))
    }

    /// Bases in reverse order. DNA only.
    pub fn reverse(&self) -> Result<Self, SequenceError> {
        self.require_dna()?;
        Ok(self.derive(self.bases.chars().rev().collect(), self.kind))
    }

    /// Reverse complement. DNA only.
    pub fn reverse_complement(&self) -> Result<Self, SequenceError> {
        self.require_dna()?;
        let bases = self
            .bases
            .bytes()
            .rev()
            .map(|b| complement_base(b) as char)
            .collect();
        Ok(self.derive(bases, SequenceKind::Dna))
    }

    /// Transcribe DNA to RNA (`T`→`U`).
    pub fn transcribe(&self) -> Result<Self, SequenceError> {
        self.require_dna()?;
        Ok(self.derive(self.bases.replace('T', "U"), SequenceKind::Rna))
    }

    /// Reverse-transcribe RNA to DNA (`U`→`T`).
    pub fn reverse_transcribe(&self) -> Result<Self, SequenceError> {
        if self.kind != SequenceKind::Rna {
            return Err(SequenceError::WrongSequenceKind {
                expected: SequenceKind::Rna,
                found: self.kind,
            });
        }
        Ok(self.derive(self.bases.replace('U', "T"), SequenceKind::Dna))
    }

    /// Append `other`, keeping this sequence's metadata. Kinds must agree.
    pub fn concat(&self, other: &Sequence) -> Result<Self, SequenceError> {
        if self.kind != other.kind {
            return Err(SequenceError::KindMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        let mut bases = String::with_capacity(self.len() + other.len());
        bases.push_str(&self.bases);
        bases.push_str(&other.bases);
        Ok(self.derive(bases, self.kind))
    }

    /// Per-symbol counts.
    pub fn base_composition(&self) -> BaseComposition {
        let mut composition = BaseComposition::default();
        for base in self.bases.bytes() {
            match base {
                b'A' => composition.a += 1,
                b'C' => composition.c += 1,
                b'G' => composition.g += 1,
                b'T' | b'U' => composition.t += 1,
                _ => composition.n += 1,
            }
        }
        composition
    }

    /// Fraction of `G` and `C` bases.
    pub fn gc_content(&self) -> f64 {
        self.base_composition().gc_content()
    }

    /// Fraction of `A` and `T` (or `U`) bases.
    pub fn at_content(&self) -> f64 {
        self.base_composition().at_content()
    }

    /// Returns `true` when any base is ambiguous.
    pub fn has_ambiguous(&self) -> bool {
        self.as_bytes().contains(&AMBIGUOUS_BASE)
    }

    /// Number of ambiguous bases.
    pub fn count_ambiguous(&self) -> usize {
        self.as_bytes().iter().filter(|&&b| b == AMBIGUOUS_BASE).count()
    }

    /// Every start offset where `motif` occurs, overlapping matches included.
    /// Matching is case-insensitive.
    pub fn find_motif_positions(&self, motif: &str) -> Result<Vec<usize>, SequenceError> {
        if motif.is_empty() {
            return Err(SequenceError::EmptyMotif);
        }
        let motif = motif.to_ascii_uppercase();
        let needle = motif.as_bytes();
        Ok(self
            .as_bytes()
            .windows(needle.len())
            .enumerate()
            .filter(|(_, window)| *window == needle)
            .map(|(offset, _)| offset)
            .collect())
    }

    /// Returns `true` when `motif` occurs at least once.
    pub fn contains_motif(&self, motif: &str) -> Result<bool, SequenceError> {
        Ok(!self.find_motif_positions(motif)?.is_empty())
    }

    /// Iterate over all windows of `size` bases, left to right.
    ///
    /// Yields nothing when `size` is zero or exceeds the sequence length.
    pub fn windows(&self, size: usize) -> impl Iterator<Item = &str> + '_ {
        let count = if size == 0 {
            0
        } else {
            (self.len() + 1).saturating_sub(size)
        };
        (0..count).map(move |start| &self.bases[start..start + size])
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bases)
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Complement of a single uppercase DNA base; anything unknown maps to `N`.
pub fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => AMBIGUOUS_BASE,
    }
}

/// Symbol counts for a sequence. `t` also counts `U` in RNA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseComposition {
    /// Adenine.
    pub a: usize,
    /// Cytosine.
    pub c: usize,
    /// Guanine.
    pub g: usize,
    /// Thymine (DNA) or uracil (RNA).
    pub t: usize,
    /// Ambiguous.
    pub n: usize,
}

impl BaseComposition {
    /// Total number of counted symbols.
    pub fn total(&self) -> usize {
        self.a + self.c + self.g + self.t + self.n
    }

    /// Fraction of `G` + `C`; zero for an empty composition.
    pub fn gc_content(&self) -> f64 {
        ratio(self.g + self.c, self.total())
    }

    /// Fraction of `A` + `T`/`U`; zero for an empty composition.
    pub fn at_content(&self) -> f64 {
        ratio(self.a + self.t, self.total())
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalises_case() {
        let seq = Sequence::dna("acgTn").unwrap();
        assert_eq!(seq.bases(), "ACGTN");
        assert_eq!(seq.kind(), SequenceKind::Dna);
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(Sequence::dna(""), Err(SequenceError::EmptySequence));
    }

    #[test]
    fn invalid_symbol_reports_position() {
        let err = Sequence::dna("ACXT").unwrap_err();
        assert_eq!(
            err,
            SequenceError::InvalidSymbol {
                position: 2,
                symbol: 'X',
                kind: SequenceKind::Dna
            }
        );
        assert!(matches!(
            Sequence::dna("ACGU"),
            Err(SequenceError::InvalidSymbol { position: 3, .. })
        ));
        assert!(matches!(
            Sequence::rna("ACGT"),
            Err(SequenceError::InvalidSymbol { position: 3, .. })
        ));
    }

    #[test]
    fn symbol_at_past_end_is_absent() {
        let seq = Sequence::dna("ACG").unwrap();
        assert_eq!(seq.symbol_at(0), Some('A'));
        assert_eq!(seq.symbol_at(2), Some('G'));
        assert_eq!(seq.symbol_at(3), None);
    }

    #[test]
    fn subsequence_bounds() {
        let seq = Sequence::dna("ACGTACGT").unwrap().with_id("chr1");
        let sub = seq.subsequence(2, 5).unwrap();
        assert_eq!(sub.bases(), "GTA");
        assert_eq!(sub.id(), Some("chr1"));

        assert!(seq.subsequence(3, 3).is_err());
        assert!(seq.subsequence(4, 2).is_err());
        assert_eq!(
            seq.subsequence(0, 9),
            Err(SequenceError::InvalidRange {
                start: 0,
                end: 9,
                len: 8
            })
        );
    }

    #[test]
    fn complement_and_reverse() {
        let seq = Sequence::dna("AACGTN").unwrap();
        assert_eq!(seq.complement().unwrap().bases(), "TTGCAN");
        assert_eq!(seq.reverse().unwrap().bases(), "NTGCAA");
        assert_eq!(seq.reverse_complement().unwrap().bases(), "NACGTT");
    }

    #[test]
    fn dna_only_operations_reject_rna() {
        let rna = Sequence::rna("ACGU").unwrap();
        let expected = SequenceError::WrongSequenceKind {
            expected: SequenceKind::Dna,
            found: SequenceKind::Rna,
        };
        assert_eq!(rna.complement(), Err(expected.clone()));
        assert_eq!(rna.reverse(), Err(expected.clone()));
        assert_eq!(rna.reverse_complement(), Err(expected.clone()));
        assert_eq!(rna.transcribe(), Err(expected));
    }

    #[test]
    fn transcription_roundtrip() {
        let dna = Sequence::dna("ATGCTT").unwrap();
        let rna = dna.transcribe().unwrap();
        assert_eq!(rna.bases(), "AUGCUU");
        assert_eq!(rna.kind(), SequenceKind::Rna);
        assert_eq!(rna.reverse_transcribe().unwrap(), dna);
        assert!(dna.reverse_transcribe().is_err());
    }

    #[test]
    fn concat_requires_same_kind() {
        let a = Sequence::dna("AC").unwrap();
        let b = Sequence::dna("GT").unwrap();
        assert_eq!(a.concat(&b).unwrap().bases(), "ACGT");

        let r = Sequence::rna("GU").unwrap();
        assert_eq!(
            a.concat(&r),
            Err(SequenceError::KindMismatch {
                left: SequenceKind::Dna,
                right: SequenceKind::Rna
            })
        );
    }

    #[test]
    fn gc_and_at_content() {
        assert_eq!(Sequence::dna("GCGC").unwrap().gc_content(), 1.0);
        assert_eq!(Sequence::dna("ATAT").unwrap().gc_content(), 0.0);
        assert_eq!(Sequence::dna("ATGC").unwrap().gc_content(), 0.5);
        assert_eq!(Sequence::dna("ATGN").unwrap().at_content(), 0.5);
        assert_eq!(Sequence::rna("AUUG").unwrap().at_content(), 0.75);
    }

    #[test]
    fn composition_counts_every_symbol() {
        let comp = Sequence::dna("AACGTNN").unwrap().base_composition();
        assert_eq!(comp, BaseComposition { a: 2, c: 1, g: 1, t: 1, n: 2 });
        assert_eq!(comp.total(), 7);
    }

    #[test]
    fn motif_search_reports_overlaps() {
        let seq = Sequence::dna("AAAACAAA").unwrap();
        assert_eq!(seq.find_motif_positions("aa").unwrap(), vec![0, 1, 2, 5, 6]);
        assert_eq!(seq.find_motif_positions("GG").unwrap(), Vec::<usize>::new());
        assert_eq!(seq.find_motif_positions("AAAACAAAA").unwrap(), Vec::<usize>::new());
        assert_eq!(seq.find_motif_positions(""), Err(SequenceError::EmptyMotif));
        assert!(seq.contains_motif("CA").unwrap());
    }

    #[test]
    fn windows_cover_every_offset() {
        let seq = Sequence::dna("ACGTA").unwrap();
        let windows: Vec<&str> = seq.windows(3).collect();
        assert_eq!(windows, vec!["ACG", "CGT", "GTA"]);
        assert_eq!(seq.windows(6).count(), 0);
        assert_eq!(seq.windows(0).count(), 0);
    }

    #[test]
    fn ambiguity_helpers() {
        let seq = Sequence::dna("ANNT").unwrap();
        assert!(seq.has_ambiguous());
        assert_eq!(seq.count_ambiguous(), 2);
        assert!(!Sequence::dna("ACGT").unwrap().has_ambiguous());
    }
}
