use std::fmt;

use crate::genomics::{run_length_encode, CigarOp, CigarOpKind};

use super::AlignmentError;

/// Symbol written into aligned rows for gap columns.
pub const GAP: u8 = b'-';

/// Which algorithm produced an [`Alignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AlignmentKind {
    /// Smith-Waterman.
    Local,
    /// Needleman-Wunsch.
    Global,
}

impl fmt::Display for AlignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentKind::Local => write!(f, "local"),
            AlignmentKind::Global => write!(f, "global"),
        }
    }
}

/// Immutable result of a pairwise alignment.
///
/// `aligned1` and `aligned2` always have the same length. Ranges are half-open
/// offsets into the original sequences. Every statistic (identity, counts,
/// CIGAR) is derived from the aligned rows on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Alignment {
    aligned1: String,
    aligned2: String,
    score: i64,
    start1: usize,
    end1: usize,
    start2: usize,
    end2: usize,
    kind: AlignmentKind,
}

impl Alignment {
    /// Assemble an alignment from its parts, checking that the rows have equal
    /// length.
    pub fn from_parts(
        aligned1: impl Into<String>,
        aligned2: impl Into<String>,
        score: i64,
        range1: (usize, usize),
        range2: (usize, usize),
        kind: AlignmentKind,
    ) -> Result<Self, AlignmentError> {
        let aligned1 = aligned1.into();
        let aligned2 = aligned2.into();
        if aligned1.len() != aligned2.len() {
            return Err(AlignmentError::LengthMismatch {
                len1: aligned1.len(),
                len2: aligned2.len(),
            });
        }
        Ok(Self {
            aligned1,
            aligned2,
            score,
            start1: range1.0,
            end1: range1.1,
            start2: range2.0,
            end2: range2.1,
            kind,
        })
    }

    /// Built by traceback; rows are reversed in place and are ASCII.
    pub(crate) fn from_traceback(
        mut row1: Vec<u8>,
        mut row2: Vec<u8>,
        score: i64,
        range1: (usize, usize),
        range2: (usize, usize),
        kind: AlignmentKind,
    ) -> Self {
        debug_assert_eq!(row1.len(), row2.len());
        row1.reverse();
        row2.reverse();
        Self {
            aligned1: row1.into_iter().map(char::from).collect(),
            aligned2: row2.into_iter().map(char::from).collect(),
            score,
            start1: range1.0,
            end1: range1.1,
            start2: range2.0,
            end2: range2.1,
            kind,
        }
    }

    /// First aligned row, gaps as `-`.
    pub fn aligned1(&self) -> &str {
        &self.aligned1
    }

    /// Second aligned row, gaps as `-`.
    pub fn aligned2(&self) -> &str {
        &self.aligned2
    }

    /// Alignment score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Start offset (inclusive) in the first sequence.
    pub fn start1(&self) -> usize {
        self.start1
    }

    /// End offset (exclusive) in the first sequence.
    pub fn end1(&self) -> usize {
        self.end1
    }

    /// Start offset (inclusive) in the second sequence.
    pub fn start2(&self) -> usize {
        self.start2
    }

    /// End offset (exclusive) in the second sequence.
    pub fn end2(&self) -> usize {
        self.end2
    }

    /// Algorithm that produced the alignment.
    pub fn kind(&self) -> AlignmentKind {
        self.kind
    }

    /// Number of columns.
    pub fn alignment_length(&self) -> usize {
        self.aligned1.len()
    }

    fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.aligned1.bytes().zip(self.aligned2.bytes())
    }

    /// Columns with identical, non-gap symbols.
    pub fn match_count(&self) -> usize {
        self.columns().filter(|&(a, b)| a == b && a != GAP).count()
    }

    /// Columns with two different non-gap symbols.
    pub fn mismatch_count(&self) -> usize {
        self.columns()
            .filter(|&(a, b)| a != b && a != GAP && b != GAP)
            .count()
    }

    /// Gap symbols in the first row.
    pub fn gaps_seq1(&self) -> usize {
        self.aligned1.bytes().filter(|&b| b == GAP).count()
    }

    /// Gap symbols in the second row.
    pub fn gaps_seq2(&self) -> usize {
        self.aligned2.bytes().filter(|&b| b == GAP).count()
    }

    /// Gap symbols across both rows.
    pub fn total_gaps(&self) -> usize {
        self.gaps_seq1() + self.gaps_seq2()
    }

    /// Maximal runs of consecutive gaps, counted per row and summed.
    pub fn gap_openings(&self) -> usize {
        gap_runs(&self.aligned1) + gap_runs(&self.aligned2)
    }

    /// Fraction of columns that are exact matches; zero for an empty alignment.
    pub fn identity(&self) -> f64 {
        let len = self.alignment_length();
        if len == 0 {
            0.0
        } else {
            self.match_count() as f64 / len as f64
        }
    }

    /// Identity expressed as a percentage.
    pub fn percent_identity(&self) -> f64 {
        self.identity() * 100.0
    }

    /// Per-column operations, run-length encoded.
    pub fn cigar_ops(&self) -> Vec<CigarOp> {
        run_length_encode(
            self.columns()
                .map(|(a, b)| CigarOpKind::classify(a, b, GAP)),
        )
    }

    /// CIGAR string, e.g. `3M1I2X`. Empty for an empty alignment.
    pub fn to_cigar(&self) -> String {
        self.cigar_ops().iter().map(CigarOp::to_string).collect()
    }

    /// Three-line view (`row1`, match line, `row2`) wrapped at `width` columns.
    ///
    /// The match line uses `|` for matches, `.` for mismatches and a space for
    /// gap columns.
    pub fn format_pretty(&self, width: usize) -> String {
        let width = width.max(1);
        let row1 = self.aligned1.as_bytes();
        let row2 = self.aligned2.as_bytes();
        let mut out = String::new();

        for (chunk1, chunk2) in row1.chunks(width).zip(row2.chunks(width)) {
            let markers: String = chunk1
                .iter()
                .zip(chunk2)
                .map(|(&a, &b)| match CigarOpKind::classify(a, b, GAP) {
                    CigarOpKind::Match => '|',
                    CigarOpKind::Mismatch => '.',
                    CigarOpKind::Insertion | CigarOpKind::Deletion => ' ',
                })
                .collect();
            out.push_str("Seq1: ");
            out.extend(chunk1.iter().map(|&b| char::from(b)));
            out.push_str("\n      ");
            out.push_str(&markers);
            out.push_str("\nSeq2: ");
            out.extend(chunk2.iter().map(|&b| char::from(b)));
            out.push('\n');
        }

        out
    }
}

fn gap_runs(row: &str) -> usize {
    let mut runs = 0;
    let mut in_gap = false;
    for symbol in row.bytes() {
        if symbol == GAP {
            if !in_gap {
                runs += 1;
            }
            in_gap = true;
        } else {
            in_gap = false;
        }
    }
    runs
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} alignment", self.kind)?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Identity: {:.1}%", self.percent_identity())?;
        writeln!(f, "CIGAR: {}", self.to_cigar())?;
        writeln!(
            f,
            "Range: seq1[{}..{}] seq2[{}..{}]",
            self.start1, self.end1, self.start2, self.end2
        )?;
        write!(f, "{}", self.format_pretty(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gapped() -> Alignment {
        Alignment::from_parts("AC--GT-A", "ACTTG-CA", 0, (0, 5), (0, 7), AlignmentKind::Global)
            .unwrap()
    }

    #[test]
    fn rows_must_have_equal_length() {
        let err = Alignment::from_parts("ACG", "AC", 1, (0, 3), (0, 2), AlignmentKind::Local)
            .unwrap_err();
        assert!(matches!(err, AlignmentError::LengthMismatch { len1: 3, len2: 2 }));
    }

    #[test]
    fn column_statistics() {
        let aln = gapped();
        assert_eq!(aln.alignment_length(), 8);
        assert_eq!(aln.match_count(), 4);
        assert_eq!(aln.mismatch_count(), 0);
        assert_eq!(aln.gaps_seq1(), 3);
        assert_eq!(aln.gaps_seq2(), 1);
        assert_eq!(aln.total_gaps(), 4);
        assert_eq!(aln.gap_openings(), 3);
        assert!((aln.identity() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cigar_run_length_encodes_columns() {
        assert_eq!(gapped().to_cigar(), "2M2I1M1D1I1M");

        let mismatch =
            Alignment::from_parts("ACGT", "AGGA", 0, (0, 4), (0, 4), AlignmentKind::Global)
                .unwrap();
        assert_eq!(mismatch.to_cigar(), "1M1X1M1X");
        assert_eq!(mismatch.mismatch_count(), 2);
    }

    #[test]
    fn empty_alignment_is_well_defined() {
        let empty = Alignment::from_parts("", "", 0, (0, 0), (0, 0), AlignmentKind::Local).unwrap();
        assert_eq!(empty.identity(), 0.0);
        assert_eq!(empty.to_cigar(), "");
        assert_eq!(empty.gap_openings(), 0);
        assert_eq!(empty.format_pretty(10), "");
    }

    #[test]
    fn pretty_view_wraps() {
        let aln = Alignment::from_parts("ACGTA", "AC-TT", 0, (0, 5), (0, 4), AlignmentKind::Global)
            .unwrap();
        assert_eq!(
            aln.format_pretty(3),
            "Seq1: ACG\n      || \nSeq2: AC-\nSeq1: TA\n      |.\nSeq2: TT\n"
        );
    }

    #[test]
    fn display_summarises() {
        let rendered = gapped().to_string();
        assert!(rendered.starts_with("global alignment\n"));
        assert!(rendered.contains("Identity: 50.0%"));
        assert!(rendered.contains("CIGAR: 2M2I1M1D1I1M"));
    }
}
