//! Needleman-Wunsch global alignment with a linear gap penalty.

use tracing::debug;

use super::matrix::{DpArena, Direction};
use super::result::{Alignment, AlignmentKind, GAP};
use super::scoring::ScoringMatrix;
use super::{check_inputs, AlignmentError};
use crate::genomics::Sequence;
use crate::space::SpaceTracker;

/// Global alignment of `seq1` against `seq2`, spanning both sequences end to
/// end. The score equals the bottom-right DP cell.
pub fn needleman_wunsch(
    seq1: &Sequence,
    seq2: &Sequence,
    scoring: &ScoringMatrix,
) -> Result<Alignment, AlignmentError> {
    let mut tracker = SpaceTracker::new(false);
    needleman_wunsch_tracked(seq1, seq2, scoring, &mut tracker)
}

/// [`needleman_wunsch`] with the score and traceback arenas recorded on
/// `tracker`.
pub fn needleman_wunsch_tracked(
    seq1: &Sequence,
    seq2: &Sequence,
    scoring: &ScoringMatrix,
    tracker: &mut SpaceTracker,
) -> Result<Alignment, AlignmentError> {
    align_global(seq1.as_bytes(), seq2.as_bytes(), scoring, tracker)
}

/// Global-alignment move choice: diagonal is the incumbent, then up and left
/// replace it only when strictly greater. There is no zero floor.
#[inline]
fn global_move(diag: i64, up: i64, left: i64) -> (i64, Direction) {
    let mut best = diag;
    let mut direction = Direction::Diagonal;
    if up > best {
        best = up;
        direction = Direction::Up;
    }
    if left > best {
        best = left;
        direction = Direction::Left;
    }
    (best, direction)
}

pub(crate) fn align_global(
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringMatrix,
    tracker: &mut SpaceTracker,
) -> Result<Alignment, AlignmentError> {
    check_inputs(s1, s2)?;
    let (m, n) = (s1.len(), s2.len());
    let gap = i64::from(scoring.gap_penalty());

    let mut arena = DpArena::allocate(m, n, tracker);

    // Borders: H[i][0] = i·gap (UP), H[0][j] = j·gap (LEFT).
    for i in 1..=m {
        arena.scores.set(i, 0, gap * i as i64);
        arena.trace.set(i, 0, Direction::Up);
    }
    for j in 1..=n {
        arena.scores.set(0, j, gap * j as i64);
        arena.trace.set(0, j, Direction::Left);
    }

    for i in 1..=m {
        for j in 1..=n {
            let diag =
                arena.scores.get(i - 1, j - 1) + i64::from(scoring.score(s1[i - 1], s2[j - 1]));
            let up = arena.scores.get(i - 1, j) + gap;
            let left = arena.scores.get(i, j - 1) + gap;

            let (best, direction) = global_move(diag, up, left);
            arena.scores.set(i, j, best);
            arena.trace.set(i, j, direction);
        }
    }

    let score = arena.scores.get(m, n);
    let alignment = traceback_global(s1, s2, &arena, score);
    arena.release(tracker);

    debug!(
        rows = m,
        cols = n,
        score,
        columns = alignment.alignment_length(),
        "needleman-wunsch complete"
    );
    Ok(alignment)
}

fn traceback_global(s1: &[u8], s2: &[u8], arena: &DpArena, score: i64) -> Alignment {
    let (m, n) = (s1.len(), s2.len());
    let (mut i, mut j) = (m, n);
    let mut row1 = Vec::with_capacity(m + n);
    let mut row2 = Vec::with_capacity(m + n);

    while i > 0 || j > 0 {
        // Border cells always carry their fixed gap direction.
        let direction = if i == 0 {
            Direction::Left
        } else if j == 0 {
            Direction::Up
        } else {
            arena.trace.get(i, j)
        };

        match direction {
            Direction::Diagonal => {
                row1.push(s1[i - 1]);
                row2.push(s2[j - 1]);
                i -= 1;
                j -= 1;
            }
            Direction::Up => {
                row1.push(s1[i - 1]);
                row2.push(GAP);
                i -= 1;
            }
            Direction::Left => {
                row1.push(GAP);
                row2.push(s2[j - 1]);
                j -= 1;
            }
            // Never written inside the global matrix.
            Direction::Stop => break,
        }
    }

    Alignment::from_traceback(row1, row2, score, (0, m), (0, n), AlignmentKind::Global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn dna(text: &str) -> Sequence {
        Sequence::dna(text).unwrap()
    }

    #[test]
    fn empty_slices_are_rejected() {
        let mut tracker = SpaceTracker::new(false);
        assert!(matches!(
            align_global(b"", b"", &ScoringMatrix::default(), &mut tracker),
            Err(AlignmentError::EmptyInput)
        ));
    }

    #[test]
    fn perfect_match() {
        let aln = needleman_wunsch(&dna("ACGT"), &dna("ACGT"), &ScoringMatrix::default()).unwrap();
        assert_eq!(aln.aligned1(), "ACGT");
        assert_eq!(aln.aligned2(), "ACGT");
        assert_eq!(aln.score(), 8);
        assert_eq!(aln.match_count(), 4);
        assert_eq!(aln.kind(), AlignmentKind::Global);
    }

    #[test]
    fn longer_first_sequence_needs_gaps() {
        let aln =
            needleman_wunsch(&dna("ATCGATCG"), &dna("ATCG"), &ScoringMatrix::default()).unwrap();
        assert_eq!(aln.aligned1().len(), aln.aligned2().len());
        assert!(aln.total_gaps() >= 4);
        assert_eq!(aln.aligned1().replace('-', ""), "ATCGATCG");
        assert_eq!(aln.aligned2().replace('-', ""), "ATCG");
        assert_eq!((aln.start1(), aln.end1()), (0, 8));
        assert_eq!((aln.start2(), aln.end2()), (0, 4));
        // 4 matches, 4 gap columns.
        assert_eq!(aln.score(), 4 * 2 - 4 * 2);
    }

    #[test]
    fn diagonal_wins_tie_over_left() {
        // H[1][2]: diag = H[0][1] + 2 = 0 and left = H[1][1] - 2 = 0.
        let aln = needleman_wunsch(&dna("A"), &dna("AA"), &ScoringMatrix::default()).unwrap();
        assert_eq!(aln.aligned1(), "-A");
        assert_eq!(aln.aligned2(), "AA");
        assert_eq!(aln.score(), 0);
        assert_eq!(aln.to_cigar(), "1I1M");
    }

    #[test]
    fn diagonal_wins_tie_over_up() {
        let aln = needleman_wunsch(&dna("AA"), &dna("A"), &ScoringMatrix::default()).unwrap();
        assert_eq!(aln.aligned1(), "AA");
        assert_eq!(aln.aligned2(), "-A");
        assert_eq!(aln.to_cigar(), "1D1M");
    }

    #[test]
    fn all_mismatches_stay_diagonal() {
        let aln = needleman_wunsch(&dna("AAAA"), &dna("TTTT"), &ScoringMatrix::default()).unwrap();
        assert_eq!(aln.score(), -4);
        assert_eq!(aln.to_cigar(), "4X");
        assert_eq!(aln.identity(), 0.0);
    }

    #[test]
    fn extreme_gap_penalty_does_not_overflow() {
        let scoring = ScoringMatrix::linear(1, -1, i32::MIN).unwrap();
        let aln = needleman_wunsch(&dna("AAA"), &dna("A"), &scoring).unwrap();
        assert_eq!(aln.score(), 1 + 2 * i64::from(i32::MIN));
        assert_eq!(aln.total_gaps(), 2);
    }

    #[test_case(-2, -2, -2 => (-2, Direction::Diagonal); "three way tie keeps diagonal")]
    #[test_case(-4, -2, -2 => (-2, Direction::Up); "up beats left on tie")]
    #[test_case(-4, -3, -2 => (-2, Direction::Left); "left strictly best")]
    #[test_case(-5, -6, -7 => (-5, Direction::Diagonal); "negative diagonal is kept")]
    fn move_tie_break(diag: i64, up: i64, left: i64) -> (i64, Direction) {
        global_move(diag, up, left)
    }
}
