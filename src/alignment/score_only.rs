//! Local-alignment score in O(n) space.
//!
//! Runs the Smith-Waterman recurrence over two rolling rows of width `n+1`
//! and keeps only the running maximum. No traceback is possible, but the score
//! is identical to [`smith_waterman`](super::smith_waterman) for the same
//! inputs.

use tracing::debug;

use super::scoring::ScoringMatrix;
use super::{check_inputs, AlignmentError};
use crate::genomics::Sequence;
use crate::space::{two_row_cells, SpaceTracker};

/// Best local-alignment score of `seq1` against `seq2`.
pub fn alignment_score_only(
    seq1: &Sequence,
    seq2: &Sequence,
    scoring: &ScoringMatrix,
) -> Result<i64, AlignmentError> {
    let mut tracker = SpaceTracker::new(false);
    alignment_score_only_tracked(seq1, seq2, scoring, &mut tracker)
}

/// [`alignment_score_only`] with the rolling rows recorded on `tracker`.
pub fn alignment_score_only_tracked(
    seq1: &Sequence,
    seq2: &Sequence,
    scoring: &ScoringMatrix,
    tracker: &mut SpaceTracker,
) -> Result<i64, AlignmentError> {
    score_local(seq1.as_bytes(), seq2.as_bytes(), scoring, tracker)
}

pub(crate) fn score_local(
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringMatrix,
    tracker: &mut SpaceTracker,
) -> Result<i64, AlignmentError> {
    check_inputs(s1, s2)?;
    let n = s2.len();
    let gap = i64::from(scoring.gap_penalty());

    let mut prev = vec![0i64; n + 1];
    let mut curr = vec![0i64; n + 1];
    tracker.begin_fill();
    tracker.allocate_rows(two_row_cells(n));

    let mut max_score = 0i64;
    for &a in s1 {
        // curr[0] is the zero column and is never written.
        for j in 1..=n {
            let diag = prev[j - 1] + i64::from(scoring.score(a, s2[j - 1]));
            let up = prev[j] + gap;
            let left = curr[j - 1] + gap;
            let best = 0i64.max(diag).max(up).max(left);
            curr[j] = best;
            max_score = max_score.max(best);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    tracker.free(two_row_cells(n));
    debug!(rows = s1.len(), cols = n, score = max_score, "score-only pass complete");
    Ok(max_score)
}
