//! Smith-Waterman local alignment with a linear gap penalty.
//!
//! Scores are floored at zero, the best cell seen during the fill becomes the
//! traceback origin and traceback stops at the first [`Direction::Stop`] cell.

use tracing::debug;

use super::matrix::{DpArena, Direction};
use super::result::{Alignment, AlignmentKind, GAP};
use super::scoring::ScoringMatrix;
use super::{check_inputs, AlignmentError};
use crate::genomics::Sequence;
use crate::space::SpaceTracker;

/// Local alignment of `seq1` against `seq2`.
///
/// The returned score is never negative and both aligned rows have equal
/// length. When no pair of symbols scores positively the alignment is empty
/// with score 0.
pub fn smith_waterman(
    seq1: &Sequence,
    seq2: &Sequence,
    scoring: &ScoringMatrix,
) -> Result<Alignment, AlignmentError> {
    let mut tracker = SpaceTracker::new(false);
    smith_waterman_tracked(seq1, seq2, scoring, &mut tracker)
}

/// [`smith_waterman`] with the score and traceback arenas recorded on
/// `tracker`.
pub fn smith_waterman_tracked(
    seq1: &Sequence,
    seq2: &Sequence,
    scoring: &ScoringMatrix,
    tracker: &mut SpaceTracker,
) -> Result<Alignment, AlignmentError> {
    align_local(seq1.as_bytes(), seq2.as_bytes(), scoring, tracker)
}

/// Local-alignment move choice. Candidates are tested diagonal, up, left and
/// each replaces the incumbent only when strictly greater, so the zero floor
/// (STOP) loses to nothing and diagonal wins every tie it is part of.
#[inline]
fn local_move(diag: i64, up: i64, left: i64) -> (i64, Direction) {
    let mut best = 0;
    let mut direction = Direction::Stop;
    if diag > best {
        best = diag;
        direction = Direction::Diagonal;
    }
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

pub(crate) fn align_local(
    s1: &[u8],
    s2: &[u8],
    scoring: &ScoringMatrix,
    tracker: &mut SpaceTracker,
) -> Result<Alignment, AlignmentError> {
    check_inputs(s1, s2)?;
    let (m, n) = (s1.len(), s2.len());
    let gap = i64::from(scoring.gap_penalty());

    // Row and column 0 stay at 0 / STOP.
    let mut arena = DpArena::allocate(m, n, tracker);

    let mut max_score = 0;
    let (mut max_i, mut max_j) = (0, 0);

    for i in 1..=m {
        for j in 1..=n {
            let diag =
                arena.scores.get(i - 1, j - 1) + i64::from(scoring.score(s1[i - 1], s2[j - 1]));
            let up = arena.scores.get(i - 1, j) + gap;
            let left = arena.scores.get(i, j - 1) + gap;

            let (best, direction) = local_move(diag, up, left);
            arena.scores.set(i, j, best);
            arena.trace.set(i, j, direction);

            // First occurrence wins on ties.
            if best > max_score {
                max_score = best;
                max_i = i;
                max_j = j;
            }
        }
    }

    let alignment = traceback_local(s1, s2, &arena, max_score, (max_i, max_j));
    arena.release(tracker);

    debug!(
        rows = m,
        cols = n,
        score = alignment.score(),
        columns = alignment.alignment_length(),
        "smith-waterman complete"
    );
    Ok(alignment)
}

fn traceback_local(
    s1: &[u8],
    s2: &[u8],
    arena: &DpArena,
    score: i64,
    origin: (usize, usize),
) -> Alignment {
    let (mut i, mut j) = origin;
    let mut row1 = Vec::with_capacity(i + j);
    let mut row2 = Vec::with_capacity(i + j);

    while i > 0 && j > 0 {
        match arena.trace.get(i, j) {
            Direction::Stop => break,
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
        }
    }

    Alignment::from_traceback(
        row1,
        row2,
        score,
        (i, origin.0),
        (j, origin.1),
        AlignmentKind::Local,
    )
}
