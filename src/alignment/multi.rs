//! One query against many targets.

use tracing::debug;

use super::local::smith_waterman;
use super::result::Alignment;
use super::scoring::ScoringMatrix;
use super::AlignmentError;
use crate::genomics::Sequence;

/// Local alignment of `seq1` against `seq2` with [`ScoringMatrix::default_dna`].
pub fn simple_align(seq1: &Sequence, seq2: &Sequence) -> Result<Alignment, AlignmentError> {
    smith_waterman(seq1, seq2, &ScoringMatrix::default())
}

/// Align `query` against each target in order, tagging every result with the
/// target's index.
pub fn align_against_multiple(
    query: &Sequence,
    targets: &[Sequence],
    scoring: &ScoringMatrix,
) -> Result<Vec<(usize, Alignment)>, AlignmentError> {
    align_each(query, targets, |q, t| smith_waterman(q, t, scoring))
}

/// Run `align` for every target in order. Fails fast on the first error.
pub(crate) fn align_each<F>(
    query: &Sequence,
    targets: &[Sequence],
    mut align: F,
) -> Result<Vec<(usize, Alignment)>, AlignmentError>
where
    F: FnMut(&Sequence, &Sequence) -> Result<Alignment, AlignmentError>,
{
    if targets.is_empty() {
        return Err(AlignmentError::NoTargets);
    }

    let results = targets
        .iter()
        .enumerate()
        .map(|(index, target)| align(query, target).map(|aln| (index, aln)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(targets = targets.len(), "multi-target alignment complete");
    Ok(results)
}

/// Highest-scoring alignment of `query` across `targets`. Ties go to the
/// earliest target.
pub fn find_best_alignment(
    query: &Sequence,
    targets: &[Sequence],
    scoring: &ScoringMatrix,
) -> Result<(usize, Alignment), AlignmentError> {
    let results = align_against_multiple(query, targets, scoring)?;
    pick_best(results)
}

pub(crate) fn pick_best(
    results: Vec<(usize, Alignment)>,
) -> Result<(usize, Alignment), AlignmentError> {
    let mut best: Option<(usize, Alignment)> = None;
    for (index, aln) in results {
        let better = match &best {
            Some((_, current)) => aln.score() > current.score(),
            None => true,
        };
        if better {
            best = Some((index, aln));
        }
    }
    best.ok_or(AlignmentError::NoTargets)
}
