//! Pairwise nucleotide alignment.
//!
//! Two full-matrix dynamic programs share one flat arena layout
//! ([`smith_waterman`] for local alignment, [`needleman_wunsch`] for global
//! alignment), and [`alignment_score_only`] computes the local score in two
//! rolling rows. Every entry point has a `_tracked` twin that records its DP
//! cells on a [`SpaceTracker`].
//!
//! [`Aligner`] bundles a mode, a [`ScoringMatrix`] and a tracker for callers
//! that run many alignments with one configuration.

mod global;
mod local;
mod matrix;
mod multi;
mod result;
mod score_only;
mod scoring;

pub use global::{needleman_wunsch, needleman_wunsch_tracked};
pub use local::{smith_waterman, smith_waterman_tracked};
pub use matrix::Direction;
pub use multi::{align_against_multiple, find_best_alignment, simple_align};
pub use result::{Alignment, AlignmentKind, GAP};
pub use score_only::{alignment_score_only, alignment_score_only_tracked};
pub use scoring::{ScoringError, ScoringMatrix};

use thiserror::Error;

use crate::genomics::{Sequence, SequenceError};
use crate::space::{SpaceProfile, SpaceTracker};

/// Errors surfaced by the alignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// One of the inputs had no symbols.
    #[error("cannot align an empty sequence")]
    EmptyInput,

    /// Aligned rows supplied to [`Alignment::from_parts`] differ in length.
    #[error("aligned rows differ in length: {len1} vs {len2}")]
    LengthMismatch {
        /// Length of the first row.
        len1: usize,
        /// Length of the second row.
        len2: usize,
    },

    /// A multi-target search was given no targets.
    #[error("no target sequences supplied")]
    NoTargets,

    /// Scoring parameters were rejected.
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// A sequence could not be built.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// The one precondition the engine re-checks: both inputs are non-empty.
pub(crate) fn check_inputs(s1: &[u8], s2: &[u8]) -> Result<(), AlignmentError> {
    if s1.is_empty() || s2.is_empty() {
        return Err(AlignmentError::EmptyInput);
    }
    Ok(())
}

/// Which dynamic program an [`Aligner`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentMode {
    /// Smith-Waterman.
    #[default]
    Local,
    /// Needleman-Wunsch.
    Global,
}

/// Configuration for an [`Aligner`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignerConfig {
    /// Local or global alignment.
    pub mode: AlignmentMode,
    /// Scoring parameters.
    pub scoring: ScoringMatrix,
    /// Enable detailed space profiling.
    pub profile_space: bool,
}

impl AlignerConfig {
    /// Configuration for `mode` with default DNA scoring.
    pub fn new(mode: AlignmentMode) -> Self {
        Self {
            mode,
            scoring: ScoringMatrix::default(),
            profile_space: false,
        }
    }

    /// Smith-Waterman with default DNA scoring.
    pub fn local() -> Self {
        Self::new(AlignmentMode::Local)
    }

    /// Needleman-Wunsch with default DNA scoring.
    pub fn global() -> Self {
        Self::new(AlignmentMode::Global)
    }

    /// Replace the scoring parameters.
    pub fn with_scoring(mut self, scoring: ScoringMatrix) -> Self {
        self.scoring = scoring;
        self
    }

    /// Toggle space profiling.
    pub fn with_space_profiling(mut self, enabled: bool) -> Self {
        self.profile_space = enabled;
        self
    }
}

/// Runs alignments under one configuration and accumulates their space usage.
#[derive(Debug)]
pub struct Aligner {
    config: AlignerConfig,
    space_tracker: SpaceTracker,
}

impl Aligner {
    /// Create an aligner.
    pub fn new(config: AlignerConfig) -> Self {
        let space_tracker = SpaceTracker::new(config.profile_space);
        Self {
            config,
            space_tracker,
        }
    }

    /// Access configuration.
    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Align `seq1` against `seq2` in the configured mode.
    pub fn align(&mut self, seq1: &Sequence, seq2: &Sequence) -> Result<Alignment, AlignmentError> {
        let scoring = self.config.scoring;
        match self.config.mode {
            AlignmentMode::Local => {
                smith_waterman_tracked(seq1, seq2, &scoring, &mut self.space_tracker)
            }
            AlignmentMode::Global => {
                needleman_wunsch_tracked(seq1, seq2, &scoring, &mut self.space_tracker)
            }
        }
    }

    /// Score `seq1` against `seq2` without keeping a traceback.
    ///
    /// Local mode uses the two-row pass. Global mode has no reduced-memory
    /// path and returns the full Needleman-Wunsch score.
    pub fn score(&mut self, seq1: &Sequence, seq2: &Sequence) -> Result<i64, AlignmentError> {
        match self.config.mode {
            AlignmentMode::Local => alignment_score_only_tracked(
                seq1,
                seq2,
                &self.config.scoring,
                &mut self.space_tracker,
            ),
            AlignmentMode::Global => self.align(seq1, seq2).map(|aln| aln.score()),
        }
    }

    /// Align `query` against every target in order.
    pub fn align_against_multiple(
        &mut self,
        query: &Sequence,
        targets: &[Sequence],
    ) -> Result<Vec<(usize, Alignment)>, AlignmentError> {
        multi::align_each(query, targets, |q, t| self.align(q, t))
    }

    /// Best-scoring target for `query`; ties go to the earliest target.
    pub fn find_best_alignment(
        &mut self,
        query: &Sequence,
        targets: &[Sequence],
    ) -> Result<(usize, Alignment), AlignmentError> {
        let results = self.align_against_multiple(query, targets)?;
        multi::pick_best(results)
    }

    /// Most cells held at once across every alignment run so far.
    pub fn max_cells_used(&self) -> usize {
        self.space_tracker.max_cells_used()
    }

    /// Take the space profile (profiling stops afterwards).
    pub fn take_space_profile(&mut self) -> Option<SpaceProfile> {
        self.space_tracker.take_profile()
    }
}
