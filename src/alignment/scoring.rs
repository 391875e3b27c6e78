use thiserror::Error;

/// Invalid scoring parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A parameter violates its sign constraint.
    #[error("invalid {parameter} {value}: must be {constraint}")]
    InvalidSign {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value that was supplied.
        value: i32,
        /// Human readable constraint (`> 0` or `<= 0`).
        constraint: &'static str,
    },
}

/// Match/mismatch/gap costs for nucleotide alignment.
///
/// Only a single linear gap penalty is used by the aligners: every gap column
/// costs `gap_open_penalty`. `gap_extend_penalty` is validated and carried for
/// callers but has no effect on scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoringMatrix {
    match_score: i32,
    mismatch_penalty: i32,
    gap_open_penalty: i32,
    gap_extend_penalty: i32,
}

impl ScoringMatrix {
    /// Validate and build a scoring matrix.
    ///
    /// `match_score` must be positive; every penalty must be `<= 0`.
    pub fn new(
        match_score: i32,
        mismatch_penalty: i32,
        gap_open_penalty: i32,
        gap_extend_penalty: i32,
    ) -> Result<Self, ScoringError> {
        if match_score <= 0 {
            return Err(ScoringError::InvalidSign {
                parameter: "match score",
                value: match_score,
                constraint: "> 0",
            });
        }
        for (parameter, value) in [
            ("mismatch penalty", mismatch_penalty),
            ("gap open penalty", gap_open_penalty),
            ("gap extend penalty", gap_extend_penalty),
        ] {
            if value > 0 {
                return Err(ScoringError::InvalidSign {
                    parameter,
                    value,
                    constraint: "<= 0",
                });
            }
        }
        Ok(Self {
            match_score,
            mismatch_penalty,
            gap_open_penalty,
            gap_extend_penalty,
        })
    }

    /// Linear gap model: open and extend are both `gap`.
    pub fn linear(match_score: i32, mismatch_penalty: i32, gap: i32) -> Result<Self, ScoringError> {
        Self::new(match_score, mismatch_penalty, gap, gap)
    }

    /// Default DNA scoring: +2 / −1 / gap −2 (extend −1).
    pub const fn default_dna() -> Self {
        Self {
            match_score: 2,
            mismatch_penalty: -1,
            gap_open_penalty: -2,
            gap_extend_penalty: -1,
        }
    }

    /// BLAST-like nucleotide scoring: +1 / −3 / gap −5 (extend −2).
    pub const fn blast_like() -> Self {
        Self {
            match_score: 1,
            mismatch_penalty: -3,
            gap_open_penalty: -5,
            gap_extend_penalty: -2,
        }
    }

    /// Reward for identical symbols.
    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    /// Cost of aligning different symbols.
    pub fn mismatch_penalty(&self) -> i32 {
        self.mismatch_penalty
    }

    /// Cost of opening a gap.
    pub fn gap_open_penalty(&self) -> i32 {
        self.gap_open_penalty
    }

    /// Cost of extending a gap (not used by the linear aligners).
    pub fn gap_extend_penalty(&self) -> i32 {
        self.gap_extend_penalty
    }

    /// Per-column gap cost under the linear model.
    #[inline]
    pub fn gap_penalty(&self) -> i32 {
        self.gap_open_penalty
    }

    /// Score for aligning `a` against `b`. Identical symbols (including two
    /// `N`s) score as a match.
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }
}

impl Default for ScoringMatrix {
    fn default() -> Self {
        Self::default_dna()
    }
}
