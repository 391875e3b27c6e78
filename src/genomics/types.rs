use std::fmt;

/// CIGAR operation kinds produced by pairwise alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CigarOpKind {
    /// Both symbols present and identical.
    Match,
    /// Both symbols present but different.
    Mismatch,
    /// Column with a gap in the first sequence.
    Insertion,
    /// Column with a gap in the second sequence.
    Deletion,
}

impl CigarOpKind {
    /// Single-character code used in CIGAR strings.
    pub fn code(self) -> char {
        match self {
            CigarOpKind::Match => 'M',
            CigarOpKind::Mismatch => 'X',
            CigarOpKind::Insertion => 'I',
            CigarOpKind::Deletion => 'D',
        }
    }

    /// Classify one alignment column. `gap` is the gap symbol.
    pub fn classify(a: u8, b: u8, gap: u8) -> Self {
        if a == gap {
            CigarOpKind::Insertion
        } else if b == gap {
            CigarOpKind::Deletion
        } else if a == b {
            CigarOpKind::Match
        } else {
            CigarOpKind::Mismatch
        }
    }
}

/// CIGAR operation with run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CigarOp {
    /// Operation kind.
    pub kind: CigarOpKind,
    /// Number of consecutive columns covered by the operation.
    pub len: u32,
}

impl CigarOp {
    /// Construct a new CIGAR operation.
    pub fn new(kind: CigarOpKind, len: u32) -> Self {
        Self { kind, len }
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.kind.code())
    }
}

/// Run-length encode a stream of column kinds.
pub fn run_length_encode(kinds: impl IntoIterator<Item = CigarOpKind>) -> Vec<CigarOp> {
    let mut ops: Vec<CigarOp> = Vec::new();
    for kind in kinds {
        match ops.last_mut() {
            Some(last) if last.kind == kind => last.len += 1,
            _ => ops.push(CigarOp::new(kind, 1)),
        }
    }
    ops
}
