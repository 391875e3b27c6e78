//! Flat DP arenas shared by the local and global aligners.

use crate::space::SpaceTracker;

/// Winning move recorded for a DP cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Consume one symbol from each sequence.
    Diagonal,
    /// Consume from the first sequence only (gap in the second).
    Up,
    /// Consume from the second sequence only (gap in the first).
    Left,
    /// Terminate traceback (local alignment only).
    Stop,
}

/// Row-major `(m+1)×(n+1)` arena indexed by `i*(n+1)+j`.
#[derive(Debug, Clone)]
pub(crate) struct DpMatrix<T> {
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> DpMatrix<T> {
    pub(crate) fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> T {
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: T) {
        self.cells[i * self.cols + j] = value;
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Score and traceback arenas for one alignment, with their cells registered
/// on a [`SpaceTracker`] for the lifetime of the fill.
#[derive(Debug)]
pub(crate) struct DpArena {
    pub(crate) scores: DpMatrix<i64>,
    pub(crate) trace: DpMatrix<Direction>,
}

impl DpArena {
    /// Allocate arenas for sequences of length `m` and `n`; every cell starts
    /// at score 0 / [`Direction::Stop`].
    pub(crate) fn allocate(m: usize, n: usize, tracker: &mut SpaceTracker) -> Self {
        let scores = DpMatrix::new(m + 1, n + 1, 0i64);
        let trace = DpMatrix::new(m + 1, n + 1, Direction::Stop);
        tracker.begin_fill();
        tracker.allocate_scores(scores.len());
        tracker.allocate_traceback(trace.len());
        Self { scores, trace }
    }

    /// Return the arena's cells to the tracker.
    pub(crate) fn release(self, tracker: &mut SpaceTracker) {
        tracker.free(self.scores.len() + self.trace.len());
    }
}
