//! Space accounting for dynamic-programming arenas
//!
//! Tracks how many matrix cells an alignment holds at once so the
//! O(m·n) full-matrix and O(n) two-row paths can be verified.

mod allocator;

pub use allocator::SpaceTracker;

/// Detailed space profile (if enabled)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceProfile {
    /// Maximum cells live at once
    pub max_cells: usize,

    /// Largest score arena allocated
    pub score_cells_max: usize,
    /// Largest traceback arena allocated
    pub traceback_cells_max: usize,
    /// Largest rolling-row buffer allocated
    pub row_cells_max: usize,

    /// Number of DP fills observed
    pub fills: usize,
}

impl SpaceProfile {
    /// Verify bound is satisfied
    pub fn satisfies_bound(&self, bound: usize) -> bool {
        self.max_cells <= bound
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Max cells: {} over {} fill(s)\nComponents:\n  Score: {}\n  Traceback: {}\n  Rows: {}",
            self.max_cells,
            self.fills,
            self.score_cells_max,
            self.traceback_cells_max,
            self.row_cells_max
        )
    }
}

/// Cells held by a full `(m+1)×(n+1)` score arena plus its traceback arena.
pub fn full_matrix_cells(m: usize, n: usize) -> usize {
    2 * (m + 1) * (n + 1)
}

/// Cells held by the two rolling rows of width `n+1`.
pub fn two_row_cells(n: usize) -> usize {
    2 * (n + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_helpers() {
        assert_eq!(full_matrix_cells(3, 4), 40);
        assert_eq!(two_row_cells(4), 10);
    }

    #[test]
    fn report_mentions_components() {
        let profile = SpaceProfile {
            max_cells: 40,
            score_cells_max: 20,
            traceback_cells_max: 20,
            row_cells_max: 0,
            fills: 1,
        };
        assert!(profile.satisfies_bound(40));
        assert!(!profile.satisfies_bound(39));
        let report = profile.report();
        assert!(report.contains("Traceback: 20"));
        assert!(report.contains("1 fill(s)"));
    }
}
